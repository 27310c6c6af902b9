use serde::Serialize;

use folio_types::ValuePoint;

/// A series split into the part drawn solid and the flat segments drawn
/// dashed over the leading and trailing ranges without data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GapFixed {
    pub main_series: Vec<ValuePoint>,
    pub gap_segments: Vec<[ValuePoint; 2]>,
}

impl GapFixed {
    pub fn is_empty(&self) -> bool {
        self.main_series.is_empty()
    }
}

/// Drops zero points and bridges the missing head and tail of `series` with
/// flat segments at the nearest retained value.
///
/// Interior zeros are dropped without a segment.
pub fn fix_gaps(series: &[ValuePoint]) -> GapFixed {
    let (Some(original_first), Some(original_last)) = (series.first(), series.last()) else {
        return GapFixed::default();
    };

    let main_series: Vec<ValuePoint> = series.iter().filter(|p| !p.is_absent()).copied().collect();

    let (Some(&first_retained), Some(&last_retained)) = (main_series.first(), main_series.last()) else {
        return GapFixed::default();
    };

    let mut gap_segments = Vec::new();

    if first_retained.timestamp != original_first.timestamp {
        gap_segments.push([first_retained.at(original_first.timestamp), first_retained]);
    }

    if last_retained.timestamp != original_last.timestamp {
        gap_segments.push([last_retained, last_retained.at(original_last.timestamp)]);
    }

    GapFixed {
        main_series,
        gap_segments,
    }
}
