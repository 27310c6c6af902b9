use folio_types::{Scope, SpotRecord, ValuePoint};

use crate::{
    bucket::{DisplayPolicy, bucket_values},
    crosshair::{Crosshair, locate_at_pixel},
    gaps::{GapFixed, fix_gaps},
    scale::{TimeScale, ValueBounds, ValueScale},
    summary::Delta,
};

pub const NO_DATA: &str = "No data available";

/// Everything the renderer needs for one scope, before pixel projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartView {
    /// Whether the display set behind this view passed the readiness gate.
    pub ready: bool,
    pub scope: Scope,
    /// Bucketed series before gap fixing.
    pub series: Vec<ValuePoint>,
    pub gaps: GapFixed,
    pub starting: Option<ValuePoint>,
    pub ending: Option<ValuePoint>,
    pub bounds: Option<ValueBounds>,
}

impl ChartView {
    pub fn build(records: &[SpotRecord], scope: Scope, policy: DisplayPolicy, ready: bool) -> Self {
        let series = bucket_values(records, scope, policy);
        let gaps = fix_gaps(&series);

        Self {
            ready,
            scope,
            starting: series.first().copied(),
            ending: series.last().copied(),
            bounds: ValueBounds::of(&series),
            gaps,
            series,
        }
    }

    /// No solid line to draw.
    pub fn is_empty(&self) -> bool {
        self.gaps.is_empty()
    }

    pub fn message(&self) -> Option<&'static str> {
        self.is_empty().then_some(NO_DATA)
    }

    pub fn time_scale(&self, width: f64) -> Option<TimeScale> {
        TimeScale::for_series(&self.series, width)
    }

    pub fn value_scale(&self, height: f64) -> Option<ValueScale> {
        self.bounds.map(|bounds| ValueScale::new(bounds, height))
    }

    /// Change from the starting value to `point`.
    pub fn delta_to(&self, point: &ValuePoint) -> Option<Delta> {
        self.starting
            .map(|start| Delta::between(start.value, point.value))
    }

    /// Crosshair for pointer `x` on a chart `width` pixels wide, with the
    /// delta of the located point.
    pub fn crosshair(&self, x: f64, width: f64) -> Option<(Crosshair, Option<Delta>)> {
        let scale = self.time_scale(width)?;
        let crosshair = locate_at_pixel(&self.gaps.main_series, &scale, x)?;
        let delta = self.delta_to(&crosshair.point);
        Some((crosshair, delta))
    }
}
