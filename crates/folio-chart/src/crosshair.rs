use chrono::{DateTime, Utc};

use folio_types::ValuePoint;

use crate::scale::TimeScale;

/// Point under the pointer and the pixel the crosshair snaps to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crosshair {
    pub point: ValuePoint,
    pub x: f64,
}

/// Nearest point of an ascending series to `instant`.
///
/// On a tie the earlier point wins. Instants outside the series snap to its
/// first or last point.
pub fn locate(series: &[ValuePoint], instant: DateTime<Utc>) -> Option<ValuePoint> {
    if series.is_empty() {
        return None;
    }

    let index = series
        .partition_point(|p| p.timestamp <= instant)
        .clamp(1, series.len());
    let d0 = series[index - 1];

    let Some(&d1) = series.get(index) else {
        return Some(d0);
    };

    if instant - d0.timestamp > d1.timestamp - instant {
        Some(d1)
    } else {
        Some(d0)
    }
}

/// Inverts pixel `x` through `scale` and snaps to the nearest point.
pub fn locate_at_pixel(series: &[ValuePoint], scale: &TimeScale, x: f64) -> Option<Crosshair> {
    let point = locate(series, scale.invert(x))?;
    Some(Crosshair {
        point,
        x: scale.map(point.timestamp),
    })
}
