use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::Serialize;
use utoipa::ToSchema;

use folio_types::ValuePoint;

pub const MARGIN_TOP: f64 = 100.0;
pub const MARGIN_BOTTOM: f64 = 48.0;

/// Linear mapping between instants and horizontal pixels, `[start, end]` to
/// `[0, width]`. Not clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    start_ms: i64,
    end_ms: i64,
    width: f64,
}

impl TimeScale {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, width: f64) -> Self {
        Self {
            start_ms: start.timestamp_millis(),
            end_ms: end.timestamp_millis(),
            width,
        }
    }

    /// Domain from the first to the last point of an ascending series.
    pub fn for_series(series: &[ValuePoint], width: f64) -> Option<Self> {
        let first = series.first()?;
        let last = series.last()?;
        Some(Self::new(first.timestamp, last.timestamp, width))
    }

    fn span_ms(&self) -> i64 {
        self.end_ms - self.start_ms
    }

    /// Pixel of `instant`. A zero-width domain puts every instant at the
    /// middle of the range.
    pub fn map(&self, instant: DateTime<Utc>) -> f64 {
        let span = self.span_ms();
        if span == 0 {
            return self.width / 2.0;
        }

        let offset = (instant.timestamp_millis() - self.start_ms) as f64;
        offset / span as f64 * self.width
    }

    /// Instant under pixel `x`, to the nearest millisecond. Degenerate
    /// domains and ranges invert to the domain start. Pixels beyond the
    /// representable range saturate to the earliest or latest instant.
    pub fn invert(&self, x: f64) -> DateTime<Utc> {
        let span = self.span_ms();
        if span == 0 || self.width == 0.0 || !x.is_finite() {
            return self.start();
        }

        let target = (self.start_ms as f64 + x / self.width * span as f64).round();
        let earliest = DateTime::<Utc>::MIN_UTC;
        let latest = DateTime::<Utc>::MAX_UTC;
        if target <= earliest.timestamp_millis() as f64 {
            return earliest;
        }
        if target >= latest.timestamp_millis() as f64 {
            return latest;
        }

        DateTime::from_timestamp_millis(target as i64).unwrap_or(latest)
    }

    fn start(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.start_ms).unwrap_or_default()
    }
}

/// Lowest and highest value of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct ValueBounds {
    pub min: Decimal,
    pub max: Decimal,
}

impl ValueBounds {
    pub fn of(series: &[ValuePoint]) -> Option<Self> {
        let mut values = series.iter().map(|p| p.value);
        let first = values.next()?;

        Some(values.fold(Self { min: first, max: first }, |bounds, value| Self {
            min: bounds.min.min(value),
            max: bounds.max.max(value),
        }))
    }
}

/// Vertical mapping from `[min, max]` to `[inner_height, 0]`, where the inner
/// height is the chart height minus its top and bottom margins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueScale {
    bounds: ValueBounds,
    inner_height: f64,
}

impl ValueScale {
    pub fn new(bounds: ValueBounds, height: f64) -> Self {
        Self {
            bounds,
            inner_height: (height - MARGIN_TOP - MARGIN_BOTTOM).max(0.0),
        }
    }

    /// Pixel row of `value`, measured from the top of the inner area.
    pub fn map(&self, value: Decimal) -> f64 {
        let spread = self.bounds.max - self.bounds.min;
        if spread.is_zero() {
            return self.inner_height / 2.0;
        }

        let ratio = ((value - self.bounds.min) / spread).to_f64().unwrap_or_default();
        self.inner_height - ratio * self.inner_height
    }
}
