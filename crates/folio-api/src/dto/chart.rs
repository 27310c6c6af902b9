use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use folio_chart::{Delta, Holding, ValueBounds};
use folio_types::{Scope, ValuePoint};

/// A series point with its projected position on the chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChartPointDTO {
    pub t: DateTime<Utc>,
    pub v: Decimal,
    pub x: f64,
    pub y: f64,
}

/// Flat segment drawn dashed over a range without data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GapSegmentDTO {
    pub start: ChartPointDTO,
    pub end: ChartPointDTO,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChartDTO {
    /// Every needed fetch of the selected scope has succeeded
    pub ready: bool,
    /// Scope the plotted records were fetched for
    pub scope: Scope,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub width: f64,
    pub height: f64,
    pub main_series: Vec<ChartPointDTO>,
    pub gap_segments: Vec<GapSegmentDTO>,
    pub starting: Option<ValuePoint>,
    pub ending: Option<ValuePoint>,
    pub bounds: Option<ValueBounds>,
    /// Change from the starting to the ending value
    pub delta: Option<Delta>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CrosshairDTO {
    pub point: ValuePoint,
    /// Pixel the crosshair snaps to
    pub x: f64,
    pub delta: Option<Delta>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HoldingsDTO {
    pub scope: Scope,
    /// Start of the focused bucket
    pub at: Option<DateTime<Utc>>,
    pub total: Option<Decimal>,
    pub holdings: Vec<Holding>,
}
