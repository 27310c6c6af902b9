use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

const fn default_width() -> f64 {
    800.0
}

const fn default_height() -> f64 {
    400.0
}

/// Size of the chart area the series is projected on
#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ChartQuery {
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
}

/// Pointer position on a chart of the given width
#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CrosshairQuery {
    pub x: f64,
    #[serde(default = "default_width")]
    pub width: f64,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HoldingsQuery {
    /// Instant of the focused bucket; the latest value is reported when absent
    pub at: Option<DateTime<Utc>>,
}
