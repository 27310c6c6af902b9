use chrono::{DateTime, Utc};

use folio_chart::{ChartView, TimeScale, ValueScale, focused_holdings, focused_value};
use folio_store::{DisplaySet, readiness};
use folio_types::ValuePoint;

use crate::{
    AppState,
    dto::{ChartDTO, ChartPointDTO, GapSegmentDTO, HoldingsDTO},
    errors::ApiError,
};

/// Display set and whether it is ready for the selected scope.
pub async fn current_display(state: &AppState) -> (DisplaySet, bool) {
    let store = state.store.read().await;
    let display = store.display().clone();
    let ready = readiness(&store).is_ready() && display.scope == store.scope();
    (display, ready)
}

/// Chart view of the current display set.
///
/// The display set is bucketed with the scope it was built for, so a view
/// shown while a newly selected scope loads stays consistent.
pub async fn current_view(state: &AppState) -> ChartView {
    let (display, ready) = current_display(state).await;
    ChartView::build(&display.records, display.scope, state.display_policy, ready)
}

/// Token breakdown of the bucket containing `at`. Without `at` the list is
/// empty and the total is the latest series value.
pub async fn holdings_dto(state: &AppState, at: Option<DateTime<Utc>>) -> HoldingsDTO {
    let (display, ready) = current_display(state).await;
    let view = ChartView::build(&display.records, display.scope, state.display_policy, ready);

    let holdings =
        at.map(|at| focused_holdings(&display.records, display.scope, state.display_policy, at));

    HoldingsDTO {
        scope: display.scope,
        at: at.map(|at| display.scope.resolution().floor(at)),
        total: focused_value(holdings.as_deref(), &view.series),
        holdings: holdings.unwrap_or_default(),
    }
}

pub fn validate_dimension(name: &str, value: f64) -> Result<f64, ApiError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ApiError::BadRequest(format!(
            "{name} must be a positive number, got {value}"
        )))
    }
}

fn project(point: &ValuePoint, time: &TimeScale, value: &ValueScale) -> ChartPointDTO {
    ChartPointDTO {
        t: point.timestamp,
        v: point.value,
        x: time.map(point.timestamp),
        y: value.map(point.value),
    }
}

/// Projects `view` on a `width x height` chart.
pub fn chart_dto(view: &ChartView, width: f64, height: f64) -> ChartDTO {
    let scales = view.time_scale(width).zip(view.value_scale(height));

    let (main_series, gap_segments) = scales.map_or_else(
        || (Vec::new(), Vec::new()),
        |(time, value)| {
            let main = view
                .gaps
                .main_series
                .iter()
                .map(|p| project(p, &time, &value))
                .collect();
            let segments = view
                .gaps
                .gap_segments
                .iter()
                .map(|[start, end]| GapSegmentDTO {
                    start: project(start, &time, &value),
                    end: project(end, &time, &value),
                })
                .collect();
            (main, segments)
        },
    );

    ChartDTO {
        ready: view.ready,
        scope: view.scope,
        message: view.message().map(str::to_string),
        width,
        height,
        main_series,
        gap_segments,
        starting: view.starting,
        ending: view.ending,
        bounds: view.bounds,
        delta: view.ending.and_then(|end| view.delta_to(&end)),
    }
}

#[cfg(test)]
mod tests {
    use folio_chart::DisplayPolicy;
    use folio_types::{Address, Scope, SpotRecord, TokenMeta};
    use rust_decimal::{Decimal, dec};

    use super::*;

    fn spot(ts: &str, value: Decimal) -> SpotRecord {
        SpotRecord {
            owner_address: Address::new("0xa"),
            token_address: "0xeth".to_string(),
            symbol: "ETH".to_string(),
            name: "Ethereum".to_string(),
            decimals: 18,
            timestamp: ts.parse().unwrap(),
            balance: Decimal::ONE,
            price: value,
            value,
            scope: Scope::OneMonth,
            meta: TokenMeta::default(),
        }
    }

    #[test]
    fn test_validate_dimension() {
        assert!(validate_dimension("width", 320.0).is_ok());
        assert!(validate_dimension("width", 0.0).is_err());
        assert!(validate_dimension("height", f64::NAN).is_err());
    }

    #[test]
    fn test_chart_projection() {
        let records = vec![
            spot("2023-05-17T12:00:00Z", dec!(0)),
            spot("2023-05-17T13:00:00Z", dec!(100)),
            spot("2023-05-17T14:00:00Z", dec!(50)),
        ];
        let view = ChartView::build(&records, Scope::OneMonth, DisplayPolicy::All, true);

        let dto = chart_dto(&view, 200.0, 248.0);

        assert_eq!(dto.main_series.len(), 2);
        assert!((dto.main_series[0].x - 100.0).abs() < 1e-9);
        assert!((dto.main_series[0].y - 0.0).abs() < 1e-9);
        assert!((dto.main_series[1].x - 200.0).abs() < 1e-9);
        assert!((dto.main_series[1].y - 50.0).abs() < 1e-9);

        assert_eq!(dto.gap_segments.len(), 1);
        assert!((dto.gap_segments[0].start.x - 0.0).abs() < 1e-9);
        assert_eq!(dto.gap_segments[0].start.v, dec!(100));
        assert!(dto.message.is_none());
        assert_eq!(dto.delta.unwrap().formatted, "-");
    }

    #[test]
    fn test_empty_chart_has_message() {
        let view = ChartView::build(&[], Scope::OneYear, DisplayPolicy::All, false);
        let dto = chart_dto(&view, 200.0, 248.0);

        assert!(dto.main_series.is_empty());
        assert_eq!(dto.message.as_deref(), Some(folio_chart::NO_DATA));
        assert!(dto.delta.is_none());
    }
}
