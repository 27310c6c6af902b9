use std::sync::Arc;

use opentelemetry::{KeyValue, global, metrics::Counter};

#[derive(Debug)]
pub struct MetricsRegistry {
    pub fetches: Arc<FetchMetrics>,
}

impl MetricsRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            fetches: FetchMetrics::new(),
        })
    }
}

#[derive(Debug)]
pub struct FetchMetrics {
    fetches_issued: Counter<u64>,
    fetches_completed: Counter<u64>,
    display_rebuilds: Counter<u64>,
}

impl FetchMetrics {
    fn new() -> Arc<Self> {
        let meter = global::meter("folio");
        let fetches_issued = meter
            .u64_counter("spot_fetches_issued_total")
            .with_description("Number of historical spot fetches sent upstream")
            .with_unit("count")
            .init();

        let fetches_completed = meter
            .u64_counter("spot_fetches_completed_total")
            .with_description("Number of historical spot fetches that settled")
            .with_unit("count")
            .init();

        let display_rebuilds = meter
            .u64_counter("display_rebuilds_total")
            .with_description("Number of times the display set was replaced")
            .with_unit("count")
            .init();

        Arc::new(Self {
            fetches_issued,
            fetches_completed,
            display_rebuilds,
        })
    }

    pub fn record_fetch_issued(&self, scope: &str) {
        self.fetches_issued
            .add(1, &[KeyValue::new("scope", scope.to_string())]);
    }

    pub fn record_fetch_completed(&self, scope: &str, outcome: FetchOutcome) {
        self.fetches_completed.add(
            1,
            &[
                KeyValue::new("scope", scope.to_string()),
                KeyValue::new("outcome", outcome.as_str()),
            ],
        );
    }

    pub fn record_display_rebuild(&self, scope: &str, records: usize) {
        self.display_rebuilds.add(
            1,
            &[
                KeyValue::new("scope", scope.to_string()),
                KeyValue::new("empty", records == 0),
            ],
        );
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    Success,
    Error,
    /// Settled after its key was purged or reseeded.
    Discarded,
}

impl FetchOutcome {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Discarded => "discarded",
        }
    }
}
