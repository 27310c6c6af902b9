use std::sync::Arc;

use anyhow::Result;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, info, warn};

use folio_metrics::FetchMetrics;
use folio_source::SpotSource;

use crate::{
    aggregator::DisplayAggregator,
    orchestrator::FetchOrchestrator,
    store::{PortfolioStore, StoreEvent},
};

/// Re-runs the orchestrator and the aggregator whenever the store fields
/// they read change.
pub struct PortfolioService {
    store: PortfolioStore,
    orchestrator: FetchOrchestrator,
    aggregator: DisplayAggregator,
}

impl PortfolioService {
    pub fn new(store: PortfolioStore, source: Arc<dyn SpotSource>, metrics: Arc<FetchMetrics>) -> Self {
        Self {
            orchestrator: FetchOrchestrator::new(store.clone(), source, metrics.clone()),
            aggregator: DisplayAggregator::new(store.clone(), metrics),
            store,
        }
    }

    pub async fn run_forever(&self) -> Result<()> {
        let mut events = self.store.subscribe();
        info!("portfolio pipeline started");

        self.refresh_all().await;

        loop {
            match events.recv().await {
                Ok(StoreEvent::AddressesChanged | StoreEvent::ScopeChanged(_)) => {
                    self.refresh_all().await;
                }
                Ok(StoreEvent::CacheChanged(key)) => {
                    debug!(key = %key, "cache entry changed");
                    self.rebuild_display().await;
                }
                Ok(StoreEvent::DisplayChanged) => {}
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "store events lagged, recomputing everything");
                    self.refresh_all().await;
                }
                Err(RecvError::Closed) => {
                    info!("store channel closed, stopping portfolio pipeline");
                    break;
                }
            }
        }

        self.orchestrator.drain().await;
        Ok(())
    }

    async fn refresh_all(&self) {
        let issued = self.orchestrator.sync().await;
        if !issued.is_empty() {
            debug!(
                count = issued.len(),
                in_flight = self.orchestrator.in_flight(),
                "fetches issued"
            );
        }
        self.rebuild_display().await;
    }

    async fn rebuild_display(&self) {
        if let Err(e) = self.aggregator.recompute().await {
            error!(error = %e, "display rebuild failed");
        }
    }
}
