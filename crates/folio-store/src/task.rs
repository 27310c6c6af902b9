use std::sync::Arc;

use anyhow::Result;
use pragma_common::services::{Service, ServiceRunner};

use folio_metrics::FetchMetrics;
use folio_source::SpotSource;

use crate::service::PortfolioService;
use crate::store::PortfolioStore;

pub struct PortfolioTask {
    store: PortfolioStore,
    source: Arc<dyn SpotSource>,
    metrics: Arc<FetchMetrics>,
}

impl PortfolioTask {
    pub fn new(store: PortfolioStore, source: Arc<dyn SpotSource>, metrics: Arc<FetchMetrics>) -> Self {
        Self {
            store,
            source,
            metrics,
        }
    }
}

#[async_trait::async_trait]
impl Service for PortfolioTask {
    async fn start<'a>(&mut self, mut runner: ServiceRunner<'a>) -> Result<()> {
        let store = self.store.clone();
        let source = self.source.clone();
        let metrics = self.metrics.clone();

        runner.spawn_loop(move |ctx| async move {
            let service = PortfolioService::new(store, source, metrics);
            if let Some(result) = ctx.run_until_cancelled(service.run_forever()).await {
                result?;
            }
            Ok::<(), anyhow::Error>(())
        });

        Ok(())
    }
}
