use std::sync::Arc;

use dashmap::DashMap;
use tokio::task::JoinHandle;

use folio_metrics::{FetchMetrics, FetchOutcome};
use folio_source::{SpotRequest, SpotSource, rows_into_records};
use folio_types::{FetchKey, FetchStatus, SpotRecord};

use crate::store::{PortfolioStore, StoreEvent};

struct InFlight {
    generation: u64,
    handle: JoinHandle<()>,
}

impl InFlight {
    fn is_live(&self, generation: u64) -> bool {
        self.generation == generation && !self.handle.is_finished()
    }
}

/// Issues one fetch per needed idle key and writes each outcome back into
/// the cache.
pub struct FetchOrchestrator {
    store: PortfolioStore,
    source: Arc<dyn SpotSource>,
    metrics: Arc<FetchMetrics>,
    in_flight: DashMap<FetchKey, InFlight>,
}

impl FetchOrchestrator {
    pub fn new(store: PortfolioStore, source: Arc<dyn SpotSource>, metrics: Arc<FetchMetrics>) -> Self {
        Self {
            store,
            source,
            metrics,
            in_flight: DashMap::new(),
        }
    }

    /// Starts fetches for every idle key of `addresses x {scope}` and
    /// returns the keys it started.
    pub async fn sync(&self) -> Vec<FetchKey> {
        self.in_flight.retain(|_, fetch| !fetch.handle.is_finished());

        let mut issued = Vec::new();
        {
            let mut state = self.store.write().await;
            for key in state.needed_keys() {
                let Some(entry) = state.cache.get(&key) else {
                    tracing::error!(key = %key, "tracked address has no cache entry");
                    continue;
                };
                if self
                    .in_flight
                    .get(&key)
                    .is_some_and(|fetch| fetch.is_live(entry.generation))
                {
                    continue;
                }

                match state.cache.try_begin(&key) {
                    Ok(Some(generation)) => issued.push((key, generation)),
                    Ok(None) => {}
                    Err(e) => tracing::error!(key = %key, error = %e, "could not begin fetch"),
                }
            }
        }

        for (key, generation) in &issued {
            self.store.emit(StoreEvent::CacheChanged(key.clone()));
            self.spawn_fetch(key.clone(), *generation);
        }

        issued.into_iter().map(|(key, _)| key).collect()
    }

    fn spawn_fetch(&self, key: FetchKey, generation: u64) {
        let store = self.store.clone();
        let source = self.source.clone();
        let metrics = self.metrics.clone();
        let task_key = key.clone();

        tracing::debug!(address = %key.address, scope = %key.scope, generation, "fetch issued");
        metrics.record_fetch_issued(key.scope.as_str());

        let handle = tokio::spawn(async move {
            let key = task_key;
            let request = SpotRequest::for_key(&key);
            let fetched = source
                .fetch_spots(&request)
                .await
                .and_then(|rows| rows_into_records(rows, key.scope));

            let (status, records): (FetchStatus, Vec<SpotRecord>) = match fetched {
                Ok(records) => (FetchStatus::Success, records),
                Err(e) => {
                    tracing::warn!(address = %key.address, scope = %key.scope, error = %e, "fetch failed");
                    (FetchStatus::Error, Vec::new())
                }
            };

            let written = {
                let mut state = store.write().await;
                state.cache.complete(&key, generation, status, records)
            };

            let outcome = match written {
                Ok(true) => {
                    store.emit(StoreEvent::CacheChanged(key.clone()));
                    if status == FetchStatus::Success {
                        FetchOutcome::Success
                    } else {
                        FetchOutcome::Error
                    }
                }
                Ok(false) => {
                    tracing::debug!(address = %key.address, scope = %key.scope, generation, "stale fetch discarded");
                    FetchOutcome::Discarded
                }
                Err(e) => {
                    tracing::error!(key = %key, error = %e, "could not settle fetch");
                    FetchOutcome::Discarded
                }
            };

            metrics.record_fetch_completed(key.scope.as_str(), outcome);
        });

        self.in_flight.insert(key, InFlight { generation, handle });
    }

    /// Fetches started and not yet settled.
    pub fn in_flight(&self) -> usize {
        self.in_flight
            .iter()
            .filter(|fetch| !fetch.handle.is_finished())
            .count()
    }

    /// Waits for every started fetch to settle.
    pub async fn drain(&self) {
        let keys: Vec<FetchKey> = self.in_flight.iter().map(|fetch| fetch.key().clone()).collect();
        let handles: Vec<JoinHandle<()>> = keys
            .iter()
            .filter_map(|key| self.in_flight.remove(key))
            .map(|(_, fetch)| fetch.handle)
            .collect();

        for result in futures::future::join_all(handles).await {
            if let Err(e) = result {
                tracing::error!(error = %e, "fetch task panicked");
            }
        }
    }
}
