use std::sync::Arc;

use folio_metrics::FetchMetrics;
use folio_types::{FetchKey, FetchStatus, SpotRecord};

use crate::{
    cache::FetchCache,
    error::StoreError,
    store::{DisplaySet, PortfolioStore, StoreEvent, StoreState},
};

/// Whether the display set may be rebuilt for the current scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    /// Every needed key is `success`; merge them in this order.
    Ready(Vec<FetchKey>),
    NoAddresses,
    Waiting { unresolved: Vec<FetchKey> },
}

impl Readiness {
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

pub fn readiness(state: &StoreState) -> Readiness {
    let needed = state.needed_keys();
    if needed.is_empty() {
        return Readiness::NoAddresses;
    }

    let unresolved: Vec<FetchKey> = needed
        .iter()
        .filter(|key| state.cache().status(key) != Some(FetchStatus::Success))
        .cloned()
        .collect();

    if unresolved.is_empty() {
        Readiness::Ready(needed)
    } else {
        Readiness::Waiting { unresolved }
    }
}

/// Concatenates the records of `keys` in order. Every key must be `success`.
pub fn merge_resolved(cache: &FetchCache, keys: &[FetchKey]) -> Result<Vec<SpotRecord>, StoreError> {
    let mut merged = Vec::new();
    for key in keys {
        let entry = cache
            .get(key)
            .ok_or_else(|| StoreError::MissingEntry(key.clone()))?;
        if entry.status != FetchStatus::Success {
            return Err(StoreError::Unresolved {
                key: key.clone(),
                status: entry.status,
            });
        }
        merged.extend(entry.records.iter().cloned());
    }
    Ok(merged)
}

/// Rebuilds the display set once the current scope is fully resolved.
pub struct DisplayAggregator {
    store: PortfolioStore,
    metrics: Arc<FetchMetrics>,
}

impl DisplayAggregator {
    pub const fn new(store: PortfolioStore, metrics: Arc<FetchMetrics>) -> Self {
        Self { store, metrics }
    }

    /// Replaces the display set if the gate is open and its sources changed.
    /// Returns whether it was replaced.
    pub async fn recompute(&self) -> Result<bool, StoreError> {
        let rebuilt = {
            let mut state = self.store.write().await;
            let Readiness::Ready(keys) = readiness(&state) else {
                return Ok(false);
            };

            let sources: Vec<(FetchKey, u64)> = keys
                .iter()
                .filter_map(|key| state.cache().get(key).map(|e| (key.clone(), e.generation)))
                .collect();
            if state.display.scope == state.scope && state.display.sources == sources {
                return Ok(false);
            }

            let records = merge_resolved(&state.cache, &keys).inspect_err(|e| {
                tracing::error!(error = %e, "display merge hit an unresolved key");
            })?;

            let scope = state.scope;
            let version = state.display.version + 1;
            state.display = DisplaySet {
                scope,
                records: Arc::from(records),
                sources,
                version,
            };
            state.display.clone()
        };

        tracing::debug!(
            scope = %rebuilt.scope,
            records = rebuilt.records.len(),
            version = rebuilt.version,
            "display set rebuilt"
        );
        self.metrics
            .record_display_rebuild(rebuilt.scope.as_str(), rebuilt.records.len());
        self.store.emit(StoreEvent::DisplayChanged);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use folio_metrics::MetricsRegistry;
    use folio_types::{Address, Scope};

    use crate::{config::PortfolioConfig, testing::spot};

    use super::*;

    fn setup() -> (PortfolioStore, DisplayAggregator) {
        let store = PortfolioStore::new(&PortfolioConfig {
            default_scope: Scope::OneMonth,
            ..PortfolioConfig::default()
        });
        let aggregator = DisplayAggregator::new(store.clone(), MetricsRegistry::new().fetches.clone());
        (store, aggregator)
    }

    async fn settle(store: &PortfolioStore, address: &str, status: FetchStatus, records: Vec<SpotRecord>) {
        let key = FetchKey::new(Address::new(address), Scope::OneMonth);
        let mut state = store.write().await;
        let generation = state.cache.try_begin(&key).unwrap().unwrap();
        assert!(state.cache.complete(&key, generation, status, records).unwrap());
    }

    #[tokio::test]
    async fn test_no_addresses_is_not_ready() {
        let (store, aggregator) = setup();

        assert_eq!(readiness(&*store.read().await), Readiness::NoAddresses);
        assert!(!aggregator.recompute().await.unwrap());
        assert_eq!(store.display().await.version, 0);
    }

    #[tokio::test]
    async fn test_waits_for_every_key() {
        let (store, aggregator) = setup();
        store.add_address(Address::new("0xa")).await.unwrap();
        store.add_address(Address::new("0xb")).await.unwrap();

        settle(&store, "0xa", FetchStatus::Success, vec![spot("0xa", "0xeth", "2023-05-17T14:00:00Z", 10)]).await;
        assert!(!aggregator.recompute().await.unwrap());

        settle(&store, "0xb", FetchStatus::Error, Vec::new()).await;
        assert!(!aggregator.recompute().await.unwrap());
        assert!(store.display().await.is_empty());

        match readiness(&*store.read().await) {
            Readiness::Waiting { unresolved } => {
                assert_eq!(unresolved, vec![FetchKey::new(Address::new("0xb"), Scope::OneMonth)]);
            }
            other => panic!("unexpected readiness {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_merges_in_address_order_once() {
        let (store, aggregator) = setup();
        store.add_address(Address::new("0xb")).await.unwrap();
        store.add_address(Address::new("0xa")).await.unwrap();

        settle(&store, "0xa", FetchStatus::Success, vec![spot("0xa", "0xeth", "2023-05-17T14:00:00Z", 1)]).await;
        settle(
            &store,
            "0xb",
            FetchStatus::Success,
            vec![
                spot("0xb", "0xeth", "2023-05-17T14:00:00Z", 2),
                spot("0xb", "0xdai", "2023-05-17T14:00:00Z", 0),
            ],
        )
        .await;

        let mut events = store.subscribe();
        assert!(aggregator.recompute().await.unwrap());
        assert!(!aggregator.recompute().await.unwrap());

        let display = store.display().await;
        assert_eq!(display.scope, Scope::OneMonth);
        assert_eq!(display.version, 1);
        let owners: Vec<&str> = display.records.iter().map(|r| r.owner_address.as_str()).collect();
        assert_eq!(owners, vec!["0xb", "0xb", "0xa"]);

        assert_eq!(events.recv().await.unwrap(), StoreEvent::DisplayChanged);
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_scope_change_keeps_previous_display_until_ready() {
        let (store, aggregator) = setup();
        store.add_address(Address::new("0xa")).await.unwrap();
        settle(&store, "0xa", FetchStatus::Success, vec![spot("0xa", "0xeth", "2023-05-17T14:00:00Z", 1)]).await;
        aggregator.recompute().await.unwrap();

        store.set_scope(Scope::OneYear).await;
        assert!(!aggregator.recompute().await.unwrap());

        let display = store.display().await;
        assert_eq!(display.scope, Scope::OneMonth);
        assert_eq!(display.records.len(), 1);
    }

    #[test]
    fn test_merging_unresolved_key_is_an_error() {
        let mut cache = FetchCache::new();
        let key = FetchKey::new(Address::new("0xa"), Scope::OneMonth);
        cache.seed_address(&key.address);
        cache.try_begin(&key).unwrap();

        let err = merge_resolved(&cache, &[key]).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Unresolved {
                status: FetchStatus::Pending,
                ..
            }
        ));
    }
}
