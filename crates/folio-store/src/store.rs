use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard, broadcast};

use folio_types::{Address, FetchKey, FetchStatus, Scope, SpotRecord};

use crate::{cache::FetchCache, config::PortfolioConfig, error::StoreError};

/// Field-level change notifications published by [`PortfolioStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    AddressesChanged,
    ScopeChanged(Scope),
    CacheChanged(FetchKey),
    DisplayChanged,
}

/// Records merged for display, and what they were merged from.
#[derive(Debug, Clone)]
pub struct DisplaySet {
    pub scope: Scope,
    pub records: Arc<[SpotRecord]>,
    /// Keys and generations the records were taken from, in address order.
    pub sources: Vec<(FetchKey, u64)>,
    /// Bumped on every replacement.
    pub version: u64,
}

impl DisplaySet {
    pub fn empty(scope: Scope) -> Self {
        Self {
            scope,
            records: Arc::from(Vec::new()),
            sources: Vec::new(),
            version: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Snapshot of one cache entry for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestState {
    pub key: FetchKey,
    pub status: FetchStatus,
    pub records: usize,
}

#[derive(Debug)]
pub struct StoreState {
    pub(crate) addresses: Vec<Address>,
    pub(crate) scope: Scope,
    pub(crate) cache: FetchCache,
    pub(crate) display: DisplaySet,
}

impl StoreState {
    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    pub const fn scope(&self) -> Scope {
        self.scope
    }

    pub const fn cache(&self) -> &FetchCache {
        &self.cache
    }

    pub const fn display(&self) -> &DisplaySet {
        &self.display
    }

    /// `addresses x {scope}`, in address order.
    pub fn needed_keys(&self) -> Vec<FetchKey> {
        self.addresses
            .iter()
            .map(|address| FetchKey::new(address.clone(), self.scope))
            .collect()
    }
}

/// Single state container of the pipeline.
///
/// Cloning is cheap; all clones share the same state and channel.
#[derive(Debug, Clone)]
pub struct PortfolioStore {
    state: Arc<RwLock<StoreState>>,
    events: broadcast::Sender<StoreEvent>,
}

impl PortfolioStore {
    pub fn new(config: &PortfolioConfig) -> Self {
        let (events, _) = broadcast::channel(config.event_capacity.max(1));
        let mut state = StoreState {
            addresses: Vec::new(),
            scope: config.default_scope,
            cache: FetchCache::new(),
            display: DisplaySet::empty(config.default_scope),
        };

        for address in &config.tracked_addresses {
            if !address.is_empty() && !state.addresses.contains(address) {
                state.cache.seed_address(address);
                state.addresses.push(address.clone());
            }
        }

        Self {
            state: Arc::new(RwLock::new(state)),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().await
    }

    pub(crate) async fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().await
    }

    pub(crate) fn emit(&self, event: StoreEvent) {
        // No subscriber is not an error.
        let _ = self.events.send(event);
    }

    /// Starts tracking `address` and seeds its cache entries. Returns `false`
    /// when it was already tracked.
    pub async fn add_address(&self, address: Address) -> Result<bool, StoreError> {
        if address.is_empty() {
            return Err(StoreError::EmptyAddress);
        }

        {
            let mut state = self.write().await;
            if state.addresses.contains(&address) {
                return Ok(false);
            }
            state.cache.seed_address(&address);
            state.addresses.push(address.clone());
        }

        tracing::info!(address = %address, "tracking address");
        self.emit(StoreEvent::AddressesChanged);
        Ok(true)
    }

    /// Stops tracking `address`, deleting its cache entries and its records
    /// from the display set.
    pub async fn remove_address(&self, address: &Address) -> Result<(), StoreError> {
        let display_changed = {
            let mut state = self.write().await;
            let Some(position) = state.addresses.iter().position(|a| a == address) else {
                return Err(StoreError::NotTracked(address.clone()));
            };
            state.addresses.remove(position);
            let purged = state.cache.purge_address(address);

            let changed = state
                .display
                .sources
                .iter()
                .any(|(key, _)| &key.address == address);
            if changed {
                // Rebuilt from the cache entries of the remaining sources.
                let mut records: Vec<SpotRecord> = Vec::new();
                let mut sources = Vec::new();
                for (key, generation) in &state.display.sources {
                    let Some(entry) = state.cache.get(key).filter(|entry| {
                        entry.generation == *generation && entry.status == FetchStatus::Success
                    }) else {
                        continue;
                    };
                    records.extend(entry.records.iter().cloned());
                    sources.push((key.clone(), *generation));
                }

                let scope = state.display.scope;
                let version = state.display.version + 1;
                state.display = DisplaySet {
                    scope,
                    records: Arc::from(records),
                    sources,
                    version,
                };
            }

            tracing::info!(address = %address, purged, "stopped tracking address");
            changed
        };

        self.emit(StoreEvent::AddressesChanged);
        if display_changed {
            self.emit(StoreEvent::DisplayChanged);
        }
        Ok(())
    }

    /// Selects `scope`. Returns `false` when it was already selected.
    pub async fn set_scope(&self, scope: Scope) -> bool {
        {
            let mut state = self.write().await;
            if state.scope == scope {
                return false;
            }
            state.scope = scope;
        }

        tracing::info!(scope = %scope, "scope selected");
        self.emit(StoreEvent::ScopeChanged(scope));
        true
    }

    pub async fn addresses(&self) -> Vec<Address> {
        self.read().await.addresses.clone()
    }

    pub async fn scope(&self) -> Scope {
        self.read().await.scope
    }

    pub async fn display(&self) -> DisplaySet {
        self.read().await.display.clone()
    }

    /// Every cache entry, ordered by address then scope.
    pub async fn requests(&self) -> Vec<RequestState> {
        let state = self.read().await;
        let mut requests: Vec<RequestState> = state
            .cache
            .iter()
            .map(|(key, entry)| RequestState {
                key: key.clone(),
                status: entry.status,
                records: entry.records.len(),
            })
            .collect();
        requests.sort_by(|a, b| {
            (&a.key.address, a.key.scope).cmp(&(&b.key.address, b.key.scope))
        });
        requests
    }
}
