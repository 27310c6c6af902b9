use std::{collections::HashMap, sync::Arc};

use folio_types::{Address, FetchKey, FetchStatus, Scope, SpotRecord, dedup_spots};

use crate::error::StoreError;

/// State of one (address, scope) fetch.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub status: FetchStatus,
    pub records: Arc<[SpotRecord]>,
    /// Seed this entry belongs to. Completions issued under another
    /// generation are dropped.
    pub generation: u64,
}

impl CacheEntry {
    fn idle(generation: u64) -> Self {
        Self {
            status: FetchStatus::Idle,
            records: Arc::from(Vec::new()),
            generation,
        }
    }
}

/// Per-key fetch status and results.
///
/// Every write replaces a whole entry, so a reader holding an entry's
/// `records` never sees a partial list.
#[derive(Debug, Default)]
pub struct FetchCache {
    entries: HashMap<FetchKey, CacheEntry>,
    last_generation: u64,
}

impl FetchCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &FetchKey) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    pub fn status(&self, key: &FetchKey) -> Option<FetchStatus> {
        self.entries.get(key).map(|entry| entry.status)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FetchKey, &CacheEntry)> {
        self.entries.iter()
    }

    pub fn keys_for<'a>(&'a self, address: &'a Address) -> impl Iterator<Item = &'a FetchKey> + 'a {
        self.entries.keys().filter(move |key| &key.address == address)
    }

    /// Replaces the entry for `key`, refusing anything but a forward step of
    /// the status lifecycle. A missing entry may only be created idle.
    pub fn put(
        &mut self,
        key: FetchKey,
        status: FetchStatus,
        records: Vec<SpotRecord>,
    ) -> Result<(), StoreError> {
        let generation = match self.entries.get(&key) {
            Some(current) if current.status.can_transition_to(status) => current.generation,
            Some(current) => {
                return Err(StoreError::IllegalTransition {
                    key,
                    from: current.status,
                    to: status,
                });
            }
            None if status == FetchStatus::Idle => self.next_generation(),
            None => {
                return Err(StoreError::IllegalTransition {
                    key,
                    from: FetchStatus::Idle,
                    to: status,
                });
            }
        };

        self.entries.insert(
            key,
            CacheEntry {
                status,
                records: Arc::from(records),
                generation,
            },
        );
        Ok(())
    }

    pub fn delete(&mut self, key: &FetchKey) -> Option<CacheEntry> {
        self.entries.remove(key)
    }

    /// Creates an idle entry for every scope of `address` under a fresh
    /// generation. Entries that already exist are left alone.
    pub fn seed_address(&mut self, address: &Address) -> u64 {
        let generation = self.next_generation();
        for scope in Scope::ALL {
            self.entries
                .entry(FetchKey::new(address.clone(), scope))
                .or_insert_with(|| CacheEntry::idle(generation));
        }
        generation
    }

    /// Deletes every entry of `address`, returning how many were removed.
    pub fn purge_address(&mut self, address: &Address) -> usize {
        let keys: Vec<FetchKey> = self.keys_for(address).cloned().collect();
        keys.iter().filter(|key| self.delete(key).is_some()).count()
    }

    /// Moves an idle entry to pending and returns the generation the fetch
    /// is issued under. `None` when the entry is already pending or settled.
    pub fn try_begin(&mut self, key: &FetchKey) -> Result<Option<u64>, StoreError> {
        let entry = self
            .entries
            .get_mut(key)
            .ok_or_else(|| StoreError::MissingEntry(key.clone()))?;

        if entry.status != FetchStatus::Idle {
            return Ok(None);
        }

        entry.status = FetchStatus::Pending;
        Ok(Some(entry.generation))
    }

    /// Settles a pending entry with the outcome of a fetch issued under
    /// `generation`. Returns `false` when the entry is gone, was reseeded or
    /// is no longer pending; nothing is written then.
    pub fn complete(
        &mut self,
        key: &FetchKey,
        generation: u64,
        status: FetchStatus,
        records: Vec<SpotRecord>,
    ) -> Result<bool, StoreError> {
        let Some(entry) = self.entries.get(key) else {
            return Ok(false);
        };
        if entry.generation != generation || entry.status != FetchStatus::Pending {
            return Ok(false);
        }

        let records = if status == FetchStatus::Success {
            dedup_spots(records)
        } else {
            Vec::new()
        };

        self.put(key.clone(), status, records)?;
        Ok(true)
    }

    const fn next_generation(&mut self) -> u64 {
        self.last_generation += 1;
        self.last_generation
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::spot;

    use super::*;

    fn key(address: &str, scope: Scope) -> FetchKey {
        FetchKey::new(Address::new(address), scope)
    }

    #[test]
    fn test_seed_creates_idle_entries_for_every_scope() {
        let mut cache = FetchCache::new();
        let address = Address::new("0xa");

        cache.seed_address(&address);

        assert_eq!(cache.iter().count(), Scope::ALL.len());
        for scope in Scope::ALL {
            assert_eq!(cache.status(&key("0xa", scope)), Some(FetchStatus::Idle));
        }
    }

    #[test]
    fn test_seed_then_purge_leaves_nothing() {
        let mut cache = FetchCache::new();
        let a = Address::new("0xa");
        let b = Address::new("0xb");

        cache.seed_address(&a);
        cache.seed_address(&b);
        assert_eq!(cache.purge_address(&a), Scope::ALL.len());

        assert_eq!(cache.keys_for(&a).count(), 0);
        assert_eq!(cache.keys_for(&b).count(), Scope::ALL.len());
    }

    #[test]
    fn test_put_rejects_regressions() {
        let mut cache = FetchCache::new();
        let k = key("0xa", Scope::OneMonth);

        cache.put(k.clone(), FetchStatus::Idle, Vec::new()).unwrap();
        cache.put(k.clone(), FetchStatus::Pending, Vec::new()).unwrap();
        cache.put(k.clone(), FetchStatus::Success, Vec::new()).unwrap();

        let err = cache.put(k.clone(), FetchStatus::Pending, Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            StoreError::IllegalTransition {
                from: FetchStatus::Success,
                to: FetchStatus::Pending,
                ..
            }
        ));

        let fresh = key("0xb", Scope::OneMonth);
        assert!(cache.put(fresh, FetchStatus::Success, Vec::new()).is_err());
    }

    #[test]
    fn test_pending_is_not_begun_twice() {
        let mut cache = FetchCache::new();
        let k = key("0xa", Scope::OneYear);
        let generation = cache.seed_address(&k.address);

        assert_eq!(cache.try_begin(&k).unwrap(), Some(generation));
        assert_eq!(cache.try_begin(&k).unwrap(), None);
        assert!(cache.try_begin(&key("0xz", Scope::OneYear)).is_err());
    }

    #[test]
    fn test_completion_dedups_and_checks_generation() {
        let mut cache = FetchCache::new();
        let k = key("0xa", Scope::OneMonth);
        let generation = cache.seed_address(&k.address);
        cache.try_begin(&k).unwrap();

        let records = vec![
            spot("0xa", "0xeth", "2023-05-17T14:00:00Z", 10),
            spot("0xa", "0xeth", "2023-05-17T14:00:00Z", 99),
        ];

        assert!(!cache.complete(&k, generation + 1, FetchStatus::Success, records.clone()).unwrap());
        assert_eq!(cache.status(&k), Some(FetchStatus::Pending));

        assert!(cache.complete(&k, generation, FetchStatus::Success, records).unwrap());
        let entry = cache.get(&k).unwrap();
        assert_eq!(entry.status, FetchStatus::Success);
        assert_eq!(entry.records.len(), 1);

        assert!(!cache.complete(&k, generation, FetchStatus::Error, Vec::new()).unwrap());
    }

    #[test]
    fn test_completion_after_purge_is_dropped() {
        let mut cache = FetchCache::new();
        let k = key("0xa", Scope::OneMonth);
        let old = cache.seed_address(&k.address);
        cache.try_begin(&k).unwrap();

        cache.purge_address(&k.address);
        assert!(!cache.complete(&k, old, FetchStatus::Success, Vec::new()).unwrap());
        assert!(cache.get(&k).is_none());

        let new = cache.seed_address(&k.address);
        assert_ne!(old, new);
        assert!(!cache.complete(&k, old, FetchStatus::Success, Vec::new()).unwrap());
        assert_eq!(cache.status(&k), Some(FetchStatus::Idle));
    }

    #[test]
    fn test_error_completion_keeps_no_records() {
        let mut cache = FetchCache::new();
        let k = key("0xa", Scope::OneMonth);
        let generation = cache.seed_address(&k.address);
        cache.try_begin(&k).unwrap();

        let records = vec![spot("0xa", "0xeth", "2023-05-17T14:00:00Z", 10)];
        assert!(cache.complete(&k, generation, FetchStatus::Error, records).unwrap());
        assert!(cache.get(&k).unwrap().records.is_empty());
    }
}
