use folio_types::{Address, FetchKey, FetchStatus};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Illegal status transition for {key}: {from} -> {to}")]
    IllegalTransition {
        key: FetchKey,
        from: FetchStatus,
        to: FetchStatus,
    },
    #[error("No cache entry for {0}")]
    MissingEntry(FetchKey),
    #[error("Cannot merge {key} while it is {status}")]
    Unresolved { key: FetchKey, status: FetchStatus },
    #[error("Address is empty")]
    EmptyAddress,
    #[error("Address {0} is not tracked")]
    NotTracked(Address),
}
