//! Domain types shared by every folio crate: scopes and their bucket
//! resolutions, spot records fetched from upstream, cache keys and the value
//! points the chart is built from.

pub mod fetch;
pub mod point;
pub mod scope;
pub mod spot;

pub use fetch::{Address, FetchKey, FetchStatus};
pub use point::ValuePoint;
pub use scope::{Resolution, Scope};
pub use spot::{SpotRecord, TokenMeta, dedup_spots};
