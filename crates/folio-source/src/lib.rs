//! Upstream source of historical token spots.
//!
//! The pipeline only depends on the [`SpotSource`] trait; [`TransposeClient`]
//! is the production implementation backed by the Transpose SQL endpoint.

pub mod client;
pub mod dto;
pub mod error;
pub mod mapping;
pub mod query;
pub mod traits;

pub use client::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT, TransposeClient};
pub use dto::{SpotRequest, SpotRow, TransposeResponse};
pub use error::SourceError;
pub use mapping::{parse_timestamp, rows_into_records};
pub use traits::SpotSource;
