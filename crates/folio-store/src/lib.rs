//! Valuation pipeline state: the fetch cache, the store that owns it and
//! the two derivations driven by its change events.
//!
//! [`FetchOrchestrator`] turns the tracked addresses and the selected scope
//! into fetches. [`DisplayAggregator`] merges their results into the display
//! set once every needed key has succeeded. [`PortfolioTask`] runs both as a
//! service.

pub mod aggregator;
pub mod cache;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod service;
pub mod store;
pub mod task;

#[cfg(test)]
pub(crate) mod testing;

pub use aggregator::{DisplayAggregator, Readiness, merge_resolved, readiness};
pub use cache::{CacheEntry, FetchCache};
pub use config::PortfolioConfig;
pub use error::StoreError;
pub use orchestrator::FetchOrchestrator;
pub use service::PortfolioService;
pub use store::{DisplaySet, PortfolioStore, RequestState, StoreEvent, StoreState};
pub use task::PortfolioTask;
