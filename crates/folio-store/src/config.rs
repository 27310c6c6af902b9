use folio_types::{Address, Scope};

/// Runtime knobs of the portfolio pipeline.
#[derive(Debug, Clone)]
pub struct PortfolioConfig {
    pub default_scope: Scope,
    /// Addresses tracked from start-up.
    pub tracked_addresses: Vec<Address>,
    /// Capacity of the store change channel.
    pub event_capacity: usize,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            default_scope: Scope::default(),
            tracked_addresses: Vec::new(),
            event_capacity: 256,
        }
    }
}
