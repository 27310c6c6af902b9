pub mod addresses;
pub mod chart;
pub mod scope;

pub use addresses::{add_address, list_addresses, list_requests, remove_address};
pub use chart::{get_chart, get_crosshair, get_holdings};
pub use scope::{get_scope, list_scopes, set_scope};
