pub mod address;
pub mod chart;
pub mod query;
pub mod response;
pub mod scope;

pub use address::*;
pub use chart::*;
pub use query::*;
pub use response::*;
pub use scope::*;
