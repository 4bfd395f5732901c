//! Queries and scales functions through a provider's HTTP management API
//! on behalf of an autoscaler.

pub mod auth;
pub mod client;
pub mod external;
pub mod labels;
pub mod query;
pub mod utils;

pub use external::ExternalServiceQuery;
pub use query::ServiceQuery;
