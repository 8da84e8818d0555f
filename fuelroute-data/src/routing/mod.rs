//! Driving-route retrieval over HTTP.
//!
//! [`OsrmRouteProvider`] implements the core's synchronous `RouteProvider`
//! trait against an OSRM Route service, bridging the async HTTP client to
//! the sync interface by blocking on a Tokio runtime internally.

pub mod osrm;
pub mod provider;

pub use provider::{
    DEFAULT_USER_AGENT, OsrmRouteProvider, OsrmRouteProviderConfig, ProviderBuildError,
};
