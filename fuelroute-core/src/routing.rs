//! Fetch route geometry from an external routing service.
//!
//! The [`RouteProvider`] trait abstracts the routing collaborator: callers
//! supply origin and destination coordinates and receive the road polyline
//! with its driving distance and duration. The trait is synchronous to keep
//! the core embeddable in synchronous contexts; HTTP-backed implementations
//! bridge to async internally.

use std::time::Duration;

use geo::Coord;
use thiserror::Error;

use crate::{RouteGeometryError, RoutePolyline};

/// A route returned by a [`RouteProvider`].
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedRoute {
    /// Road geometry and total driving distance.
    pub polyline: RoutePolyline,
    /// Estimated driving time.
    pub duration: Duration,
}

/// Errors from [`RouteProvider::fetch_route`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteFetchError {
    /// The request did not complete within the configured timeout.
    #[error("routing request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// The request URL.
        url: String,
        /// The configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The service answered with a non-success HTTP status.
    #[error("routing request to {url} failed with HTTP {status}: {message}")]
    HttpStatus {
        /// The request URL.
        url: String,
        /// The HTTP status code.
        status: u16,
        /// The error description.
        message: String,
    },
    /// The request failed before a response arrived.
    #[error("routing request to {url} failed: {message}")]
    Network {
        /// The request URL.
        url: String,
        /// The error description.
        message: String,
    },
    /// The service answered but reported a routing failure.
    #[error("routing service returned {code}: {message}")]
    Service {
        /// The service status code, e.g. `"NoRoute"`.
        code: String,
        /// The service error message.
        message: String,
    },
    /// The response body could not be interpreted.
    #[error("could not parse routing response: {message}")]
    Parse {
        /// The parse error description.
        message: String,
    },
    /// The returned geometry failed validation.
    #[error(transparent)]
    Geometry(#[from] RouteGeometryError),
}

/// Fetch a driving route between two coordinates.
///
/// Implementations must be `Send + Sync` so providers can be shared across
/// threads. All blocking I/O happens inside the provider; the planning core
/// never performs network calls itself.
pub trait RouteProvider: Send + Sync {
    /// Fetch the route from `start` to `end`.
    ///
    /// # Errors
    /// Returns a [`RouteFetchError`] describing the transport or service
    /// failure.
    fn fetch_route(
        &self,
        start: Coord<f64>,
        end: Coord<f64>,
    ) -> Result<FetchedRoute, RouteFetchError>;
}
