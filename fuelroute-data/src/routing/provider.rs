//! HTTP-based `RouteProvider` using OSRM's Route API.
//!
//! This module provides [`OsrmRouteProvider`], an implementation of the
//! [`RouteProvider`] trait that fetches driving routes from an OSRM routing
//! service via HTTP.
//!
//! # Architecture
//!
//! The [`RouteProvider`] trait is synchronous to keep the planning core
//! embeddable in synchronous contexts. This provider bridges the async HTTP
//! calls to the sync interface by blocking on a Tokio runtime internally.
//!
//! # Example
//!
//! ```no_run
//! use fuelroute_data::routing::OsrmRouteProvider;
//! use fuelroute_core::RouteProvider;
//! use geo::Coord;
//!
//! let provider = OsrmRouteProvider::new("https://router.project-osrm.org")?;
//! let route = provider.fetch_route(
//!     Coord { x: -118.24, y: 34.05 },
//!     Coord { x: -74.0, y: 40.71 },
//! )?;
//! println!("{:.0} miles", route.polyline.total_distance_miles);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::time::Duration;

use fuelroute_core::{FetchedRoute, RouteFetchError, RoutePolyline, RouteProvider};
use geo::Coord;
use reqwest::Client;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

use super::osrm::RouteResponse;

/// Metres per statute mile, matching the mileage convention used by the
/// planning core.
const METRES_PER_MILE: f64 = 1609.34;

/// Error type for [`OsrmRouteProvider`] construction failures.
#[derive(Debug)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    HttpClient(reqwest::Error),
    /// Failed to build the Tokio runtime.
    Runtime(std::io::Error),
}

impl std::fmt::Display for ProviderBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HttpClient(err) => write!(f, "failed to build HTTP client: {err}"),
            Self::Runtime(err) => write!(f, "failed to build Tokio runtime: {err}"),
        }
    }
}

impl std::error::Error for ProviderBuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::HttpClient(err) => Some(err),
            Self::Runtime(err) => Some(err),
        }
    }
}

/// Default user agent for OSRM requests.
pub const DEFAULT_USER_AGENT: &str = "fuelroute-routing/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default OSRM endpoint: the public demo server.
const DEFAULT_BASE_URL: &str = "https://router.project-osrm.org";

/// Configuration for [`OsrmRouteProvider`].
#[derive(Debug, Clone)]
pub struct OsrmRouteProviderConfig {
    /// Base URL for the OSRM service.
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for OsrmRouteProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl OsrmRouteProviderConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// HTTP-based driving-route provider using the OSRM Route API.
///
/// Implements the synchronous [`RouteProvider`] trait by internally blocking
/// on asynchronous HTTP requests. It owns a Tokio runtime that is reused
/// across calls, avoiding the overhead of creating a new runtime per request.
///
/// # Runtime behaviour
///
/// When called from outside any Tokio runtime, the provider uses its own
/// stored runtime. When called from within an existing multi-threaded Tokio
/// runtime (detected via [`Handle::try_current()`] and
/// [`RuntimeFlavor::MultiThread`]), it uses that runtime's handle with
/// [`tokio::task::block_in_place`] to avoid nested runtime panics. When
/// called from within a `current_thread` Tokio runtime, the provider falls
/// back to its own internal runtime.
pub struct OsrmRouteProvider {
    client: Client,
    config: OsrmRouteProviderConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for OsrmRouteProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OsrmRouteProvider")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl OsrmRouteProvider {
    /// Create a new provider with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(OsrmRouteProviderConfig::new(base_url))
    }

    /// Create a new provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: OsrmRouteProviderConfig) -> Result<Self, ProviderBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    /// Build the OSRM Route API URL for the given endpoints.
    ///
    /// The URL format is:
    /// `{base_url}/route/v1/driving/{lon},{lat};{lon},{lat}` with the full
    /// GeoJSON overview requested so the whole route shape comes back.
    fn build_route_url(&self, start: Coord<f64>, end: Coord<f64>) -> String {
        format!(
            "{}/route/v1/driving/{},{};{},{}?overview=full&geometries=geojson",
            self.config.base_url.trim_end_matches('/'),
            start.x,
            start.y,
            end.x,
            end.y,
        )
    }

    async fn fetch_route_async(
        &self,
        start: Coord<f64>,
        end: Coord<f64>,
    ) -> Result<FetchedRoute, RouteFetchError> {
        let url = self.build_route_url(start, end);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;

        let route_response: RouteResponse =
            response
                .json()
                .await
                .map_err(|err| RouteFetchError::Parse {
                    message: err.to_string(),
                })?;

        Self::convert_response(route_response)
    }

    /// Convert a reqwest error to a `RouteFetchError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> RouteFetchError {
        if error.is_timeout() {
            return RouteFetchError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return RouteFetchError::HttpStatus {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        RouteFetchError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }

    /// Convert an OSRM response into a [`FetchedRoute`].
    fn convert_response(response: RouteResponse) -> Result<FetchedRoute, RouteFetchError> {
        if !response.is_ok() {
            return Err(RouteFetchError::Service {
                code: response.code,
                message: response.message.unwrap_or_default(),
            });
        }

        let route = response
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| RouteFetchError::Parse {
                message: "OSRM response contained no routes".to_string(),
            })?;

        let points: Vec<Coord<f64>> = route
            .geometry
            .coordinates
            .iter()
            .map(|&[lon, lat]| Coord { x: lon, y: lat })
            .collect();

        let total_distance_miles = route.distance / METRES_PER_MILE;
        let duration = if route.duration.is_finite() && route.duration >= 0.0 {
            Duration::from_secs_f64(route.duration)
        } else {
            return Err(RouteFetchError::Parse {
                message: format!("OSRM returned an invalid duration: {}", route.duration),
            });
        };

        let polyline = RoutePolyline::new(points, total_distance_miles)?;
        Ok(FetchedRoute { polyline, duration })
    }
}

impl RouteProvider for OsrmRouteProvider {
    /// Fetch the driving route between `start` and `end`.
    ///
    /// # Runtime requirements
    ///
    /// When called from within an existing Tokio runtime, the runtime must
    /// be multi-threaded (`flavor = "multi_thread"`). If called from within
    /// a `current_thread` runtime, the method falls back to its own internal
    /// runtime, which may block the caller's runtime.
    fn fetch_route(
        &self,
        start: Coord<f64>,
        end: Coord<f64>,
    ) -> Result<FetchedRoute, RouteFetchError> {
        // block_in_place requires a multi-threaded runtime; for
        // current_thread runtimes we fall back to our own stored runtime.
        let future = self.fetch_route_async(start, end);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::osrm::{Geometry, OsrmRoute};
    use rstest::rstest;

    fn sample_route(distance_metres: f64, duration_secs: f64) -> RouteResponse {
        RouteResponse {
            code: "Ok".to_string(),
            message: None,
            routes: vec![OsrmRoute {
                distance: distance_metres,
                duration: duration_secs,
                geometry: Geometry {
                    kind: "LineString".to_string(),
                    coordinates: vec![[-118.24, 34.05], [-101.83, 35.19], [-74.0, 40.71]],
                },
            }],
        }
    }

    #[rstest]
    fn build_route_url_formats_endpoints() {
        let provider =
            OsrmRouteProvider::new("http://osrm.example.com").expect("provider should build");

        let url = provider.build_route_url(
            Coord { x: -118.24, y: 34.05 },
            Coord { x: -74.0, y: 40.71 },
        );

        assert_eq!(
            url,
            "http://osrm.example.com/route/v1/driving/-118.24,34.05;-74,40.71?overview=full&geometries=geojson"
        );
    }

    #[rstest]
    fn build_route_url_strips_trailing_slash() {
        let provider =
            OsrmRouteProvider::new("http://osrm.example.com/").expect("provider should build");

        let url = provider.build_route_url(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 });

        assert!(url.starts_with("http://osrm.example.com/route/"));
        assert!(!url.contains("//route"));
    }

    #[rstest]
    fn convert_response_maps_units_and_axes() {
        let fetched =
            OsrmRouteProvider::convert_response(sample_route(1_609_340.0, 54_000.0))
                .expect("should convert");

        assert!((fetched.polyline.total_distance_miles - 1000.0).abs() < 1e-6);
        assert_eq!(fetched.duration, Duration::from_secs(54_000));
        // GeoJSON is [lon, lat]; Coord is x=lon, y=lat.
        assert_eq!(fetched.polyline.points[0].x, -118.24);
        assert_eq!(fetched.polyline.points[0].y, 34.05);
    }

    #[rstest]
    fn convert_response_rejects_service_errors() {
        let response = RouteResponse {
            code: "NoRoute".to_string(),
            message: Some("Impossible route between points".to_string()),
            routes: vec![],
        };

        let err = OsrmRouteProvider::convert_response(response).expect_err("should fail");

        match err {
            RouteFetchError::Service { code, message } => {
                assert_eq!(code, "NoRoute");
                assert_eq!(message, "Impossible route between points");
            }
            _ => panic!("expected Service error, got {err:?}"),
        }
    }

    #[rstest]
    fn convert_response_rejects_empty_route_list() {
        let response = RouteResponse {
            code: "Ok".to_string(),
            message: None,
            routes: vec![],
        };

        let err = OsrmRouteProvider::convert_response(response).expect_err("should fail");

        assert!(matches!(err, RouteFetchError::Parse { .. }));
    }

    #[rstest]
    fn convert_response_rejects_invalid_duration() {
        let err = OsrmRouteProvider::convert_response(sample_route(1_000.0, f64::NAN))
            .expect_err("should fail");

        assert!(matches!(err, RouteFetchError::Parse { .. }));
    }

    #[rstest]
    fn convert_response_rejects_empty_geometry() {
        let response = RouteResponse {
            code: "Ok".to_string(),
            message: None,
            routes: vec![OsrmRoute {
                distance: 1_000.0,
                duration: 60.0,
                geometry: Geometry {
                    kind: "LineString".to_string(),
                    coordinates: vec![],
                },
            }],
        };

        let err = OsrmRouteProvider::convert_response(response).expect_err("should fail");

        assert!(matches!(err, RouteFetchError::Geometry(_)));
    }

    #[rstest]
    fn fetch_route_bridges_from_a_multi_thread_runtime() {
        // Nothing listens on port 1, so the request fails fast with a
        // connection error; the point is that the call runs inside a
        // multi-threaded runtime and takes the block_in_place path.
        let provider =
            OsrmRouteProvider::new("http://127.0.0.1:1").expect("provider should build");
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .expect("runtime should build");

        let err = runtime
            .block_on(async move {
                tokio::spawn(async move {
                    provider.fetch_route(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 })
                })
                .await
                .expect("task should not panic")
            })
            .expect_err("should fail");

        assert!(matches!(err, RouteFetchError::Network { .. }));
    }

    #[rstest]
    fn config_builder_pattern() {
        let config = OsrmRouteProviderConfig::new("http://example.com")
            .with_timeout(Duration::from_secs(60))
            .with_user_agent("test-agent/1.0");

        assert_eq!(config.base_url, "http://example.com");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.user_agent, "test-agent/1.0");
    }
}
