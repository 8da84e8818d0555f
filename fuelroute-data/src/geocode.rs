//! Free-text geocoding for trip endpoints.
//!
//! [`NominatimGeocoder`] resolves addresses like `"Denver, CO"` to
//! coordinates via a Nominatim instance. Queries are biased to the United
//! States to match the station dataset's coverage. Like the routing
//! provider, it exposes a synchronous API and bridges to the async HTTP
//! client by blocking on an internal Tokio runtime.

use std::time::Duration;

use geo::Coord;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

use crate::routing::ProviderBuildError;

/// Default Nominatim endpoint: the public OpenStreetMap instance.
const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default user agent. Nominatim's usage policy requires an identifying
/// agent string.
const DEFAULT_USER_AGENT: &str = "fuelroute-geocoder/0.1";

/// Errors returned by [`NominatimGeocoder::geocode`].
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// The request timed out.
    #[error("geocoding request timed out after {timeout_secs}s")]
    Timeout {
        /// The configured timeout.
        timeout_secs: u64,
    },
    /// The service returned a non-success HTTP status.
    #[error("geocoding service returned HTTP {status}: {message}")]
    Http {
        /// The HTTP status code.
        status: u16,
        /// The error description.
        message: String,
    },
    /// The request failed at the network level.
    #[error("geocoding request failed: {message}")]
    Network {
        /// The error description.
        message: String,
    },
    /// The response body could not be parsed.
    #[error("could not parse geocoding response: {message}")]
    Parse {
        /// The error description.
        message: String,
    },
    /// The service returned no match for the query.
    #[error("no location found for {query:?}")]
    NotFound {
        /// The query that came back empty.
        query: String,
    },
}

/// One Nominatim search result. Coordinates arrive as decimal strings.
#[derive(Debug, Deserialize)]
struct SearchResult {
    lat: String,
    lon: String,
}

/// Configuration for [`NominatimGeocoder`].
#[derive(Debug, Clone)]
pub struct NominatimGeocoderConfig {
    /// Base URL for the Nominatim service.
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for NominatimGeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl NominatimGeocoderConfig {
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

/// Synchronous geocoder backed by a Nominatim instance.
pub struct NominatimGeocoder {
    client: Client,
    config: NominatimGeocoderConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for NominatimGeocoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NominatimGeocoder")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl NominatimGeocoder {
    /// Create a geocoder against the public OpenStreetMap instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new() -> Result<Self, ProviderBuildError> {
        Self::with_config(NominatimGeocoderConfig::default())
    }

    /// Create a geocoder with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: NominatimGeocoderConfig) -> Result<Self, ProviderBuildError> {
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

    /// Resolve a free-text US location to coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::NotFound`] when the service has no match,
    /// and the transport variants when the request itself fails.
    pub fn geocode(&self, query: &str) -> Result<Coord<f64>, GeocodeError> {
        let future = self.geocode_async(query);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }

    async fn geocode_async(&self, query: &str) -> Result<Coord<f64>, GeocodeError> {
        let url = format!("{}/search", self.config.base_url.trim_end_matches('/'));
        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", format!("{query}, USA").as_str()),
                ("format", "json"),
                ("limit", "1"),
                ("countrycodes", "us"),
            ])
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err))?;

        let results: Vec<SearchResult> =
            response.json().await.map_err(|err| GeocodeError::Parse {
                message: err.to_string(),
            })?;

        let first = results.into_iter().next().ok_or_else(|| {
            GeocodeError::NotFound {
                query: query.to_owned(),
            }
        })?;
        parse_result(&first)
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error) -> GeocodeError {
        if error.is_timeout() {
            return GeocodeError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            };
        }
        if let Some(status) = error.status() {
            return GeocodeError::Http {
                status: status.as_u16(),
                message: error.to_string(),
            };
        }
        GeocodeError::Network {
            message: error.to_string(),
        }
    }
}

fn parse_result(result: &SearchResult) -> Result<Coord<f64>, GeocodeError> {
    let lat: f64 = result.lat.parse().map_err(|_ignored| GeocodeError::Parse {
        message: format!("invalid latitude {:?}", result.lat),
    })?;
    let lon: f64 = result.lon.parse().map_err(|_ignored| GeocodeError::Parse {
        message: format!("invalid longitude {:?}", result.lon),
    })?;
    Ok(Coord { x: lon, y: lat })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn search_results_parse_string_coordinates() {
        let json = r#"[{"lat": "39.7392364", "lon": "-104.984862", "display_name": "Denver"}]"#;

        let results: Vec<SearchResult> = serde_json::from_str(json).unwrap();
        let coord = parse_result(&results[0]).unwrap();

        assert_eq!(coord.y, 39.7392364);
        assert_eq!(coord.x, -104.984862);
    }

    #[rstest]
    fn empty_result_lists_deserialise() {
        let results: Vec<SearchResult> = serde_json::from_str("[]").unwrap();
        assert!(results.is_empty());
    }

    #[rstest]
    fn malformed_coordinates_are_a_parse_error() {
        let result = SearchResult {
            lat: "not-a-number".to_string(),
            lon: "-104.98".to_string(),
        };

        let err = parse_result(&result).unwrap_err();

        assert!(matches!(err, GeocodeError::Parse { .. }));
    }
}
