//! OSRM API response types for the Route service.
//!
//! Deserialisation types for the OSRM Route API response format. The Route
//! service computes the fastest driving route between supplied coordinates
//! and, with `geometries=geojson`, returns the route shape as a GeoJSON
//! `LineString`.
//!
//! See: <http://project-osrm.org/docs/v5.24.0/api/#route-service>

use serde::Deserialize;

/// OSRM Route API response.
///
/// On success the response carries one or more routes; on failure the
/// `code` field names the error and `message` elaborates.
#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    /// Status code from OSRM.
    ///
    /// Common values:
    /// - `"Ok"` - Request was successful
    /// - `"InvalidQuery"` - Invalid query parameters
    /// - `"NoRoute"` - No route found between the coordinates
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Candidate routes, best first.
    #[serde(default)]
    pub routes: Vec<OsrmRoute>,
}

impl RouteResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }
}

/// One route alternative.
#[derive(Debug, Deserialize)]
pub struct OsrmRoute {
    /// Total route distance in metres.
    pub distance: f64,
    /// Total driving duration in seconds.
    pub duration: f64,
    /// Route shape as a GeoJSON `LineString`.
    pub geometry: Geometry,
}

/// GeoJSON geometry as returned with `geometries=geojson`.
#[derive(Debug, Deserialize)]
pub struct Geometry {
    /// Geometry type; `"LineString"` for route shapes.
    #[serde(rename = "type")]
    pub kind: String,
    /// `[longitude, latitude]` pairs along the route.
    pub coordinates: Vec<[f64; 2]>,
}
