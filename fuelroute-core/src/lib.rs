//! Core domain types for the fuelroute planning engine.
//!
//! These models provide basic validation to keep downstream components
//! honest. Constructors return `Result` to surface invalid input early.
//! Coordinates are WGS84 [`geo::Coord`] values with `x = longitude` and
//! `y = latitude`; every distance in the crate is measured in statute miles.

#![forbid(unsafe_code)]

pub mod config;
pub mod geodesy;
pub mod plan;
pub mod route;
pub mod routing;
pub mod source;
pub mod station;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use config::{ConfigError, PlannerConfig};
pub use geodesy::{EARTH_RADIUS_MILES, haversine_miles, point_at_distance};
pub use plan::{ProjectedStation, Stop, TripPlan, TripStatus};
pub use route::{RouteGeometryError, RoutePolyline};
pub use routing::{FetchedRoute, RouteFetchError, RouteProvider};
pub use source::{StationSource, StationSourceError};
pub use station::{Station, StationError};
