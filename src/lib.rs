//! Facade crate for the fuelroute engine.
//!
//! Re-exports the planning domain model from `fuelroute-core` and, with the
//! default `planner-greedy` feature, the greedy planning pipeline from
//! `fuelroute-solver`. Data collaborators (station CSV loading, OSRM
//! routing, geocoding) live in `fuelroute-data` and are pulled in directly
//! by applications that need them.
//!
//! # Examples
//! ```
//! use fuelroute_engine::{FuelStopPlanner, TripStatus};
//! use fuelroute_core::test_support::{meridian_route, station_at_mile};
//!
//! let planner = FuelStopPlanner::with_defaults();
//! let route = meridian_route(400.0, 401);
//!
//! let plan = planner.plan(&route, &[station_at_mile(1, 200.0, 3.00)]);
//! assert_eq!(plan.status, TripStatus::NoStopNeeded);
//! ```

#![forbid(unsafe_code)]

pub use fuelroute_core::{
    ConfigError, EARTH_RADIUS_MILES, FetchedRoute, PlannerConfig, ProjectedStation,
    RouteFetchError, RouteGeometryError, RoutePolyline, RouteProvider, Station, StationError,
    StationSource, StationSourceError, Stop, TripPlan, TripStatus, haversine_miles,
    point_at_distance,
};

#[cfg(feature = "planner-greedy")]
pub use fuelroute_solver::{
    CostBreakdown, CostEstimator, DEFAULT_MAX_SAMPLES, FuelStopPlanner, PlanError, RouteProjector,
    StopSelector,
};
