//! The end-to-end planning pipeline.

use fuelroute_core::{
    ConfigError, PlannerConfig, RoutePolyline, Station, Stop, TripPlan, TripStatus,
};
use thiserror::Error;

use crate::{CostEstimator, RouteProjector, StopSelector};

/// Errors returned by [`FuelStopPlanner::new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// The supplied configuration failed validation.
    #[error("invalid planner configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Plans refueling stops for one request at a time.
///
/// The planner holds only immutable configuration; every call to
/// [`plan`](Self::plan) is independent and deterministic given its inputs.
///
/// # Examples
/// ```
/// use fuelroute_core::{PlannerConfig, TripStatus};
/// use fuelroute_core::test_support::{meridian_route, station_at_mile};
/// use fuelroute_solver::FuelStopPlanner;
///
/// let planner = FuelStopPlanner::with_defaults();
/// let route = meridian_route(600.0, 601);
/// let stations = vec![station_at_mile(1, 450.0, 2.80)];
///
/// let plan = planner.plan(&route, &stations);
/// assert_eq!(plan.status, TripStatus::StopsPlanned);
/// assert_eq!(plan.stop_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct FuelStopPlanner {
    config: PlannerConfig,
}

impl FuelStopPlanner {
    /// Construct a planner after validating `config`.
    ///
    /// # Errors
    /// Returns [`PlanError::InvalidConfig`] for non-positive or non-finite
    /// parameters.
    pub fn new(config: PlannerConfig) -> Result<Self, PlanError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Construct a planner with the default configuration
    /// (500 mi range, 10 mpg, 20 mi search radius).
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            config: PlannerConfig::default(),
        }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plan refueling stops for `route` given the available `stations`.
    ///
    /// Routes within one tank of range produce a
    /// [`TripStatus::NoStopNeeded`] plan without consulting the station
    /// list; routes with no stations near them produce
    /// [`TripStatus::NoStationsNearRoute`]. Both still report trip
    /// distance and gallons.
    #[must_use]
    pub fn plan(&self, route: &RoutePolyline, stations: &[Station]) -> TripPlan {
        let total_distance = route.total_distance_miles;
        let total_gallons = total_distance / self.config.mpg;

        if total_distance <= self.config.max_range_miles {
            log::debug!(
                "route of {total_distance:.1} mi fits within {:.0} mi range; no stop needed",
                self.config.max_range_miles,
            );
            return TripPlan::without_stops(TripStatus::NoStopNeeded, total_gallons);
        }

        let projected = RouteProjector::new(self.config.search_radius_miles)
            .project(route, stations);
        if projected.is_empty() {
            log::warn!(
                "no stations within {:.0} mi of a {total_distance:.1} mi route",
                self.config.search_radius_miles,
            );
            return TripPlan::without_stops(TripStatus::NoStationsNearRoute, total_gallons);
        }

        let chosen = StopSelector::new(self.config.max_range_miles)
            .select(&projected, total_distance);
        let breakdown = CostEstimator::new(self.config.mpg, self.config.max_range_miles)
            .estimate(&chosen, total_distance);

        log::debug!(
            "planned {} stops over {total_distance:.1} mi at ${:.2} total",
            chosen.len(),
            breakdown.total_fuel_cost,
        );

        TripPlan {
            status: TripStatus::StopsPlanned,
            stops: chosen.iter().map(Stop::from).collect(),
            total_gallons: breakdown.total_gallons,
            total_fuel_cost: breakdown.total_fuel_cost,
            average_price_per_gallon: breakdown.average_price_per_gallon,
        }
    }
}
