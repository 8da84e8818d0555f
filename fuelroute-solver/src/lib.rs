//! Greedy fuel-stop planning over a projected route.
//!
//! The crate turns a route polyline and a raw station list into an ordered
//! refueling plan in three stages:
//! 1. [`RouteProjector`] places each station on the route, producing a
//!    distance-along-route and a lateral offset, and drops stations beyond
//!    the search radius.
//! 2. [`StopSelector`] walks the route greedily, preferring cheap stations
//!    in the far half of the reachable window so each stop covers close to
//!    a full tank of range.
//! 3. [`CostEstimator`] prices the chosen stops leg by leg.
//!
//! [`FuelStopPlanner`] wires the stages together behind one call and
//! handles the no-stop-needed and no-stations outcomes.
//!
//! The selection is a single greedy pass, not a provably cost-optimal
//! search: it never backtracks once a stop is chosen, trading guaranteed
//! minimal cost for linear running time.

#![forbid(unsafe_code)]

mod cost;
mod planner;
mod projector;
mod selector;

pub use cost::{CostBreakdown, CostEstimator};
pub use planner::{FuelStopPlanner, PlanError};
pub use projector::{DEFAULT_MAX_SAMPLES, RouteProjector};
pub use selector::StopSelector;
