//! Derived, request-scoped planning types.
//!
//! [`ProjectedStation`] and [`Stop`] are produced while a request is being
//! planned and discarded once the [`TripPlan`] is built; no state outlives
//! the request.

use crate::Station;

/// A station annotated with its position relative to the route.
///
/// Created by the route projector; `distance_along_route` is the cumulative
/// route distance of the nearest sampled route point and `lateral_offset`
/// is the station's distance to that point. The projector only emits
/// stations whose offset is within the configured search radius.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedStation {
    /// The underlying station record.
    pub station: Station,
    /// Miles from the route origin to the nearest sampled route point.
    pub distance_along_route: f64,
    /// Miles from the station to the route, minimised over sample points.
    pub lateral_offset: f64,
}

/// A chosen refueling stop in caller-facing form.
///
/// The sequence of stops in a [`TripPlan`] is strictly increasing in
/// `distance_from_start`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stop {
    /// Station display name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// City name.
    pub city: String,
    /// Two-letter state code.
    pub state: String,
    /// Retail price per gallon in dollars.
    pub price_per_gallon: f64,
    /// Station latitude in degrees.
    pub latitude: f64,
    /// Station longitude in degrees.
    pub longitude: f64,
    /// Miles from the route origin.
    pub distance_from_start: f64,
}

impl From<&ProjectedStation> for Stop {
    fn from(projected: &ProjectedStation) -> Self {
        Self {
            name: projected.station.name.clone(),
            address: projected.station.address.clone(),
            city: projected.station.city.clone(),
            state: projected.station.state.clone(),
            price_per_gallon: projected.station.price_per_gallon,
            latitude: projected.station.location.y,
            longitude: projected.station.location.x,
            distance_from_start: projected.distance_along_route,
        }
    }
}

/// Outcome classification for a planning request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TripStatus {
    /// The route fits within one tank; no stop is required.
    NoStopNeeded,
    /// One or more stops were planned.
    StopsPlanned,
    /// No station lay within the search radius of the route. This is a
    /// soft outcome, not an error: distance and gallons are still
    /// reported.
    NoStationsNearRoute,
}

impl TripStatus {
    /// Caller-facing advisory message, when the outcome warrants one.
    #[must_use]
    pub fn advisory(self) -> Option<&'static str> {
        match self {
            Self::NoStopNeeded => {
                Some("Route is within vehicle range. No fuel stop needed.")
            }
            Self::StopsPlanned => None,
            Self::NoStationsNearRoute => {
                Some("No fuel stations found near route. Please plan manually.")
            }
        }
    }
}

/// The planner's answer for a single request.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TripPlan {
    /// Outcome classification.
    pub status: TripStatus,
    /// Ordered refueling stops, strictly increasing in distance.
    pub stops: Vec<Stop>,
    /// Fuel consumed over the whole trip, in gallons.
    pub total_gallons: f64,
    /// Total spend across all stops, in dollars.
    pub total_fuel_cost: f64,
    /// `total_fuel_cost / total_gallons`, or zero for an empty trip.
    pub average_price_per_gallon: f64,
}

impl TripPlan {
    /// A plan with no stops, used for the no-stop-needed and
    /// no-stations outcomes. Cost is zero: the departure tank is assumed
    /// full and already paid for.
    #[must_use]
    pub fn without_stops(status: TripStatus, total_gallons: f64) -> Self {
        Self {
            status,
            stops: Vec::new(),
            total_gallons,
            total_fuel_cost: 0.0,
            average_price_per_gallon: 0.0,
        }
    }

    /// Number of planned stops.
    #[must_use]
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }
}
