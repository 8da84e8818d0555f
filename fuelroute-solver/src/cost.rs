//! Price the selected stops leg by leg.

use fuelroute_core::ProjectedStation;

/// Drivers top up a little past the strict leg requirement; purchases are
/// padded by this factor but never exceed tank capacity.
const FILL_BUFFER: f64 = 1.2;

/// Aggregate fuel figures for a trip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostBreakdown {
    /// Fuel consumed over the whole trip, in gallons.
    pub total_gallons: f64,
    /// Total spend across all stops, in dollars.
    pub total_fuel_cost: f64,
    /// `total_fuel_cost / total_gallons`, or zero when no fuel is needed.
    pub average_price_per_gallon: f64,
}

/// Computes gallons purchased per leg and the aggregate cost.
#[derive(Debug, Clone)]
pub struct CostEstimator {
    mpg: f64,
    max_range_miles: f64,
}

impl CostEstimator {
    /// Construct an estimator for the given fuel economy and range.
    #[must_use]
    pub fn new(mpg: f64, max_range_miles: f64) -> Self {
        Self {
            mpg,
            max_range_miles,
        }
    }

    /// Estimate cost for `stops` over a trip of `total_distance_miles`.
    ///
    /// Each stop buys fuel for the leg to the next stop (or to the
    /// destination for the last stop), padded by 20% and capped at tank
    /// capacity. An empty stop list costs nothing: the tank was full at
    /// departure and paid for outside this trip.
    #[must_use]
    pub fn estimate(
        &self,
        stops: &[ProjectedStation],
        total_distance_miles: f64,
    ) -> CostBreakdown {
        let total_gallons = total_distance_miles / self.mpg;
        if stops.is_empty() {
            return CostBreakdown {
                total_gallons,
                total_fuel_cost: 0.0,
                average_price_per_gallon: 0.0,
            };
        }

        let tank_capacity_gallons = self.max_range_miles / self.mpg;
        let mut total_fuel_cost = 0.0;
        for (index, stop) in stops.iter().enumerate() {
            let next_boundary = stops
                .get(index + 1)
                .map_or(total_distance_miles, |next| next.distance_along_route);
            let segment_miles = next_boundary - stop.distance_along_route;
            let gallons_for_segment = segment_miles / self.mpg;
            let gallons_purchased =
                (gallons_for_segment * FILL_BUFFER).min(tank_capacity_gallons);
            total_fuel_cost += gallons_purchased * stop.station.price_per_gallon;
        }

        let average_price_per_gallon = if total_gallons > 0.0 {
            total_fuel_cost / total_gallons
        } else {
            0.0
        };

        CostBreakdown {
            total_gallons,
            total_fuel_cost,
            average_price_per_gallon,
        }
    }
}
