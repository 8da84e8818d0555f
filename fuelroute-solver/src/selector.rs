//! Greedy range-constrained stop selection.

use fuelroute_core::ProjectedStation;

/// Fraction of the remaining range that marks the "far" half of the
/// reachable window. Preferring stations past this threshold makes each
/// stop cover close to a full range leg, minimising stop count, while
/// still allowing price comparison among the far candidates.
const FAR_WINDOW_FRACTION: f64 = 0.5;

/// Chooses an ordered sequence of stops from distance-sorted stations.
///
/// The selector models a full tank at departure and a full refill at
/// every stop. It is a single greedy pass with a lookahead heuristic, not
/// a cost-optimal search: once a stop is chosen it is never revisited.
///
/// When no station is reachable from the current position but stations
/// remain ahead, the nearest one ahead is selected even though it exceeds
/// the vehicle's range. That leg knowingly violates the range invariant;
/// the alternative would be returning no plan at all. The relaxation is
/// surfaced as a warning log and otherwise preserved.
#[derive(Debug, Clone)]
pub struct StopSelector {
    max_range_miles: f64,
}

impl StopSelector {
    /// Construct a selector for a vehicle with the given range.
    #[must_use]
    pub fn new(max_range_miles: f64) -> Self {
        Self { max_range_miles }
    }

    /// Select stops from `stations`, which must be sorted ascending by
    /// `distance_along_route`.
    ///
    /// Callers short-circuit routes that fit within one tank; this method
    /// still terminates immediately for them. The returned sequence is
    /// strictly increasing in `distance_along_route`.
    #[must_use]
    pub fn select(
        &self,
        stations: &[ProjectedStation],
        total_distance_miles: f64,
    ) -> Vec<ProjectedStation> {
        let mut stops = Vec::new();
        let mut current_position = 0.0;
        let mut remaining_range = self.max_range_miles;

        while current_position + remaining_range < total_distance_miles {
            let max_reach = current_position + remaining_range;
            let reachable: Vec<&ProjectedStation> = stations
                .iter()
                .filter(|s| {
                    current_position < s.distance_along_route
                        && s.distance_along_route <= max_reach
                })
                .collect();

            let chosen = if reachable.is_empty() {
                let Some(nearest) = nearest_ahead(stations, current_position) else {
                    // Nothing ahead at all; the caller accepts the shortfall.
                    break;
                };
                log::warn!(
                    "no station reachable within {:.0} mi of mile {:.1}; stopping at mile {:.1} beyond range",
                    remaining_range,
                    current_position,
                    nearest.distance_along_route,
                );
                nearest
            } else {
                let far_threshold = current_position + remaining_range * FAR_WINDOW_FRACTION;
                let far_reachable = reachable
                    .iter()
                    .copied()
                    .filter(|s| s.distance_along_route > far_threshold);
                match cheapest(far_reachable) {
                    Some(best) => best,
                    // All candidates sit close by; fall back to the whole
                    // window. `reachable` is non-empty, so this yields one.
                    None => match cheapest(reachable.iter().copied()) {
                        Some(best) => best,
                        None => break,
                    },
                }
            };

            stops.push(chosen.clone());
            current_position = chosen.distance_along_route;
            remaining_range = self.max_range_miles;
        }

        stops
    }
}

/// Minimum-price station, first encountered wins on ties.
///
/// `Iterator::min_by` keeps the *last* minimum, which would make the
/// tie-break depend on iteration direction; selection must stay
/// deterministic given the projector's stable distance ordering, so ties
/// resolve to the earliest station instead.
fn cheapest<'a, I>(stations: I) -> Option<&'a ProjectedStation>
where
    I: Iterator<Item = &'a ProjectedStation>,
{
    stations.fold(None, |best: Option<&ProjectedStation>, candidate| {
        match best {
            Some(current)
                if current.station.price_per_gallon <= candidate.station.price_per_gallon =>
            {
                Some(current)
            }
            _ => Some(candidate),
        }
    })
}

/// Closest station strictly past `position`, first encountered wins on ties.
fn nearest_ahead(
    stations: &[ProjectedStation],
    position: f64,
) -> Option<&ProjectedStation> {
    stations
        .iter()
        .filter(|s| s.distance_along_route > position)
        .fold(None, |best: Option<&ProjectedStation>, candidate| match best {
            Some(current) if current.distance_along_route <= candidate.distance_along_route => {
                Some(current)
            }
            _ => Some(candidate),
        })
}
