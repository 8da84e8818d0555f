//! Project stations onto a route polyline.

use fuelroute_core::{ProjectedStation, RoutePolyline, Station, haversine_miles};
use geo::Coord;

/// Upper bound on the number of route points sampled per projection.
///
/// Scanning every polyline point for every station is O(points) per
/// station; a cross-country route can carry tens of thousands of points,
/// so the projector thins the polyline to roughly this many samples
/// before scanning.
pub const DEFAULT_MAX_SAMPLES: usize = 500;

/// Places stations on a route and filters to those near the path.
///
/// The assigned `distance_along_route` is the cumulative distance of the
/// *nearest sampled point*, not a true perpendicular projection onto the
/// segment. This is a deliberate accuracy/cost tradeoff: the placement
/// error is bounded by the spacing between consecutive samples, and a
/// sharply curving route can misplace a station by up to that spacing.
#[derive(Debug, Clone)]
pub struct RouteProjector {
    search_radius_miles: f64,
    max_samples: usize,
}

impl RouteProjector {
    /// Construct a projector keeping stations within `search_radius_miles`
    /// of the route.
    #[must_use]
    pub fn new(search_radius_miles: f64) -> Self {
        Self {
            search_radius_miles,
            max_samples: DEFAULT_MAX_SAMPLES,
        }
    }

    /// Override the sample cap. Mainly useful in tests.
    #[must_use]
    pub fn with_max_samples(mut self, max_samples: usize) -> Self {
        self.max_samples = max_samples.max(1);
        self
    }

    /// Project `stations` onto `route`.
    ///
    /// Stations with non-finite coordinates are skipped. The result is
    /// sorted ascending by `distance_along_route`; the sort is stable, so
    /// equal distances keep their input order. An empty result is a valid
    /// outcome, not an error.
    #[must_use]
    pub fn project(&self, route: &RoutePolyline, stations: &[Station]) -> Vec<ProjectedStation> {
        let samples = self.sample_points(route);
        let cumulative = cumulative_distances(&samples);

        let mut projected: Vec<ProjectedStation> = stations
            .iter()
            .filter_map(|station| self.place_station(station, &samples, &cumulative))
            .collect();

        projected.sort_by(|a, b| a.distance_along_route.total_cmp(&b.distance_along_route));

        log::debug!(
            "projected {} of {} stations within {} mi of a {}-sample route",
            projected.len(),
            stations.len(),
            self.search_radius_miles,
            samples.len(),
        );
        projected
    }

    fn sample_points(&self, route: &RoutePolyline) -> Vec<Coord<f64>> {
        let step = (route.points.len() / self.max_samples).max(1);
        route.points.iter().copied().step_by(step).collect()
    }

    fn place_station(
        &self,
        station: &Station,
        samples: &[Coord<f64>],
        cumulative: &[f64],
    ) -> Option<ProjectedStation> {
        if !(station.location.x.is_finite() && station.location.y.is_finite()) {
            log::debug!("skipping station {} with non-finite coordinates", station.id);
            return None;
        }

        let mut lateral_offset = f64::INFINITY;
        let mut distance_along_route = 0.0;
        for (sample, distance) in samples.iter().zip(cumulative) {
            let to_station = haversine_miles(*sample, station.location);
            if to_station < lateral_offset {
                lateral_offset = to_station;
                distance_along_route = *distance;
            }
        }

        (lateral_offset <= self.search_radius_miles).then(|| ProjectedStation {
            station: station.clone(),
            distance_along_route,
            lateral_offset,
        })
    }
}

/// Cumulative haversine distance at each sample, starting at zero.
fn cumulative_distances(samples: &[Coord<f64>]) -> Vec<f64> {
    let mut cumulative = Vec::with_capacity(samples.len());
    let mut total = 0.0;
    cumulative.push(0.0);
    for pair in samples.windows(2) {
        total += haversine_miles(pair[0], pair[1]);
        cumulative.push(total);
    }
    cumulative
}
