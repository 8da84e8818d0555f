//! Great-circle distance and interpolation primitives.
//!
//! All functions are pure and operate on [`geo::Coord`] values in degrees,
//! returning distances in statute miles. The planner works entirely in
//! miles because the station dataset prices fuel per gallon and vehicle
//! range is quoted in miles, so the crate keeps its own haversine rather
//! than converting through metre-based helpers.

use geo::Coord;

use crate::RoutePolyline;

/// Mean Earth radius in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Great-circle distance between two coordinates in miles.
///
/// Uses the haversine formula, which is numerically stable for the
/// short-to-continental distances this planner deals with.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use fuelroute_core::haversine_miles;
///
/// let los_angeles = Coord { x: -118.2437, y: 34.0522 };
/// let new_york = Coord { x: -74.0060, y: 40.7128 };
/// let distance = haversine_miles(los_angeles, new_york);
/// assert!((2440.0..2460.0).contains(&distance));
/// ```
#[must_use]
pub fn haversine_miles(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let lat_a = a.y.to_radians();
    let lat_b = b.y.to_radians();
    let delta_lat = (b.y - a.y).to_radians();
    let delta_lon = (b.x - a.x).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_MILES * c
}

/// The point on `route` at approximately `distance_miles` from its origin.
///
/// Walks the polyline segments accumulating haversine lengths and linearly
/// interpolates latitude and longitude within the segment where the target
/// distance falls. Returns the final point when `distance_miles` exceeds
/// the polyline length. This is the interpolation fallback used when a
/// position is needed between stations; the stop-selection loop itself
/// never calls it.
#[must_use]
pub fn point_at_distance(route: &RoutePolyline, distance_miles: f64) -> Coord<f64> {
    let mut cumulative = 0.0;
    for pair in route.points.windows(2) {
        let segment = haversine_miles(pair[0], pair[1]);
        if cumulative + segment >= distance_miles {
            let remaining = distance_miles - cumulative;
            let ratio = if segment > 0.0 { remaining / segment } else { 0.0 };
            return Coord {
                x: pair[0].x + ratio * (pair[1].x - pair[0].x),
                y: pair[0].y + ratio * (pair[1].y - pair[0].y),
            };
        }
        cumulative += segment;
    }
    // Constructors guarantee at least one point.
    route.points[route.points.len() - 1]
}
