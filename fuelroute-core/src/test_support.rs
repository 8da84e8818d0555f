//! Test-only fixtures shared by unit and integration tests.

use geo::Coord;

use crate::{EARTH_RADIUS_MILES, RoutePolyline, Station};

/// Miles covered by one degree of latitude on the planner's sphere.
pub const MILES_PER_DEGREE_LAT: f64 = EARTH_RADIUS_MILES * std::f64::consts::PI / 180.0;

/// Build a station at an explicit coordinate.
///
/// # Panics
/// Panics when `price` or the coordinates are invalid; fixtures are
/// expected to supply valid values.
#[must_use]
#[expect(clippy::unwrap_used, reason = "fixture input is static and valid")]
pub fn station(id: u64, lon: f64, lat: f64, price: f64) -> Station {
    Station::new(
        id,
        format!("STATION #{id}"),
        format!("{id} TEST RD"),
        "SPRINGFIELD",
        "IL",
        price,
        Coord { x: lon, y: lat },
    )
    .unwrap()
}

/// Build a station sitting directly on the meridian test route at
/// `mile` miles from the origin.
#[must_use]
pub fn station_at_mile(id: u64, mile: f64, price: f64) -> Station {
    station(id, 0.0, mile / MILES_PER_DEGREE_LAT, price)
}

/// A straight test route running due north from the origin along the
/// prime meridian, with `points` evenly spaced coordinates covering
/// `total_miles`.
///
/// # Panics
/// Panics when `points` is zero; fixtures are expected to supply at least
/// one point.
#[must_use]
#[expect(clippy::unwrap_used, reason = "fixture input is static and valid")]
pub fn meridian_route(total_miles: f64, points: usize) -> RoutePolyline {
    assert!(points > 0, "meridian_route requires at least one point");
    let coords = (0..points)
        .map(|i| {
            let fraction = if points > 1 {
                i as f64 / (points - 1) as f64
            } else {
                0.0
            };
            Coord {
                x: 0.0,
                y: fraction * total_miles / MILES_PER_DEGREE_LAT,
            }
        })
        .collect();
    RoutePolyline::new(coords, total_miles).unwrap()
}
