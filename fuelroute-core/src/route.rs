//! Route polylines produced by the routing collaborator.

use geo::Coord;
use thiserror::Error;

/// An ordered polyline from origin to destination.
///
/// The coordinate sequence and the total driving distance both come from
/// the external routing service; the total distance follows the road
/// network and is generally longer than the great-circle sum of the
/// polyline, so it is carried alongside the geometry rather than derived
/// from it.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use fuelroute_core::RoutePolyline;
///
/// # fn main() -> Result<(), fuelroute_core::RouteGeometryError> {
/// let route = RoutePolyline::new(
///     vec![Coord { x: -118.24, y: 34.05 }, Coord { x: -115.14, y: 36.17 }],
///     270.0,
/// )?;
/// assert_eq!(route.points.len(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoutePolyline {
    /// Ordered coordinates, origin first.
    pub points: Vec<Coord<f64>>,
    /// Total driving distance in miles.
    pub total_distance_miles: f64,
}

/// Errors returned by [`RoutePolyline::new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteGeometryError {
    /// The route carried no coordinate sequence. Nothing can be planned
    /// against an empty polyline, so this fails fast.
    #[error("route geometry must contain at least one coordinate")]
    EmptyGeometry,
    /// The total distance was negative, NaN, or infinite.
    #[error("route distance must be a finite non-negative mileage, got {distance}")]
    InvalidDistance {
        /// The rejected distance value.
        distance: f64,
    },
}

impl RoutePolyline {
    /// Validates and constructs a [`RoutePolyline`].
    ///
    /// # Errors
    /// Returns [`RouteGeometryError::EmptyGeometry`] when `points` is empty
    /// and [`RouteGeometryError::InvalidDistance`] for non-finite or
    /// negative totals.
    pub fn new(
        points: Vec<Coord<f64>>,
        total_distance_miles: f64,
    ) -> Result<Self, RouteGeometryError> {
        if points.is_empty() {
            return Err(RouteGeometryError::EmptyGeometry);
        }
        if !(total_distance_miles.is_finite() && total_distance_miles >= 0.0) {
            return Err(RouteGeometryError::InvalidDistance {
                distance: total_distance_miles,
            });
        }
        Ok(Self {
            points,
            total_distance_miles,
        })
    }
}
