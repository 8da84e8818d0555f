//! Fuel stations supplied by the data-loading collaborator.

use geo::Coord;
use thiserror::Error;

/// A fuel station with a posted retail price.
///
/// Stations are read-only inputs to the planner: the data layer owns
/// loading, cleaning, and geocoding them.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use fuelroute_core::Station;
///
/// # fn main() -> Result<(), fuelroute_core::StationError> {
/// let station = Station::new(
///     42,
///     "FLYING J #616",
///     "I-40, EXIT 53",
///     "AMARILLO",
///     "TX",
///     3.15,
///     Coord { x: -101.83, y: 35.19 },
/// )?;
/// assert_eq!(station.id, 42);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Station {
    /// Unique identifier from the source dataset.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// City name.
    pub city: String,
    /// Two-letter state code.
    pub state: String,
    /// Retail price per gallon in dollars.
    pub price_per_gallon: f64,
    /// Geospatial position, `x = longitude`, `y = latitude`.
    pub location: Coord<f64>,
}

/// Errors returned by [`Station::new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StationError {
    /// The retail price was negative or not a number.
    #[error("station price per gallon must be non-negative, got {price}")]
    InvalidPrice {
        /// The rejected price value.
        price: f64,
    },
    /// A coordinate component was NaN or infinite.
    #[error("station location must have finite coordinates")]
    NonFiniteLocation,
}

impl Station {
    /// Validates and constructs a [`Station`].
    ///
    /// # Errors
    /// Returns [`StationError::InvalidPrice`] for negative or non-finite
    /// prices and [`StationError::NonFiniteLocation`] for NaN or infinite
    /// coordinates.
    pub fn new(
        id: u64,
        name: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        price_per_gallon: f64,
        location: Coord<f64>,
    ) -> Result<Self, StationError> {
        if !(price_per_gallon.is_finite() && price_per_gallon >= 0.0) {
            return Err(StationError::InvalidPrice {
                price: price_per_gallon,
            });
        }
        if !(location.x.is_finite() && location.y.is_finite()) {
            return Err(StationError::NonFiniteLocation);
        }
        Ok(Self {
            id,
            name: name.into(),
            address: address.into(),
            city: city.into(),
            state: state.into(),
            price_per_gallon,
            location,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn build(price: f64, location: Coord<f64>) -> Result<Station, StationError> {
        Station::new(1, "STOP", "1 MAIN ST", "DENVER", "CO", price, location)
    }

    #[rstest]
    #[case(0.0)]
    #[case(3.459)]
    fn accepts_non_negative_prices(#[case] price: f64) {
        assert!(build(price, Coord { x: 0.0, y: 0.0 }).is_ok());
    }

    #[rstest]
    #[case(-0.01)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn rejects_invalid_prices(#[case] price: f64) {
        let result = build(price, Coord { x: 0.0, y: 0.0 });
        assert!(matches!(result, Err(StationError::InvalidPrice { .. })));
    }

    #[rstest]
    #[case(Coord { x: f64::NAN, y: 0.0 })]
    #[case(Coord { x: 0.0, y: f64::INFINITY })]
    fn rejects_non_finite_locations(#[case] location: Coord<f64>) {
        let result = build(2.80, location);
        assert!(matches!(result, Err(StationError::NonFiniteLocation)));
    }
}
