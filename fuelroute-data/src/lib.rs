//! External-data collaborators for the fuelroute engine.
//!
//! Everything that touches the filesystem or the network lives here, so
//! the planning core stays deterministic and I/O free:
//! - [`stations::StationCatalogue`] loads and cleans the OPIS retail-price
//!   CSV and resolves station coordinates through a [`cities::CityIndex`].
//! - [`routing::OsrmRouteProvider`] fetches driving routes from an OSRM
//!   instance and adapts them to the core's `RouteProvider` trait.
//! - [`geocode::NominatimGeocoder`] turns free-text addresses into
//!   coordinates for the trip endpoints.

#![forbid(unsafe_code)]

pub mod cities;
pub mod geocode;
pub mod routing;
pub mod stations;

pub use cities::{CityIndex, CityIndexError};
pub use geocode::{GeocodeError, NominatimGeocoder, NominatimGeocoderConfig};
pub use routing::{OsrmRouteProvider, OsrmRouteProviderConfig, ProviderBuildError};
pub use stations::{CatalogueError, StationCatalogue};
