//! City-to-coordinate lookup.
//!
//! The OPIS dataset locates stations by city and state only, so station
//! coordinates are resolved through a local gazetteer: a JSON object
//! mapping `"CITY, ST"` keys to `[latitude, longitude]` pairs. Lookups
//! normalise case and whitespace; unknown cities simply return `None` and
//! the caller decides whether to fall back to a geocoding service.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;

use camino::{Utf8Path, Utf8PathBuf};
use geo::Coord;
use thiserror::Error;

/// Errors returned when loading a [`CityIndex`].
#[derive(Debug, Error)]
pub enum CityIndexError {
    /// The gazetteer file could not be opened or read.
    #[error("could not read city index {path}")]
    Io {
        /// The offending path.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The gazetteer file was not valid JSON of the expected shape.
    #[error("could not parse city index {path}")]
    Parse {
        /// The offending path.
        path: Utf8PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// In-memory `"CITY, ST"` to coordinate lookup.
#[derive(Debug, Clone, Default)]
pub struct CityIndex {
    coords: HashMap<String, Coord<f64>>,
}

impl CityIndex {
    /// Load a gazetteer from a JSON file of `"CITY, ST": [lat, lon]`
    /// entries.
    ///
    /// # Errors
    /// Returns [`CityIndexError`] when the file cannot be read or parsed.
    pub fn from_json_path(path: &Utf8Path) -> Result<Self, CityIndexError> {
        let file = File::open(path.as_std_path()).map_err(|source| CityIndexError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: HashMap<String, (f64, f64)> = serde_json::from_reader(BufReader::new(file))
            .map_err(|source| CityIndexError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::from_entries(
            raw.into_iter().map(|(key, (lat, lon))| (key, lat, lon)),
        ))
    }

    /// Build an index from `(key, latitude, longitude)` entries. Keys are
    /// normalised the same way lookups are.
    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, f64, f64)>,
        K: AsRef<str>,
    {
        let coords = entries
            .into_iter()
            .map(|(key, lat, lon)| {
                (
                    normalise_key(key.as_ref()),
                    Coord { x: lon, y: lat },
                )
            })
            .collect();
        Self { coords }
    }

    /// Coordinates for a city/state pair, if known.
    #[must_use]
    pub fn lookup(&self, city: &str, state: &str) -> Option<Coord<f64>> {
        self.coords.get(&key_for(city, state)).copied()
    }

    /// Whether a city/state pair is present without fetching it.
    #[must_use]
    pub fn contains(&self, city: &str, state: &str) -> bool {
        self.coords.contains_key(&key_for(city, state))
    }

    /// Number of cities in the index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }
}

fn key_for(city: &str, state: &str) -> String {
    format!(
        "{}, {}",
        city.trim().to_uppercase(),
        state.trim().to_uppercase()
    )
}

fn normalise_key(key: &str) -> String {
    match key.split_once(',') {
        Some((city, state)) => key_for(city, state),
        None => key.trim().to_uppercase(),
    }
}
