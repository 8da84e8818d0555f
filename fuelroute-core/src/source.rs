//! Load fuel stations from an external dataset.
//!
//! The [`StationSource`] trait abstracts the data-loading collaborator
//! that owns parsing, cleaning, and geocoding raw station records. The
//! planner consumes whatever the source yields; records the source could
//! not resolve are skipped by the source, not surfaced as errors.

use thiserror::Error;

use crate::Station;

/// Errors from [`StationSource::load_stations`].
#[derive(Debug, Error)]
pub enum StationSourceError {
    /// The underlying dataset could not be read.
    #[error("could not read station data from {context}")]
    Io {
        /// A description of what was being read.
        context: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The dataset was readable but malformed beyond recovery.
    #[error("station data from {context} is malformed: {message}")]
    Malformed {
        /// A description of what was being read.
        context: String,
        /// The parse error description.
        message: String,
    },
}

/// Yield the station records available for planning.
pub trait StationSource {
    /// Load every usable station.
    ///
    /// Individual records with unresolvable coordinates or invalid prices
    /// are skipped; only wholesale failures of the dataset return an error.
    ///
    /// # Errors
    /// Returns a [`StationSourceError`] when the dataset itself cannot be
    /// read or parsed.
    fn load_stations(&self) -> Result<Vec<Station>, StationSourceError>;
}
