//! The OPIS retail fuel-price catalogue.
//!
//! Loads the raw truckstop CSV, cleans it the way the planner needs it:
//! whitespace-trimmed fields, US-state rows only, one record per
//! truckstop keeping the lowest posted price, and coordinates resolved
//! from the city gazetteer. Records that cannot be resolved are skipped,
//! not fatal; only an unreadable dataset is an error.

use std::collections::{BTreeMap, HashMap};

use camino::{Utf8Path, Utf8PathBuf};
use fuelroute_core::{Station, StationSource, StationSourceError};
use geo::Coord;
use serde::Deserialize;
use thiserror::Error;

use crate::cities::CityIndex;
use crate::geocode::NominatimGeocoder;

/// Upper bound on geocoding-service lookups per catalogue load. The
/// gazetteer covers the overwhelming majority of cities; the remainder is
/// capped so a cold catalogue load stays within a few seconds.
const MAX_GEOCODE_FALLBACKS: usize = 10;

const US_STATES: [&str; 51] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT",
    "VA", "WA", "WV", "WI", "WY", "DC",
];

/// One row of the OPIS CSV export.
#[derive(Debug, Clone, Deserialize)]
struct StationRecord {
    #[serde(rename = "OPIS Truckstop ID")]
    id: u64,
    #[serde(rename = "Truckstop Name")]
    name: String,
    #[serde(rename = "Address")]
    address: String,
    #[serde(rename = "City")]
    city: String,
    #[serde(rename = "State")]
    state: String,
    #[serde(rename = "Retail Price")]
    price: f64,
}

/// Errors returned when loading a [`StationCatalogue`].
#[derive(Debug, Error)]
pub enum CatalogueError {
    /// The CSV file could not be opened or read.
    #[error("could not read station CSV {path}")]
    Csv {
        /// The offending path.
        path: Utf8PathBuf,
        /// The underlying CSV error.
        #[source]
        source: csv::Error,
    },
}

/// A cleaned, geocoded station list ready for planning.
#[derive(Debug, Clone, Default)]
pub struct StationCatalogue {
    stations: Vec<Station>,
}

impl StationCatalogue {
    /// Load the catalogue resolving coordinates from the gazetteer only.
    ///
    /// # Errors
    /// Returns [`CatalogueError`] when the CSV itself cannot be read;
    /// individual unresolvable rows are skipped.
    pub fn from_csv_path(path: &Utf8Path, cities: &CityIndex) -> Result<Self, CatalogueError> {
        Self::build(path, cities, None)
    }

    /// Load the catalogue, falling back to a geocoding service for up to
    /// ten cities missing from the gazetteer.
    ///
    /// # Errors
    /// Returns [`CatalogueError`] when the CSV itself cannot be read;
    /// geocoding failures only skip the affected rows.
    pub fn from_csv_path_with_fallback(
        path: &Utf8Path,
        cities: &CityIndex,
        geocoder: &NominatimGeocoder,
    ) -> Result<Self, CatalogueError> {
        Self::build(path, cities, Some(geocoder))
    }

    fn build(
        path: &Utf8Path,
        cities: &CityIndex,
        geocoder: Option<&NominatimGeocoder>,
    ) -> Result<Self, CatalogueError> {
        let records = read_records(path)?;
        let total = records.len();
        let deduped = dedupe_keeping_min_price(records);

        let mut city_cache: HashMap<String, Option<Coord<f64>>> = HashMap::new();
        let mut fallback_calls = 0_usize;
        let mut stations = Vec::with_capacity(deduped.len());

        for record in deduped.into_values() {
            let cache_key = format!(
                "{}, {}",
                record.city.trim().to_uppercase(),
                record.state.trim().to_uppercase()
            );
            let coords = city_cache
                .entry(cache_key)
                .or_insert_with(|| {
                    resolve_city(
                        &record.city,
                        &record.state,
                        cities,
                        geocoder,
                        &mut fallback_calls,
                    )
                })
                .to_owned();
            let Some(location) = coords else {
                log::debug!(
                    "skipping station {}: no coordinates for {}, {}",
                    record.id,
                    record.city,
                    record.state,
                );
                continue;
            };

            match Station::new(
                record.id,
                record.name,
                record.address,
                record.city,
                record.state,
                record.price,
                location,
            ) {
                Ok(station) => stations.push(station),
                Err(err) => log::warn!("skipping malformed station record: {err}"),
            }
        }

        log::info!(
            "loaded {} stations from {total} CSV rows ({} geocoder calls)",
            stations.len(),
            fallback_calls,
        );
        Ok(Self { stations })
    }

    /// The cleaned station list, ordered by truckstop id.
    #[must_use]
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Number of usable stations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Whether the catalogue holds no usable stations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Stations in a given state.
    #[must_use]
    pub fn in_state(&self, state: &str) -> Vec<&Station> {
        let state = state.trim().to_uppercase();
        self.stations
            .iter()
            .filter(|s| s.state == state)
            .collect()
    }

    /// The `n` cheapest stations, ascending by price.
    #[must_use]
    pub fn cheapest(&self, n: usize) -> Vec<&Station> {
        let mut by_price: Vec<&Station> = self.stations.iter().collect();
        by_price.sort_by(|a, b| a.price_per_gallon.total_cmp(&b.price_per_gallon));
        by_price.truncate(n);
        by_price
    }
}

impl StationSource for StationCatalogue {
    fn load_stations(&self) -> Result<Vec<Station>, StationSourceError> {
        Ok(self.stations.clone())
    }
}

fn read_records(path: &Utf8Path) -> Result<Vec<StationRecord>, CatalogueError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path.as_std_path())
        .map_err(|source| CatalogueError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

    let mut records = Vec::new();
    for row in reader.deserialize::<StationRecord>() {
        match row {
            Ok(record) if US_STATES.contains(&record.state.as_str()) => records.push(record),
            Ok(record) => {
                log::debug!("skipping non-US station row in state {:?}", record.state);
            }
            Err(err) => log::debug!("skipping unparsable station row: {err}"),
        }
    }
    Ok(records)
}

/// Collapse duplicate truckstop ids, keeping the lowest retail price.
/// `BTreeMap` iteration keeps the final catalogue deterministic.
fn dedupe_keeping_min_price(records: Vec<StationRecord>) -> BTreeMap<u64, StationRecord> {
    let mut deduped: BTreeMap<u64, StationRecord> = BTreeMap::new();
    for record in records {
        match deduped.get(&record.id) {
            Some(existing) if existing.price <= record.price => {}
            _ => {
                deduped.insert(record.id, record);
            }
        }
    }
    deduped
}

fn resolve_city(
    city: &str,
    state: &str,
    cities: &CityIndex,
    geocoder: Option<&NominatimGeocoder>,
    fallback_calls: &mut usize,
) -> Option<Coord<f64>> {
    if let Some(coord) = cities.lookup(city, state) {
        return Some(coord);
    }
    let geocoder = geocoder?;
    if *fallback_calls >= MAX_GEOCODE_FALLBACKS {
        return None;
    }
    *fallback_calls += 1;
    match geocoder.geocode(&format!("{city}, {state}")) {
        Ok(coord) => Some(coord),
        Err(err) => {
            log::debug!("geocoder fallback failed for {city}, {state}: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use std::io::Write;

    const CSV_HEADER: &str =
        "OPIS Truckstop ID,Truckstop Name,Address,City,State,Rack ID,Retail Price\n";

    #[fixture]
    fn index() -> CityIndex {
        CityIndex::from_entries([
            ("AMARILLO, TX", 35.19, -101.83),
            ("TUCSON, AZ", 32.22, -110.97),
            ("DENVER, CO", 39.74, -104.99),
        ])
    }

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn load(contents: &str, index: &CityIndex) -> StationCatalogue {
        let file = write_csv(contents);
        let path = Utf8Path::from_path(file.path()).unwrap();
        StationCatalogue::from_csv_path(path, index).unwrap()
    }

    #[rstest]
    fn loads_and_geocodes_rows(index: CityIndex) {
        let csv = format!(
            "{CSV_HEADER}\
             1,FLYING J #616,I-40 EXIT 53,AMARILLO,TX,305,3.15\n\
             2,LOVES #291,I-10 EXIT 37,TUCSON,AZ,152,3.05\n"
        );
        let catalogue = load(&csv, &index);

        assert_eq!(catalogue.len(), 2);
        assert_eq!(catalogue.stations()[0].name, "FLYING J #616");
        assert_eq!(catalogue.stations()[0].location.y, 35.19);
    }

    #[rstest]
    fn trims_whitespace_in_fields(index: CityIndex) {
        let csv = format!(
            "{CSV_HEADER}\
             1,  FLYING J #616 ,I-40 EXIT 53,  AMARILLO , TX ,305,3.15\n"
        );
        let catalogue = load(&csv, &index);

        assert_eq!(catalogue.len(), 1);
        assert_eq!(catalogue.stations()[0].name, "FLYING J #616");
        assert_eq!(catalogue.stations()[0].state, "TX");
    }

    #[rstest]
    fn keeps_minimum_price_per_truckstop(index: CityIndex) {
        let csv = format!(
            "{CSV_HEADER}\
             1,FLYING J #616,I-40 EXIT 53,AMARILLO,TX,305,3.15\n\
             1,FLYING J #616,I-40 EXIT 53,AMARILLO,TX,306,2.99\n\
             1,FLYING J #616,I-40 EXIT 53,AMARILLO,TX,307,3.25\n"
        );
        let catalogue = load(&csv, &index);

        assert_eq!(catalogue.len(), 1);
        assert_eq!(catalogue.stations()[0].price_per_gallon, 2.99);
    }

    #[rstest]
    fn filters_non_us_states_and_unknown_cities(index: CityIndex) {
        let csv = format!(
            "{CSV_HEADER}\
             1,PETRO CALGARY,HWY 1,CALGARY,AB,900,2.50\n\
             2,MYSTERY STOP,NOWHERE RD,FRODOVILLE,TX,901,2.40\n\
             3,LOVES #291,I-10 EXIT 37,TUCSON,AZ,152,3.05\n"
        );
        let catalogue = load(&csv, &index);

        assert_eq!(catalogue.len(), 1);
        assert_eq!(catalogue.stations()[0].id, 3);
    }

    #[rstest]
    fn skips_unparsable_rows(index: CityIndex) {
        let csv = format!(
            "{CSV_HEADER}\
             not-a-number,BROKEN,ROAD,DENVER,CO,1,3.00\n\
             2,LOVES #291,I-10 EXIT 37,TUCSON,AZ,152,not-a-price\n\
             3,FLYING J #616,I-40 EXIT 53,AMARILLO,TX,305,3.15\n"
        );
        let catalogue = load(&csv, &index);

        assert_eq!(catalogue.len(), 1);
        assert_eq!(catalogue.stations()[0].id, 3);
    }

    #[rstest]
    fn cheapest_orders_by_price(index: CityIndex) {
        let csv = format!(
            "{CSV_HEADER}\
             1,A,ROAD,AMARILLO,TX,1,3.15\n\
             2,B,ROAD,TUCSON,AZ,2,2.85\n\
             3,C,ROAD,DENVER,CO,3,3.05\n"
        );
        let catalogue = load(&csv, &index);

        let cheapest = catalogue.cheapest(2);
        assert_eq!(cheapest.len(), 2);
        assert_eq!(cheapest[0].id, 2);
        assert_eq!(cheapest[1].id, 3);
    }

    #[rstest]
    fn in_state_filters_by_state_code(index: CityIndex) {
        let csv = format!(
            "{CSV_HEADER}\
             1,A,ROAD,AMARILLO,TX,1,3.15\n\
             2,B,ROAD,TUCSON,AZ,2,2.85\n"
        );
        let catalogue = load(&csv, &index);

        let texan = catalogue.in_state(" tx ");
        assert_eq!(texan.len(), 1);
        assert_eq!(texan[0].id, 1);
    }

    #[rstest]
    fn missing_file_is_a_csv_error() {
        let err = StationCatalogue::from_csv_path(
            Utf8Path::new("/nonexistent/fuel.csv"),
            &CityIndex::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CatalogueError::Csv { .. }));
    }

    #[rstest]
    fn station_source_yields_the_catalogue(index: CityIndex) {
        let csv = format!(
            "{CSV_HEADER}\
             1,A,ROAD,AMARILLO,TX,1,3.15\n"
        );
        let catalogue = load(&csv, &index);

        let stations = catalogue.load_stations().unwrap();
        assert_eq!(stations.len(), 1);
    }
}
