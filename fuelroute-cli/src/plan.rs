//! The `plan` subcommand: end-to-end trip planning.

use camino::Utf8PathBuf;
use clap::Args;
use fuelroute_core::{FetchedRoute, PlannerConfig, RouteProvider, StationSource, Stop, TripPlan};
use fuelroute_data::{
    CityIndex, NominatimGeocoder, NominatimGeocoderConfig, OsrmRouteProvider,
    OsrmRouteProviderConfig, StationCatalogue,
};
use fuelroute_solver::FuelStopPlanner;
use geo::Coord;
use serde::Serialize;

use crate::CliError;

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Args)]
#[command(
    long_about = "Plan fuel stops for a driving trip. Geocodes the start and \
                 finish locations, fetches the route from an OSRM instance, \
                 loads the OPIS station price CSV, and prints a JSON plan with \
                 the chosen stops and estimated fuel cost."
)]
pub struct PlanArgs {
    /// Start location, e.g. "Los Angeles, CA".
    #[arg(long, value_name = "location")]
    pub start: String,
    /// Finish location, e.g. "New York, NY".
    #[arg(long, value_name = "location")]
    pub finish: String,
    /// Path to the OPIS station price CSV.
    #[arg(long, value_name = "path")]
    pub stations: Utf8PathBuf,
    /// Path to the city gazetteer JSON.
    #[arg(long, value_name = "path")]
    pub cities: Utf8PathBuf,
    /// Vehicle range on a full tank, in miles.
    #[arg(long = "max-range", value_name = "miles", default_value_t = 500.0)]
    pub max_range_miles: f64,
    /// Fuel economy in miles per gallon.
    #[arg(long, value_name = "mpg", default_value_t = 10.0)]
    pub mpg: f64,
    /// How far off the route a station may sit, in miles.
    #[arg(long = "search-radius", value_name = "miles", default_value_t = 20.0)]
    pub search_radius_miles: f64,
    /// Base URL of the OSRM routing service.
    #[arg(long = "osrm-url", value_name = "url")]
    pub osrm_url: Option<String>,
    /// Base URL of the Nominatim geocoding service.
    #[arg(long = "nominatim-url", value_name = "url")]
    pub nominatim_url: Option<String>,
}

/// One endpoint of the trip, as resolved.
#[derive(Debug, Serialize)]
pub struct EndpointReport {
    /// The location as given on the command line.
    pub query: String,
    /// Resolved latitude.
    pub latitude: f64,
    /// Resolved longitude.
    pub longitude: f64,
}

/// One planned stop, with presentation rounding applied.
#[derive(Debug, Serialize)]
pub struct StopReport {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub price_per_gallon: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub distance_from_start_miles: f64,
}

/// The JSON document printed by `fuelroute plan`.
#[derive(Debug, Serialize)]
pub struct PlanReport {
    pub start: EndpointReport,
    pub finish: EndpointReport,
    pub total_distance_miles: f64,
    pub total_duration_hours: f64,
    pub fuel_stops: Vec<StopReport>,
    pub stop_count: usize,
    pub total_gallons: f64,
    pub total_fuel_cost: f64,
    pub average_price_per_gallon: f64,
    /// Advisory for plans without stops, absent otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl PlanReport {
    fn build(
        args: &PlanArgs,
        start: Coord<f64>,
        finish: Coord<f64>,
        route: &FetchedRoute,
        plan: &TripPlan,
    ) -> Self {
        Self {
            start: EndpointReport {
                query: args.start.clone(),
                latitude: start.y,
                longitude: start.x,
            },
            finish: EndpointReport {
                query: args.finish.clone(),
                latitude: finish.y,
                longitude: finish.x,
            },
            total_distance_miles: round2(route.polyline.total_distance_miles),
            total_duration_hours: round2(route.duration.as_secs_f64() / 3600.0),
            fuel_stops: plan.stops.iter().map(StopReport::from).collect(),
            stop_count: plan.stop_count(),
            total_gallons: round2(plan.total_gallons),
            total_fuel_cost: round2(plan.total_fuel_cost),
            average_price_per_gallon: round3(plan.average_price_per_gallon),
            message: plan.status.advisory(),
        }
    }
}

impl From<&Stop> for StopReport {
    fn from(stop: &Stop) -> Self {
        Self {
            name: stop.name.clone(),
            address: stop.address.clone(),
            city: stop.city.clone(),
            state: stop.state.clone(),
            price_per_gallon: round3(stop.price_per_gallon),
            latitude: stop.latitude,
            longitude: stop.longitude,
            distance_from_start_miles: round2(stop.distance_from_start),
        }
    }
}

/// Run the full planning pipeline for the given arguments.
pub(crate) fn run_plan(args: &PlanArgs) -> Result<PlanReport, CliError> {
    let geocoder = build_geocoder(args.nominatim_url.as_deref())?;
    let start = geocode_endpoint(&geocoder, &args.start)?;
    let finish = geocode_endpoint(&geocoder, &args.finish)?;
    log::info!(
        "geocoded {:?} to ({:.4}, {:.4}) and {:?} to ({:.4}, {:.4})",
        args.start,
        start.y,
        start.x,
        args.finish,
        finish.y,
        finish.x,
    );

    let provider = build_provider(args.osrm_url.as_deref())?;
    let route = provider.fetch_route(start, finish)?;
    log::info!(
        "fetched route: {:.0} miles, {} points",
        route.polyline.total_distance_miles,
        route.polyline.points.len(),
    );

    let cities = CityIndex::from_json_path(&args.cities)?;
    let catalogue = StationCatalogue::from_csv_path_with_fallback(&args.stations, &cities, &geocoder)?;
    let stations = catalogue.load_stations()?;

    let planner = FuelStopPlanner::new(PlannerConfig {
        max_range_miles: args.max_range_miles,
        mpg: args.mpg,
        search_radius_miles: args.search_radius_miles,
    })?;
    let plan = planner.plan(&route.polyline, &stations);

    Ok(PlanReport::build(args, start, finish, &route, &plan))
}

fn build_geocoder(base_url: Option<&str>) -> Result<NominatimGeocoder, CliError> {
    let config = base_url.map_or_else(NominatimGeocoderConfig::default, NominatimGeocoderConfig::new);
    Ok(NominatimGeocoder::with_config(config)?)
}

fn build_provider(base_url: Option<&str>) -> Result<OsrmRouteProvider, CliError> {
    let config =
        base_url.map_or_else(OsrmRouteProviderConfig::default, OsrmRouteProviderConfig::new);
    Ok(OsrmRouteProvider::with_config(config)?)
}

fn geocode_endpoint(geocoder: &NominatimGeocoder, location: &str) -> Result<Coord<f64>, CliError> {
    geocoder.geocode(location).map_err(|source| CliError::Geocode {
        location: location.to_owned(),
        source,
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use fuelroute_core::{RoutePolyline, TripStatus};
    use rstest::rstest;
    use std::time::Duration;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: PlanArgs,
    }

    fn sample_args() -> PlanArgs {
        Harness::parse_from([
            "harness",
            "--start",
            "Los Angeles, CA",
            "--finish",
            "New York, NY",
            "--stations",
            "fuel.csv",
            "--cities",
            "cities.json",
        ])
        .args
    }

    fn sample_route(total_miles: f64, hours: f64) -> FetchedRoute {
        let polyline = RoutePolyline::new(
            vec![
                Coord { x: -118.24, y: 34.05 },
                Coord { x: -74.0, y: 40.71 },
            ],
            total_miles,
        )
        .unwrap();
        FetchedRoute {
            polyline,
            duration: Duration::from_secs_f64(hours * 3600.0),
        }
    }

    #[rstest]
    fn report_rounds_presentation_values() {
        let args = sample_args();
        let plan = TripPlan {
            status: TripStatus::StopsPlanned,
            stops: vec![Stop {
                name: "FLYING J #616".to_string(),
                address: "I-40 EXIT 53".to_string(),
                city: "AMARILLO".to_string(),
                state: "TX".to_string(),
                price_per_gallon: 2.89999,
                latitude: 35.19,
                longitude: -101.83,
                distance_from_start: 449.876,
            }],
            total_gallons: 95.1234,
            total_fuel_cost: 276.9876,
            average_price_per_gallon: 2.91177,
        };

        let report = PlanReport::build(
            &args,
            Coord { x: -118.24, y: 34.05 },
            Coord { x: -74.0, y: 40.71 },
            &sample_route(951.237, 14.256),
            &plan,
        );

        assert_eq!(report.total_distance_miles, 951.24);
        assert_eq!(report.total_duration_hours, 14.26);
        assert_eq!(report.total_gallons, 95.12);
        assert_eq!(report.total_fuel_cost, 276.99);
        assert_eq!(report.average_price_per_gallon, 2.912);
        assert_eq!(report.stop_count, 1);
        assert_eq!(report.fuel_stops[0].distance_from_start_miles, 449.88);
        assert_eq!(report.fuel_stops[0].price_per_gallon, 2.9);
        assert!(report.message.is_none());
    }

    #[rstest]
    fn short_trip_report_carries_the_advisory() {
        let args = sample_args();
        let plan = TripPlan::without_stops(TripStatus::NoStopNeeded, 40.0);

        let report = PlanReport::build(
            &args,
            Coord { x: -118.24, y: 34.05 },
            Coord { x: -117.0, y: 34.2 },
            &sample_route(400.0, 6.0),
            &plan,
        );

        assert!(report.fuel_stops.is_empty());
        assert_eq!(report.total_gallons, 40.0);
        assert_eq!(report.total_fuel_cost, 0.0);
        assert_eq!(
            report.message,
            Some("Route is within vehicle range. No fuel stop needed.")
        );
    }

    #[rstest]
    fn report_serialises_without_message_key_when_absent() {
        let args = sample_args();
        let plan = TripPlan {
            status: TripStatus::StopsPlanned,
            stops: vec![],
            total_gallons: 10.0,
            total_fuel_cost: 30.0,
            average_price_per_gallon: 3.0,
        };

        let report = PlanReport::build(
            &args,
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 1.0, y: 1.0 },
            &sample_route(100.0, 2.0),
            &plan,
        );
        let json = serde_json::to_string(&report).unwrap();

        assert!(!json.contains("\"message\""));
        assert!(json.contains("\"total_fuel_cost\":30.0"));
    }
}
