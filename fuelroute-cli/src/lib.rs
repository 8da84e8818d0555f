//! Command-line interface for the fuelroute engine.
//!
//! The binary wires the data collaborators to the planner: it geocodes the
//! trip endpoints, fetches the driving route from OSRM, loads the station
//! catalogue, runs the fuel-stop planner, and prints a JSON report to
//! stdout. Diagnostics go to stderr via `env_logger` (`RUST_LOG=debug` for
//! the gory details).

#![forbid(unsafe_code)]

mod plan;

use clap::{Parser, Subcommand};
use thiserror::Error;

pub use plan::{PlanArgs, PlanReport};

/// Top-level CLI arguments.
#[derive(Debug, Parser)]
#[command(name = "fuelroute", about = "Plan cost-effective fuel stops along a US driving route")]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan fuel stops for a trip between two locations.
    Plan(PlanArgs),
}

/// Errors surfaced to the terminal.
#[derive(Debug, Error)]
pub enum CliError {
    /// An endpoint could not be geocoded.
    #[error("could not geocode {location:?}: {source}")]
    Geocode {
        /// The endpoint as given on the command line.
        location: String,
        /// The underlying geocoding error.
        #[source]
        source: fuelroute_data::GeocodeError,
    },
    /// The driving route could not be fetched.
    #[error(transparent)]
    Route(#[from] fuelroute_core::RouteFetchError),
    /// An HTTP collaborator could not be constructed.
    #[error(transparent)]
    Provider(#[from] fuelroute_data::ProviderBuildError),
    /// The city gazetteer could not be loaded.
    #[error(transparent)]
    Cities(#[from] fuelroute_data::CityIndexError),
    /// The station CSV could not be loaded.
    #[error(transparent)]
    Catalogue(#[from] fuelroute_data::CatalogueError),
    /// The station source failed to yield stations.
    #[error(transparent)]
    Stations(#[from] fuelroute_core::StationSourceError),
    /// The planner configuration was invalid.
    #[error(transparent)]
    Plan(#[from] fuelroute_solver::PlanError),
    /// The report could not be serialised.
    #[error("could not serialise report: {0}")]
    Serialise(#[from] serde_json::Error),
}

/// Run the parsed command.
///
/// # Errors
/// Returns [`CliError`] when any stage of the pipeline fails.
pub fn run(cli: &Cli) -> Result<(), CliError> {
    match &cli.command {
        Command::Plan(args) => {
            let report = plan::run_plan(args)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
    }
}
