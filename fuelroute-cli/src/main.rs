//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use clap::Parser;

fn main() {
    env_logger::init();
    let cli = fuelroute_cli::Cli::parse();
    if let Err(err) = fuelroute_cli::run(&cli) {
        eprintln!("fuelroute: {err}");
        std::process::exit(1);
    }
}
