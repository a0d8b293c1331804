//! Parkway CLI - park cars and find the shortest route back to them

mod cli;
mod colorizer;
mod map;

use clap::Parser;

fn main() {
    // Logging is initialized in `run`, once the flags are known
    let cli_args = cli::Cli::parse();

    let result = cli::ParkwayApp::new().and_then(|mut app| app.run(cli_args));

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
