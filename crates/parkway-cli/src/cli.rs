//! Command-line interface for the parkway utility
//!
//! Runs command scripts against a parking lot, answers one-shot route
//! queries, and prints the lot layout.

use anyhow::{anyhow, Result};
use chrono::{DateTime, Local, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::colorizer::colorize_map;
use crate::map::{LotMap, MapStyle};
use parkway::core::logging::{init_logging, LOG_FORMAT_ENV, LOG_LEVEL_ENV};
use parkway::prelude::*;
use parkway::script::HELP;

/// Parkway - a small parking lot with routes from the entrance
#[derive(Parser)]
#[command(name = "parkway")]
#[command(about = "Park cars, find them again, and get the shortest route to them")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Execute parking commands line by line (type `help` for the list)
    Run {
        /// Script file to execute (use - or omit for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Print search results and routes as JSON
        #[arg(long)]
        json: bool,

        /// Draw the lot with the route after every successful search
        #[arg(long)]
        map: bool,

        /// Character set used to draw the lot
        #[arg(long, value_enum, default_value_t = StyleChoice::Unicode)]
        style: StyleChoice,

        /// When to use colors in the map
        #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
        color: ColorChoice,
    },

    /// Shortest route between two nodes of the lot
    Route {
        /// Starting node
        #[arg(long, default_value = ENTRANCE)]
        from: String,

        /// Destination node
        #[arg(long)]
        to: String,

        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Show the nodes and connections of the lot
    Topology {
        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Check that a plate has the XXX123 format
    CheckPlate {
        /// Plate to check
        plate: String,
    },
}

/// Supported map character sets
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum StyleChoice {
    Ascii,
    Unicode,
}

impl From<StyleChoice> for MapStyle {
    fn from(value: StyleChoice) -> Self {
        match value {
            StyleChoice::Ascii => MapStyle::Ascii,
            StyleChoice::Unicode => MapStyle::Unicode,
        }
    }
}

/// When to colorize output
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Use colors if output is a terminal and NO_COLOR is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Presentation options of a `run` session
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub json: bool,
    pub map: bool,
    pub style: MapStyle,
    pub colorize: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            json: false,
            map: false,
            style: MapStyle::Unicode,
            colorize: false,
        }
    }
}

/// Counts reported at the end of a `run` session
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub executed: usize,
    pub parse_errors: usize,
}

/// Main CLI application
pub struct ParkwayApp<C: Clock = SystemClock> {
    lot: ParkingService<C>,
    parser: CommandParser,
}

impl ParkwayApp<SystemClock> {
    /// Create a new application over an empty standard lot
    pub fn new() -> Result<Self> {
        Ok(Self::with_service(ParkingService::new()?))
    }
}

impl<C: Clock> ParkwayApp<C> {
    /// Create an application around an existing service
    pub fn with_service(lot: ParkingService<C>) -> Self {
        Self {
            lot,
            parser: CommandParser::new(),
        }
    }

    /// Get a reference to the parking service (for testing)
    #[cfg(test)]
    pub fn lot(&self) -> &ParkingService<C> {
        &self.lot
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over flags
        let log_level_str = std::env::var(LOG_LEVEL_ENV)
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .or_else(|| Some(cli.log_level.as_str().to_string()));

        let log_format_str = std::env::var(LOG_FORMAT_ENV)
            .ok()
            .or_else(|| Some(cli.log_format.as_str().to_string()));

        if let Err(e) = init_logging(log_level_str.as_deref(), log_format_str.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Parkway v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Run {
                input,
                json,
                map,
                style,
                color,
            } => {
                let options = RunOptions {
                    json,
                    map,
                    style: style.into(),
                    colorize: should_colorize(color),
                };
                self.run_command(input, options, cli.verbose)
            }
            Commands::Route { from, to, json } => self.route_command(&from, &to, json),
            Commands::Topology { json } => self.topology_command(json),
            Commands::CheckPlate { plate } => check_plate_command(&plate),
        }
    }

    /// Handle the run command
    fn run_command(
        &mut self,
        input: Option<PathBuf>,
        options: RunOptions,
        verbose: bool,
    ) -> Result<()> {
        let from_stdin = input
            .as_ref()
            .map_or(true, |p| p.to_string_lossy() == "-");
        let interactive = from_stdin && crossterm::tty::IsTty::is_tty(&io::stdin());
        let reader = open_input(input)?;
        let stdout = io::stdout();
        let summary = self.run_script(reader, &mut stdout.lock(), options, interactive)?;

        if verbose {
            eprintln!(
                "Executed {} commands ({} parse errors)",
                summary.executed, summary.parse_errors
            );
        }
        Ok(())
    }

    /// Execute every line of `reader`, writing results to `out`
    ///
    /// A line that does not parse (or is not valid UTF-8) is reported and
    /// skipped.
    pub fn run_script<R: BufRead, W: Write>(
        &mut self,
        reader: R,
        out: &mut W,
        options: RunOptions,
        prompt: bool,
    ) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        if prompt {
            write!(out, "> ")?;
            out.flush()?;
        }

        for (i, bytes) in reader.split(b'\n').enumerate() {
            let parsed = match String::from_utf8(bytes?) {
                Ok(line) => self.parser.parse_line(&line, i + 1),
                Err(_) => Err(ParkingError::parse_error("line is not valid UTF-8", i + 1)),
            };
            match parsed {
                Ok(Some(command)) => {
                    debug!(line_no = i + 1, ?command, "Executing command");
                    let output = self.execute(command, options)?;
                    writeln!(out, "{}", output)?;
                    summary.executed += 1;
                }
                Ok(None) => {}
                Err(e) => {
                    writeln!(out, "Error: {}", e)?;
                    summary.parse_errors += 1;
                }
            }
            if prompt {
                write!(out, "> ")?;
                out.flush()?;
            }
        }

        info!(
            executed = summary.executed,
            parse_errors = summary.parse_errors,
            "Script finished"
        );
        Ok(summary)
    }

    /// Execute one command, returning the text to print
    pub fn execute(&mut self, command: Command, options: RunOptions) -> Result<String> {
        let output = match command {
            Command::Add { plate, spot } => match self.lot.add_car(&plate, &spot) {
                Ok(parked) => parked.to_string(),
                Err(e) => e.to_string(),
            },
            Command::Search { plate } => self.search(&plate, options)?,
            Command::Delete { plate } => match self.lot.delete_car(&plate) {
                Ok(released) => match released.entered_at {
                    Some(at) => format!("{} Parked since {}.", released, format_time(at)),
                    None => released.to_string(),
                },
                Err(e) => e.to_string(),
            },
            Command::Spots => {
                let free: Vec<String> = self
                    .lot
                    .list_available_spots()
                    .iter()
                    .map(|s| s.to_string())
                    .collect();
                if free.is_empty() {
                    "No spots available.".to_string()
                } else {
                    format!("Available spots: {}", free.join(", "))
                }
            }
            Command::Cars => self.cars(),
            Command::Map => self.render_map(None, options),
            Command::Route { from, to } => {
                let route = self.lot.route(&from, &to);
                if options.json {
                    serde_json::to_string_pretty(&route)?
                } else {
                    let mut text = describe_route(&from, &to, &route);
                    if options.map && route.is_reachable() {
                        text.push('\n');
                        text.push_str(&self.render_map(Some(&route.path), options));
                    }
                    text
                }
            }
            Command::Help => HELP.to_string(),
        };
        Ok(output)
    }

    fn search(&self, plate: &str, options: RunOptions) -> Result<String> {
        let report = self.lot.search_car(plate);
        if options.json {
            return Ok(serde_json::to_string_pretty(&report)?);
        }

        let mut text = report.message.clone();
        if report.found() {
            text.push_str(&format!("\n  path: {}", join_path(&report.path)));
            if let Some(distance) = report.distance {
                text.push_str(&format!("\n  distance: {}", distance));
            }
            if let Some(at) = report.entry_time {
                text.push_str(&format!("\n  entered: {}", format_time(at)));
            }
            if options.map {
                text.push('\n');
                text.push_str(&self.render_map(Some(&report.path), options));
            }
        }
        Ok(text)
    }

    fn cars(&self) -> String {
        if self.lot.parked_count() == 0 {
            return "No cars parked.".to_string();
        }
        let mut text = "Parked cars:".to_string();
        for (plate, spot) in self.lot.parked_cars() {
            text.push_str(&format!("\n  {}  {}", plate, spot));
        }
        text
    }

    fn render_map(&self, route: Option<&[NodeId]>, options: RunOptions) -> String {
        let mut map = LotMap::new(&self.lot, options.style);
        if let Some(path) = route {
            map = map.with_route(path);
        }
        let rendered = map.render();
        if options.colorize {
            colorize_map(&rendered)
        } else {
            rendered
        }
    }

    /// Handle the route command
    fn route_command(&self, from: &str, to: &str, json: bool) -> Result<()> {
        let route = self.lot.route(from, to);
        if json {
            println!("{}", serde_json::to_string_pretty(&route)?);
        } else {
            println!("{}", describe_route(from, to, &route));
        }

        if route.is_reachable() {
            Ok(())
        } else {
            Err(anyhow!("No route from {} to {}", from, to))
        }
    }

    /// Handle the topology command
    fn topology_command(&self, json: bool) -> Result<()> {
        let topology = self.lot.topology();
        if json {
            println!("{}", serde_json::to_string_pretty(topology)?);
            return Ok(());
        }

        println!("Entrance: {}", topology.entrance());
        let spots: Vec<String> = topology.spots().iter().map(|s| s.to_string()).collect();
        println!("Spots: {}", spots.join(" "));
        println!("Connections ({}):", topology.edges().len());
        for edge in topology.edges() {
            println!("  {} - {} ({})", edge.from, edge.to, edge.weight);
        }
        Ok(())
    }
}

/// Handle the check-plate command
fn check_plate_command(plate: &str) -> Result<()> {
    match Plate::parse(plate) {
        Ok(plate) => {
            println!("✓ {} is a valid plate", plate);
            Ok(())
        }
        Err(e) => {
            println!("✗ {}", e);
            Err(e.into())
        }
    }
}

/// Determine if the map should be colorized
pub fn should_colorize(color: ColorChoice) -> bool {
    match color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => {
            if std::env::var("NO_COLOR").is_ok() {
                return false;
            }
            crossterm::tty::IsTty::is_tty(&io::stdout())
        }
    }
}

/// Open a script from a file or stdin
pub fn open_input(input: Option<PathBuf>) -> Result<Box<dyn BufRead>> {
    match input {
        Some(path) if path.to_string_lossy() != "-" => {
            let file = fs::File::open(&path)
                .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e))?;
            Ok(Box::new(BufReader::new(file)))
        }
        _ => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

/// Entry time in local `HH:MM:SS`
pub fn format_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%H:%M:%S").to_string()
}

fn join_path(path: &[NodeId]) -> String {
    path.iter()
        .map(|n| n.as_str())
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn describe_route(from: &str, to: &str, route: &Route) -> String {
    match route.distance {
        Some(distance) => format!(
            "Route {} to {}: {} (distance {})",
            from,
            to,
            join_path(&route.path),
            distance
        ),
        None => format!("No route from {} to {}.", from, to),
    }
}
