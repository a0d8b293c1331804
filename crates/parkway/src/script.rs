//! Line-oriented command language for text front ends
//!
//! One command per line; blank lines and `#` comments are skipped.
//!
//! ```text
//! # morning arrivals
//! add ABC123 P3
//! park XYZ789 P9     # alias of add
//! search ABC123
//! delete ABC123
//! spots
//! cars
//! route E1 P9
//! map
//! help
//! ```
//!
//! Arguments are taken verbatim; plate and spot validation happens in the
//! parking service so that every front end reports the same errors.

use chumsky::prelude::*;
use tracing::trace;

use crate::core::grammar::{comment, inline_whitespace, inline_whitespace_required, token};
use crate::core::ParkingError;

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add { plate: String, spot: String },
    Search { plate: String },
    Delete { plate: String },
    /// List available spots
    Spots,
    /// List parked cars
    Cars,
    /// Draw the lot
    Map,
    Route { from: String, to: String },
    Help,
}

/// Keyword, aliases and usage line of each command
const USAGE: &[(&str, &[&str], &str)] = &[
    ("add", &["park"], "add <PLATE> <SPOT>"),
    ("search", &["find"], "search <PLATE>"),
    ("delete", &["remove"], "delete <PLATE>"),
    ("spots", &[], "spots"),
    ("cars", &[], "cars"),
    ("map", &[], "map"),
    ("route", &[], "route <FROM> <TO>"),
    ("help", &[], "help"),
];

/// Text printed for the `help` command
pub const HELP: &str = "\
Commands:
  add <PLATE> <SPOT>   park a car (alias: park)
  search <PLATE>       find a car and the route to it (alias: find)
  delete <PLATE>       remove a car (alias: remove)
  spots                list available spots
  cars                 list parked cars
  route <FROM> <TO>    shortest route between two nodes
  map                  draw the lot
  help                 show this text
Plates look like ABC123; spots are P1..P9; the entrance is E1.";

/// Parser for the command language
#[derive(Debug, Default, Clone, Copy)]
pub struct CommandParser;

impl CommandParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse one line; `Ok(None)` for blank and comment-only lines
    ///
    /// `line_no` is 1-based and only used in error messages.
    pub fn parse_line(&self, line: &str, line_no: usize) -> Result<Option<Command>, ParkingError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let result = Self::line_parser().parse(line).into_result();
        trace!(line_no, ok = result.is_ok(), "Parsed command line");
        result.map_err(|_| ParkingError::parse_error(Self::explain(line), line_no))
    }

    /// Parse a whole script, stopping at the first bad line
    pub fn parse_script(&self, input: &str) -> Result<Vec<(usize, Command)>, ParkingError> {
        let mut commands = Vec::new();
        for (i, line) in input.lines().enumerate() {
            if let Some(command) = self.parse_line(line, i + 1)? {
                commands.push((i + 1, command));
            }
        }
        Ok(commands)
    }

    fn line_parser<'src>() -> impl Parser<'src, &'src str, Option<Command>> {
        inline_whitespace()
            .ignore_then(Self::command_parser().or_not())
            .then_ignore(inline_whitespace())
            .then_ignore(comment().or_not())
            .then_ignore(end())
    }

    fn command_parser<'src>() -> impl Parser<'src, &'src str, Command> + Clone {
        let arg = inline_whitespace_required().ignore_then(token());

        let add = text::keyword("add")
            .or(text::keyword("park"))
            .ignore_then(arg.clone())
            .then(arg.clone())
            .map(|(plate, spot)| Command::Add { plate, spot });

        let search = text::keyword("search")
            .or(text::keyword("find"))
            .ignore_then(arg.clone())
            .map(|plate| Command::Search { plate });

        let delete = text::keyword("delete")
            .or(text::keyword("remove"))
            .ignore_then(arg.clone())
            .map(|plate| Command::Delete { plate });

        let route = text::keyword("route")
            .ignore_then(arg.clone())
            .then(arg)
            .map(|(from, to)| Command::Route { from, to });

        let spots = text::keyword("spots").to(Command::Spots);
        let cars = text::keyword("cars").to(Command::Cars);
        let map = text::keyword("map").to(Command::Map);
        let help = text::keyword("help").to(Command::Help);

        choice((add, search, delete, route, spots, cars, map, help))
    }

    /// Human-readable reason a line failed to parse
    fn explain(line: &str) -> String {
        let Some(word) = line.split_whitespace().next() else {
            return "empty command".to_string();
        };
        USAGE
            .iter()
            .find(|(keyword, aliases, _)| *keyword == word || aliases.contains(&word))
            .map(|(_, _, usage)| format!("usage: {}", usage))
            .unwrap_or_else(|| format!("unknown command '{}'", word))
    }
}
