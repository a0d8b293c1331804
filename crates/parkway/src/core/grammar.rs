//! Shared chumsky parsers
//!
//! Small combinators reused by the plate validator and the command language.

use chumsky::prelude::*;

/// Exactly three uppercase ASCII letters followed by exactly three ASCII digits.
///
/// Equivalent to `^[A-Z]{3}[0-9]{3}$` when followed by `end()`.
pub fn plate<'src>() -> impl Parser<'src, &'src str, &'src str> + Clone {
    let letter = any().filter(|c: &char| c.is_ascii_uppercase());
    let digit = any().filter(|c: &char| c.is_ascii_digit());

    letter
        .repeated()
        .exactly(3)
        .then(digit.repeated().exactly(3))
        .to_slice()
}

/// Spaces and tabs only. Never consumes a newline.
pub fn inline_whitespace<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    one_of(" \t").repeated().ignored()
}

/// At least one space or tab.
pub fn inline_whitespace_required<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    one_of(" \t").repeated().at_least(1).ignored()
}

/// A `#` comment running to the end of the line.
pub fn comment<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    just('#').ignore_then(none_of("\n").repeated()).ignored()
}

/// A bare argument: any run of characters that are not whitespace or `#`.
pub fn token<'src>() -> impl Parser<'src, &'src str, String> + Clone {
    none_of(" \t\r\n#")
        .repeated()
        .at_least(1)
        .to_slice()
        .map(|s: &str| s.to_string())
}
