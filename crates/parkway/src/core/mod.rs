//! Core building blocks shared by the parking model
//!
//! Errors, logging setup, identifier types, the clock seam and the chumsky
//! grammar helpers live here; the lot itself lives in [`crate::lot`].

pub mod clock;
mod error;
pub mod grammar;
pub mod logging;
mod types;

pub use clock::*;
pub use error::*;
pub use logging::*;
pub use types::*;
