//! Core error types for the parking model
//!
//! Every failure the service can report is a variant of [`ParkingError`].
//! The `Display` text of each variant is the status message shown to the
//! person at the front end, so keep them short and human readable.

use thiserror::Error;

/// Errors raised by the plate index, parking state, route graph and service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParkingError {
    #[error("Invalid plate '{plate}'. Format: XXX123")]
    InvalidPlateFormat { plate: String },

    #[error("Spot {spot} is already occupied by {occupant}")]
    SpotOccupied { spot: String, occupant: String },

    #[error("Plate not found: {plate}")]
    PlateNotFound { plate: String },

    #[error("Plate {plate} is already parked in {spot}")]
    DuplicatePlate { plate: String, spot: String },

    #[error("Unknown parking spot: {spot}")]
    UnknownSpot { spot: String },

    #[error("Invalid topology: {message}")]
    InvalidTopology { message: String },

    #[error("Parse error: {message} at line {line}")]
    ParseError { message: String, line: usize },
}

impl ParkingError {
    /// Create a new parse error
    pub fn parse_error(message: impl Into<String>, line: usize) -> Self {
        Self::ParseError {
            message: message.into(),
            line,
        }
    }

    /// Create a new topology error
    pub fn invalid_topology(message: impl Into<String>) -> Self {
        Self::InvalidTopology {
            message: message.into(),
        }
    }

    /// Create a new plate-not-found error
    pub fn plate_not_found(plate: impl Into<String>) -> Self {
        Self::PlateNotFound {
            plate: plate.into(),
        }
    }

    /// Create a new unknown-spot error
    pub fn unknown_spot(spot: impl Into<String>) -> Self {
        Self::UnknownSpot { spot: spot.into() }
    }

    /// True for failures caused by caller input rather than a broken lot definition
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::InvalidTopology { .. })
    }
}
