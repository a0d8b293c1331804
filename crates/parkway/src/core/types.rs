//! Identifier types shared across the parking model
//!
//! [`Plate`] is validated on construction; [`NodeId`] is an opaque name for
//! a spot or the entrance.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use chumsky::prelude::*;
use serde::Serialize;

use super::error::ParkingError;
use super::grammar;

/// A vehicle license plate: three uppercase ASCII letters then three digits
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Plate(String);

impl Plate {
    /// Validate `input` against the plate format
    ///
    /// The input is taken as-is: no trimming and no case folding.
    ///
    /// ```rust
    /// use parkway::Plate;
    ///
    /// assert!(Plate::parse("ABC123").is_ok());
    /// assert!(Plate::parse("abc123").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, ParkingError> {
        grammar::plate()
            .then_ignore(end())
            .parse(input)
            .into_result()
            .map(|s| Plate(s.to_string()))
            .map_err(|_| ParkingError::InvalidPlateFormat {
                plate: input.to_string(),
            })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Plate {
    type Err = ParkingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Plate::parse(s)
    }
}

impl fmt::Display for Plate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Plate {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Plate {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Name of a graph vertex: a parking spot (`P1`..) or the entrance (`E1`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for NodeId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NodeId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
