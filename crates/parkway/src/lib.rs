//! Parkway - a small parking lot model
//!
//! Tracks which of the lot's nine spots are occupied, indexes parked cars by
//! license plate, and computes the shortest route from the entrance to any
//! occupied spot. Everything is plain data; drawing it is up to the caller.
//!
//! # Quick Start
//!
//! ```rust
//! use parkway::ParkingService;
//!
//! let mut lot = ParkingService::new().unwrap();
//! let parked = lot.add_car("ABC123", "P9").unwrap();
//! assert_eq!(parked.to_string(), "Car with plate ABC123 parked in P9.");
//!
//! let report = lot.search_car("ABC123");
//! assert_eq!(report.distance, Some(5));
//! assert_eq!(report.path.first().unwrap().as_str(), "E1");
//! assert_eq!(report.path.last().unwrap().as_str(), "P9");
//!
//! lot.delete_car("ABC123").unwrap();
//! assert!(!lot.search_car("ABC123").found());
//! ```
//!
//! # Deterministic timestamps
//!
//! ```rust
//! use chrono::{Duration, TimeZone, Utc};
//! use parkway::prelude::*;
//!
//! let opened = Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap();
//! let mut lot = ParkingService::with_clock(ManualClock::new(opened)).unwrap();
//!
//! lot.clock().advance(Duration::minutes(5));
//! lot.add_car("XYZ789", "P2").unwrap();
//! assert_eq!(lot.search_car("XYZ789").entry_time, Some(opened + Duration::minutes(5)));
//! ```

pub mod core;
pub mod lot;
pub mod script;

pub use crate::core::{Clock, ManualClock, NodeId, ParkingError, Plate, SystemClock};
pub use crate::lot::{ParkingService, Route, SearchReport};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{Clock, ManualClock, NodeId, ParkingError, Plate, SystemClock};
    pub use crate::lot::{
        CarLocation, Edge, Parked, ParkingService, ParkingState, PlateIndex, Released, Route,
        RouteGraph, SearchReport, SpotRecord, Topology, ENTRANCE,
    };
    pub use crate::script::{Command, CommandParser};
}

/// Check a plate against the `XXX123` format without touching any lot
///
/// ```rust
/// assert!(parkway::is_valid_plate("QWE456"));
/// assert!(!parkway::is_valid_plate("QWE45"));
/// ```
pub fn is_valid_plate(plate: &str) -> bool {
    Plate::parse(plate).is_ok()
}
