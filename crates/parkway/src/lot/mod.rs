//! The parking lot model
//!
//! - [`topology`]: the fixed layout (entrance, spots, connections)
//! - [`index`]: ordered plate -> spot index
//! - [`state`]: per-spot occupancy and entry times
//! - [`graph`]: route graph and shortest paths
//! - [`service`]: the composition root tying them together

pub mod graph;
pub mod index;
pub mod service;
pub mod state;
pub mod topology;

pub use graph::{Route, RouteGraph};
pub use index::PlateIndex;
pub use service::{CarLocation, Parked, ParkingService, Released, SearchReport};
pub use state::{Occupancy, ParkingState, SpotRecord};
pub use topology::{Edge, Topology, ENTRANCE, SPOT_COUNT};
