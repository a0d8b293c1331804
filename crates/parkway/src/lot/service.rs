//! Parking service
//!
//! Owns the plate index, the parking state and the route graph, and keeps
//! them consistent: a plate is in the index exactly when its spot records
//! that plate as occupant. All checks run before the first mutation, so a
//! rejected request leaves everything untouched.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, info_span};

use super::graph::{Route, RouteGraph};
use super::index::PlateIndex;
use super::state::{ParkingState, SpotRecord};
use super::topology::Topology;
use crate::core::{Clock, NodeId, ParkingError, Plate, SystemClock};

/// Confirmation of a successful `add_car`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parked {
    pub plate: Plate,
    pub spot: NodeId,
    pub entered_at: DateTime<Utc>,
}

impl fmt::Display for Parked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Car with plate {} parked in {}.", self.plate, self.spot)
    }
}

/// Confirmation of a successful `delete_car`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Released {
    pub plate: Plate,
    pub spot: NodeId,
    /// When the car was parked
    pub entered_at: Option<DateTime<Utc>>,
}

impl fmt::Display for Released {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Plate {} removed from the system.", self.plate)
    }
}

/// Where a parked car is and how to reach it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarLocation {
    pub plate: Plate,
    pub spot: NodeId,
    pub route: Route,
    pub entered_at: Option<DateTime<Utc>>,
}

/// Plain-data answer to `search_car`, ready for any front end
///
/// On failure the path is empty, `spot`, `distance` and `entry_time` are
/// `None`, and `message` carries the error text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchReport {
    pub plate: String,
    pub spot: Option<NodeId>,
    pub path: Vec<NodeId>,
    pub distance: Option<u32>,
    pub entry_time: Option<DateTime<Utc>>,
    pub message: String,
}

impl SearchReport {
    pub fn found(&self) -> bool {
        self.spot.is_some()
    }

    fn failed(plate: &str, error: &ParkingError) -> Self {
        Self {
            plate: plate.to_string(),
            spot: None,
            path: Vec::new(),
            distance: None,
            entry_time: None,
            message: error.to_string(),
        }
    }
}

impl From<CarLocation> for SearchReport {
    fn from(location: CarLocation) -> Self {
        Self {
            message: format!("Plate found in {}.", location.spot),
            plate: location.plate.to_string(),
            spot: Some(location.spot),
            path: location.route.path,
            distance: location.route.distance,
            entry_time: location.entered_at,
        }
    }
}

/// Composition root of the parking model
#[derive(Debug)]
pub struct ParkingService<C: Clock = SystemClock> {
    topology: Topology,
    graph: RouteGraph,
    index: PlateIndex,
    state: ParkingState,
    clock: C,
}

impl ParkingService<SystemClock> {
    /// Service over the standard lot, stamping entries with the system clock
    pub fn new() -> Result<Self, ParkingError> {
        Self::with_clock(SystemClock::new())
    }
}

impl<C: Clock> ParkingService<C> {
    /// Service over the standard lot with an explicit clock
    pub fn with_clock(clock: C) -> Result<Self, ParkingError> {
        Self::with_topology(Topology::standard(), clock)
    }

    /// Service over an arbitrary topology
    pub fn with_topology(topology: Topology, clock: C) -> Result<Self, ParkingError> {
        let graph = RouteGraph::from_topology(&topology)?;
        let state = ParkingState::new(topology.spots());
        Ok(Self {
            topology,
            graph,
            index: PlateIndex::new(),
            state,
            clock,
        })
    }

    /// Park `plate` in `spot`
    pub fn add_car(&mut self, plate: &str, spot: &str) -> Result<Parked, ParkingError> {
        let span = info_span!("add_car", plate, spot);
        let _enter = span.enter();

        let result = self.try_add_car(plate, spot);
        match &result {
            Ok(parked) => info!(entered_at = %parked.entered_at, "Car parked"),
            Err(e) => debug!(error = %e, "Add rejected"),
        }
        result
    }

    fn try_add_car(&mut self, plate: &str, spot: &str) -> Result<Parked, ParkingError> {
        let plate = Plate::parse(plate)?;

        if let Some(occupant) = self.state.occupant(spot)? {
            return Err(ParkingError::SpotOccupied {
                spot: spot.to_string(),
                occupant: occupant.to_string(),
            });
        }

        if let Some(current) = self.index.get(plate.as_str()) {
            return Err(ParkingError::DuplicatePlate {
                plate: plate.to_string(),
                spot: current.to_string(),
            });
        }

        let spot = NodeId::from(spot);
        let entered_at = self.clock.now();
        self.index.insert(plate.clone(), spot.clone())?;
        self.state.occupy(spot.as_str(), plate.clone(), entered_at)?;

        Ok(Parked {
            plate,
            spot,
            entered_at,
        })
    }

    /// Find a parked car and the route to it from the entrance
    pub fn locate_car(&self, plate: &str) -> Result<CarLocation, ParkingError> {
        let (found, spot) = self
            .index
            .search(plate)
            .ok_or_else(|| ParkingError::plate_not_found(plate))?;

        let route = self
            .graph
            .shortest_path(self.topology.entrance().as_str(), spot.as_str());
        let entered_at = self.state.entered_at(spot.as_str())?;

        Ok(CarLocation {
            plate: found.clone(),
            spot: spot.clone(),
            route,
            entered_at,
        })
    }

    /// Search for a car, always answering with plain data
    pub fn search_car(&self, plate: &str) -> SearchReport {
        let span = info_span!("search_car", plate);
        let _enter = span.enter();

        match self.locate_car(plate) {
            Ok(location) => {
                info!(spot = %location.spot, distance = ?location.route.distance, "Car found");
                location.into()
            }
            Err(e) => {
                debug!(error = %e, "Search failed");
                SearchReport::failed(plate, &e)
            }
        }
    }

    /// Remove a parked car, freeing its spot
    pub fn delete_car(&mut self, plate: &str) -> Result<Released, ParkingError> {
        let span = info_span!("delete_car", plate);
        let _enter = span.enter();

        let Some((found, spot)) = self
            .index
            .search(plate)
            .map(|(p, s)| (p.clone(), s.clone()))
        else {
            let e = ParkingError::plate_not_found(plate);
            debug!(error = %e, "Delete rejected");
            return Err(e);
        };

        if !self.state.contains(spot.as_str()) {
            return Err(ParkingError::unknown_spot(spot.as_str()));
        }
        self.index.delete(found.as_str());
        let previous = self.state.vacate(spot.as_str())?;

        info!(spot = %spot, "Car removed");
        Ok(Released {
            plate: found,
            spot,
            entered_at: previous.map(|o| o.entered_at),
        })
    }

    /// Unoccupied spots, in spot order
    pub fn list_available_spots(&self) -> Vec<NodeId> {
        self.state.available().cloned().collect()
    }

    /// Every spot with its occupant, in spot order
    pub fn spots(&self) -> &[SpotRecord] {
        self.state.records()
    }

    /// Parked cars in ascending plate order
    pub fn parked_cars(&self) -> impl Iterator<Item = (&Plate, &NodeId)> {
        self.index.iter()
    }

    pub fn parked_count(&self) -> usize {
        self.index.len()
    }

    /// Shortest path between any two nodes of the lot
    pub fn route(&self, from: &str, to: &str) -> Route {
        self.graph.shortest_path(from, to)
    }

    pub fn graph(&self) -> &RouteGraph {
        &self.graph
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
