//! Per-spot occupancy and entry times
//!
//! One record per known spot, created empty. The state does not validate
//! plates or double-parking; that is the service's job.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::trace;

use crate::core::{NodeId, ParkingError, Plate};

/// A parked car: who, and since when
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Occupancy {
    pub plate: Plate,
    pub entered_at: DateTime<Utc>,
}

/// State of a single spot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpotRecord {
    pub spot: NodeId,
    pub occupancy: Option<Occupancy>,
}

impl SpotRecord {
    pub fn is_occupied(&self) -> bool {
        self.occupancy.is_some()
    }

    pub fn occupant(&self) -> Option<&Plate> {
        self.occupancy.as_ref().map(|o| &o.plate)
    }

    pub fn entered_at(&self) -> Option<DateTime<Utc>> {
        self.occupancy.as_ref().map(|o| o.entered_at)
    }
}

/// Occupancy of every spot in the lot, in spot order
#[derive(Debug, Clone, Default)]
pub struct ParkingState {
    records: Vec<SpotRecord>,
}

impl ParkingState {
    /// Create the state with every spot empty
    pub fn new<'a>(spots: impl IntoIterator<Item = &'a NodeId>) -> Self {
        let records = spots
            .into_iter()
            .map(|spot| SpotRecord {
                spot: spot.clone(),
                occupancy: None,
            })
            .collect();
        Self { records }
    }

    fn record(&self, spot: &str) -> Result<&SpotRecord, ParkingError> {
        self.records
            .iter()
            .find(|r| r.spot == spot)
            .ok_or_else(|| ParkingError::unknown_spot(spot))
    }

    fn record_mut(&mut self, spot: &str) -> Result<&mut SpotRecord, ParkingError> {
        self.records
            .iter_mut()
            .find(|r| r.spot == spot)
            .ok_or_else(|| ParkingError::unknown_spot(spot))
    }

    pub fn contains(&self, spot: &str) -> bool {
        self.record(spot).is_ok()
    }

    pub fn occupant(&self, spot: &str) -> Result<Option<&Plate>, ParkingError> {
        Ok(self.record(spot)?.occupant())
    }

    pub fn entered_at(&self, spot: &str) -> Result<Option<DateTime<Utc>>, ParkingError> {
        Ok(self.record(spot)?.entered_at())
    }

    pub fn is_occupied(&self, spot: &str) -> Result<bool, ParkingError> {
        Ok(self.record(spot)?.is_occupied())
    }

    /// Mark `spot` as taken by `plate` since `at`, replacing any previous occupant
    pub fn occupy(
        &mut self,
        spot: &str,
        plate: Plate,
        at: DateTime<Utc>,
    ) -> Result<(), ParkingError> {
        trace!(spot, plate = %plate, "Spot occupied");
        self.record_mut(spot)?.occupancy = Some(Occupancy {
            plate,
            entered_at: at,
        });
        Ok(())
    }

    /// Clear `spot`, returning whoever was parked there
    pub fn vacate(&mut self, spot: &str) -> Result<Option<Occupancy>, ParkingError> {
        trace!(spot, "Spot vacated");
        Ok(self.record_mut(spot)?.occupancy.take())
    }

    pub fn records(&self) -> &[SpotRecord] {
        &self.records
    }

    /// Spots with no occupant, in spot order
    pub fn available(&self) -> impl Iterator<Item = &NodeId> {
        self.records
            .iter()
            .filter(|r| !r.is_occupied())
            .map(|r| &r.spot)
    }

    pub fn occupied_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_occupied()).count()
    }
}
