//! Fixed layout of the lot
//!
//! One entrance and nine spots arranged on a 3x3 grid. The entrance hangs
//! off `P1`; every other connection joins grid neighbours.
//!
//! ```text
//! E1
//! |
//! P1 - P2 - P3
//! |    |    |
//! P4 - P5 - P6
//! |    |    |
//! P7 - P8 - P9
//! ```

use serde::Serialize;

use crate::core::NodeId;

/// Identifier of the single entrance
pub const ENTRANCE: &str = "E1";

/// Number of parking spots in the lot
pub const SPOT_COUNT: usize = 9;

/// Undirected connections, each listed once
const CONNECTIONS: &[(&str, &str, u32)] = &[
    ("E1", "P1", 1),
    ("P1", "P2", 1),
    ("P1", "P4", 1),
    ("P2", "P3", 1),
    ("P2", "P5", 1),
    ("P3", "P6", 1),
    ("P4", "P5", 1),
    ("P4", "P7", 1),
    ("P5", "P6", 1),
    ("P5", "P8", 1),
    ("P6", "P9", 1),
    ("P7", "P8", 1),
    ("P8", "P9", 1),
];

/// An undirected, weighted connection between two nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: u32,
}

impl Edge {
    pub fn new(from: impl Into<NodeId>, to: impl Into<NodeId>, weight: u32) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weight,
        }
    }

    /// True if the edge joins `a` and `b`, in either direction
    pub fn joins(&self, a: &str, b: &str) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }
}

/// Entrance, spots and connections of a lot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Topology {
    entrance: NodeId,
    spots: Vec<NodeId>,
    edges: Vec<Edge>,
}

impl Topology {
    /// The compiled-in lot: `E1` plus `P1`..`P9`
    pub fn standard() -> Self {
        let spots = (1..=SPOT_COUNT).map(|i| NodeId::new(format!("P{}", i))).collect();
        let edges = CONNECTIONS
            .iter()
            .map(|&(from, to, weight)| Edge::new(from, to, weight))
            .collect();

        Self {
            entrance: NodeId::from(ENTRANCE),
            spots,
            edges,
        }
    }

    pub fn entrance(&self) -> &NodeId {
        &self.entrance
    }

    pub fn spots(&self) -> &[NodeId] {
        &self.spots
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Every vertex: the entrance first, then spots in order
    pub fn nodes(&self) -> impl Iterator<Item = &NodeId> {
        std::iter::once(&self.entrance).chain(self.spots.iter())
    }

    pub fn is_spot(&self, id: &str) -> bool {
        self.spots.iter().any(|s| s == &id)
    }
}

impl Default for Topology {
    fn default() -> Self {
        Self::standard()
    }
}
