//! Route graph over the lot
//!
//! Undirected, weighted and immutable once built. Shortest paths use
//! Dijkstra with a binary min-heap and stop as soon as the target is popped.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use serde::Serialize;
use tracing::{debug, trace};

use super::topology::{Edge, Topology};
use crate::core::{NodeId, ParkingError};

/// Result of a shortest-path query
///
/// An unreachable target (or an unknown node) gives an empty path and a
/// `None` distance, which stands in for infinity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub path: Vec<NodeId>,
    pub distance: Option<u32>,
}

impl Route {
    pub fn unreachable() -> Self {
        Self {
            path: Vec::new(),
            distance: None,
        }
    }

    pub fn is_reachable(&self) -> bool {
        self.distance.is_some()
    }

    /// Number of edges travelled
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Static adjacency structure over entrance and spot nodes
#[derive(Debug, Clone)]
pub struct RouteGraph {
    nodes: Vec<NodeId>,
    index: HashMap<NodeId, usize>,
    adjacency: Vec<Vec<(usize, u32)>>,
    edges: Vec<Edge>,
}

impl RouteGraph {
    /// Build a graph, storing each edge in both directions
    ///
    /// Rejects duplicate nodes, edges to unknown nodes, self-loops and
    /// zero weights.
    pub fn new(
        nodes: impl IntoIterator<Item = NodeId>,
        edges: impl IntoIterator<Item = Edge>,
    ) -> Result<Self, ParkingError> {
        let nodes: Vec<NodeId> = nodes.into_iter().collect();
        let mut index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if index.insert(node.clone(), i).is_some() {
                return Err(ParkingError::invalid_topology(format!(
                    "duplicate node {}",
                    node
                )));
            }
        }

        let mut adjacency = vec![Vec::new(); nodes.len()];
        let mut kept = Vec::new();
        for edge in edges {
            let (Some(&a), Some(&b)) = (index.get(edge.from.as_str()), index.get(edge.to.as_str()))
            else {
                return Err(ParkingError::invalid_topology(format!(
                    "edge {}-{} names an unknown node",
                    edge.from, edge.to
                )));
            };
            if a == b {
                return Err(ParkingError::invalid_topology(format!(
                    "self-loop on {}",
                    edge.from
                )));
            }
            if edge.weight == 0 {
                return Err(ParkingError::invalid_topology(format!(
                    "edge {}-{} has zero weight",
                    edge.from, edge.to
                )));
            }
            adjacency[a].push((b, edge.weight));
            adjacency[b].push((a, edge.weight));
            kept.push(edge);
        }

        debug!(
            node_count = nodes.len(),
            edge_count = kept.len(),
            "Route graph built"
        );
        Ok(Self {
            nodes,
            index,
            adjacency,
            edges: kept,
        })
    }

    /// Build the graph for a lot topology
    pub fn from_topology(topology: &Topology) -> Result<Self, ParkingError> {
        Self::new(topology.nodes().cloned(), topology.edges().iter().cloned())
    }

    pub fn contains(&self, node: &str) -> bool {
        self.index.contains_key(node)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Each undirected edge once, in construction order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Neighbours of `node` with the connecting weight; empty for unknown nodes
    pub fn neighbors(&self, node: &str) -> Vec<(&NodeId, u32)> {
        match self.index.get(node) {
            Some(&i) => self.adjacency[i]
                .iter()
                .map(|&(j, weight)| (&self.nodes[j], weight))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Least-cost path from `start` to `end`, both inclusive
    pub fn shortest_path(&self, start: &str, end: &str) -> Route {
        let (Some(&source), Some(&target)) = (self.index.get(start), self.index.get(end)) else {
            debug!(start, end, "Shortest path requested for unknown node");
            return Route::unreachable();
        };

        let mut dist = vec![u32::MAX; self.nodes.len()];
        let mut prev: Vec<Option<usize>> = vec![None; self.nodes.len()];
        let mut heap = BinaryHeap::new();

        dist[source] = 0;
        heap.push(Reverse((0u32, source)));

        while let Some(Reverse((d, current))) = heap.pop() {
            if current == target {
                break;
            }
            // Stale entry: a shorter distance was already settled
            if d > dist[current] {
                continue;
            }
            for &(next, weight) in &self.adjacency[current] {
                let candidate = d.saturating_add(weight);
                if candidate < dist[next] {
                    trace!(from = %self.nodes[current], to = %self.nodes[next], candidate, "Relaxed edge");
                    dist[next] = candidate;
                    prev[next] = Some(current);
                    heap.push(Reverse((candidate, next)));
                }
            }
        }

        if dist[target] == u32::MAX {
            debug!(start, end, "Target unreachable");
            return Route::unreachable();
        }

        let mut path = vec![self.nodes[target].clone()];
        let mut cursor = target;
        while let Some(p) = prev[cursor] {
            path.push(self.nodes[p].clone());
            cursor = p;
        }
        path.reverse();

        debug!(start, end, distance = dist[target], hops = path.len() - 1, "Shortest path found");
        Route {
            path,
            distance: Some(dist[target]),
        }
    }
}
