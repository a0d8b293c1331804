//! Ordered plate index
//!
//! An unbalanced binary search tree keyed by plate, mapping each parked
//! plate to its spot. Nodes live in a `Vec` arena and link to each other by
//! position; removing a node compacts the arena with `swap_remove` and
//! re-points the one link that referred to the moved node.

use std::cmp::Ordering;

use tracing::trace;

use crate::core::{NodeId, ParkingError, Plate};

#[derive(Debug, Clone)]
struct Node {
    plate: Plate,
    spot: NodeId,
    left: Option<usize>,
    right: Option<usize>,
}

/// Location of a child link inside the tree
#[derive(Debug, Clone, Copy)]
enum Link {
    Root,
    Left(usize),
    Right(usize),
}

/// Plate -> spot index ordered by plate
#[derive(Debug, Clone, Default)]
pub struct PlateIndex {
    nodes: Vec<Node>,
    root: Option<usize>,
}

impl PlateIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn get_link(&self, link: Link) -> Option<usize> {
        match link {
            Link::Root => self.root,
            Link::Left(i) => self.nodes[i].left,
            Link::Right(i) => self.nodes[i].right,
        }
    }

    fn set_link(&mut self, link: Link, target: Option<usize>) {
        match link {
            Link::Root => self.root = target,
            Link::Left(i) => self.nodes[i].left = target,
            Link::Right(i) => self.nodes[i].right = target,
        }
    }

    /// The link holding `plate`, or the empty link where it would be attached
    fn locate(&self, plate: &str) -> Link {
        let mut link = Link::Root;
        while let Some(i) = self.get_link(link) {
            link = match plate.cmp(self.nodes[i].plate.as_str()) {
                Ordering::Less => Link::Left(i),
                Ordering::Greater => Link::Right(i),
                Ordering::Equal => return link,
            };
        }
        link
    }

    /// Insert a new entry
    ///
    /// A plate that is already indexed is rejected with `DuplicatePlate`
    /// and the index is left untouched.
    pub fn insert(&mut self, plate: Plate, spot: NodeId) -> Result<(), ParkingError> {
        let link = self.locate(plate.as_str());
        if let Some(existing) = self.get_link(link) {
            return Err(ParkingError::DuplicatePlate {
                plate: plate.to_string(),
                spot: self.nodes[existing].spot.to_string(),
            });
        }

        trace!(plate = %plate, spot = %spot, slot = self.nodes.len(), "Index insert");
        self.nodes.push(Node {
            plate,
            spot,
            left: None,
            right: None,
        });
        self.set_link(link, Some(self.nodes.len() - 1));
        Ok(())
    }

    /// Exact-match lookup
    pub fn search(&self, plate: &str) -> Option<(&Plate, &NodeId)> {
        self.get_link(self.locate(plate)).map(|i| {
            let node = &self.nodes[i];
            (&node.plate, &node.spot)
        })
    }

    /// Spot assigned to `plate`
    pub fn get(&self, plate: &str) -> Option<&NodeId> {
        self.search(plate).map(|(_, spot)| spot)
    }

    pub fn contains(&self, plate: &str) -> bool {
        self.search(plate).is_some()
    }

    /// Remove `plate`, returning the spot it was mapped to
    ///
    /// A node with two children takes over the entry of its in-order
    /// successor (smallest plate of the right subtree), and the successor's
    /// own node is unlinked instead. Removing an absent plate is a no-op.
    pub fn delete(&mut self, plate: &str) -> Option<NodeId> {
        let link = self.locate(plate);
        let target = self.get_link(link)?;

        let unlinked = match (self.nodes[target].left, self.nodes[target].right) {
            (None, child) | (child, None) => {
                self.set_link(link, child);
                target
            }
            (Some(_), Some(right)) => {
                let mut successor_link = Link::Right(target);
                let mut successor = right;
                while let Some(left) = self.nodes[successor].left {
                    successor_link = Link::Left(successor);
                    successor = left;
                }
                let successor_right = self.nodes[successor].right;
                self.set_link(successor_link, successor_right);
                self.swap_entries(target, successor);
                successor
            }
        };

        trace!(plate, slot = unlinked, "Index delete");
        Some(self.release(unlinked))
    }

    /// Exchange plate and spot of two nodes, leaving their links alone
    fn swap_entries(&mut self, a: usize, b: usize) {
        let (low, high) = if a < b { (a, b) } else { (b, a) };
        let (head, tail) = self.nodes.split_at_mut(high);
        std::mem::swap(&mut head[low].plate, &mut tail[0].plate);
        std::mem::swap(&mut head[low].spot, &mut tail[0].spot);
    }

    /// Drop an already unlinked node from the arena
    fn release(&mut self, slot: usize) -> NodeId {
        let last = self.nodes.len() - 1;
        if slot != last {
            // The last node is about to move into `slot`
            let link = self.locate(self.nodes[last].plate.as_str());
            self.set_link(link, Some(slot));
        }
        self.nodes.swap_remove(slot).spot
    }

    /// Entries in ascending plate order
    pub fn iter(&self) -> Iter<'_> {
        let mut iter = Iter {
            index: self,
            stack: Vec::new(),
        };
        iter.push_left(self.root);
        iter
    }

    /// Longest root-to-leaf node count (0 when empty)
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut frontier: Vec<(usize, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((i, depth)) = frontier.pop() {
            height = height.max(depth);
            let node = &self.nodes[i];
            frontier.extend(node.left.map(|l| (l, depth + 1)));
            frontier.extend(node.right.map(|r| (r, depth + 1)));
        }
        height
    }
}

/// In-order iterator over a [`PlateIndex`]
pub struct Iter<'a> {
    index: &'a PlateIndex,
    stack: Vec<usize>,
}

impl Iter<'_> {
    fn push_left(&mut self, mut cursor: Option<usize>) {
        while let Some(i) = cursor {
            self.stack.push(i);
            cursor = self.index.nodes[i].left;
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a Plate, &'a NodeId);

    fn next(&mut self) -> Option<Self::Item> {
        let i = self.stack.pop()?;
        let index = self.index;
        let node = &index.nodes[i];
        self.push_left(node.right);
        Some((&node.plate, &node.spot))
    }
}

impl<'a> IntoIterator for &'a PlateIndex {
    type Item = (&'a Plate, &'a NodeId);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
