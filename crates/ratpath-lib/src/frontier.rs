//! Priority frontiers for best-first traversal.
//!
//! A frontier is a min-ordered work queue of [`FrontierEntry`] records. Two
//! implementations are provided behind the [`Frontier`] trait:
//!
//! - [`BinaryHeapFrontier`] wraps the standard library binary heap.
//! - [`PairingHeapFrontier`] is an arena-backed pairing heap with O(1) push.
//!
//! Entries are totally ordered, so both frontiers pop the exact same sequence
//! for the same sequence of pushes.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::graph::{Vertex, Weight};

/// Tentative distance to `vertex` through `predecessor`.
///
/// Ordering is by distance, then vertex, then predecessor, ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrontierEntry {
    pub distance: Weight,
    pub vertex: Vertex,
    pub predecessor: Option<Vertex>,
}

impl FrontierEntry {
    pub fn new(distance: Weight, vertex: Vertex, predecessor: Option<Vertex>) -> Self {
        Self {
            distance,
            vertex,
            predecessor,
        }
    }
}

/// Min-ordered work queue used by the traversal engine.
pub trait Frontier {
    fn push(&mut self, entry: FrontierEntry);

    /// Remove and return the smallest entry.
    fn pop(&mut self) -> Option<FrontierEntry>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&mut self);
}

impl<F: Frontier + ?Sized> Frontier for Box<F> {
    fn push(&mut self, entry: FrontierEntry) {
        (**self).push(entry);
    }

    fn pop(&mut self) -> Option<FrontierEntry> {
        (**self).pop()
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn clear(&mut self) {
        (**self).clear();
    }
}

/// Frontier backed by [`std::collections::BinaryHeap`].
#[derive(Debug, Clone, Default)]
pub struct BinaryHeapFrontier {
    heap: BinaryHeap<Reverse<FrontierEntry>>,
}

impl BinaryHeapFrontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
        }
    }
}

impl Frontier for BinaryHeapFrontier {
    fn push(&mut self, entry: FrontierEntry) {
        self.heap.push(Reverse(entry));
    }

    fn pop(&mut self) -> Option<FrontierEntry> {
        self.heap.pop().map(|Reverse(entry)| entry)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn clear(&mut self) {
        self.heap.clear();
    }
}

#[derive(Debug, Clone)]
struct PairingNode {
    entry: FrontierEntry,
    child: Option<usize>,
    sibling: Option<usize>,
}

/// Pairing heap stored in a node arena. Freed slots are recycled.
#[derive(Debug, Clone, Default)]
pub struct PairingHeapFrontier {
    nodes: Vec<PairingNode>,
    free: Vec<usize>,
    root: Option<usize>,
    len: usize,
    scratch: Vec<usize>,
}

impl PairingHeapFrontier {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self, entry: FrontierEntry) -> usize {
        let node = PairingNode {
            entry,
            child: None,
            sibling: None,
        };
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                slot
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    /// Link two roots; the larger becomes the leftmost child of the smaller.
    fn meld(&mut self, a: usize, b: usize) -> usize {
        let (parent, child) = if self.nodes[b].entry < self.nodes[a].entry {
            (b, a)
        } else {
            (a, b)
        };
        self.nodes[child].sibling = self.nodes[parent].child;
        self.nodes[parent].child = Some(child);
        parent
    }

    /// Standard two-pass merge of the children of a removed root.
    fn merge_children(&mut self, first: Option<usize>) -> Option<usize> {
        let mut scratch = std::mem::take(&mut self.scratch);
        scratch.clear();

        let mut cursor = first;
        while let Some(node) = cursor {
            cursor = self.nodes[node].sibling.take();
            scratch.push(node);
        }

        let mut paired = Vec::with_capacity(scratch.len().div_ceil(2));
        for pair in scratch.chunks(2) {
            match *pair {
                [a, b] => paired.push(self.meld(a, b)),
                [a] => paired.push(a),
                _ => unreachable!("chunks(2) yields one or two items"),
            }
        }

        let merged = paired
            .into_iter()
            .rev()
            .reduce(|acc, node| self.meld(node, acc));

        self.scratch = scratch;
        merged
    }
}

impl Frontier for PairingHeapFrontier {
    fn push(&mut self, entry: FrontierEntry) {
        let node = self.alloc(entry);
        self.root = Some(match self.root {
            Some(root) => self.meld(root, node),
            None => node,
        });
        self.len += 1;
    }

    fn pop(&mut self) -> Option<FrontierEntry> {
        let root = self.root?;
        let entry = self.nodes[root].entry;
        let children = self.nodes[root].child.take();
        self.root = self.merge_children(children);
        self.free.push(root);
        self.len -= 1;
        Some(entry)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.root = None;
        self.len = 0;
    }
}

/// Frontier implementation selected when a traversal is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrontierKind {
    #[default]
    BinaryHeap,
    PairingHeap,
}

impl FrontierKind {
    pub fn build(self) -> Box<dyn Frontier> {
        match self {
            FrontierKind::BinaryHeap => Box::new(BinaryHeapFrontier::new()),
            FrontierKind::PairingHeap => Box::new(PairingHeapFrontier::new()),
        }
    }
}

impl fmt::Display for FrontierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            FrontierKind::BinaryHeap => "binary-heap",
            FrontierKind::PairingHeap => "pairing-heap",
        };
        f.write_str(value)
    }
}

impl FromStr for FrontierKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "binary-heap" | "binary" => Ok(FrontierKind::BinaryHeap),
            "pairing-heap" | "pairing" => Ok(FrontierKind::PairingHeap),
            other => Err(format!("unknown frontier kind: {other}")),
        }
    }
}
