//! Best-first traversal and its Dijkstra specialisation.
//!
//! The engine uses lazy deduplication: every relaxation pushes a fresh
//! frontier entry, and a popped vertex is only settled the first time it is
//! seen. Later, larger entries for the same vertex are discarded as stale.
//!
//! Shortest distances are unique, the realised shortest path is not: when
//! several paths tie, the routing table follows the one favoured by the
//! frontier order (smaller vertex, then smaller predecessor). The result is
//! deterministic for a given graph, source and goal set.
//!
//! Edge weights must be non-negative. [`Weight`] is unsigned, so negative
//! weights can only enter through a maze description, which rejects them.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::frontier::{BinaryHeapFrontier, Frontier, FrontierEntry, FrontierKind};
use crate::graph::{Graph, Vertex, Weight};
use crate::route::find_route;

/// Settled vertex -> shortest distance from the source. Missing means unreached.
pub type DistanceMap = HashMap<Vertex, Weight>;

/// Settled vertex -> predecessor on its shortest path. The source maps to `None`.
pub type RoutingTable = HashMap<Vertex, Option<Vertex>>;

/// When a traversal may stop before the frontier runs dry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Termination {
    /// Explore the whole reachable component.
    #[default]
    Exhaust,
    /// Stop as soon as any goal is settled.
    FirstGoal,
    /// Stop once every goal is settled.
    AllGoals,
}

/// Outcome of a single [`Traversal::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalStep {
    /// A vertex was popped for the first time and is now final.
    Settled { vertex: Vertex, distance: Weight },
    /// A duplicate entry for an already settled vertex was discarded.
    Stale,
    /// The termination condition holds or the frontier is empty.
    Finished,
}

/// Distances and routing table produced by a traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalResult {
    pub source: Vertex,
    pub distances: DistanceMap,
    pub routing_table: RoutingTable,
    /// Goal whose settlement satisfied the termination condition, if any.
    pub reached: Option<Vertex>,
}

impl TraversalResult {
    /// Shortest distance to `vertex`, `None` if it was never settled.
    pub fn distance_to(&self, vertex: Vertex) -> Option<Weight> {
        self.distances.get(&vertex).copied()
    }

    pub fn is_settled(&self, vertex: Vertex) -> bool {
        self.distances.contains_key(&vertex)
    }

    /// Route from the source to `target` following the routing table.
    pub fn route_to(&self, target: Vertex) -> Result<Vec<Vertex>> {
        find_route(&self.routing_table, self.source, target)
    }
}

/// Resumable best-first traversal over a [`Graph`].
///
/// Each call to [`step`](Self::step) pops one frontier entry, so a host with
/// a time budget can interleave traversal work with other duties and resume
/// later without losing state.
pub struct Traversal<'g, G: Graph + ?Sized, F: Frontier> {
    graph: &'g G,
    source: Vertex,
    goals: HashSet<Vertex>,
    goals_left: usize,
    termination: Termination,
    frontier: F,
    distances: DistanceMap,
    routing_table: RoutingTable,
    reached: Option<Vertex>,
    finished: bool,
    neighbors: Vec<Vertex>,
}

impl<'g, G: Graph + ?Sized, F: Frontier> Traversal<'g, G, F> {
    /// Seed a traversal from `source`. The frontier is cleared first.
    pub fn new(
        graph: &'g G,
        source: Vertex,
        goals: &[Vertex],
        termination: Termination,
        mut frontier: F,
    ) -> Result<Self> {
        graph.dimensions().check(source)?;

        frontier.clear();
        frontier.push(FrontierEntry::new(0, source, None));

        let goals: HashSet<Vertex> = goals.iter().copied().collect();
        let goals_left = goals.len();

        Ok(Self {
            graph,
            source,
            goals,
            goals_left,
            termination,
            frontier,
            distances: HashMap::new(),
            routing_table: HashMap::new(),
            reached: None,
            finished: false,
            neighbors: Vec::new(),
        })
    }

    /// Pop one entry and settle or discard it.
    pub fn step(&mut self) -> TraversalStep {
        if self.finished {
            return TraversalStep::Finished;
        }

        let Some(entry) = self.frontier.pop() else {
            self.finished = true;
            return TraversalStep::Finished;
        };

        if self.distances.contains_key(&entry.vertex) {
            return TraversalStep::Stale;
        }

        let vertex = entry.vertex;
        let distance = entry.distance;
        self.distances.insert(vertex, distance);
        self.routing_table.insert(vertex, entry.predecessor);

        if self.goals.contains(&vertex) {
            self.goals_left -= 1;
            let done = match self.termination {
                Termination::Exhaust => false,
                Termination::FirstGoal => true,
                Termination::AllGoals => self.goals_left == 0,
            };
            if done {
                self.reached = Some(vertex);
                self.finished = true;
                return TraversalStep::Settled { vertex, distance };
            }
        }

        self.neighbors.clear();
        self.graph.neighbors(vertex, &mut self.neighbors);
        for &neighbor in &self.neighbors {
            if self.distances.contains_key(&neighbor) {
                continue;
            }
            let Some(weight) = self.graph.weight(vertex, neighbor) else {
                continue;
            };
            self.frontier.push(FrontierEntry::new(
                distance.saturating_add(weight),
                neighbor,
                Some(vertex),
            ));
        }

        TraversalStep::Settled { vertex, distance }
    }

    /// Step until finished and return the result.
    pub fn run(mut self) -> TraversalResult {
        while self.step() != TraversalStep::Finished {}
        tracing::debug!(
            source = self.source,
            settled = self.distances.len(),
            reached = ?self.reached,
            "traversal finished"
        );
        self.into_result()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn settled_count(&self) -> usize {
        self.distances.len()
    }

    /// Entries still waiting in the frontier, stale ones included.
    pub fn pending(&self) -> usize {
        self.frontier.len()
    }

    /// Snapshot of the work done so far. Callable before the traversal ends.
    pub fn into_result(self) -> TraversalResult {
        TraversalResult {
            source: self.source,
            distances: self.distances,
            routing_table: self.routing_table,
            reached: self.reached,
        }
    }
}

/// Run a traversal to completion with the given frontier.
pub fn traverse<G: Graph + ?Sized, F: Frontier>(
    graph: &G,
    source: Vertex,
    goals: &[Vertex],
    termination: Termination,
    frontier: F,
) -> Result<TraversalResult> {
    Ok(Traversal::new(graph, source, goals, termination, frontier)?.run())
}

/// Dijkstra's algorithm on a binary-heap frontier.
pub fn dijkstra<G: Graph + ?Sized>(
    graph: &G,
    source: Vertex,
    goals: &[Vertex],
    termination: Termination,
) -> Result<TraversalResult> {
    let capacity = graph.dimensions().cell_count();
    traverse(
        graph,
        source,
        goals,
        termination,
        BinaryHeapFrontier::with_capacity(capacity),
    )
}

/// Dijkstra's algorithm on the frontier selected by `kind`.
pub fn dijkstra_with<G: Graph + ?Sized>(
    graph: &G,
    source: Vertex,
    goals: &[Vertex],
    termination: Termination,
    kind: FrontierKind,
) -> Result<TraversalResult> {
    traverse(graph, source, goals, termination, kind.build())
}
