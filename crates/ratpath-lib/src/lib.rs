//! Ratpath library entry points.
//!
//! This crate holds the shortest-path machinery behind a maze agent hunting
//! cheese: graph representations, a resumable Dijkstra traversal over a
//! pluggable priority frontier, route reconstruction, translation of routes
//! into movement actions, a local density heuristic and the agent policy
//! that ties them together. Consumers (the CLI, game hosts) should depend on
//! the items exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod action;
pub mod agent;
pub mod density;
pub mod error;
pub mod frontier;
pub mod graph;
pub mod maze_file;
pub mod route;
pub mod traversal;

pub use action::{locations_to_actions, replay, Action, ActionQueue};
pub use agent::{
    plan, Agent, AgentConfig, AgentMemory, AgentPhase, AgentReport, Plan, Strategy, Turn,
};
pub use density::{densest, densities, density, DEFAULT_WINDOW_RADIUS};
pub use error::{Error, Result};
pub use frontier::{BinaryHeapFrontier, Frontier, FrontierEntry, FrontierKind, PairingHeapFrontier};
pub use graph::{AdjacencyMaze, Dimensions, Graph, MatrixMaze, MazeBuilder, Vertex, Weight};
pub use maze_file::MazeDescription;
pub use route::find_route;
pub use traversal::{
    dijkstra, dijkstra_with, traverse, DistanceMap, RoutingTable, Termination, Traversal,
    TraversalResult, TraversalStep,
};
