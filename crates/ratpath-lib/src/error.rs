use std::path::PathBuf;

use thiserror::Error;

use crate::action::Action;
use crate::graph::Vertex;

/// Convenient result alias for the ratpath library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a maze description carries a negative edge weight.
    #[error("edge {from} -> {to} has negative weight {weight}")]
    NegativeWeight { from: Vertex, to: Vertex, weight: i64 },

    /// Raised when a vertex does not fit inside the maze dimensions.
    #[error("vertex {vertex} lies outside a {width}x{height} maze")]
    VertexOutOfBounds {
        vertex: Vertex,
        width: usize,
        height: usize,
    },

    /// Raised when an edge would cost nothing to cross.
    #[error("edge {from} -> {to} has zero weight")]
    ZeroWeight { from: Vertex, to: Vertex },

    /// Raised when two vertices expected to share an edge are not grid neighbours.
    #[error("vertices {from} and {to} are not adjacent")]
    NotAdjacent { from: Vertex, to: Vertex },

    /// Raised when a route is requested to a vertex the traversal never settled.
    #[error("target {target} was not reached by the traversal")]
    TargetNotReached { target: Vertex },

    /// Raised when following a routing table does not lead back to the source.
    #[error("routing table does not lead from {target} back to {start}")]
    CorruptRoutingTable { start: Vertex, target: Vertex },

    /// Raised when an action is requested from an empty action queue.
    #[error("no planned action remains")]
    RouteExhausted,

    /// Raised when the agent has no goal it can reach.
    #[error("no reachable cheese from {position}")]
    NoReachableGoal { position: Vertex },

    /// Raised when the agent would emit an action the host does not allow.
    #[error("action {action} is not among the legal actions")]
    IllegalAction { action: Action },

    /// Raised when an action token cannot be parsed.
    #[error("unknown action token: {token}")]
    UnknownAction { token: String },

    /// Raised when an agent configuration fails validation.
    #[error("invalid agent configuration: {message}")]
    InvalidConfig { message: String },

    /// Raised when maze dimensions are unusable.
    #[error("invalid maze dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// Raised when reading a maze description from disk fails.
    #[error("failed to read maze description from {}", .path.display())]
    MazeRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Wrapper for JSON decoding errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
