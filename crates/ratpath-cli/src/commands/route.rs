//! Route command handler: shortest route from a cell to a cheese or a chosen target.

use std::path::PathBuf;

use anyhow::{bail, Result};
use serde::Serialize;

use ratpath_lib::{
    dijkstra_with, locations_to_actions, Action, FrontierKind, Graph, Termination, Vertex, Weight,
};

use crate::commands::load_maze;
use crate::output::{self, OutputFormat};

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    pub maze: PathBuf,
    /// Starting cell; the maze start when absent.
    pub from: Option<Vertex>,
    /// Target cell; the nearest cheese when absent.
    pub to: Option<Vertex>,
    pub frontier: FrontierKind,
    pub format: OutputFormat,
}

/// Result of a route query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteSummary {
    pub from: Vertex,
    pub to: Vertex,
    pub distance: Weight,
    pub vertices: Vec<Vertex>,
    pub actions: Vec<Action>,
    /// Vertices settled before the traversal stopped.
    pub settled: usize,
    pub frontier: FrontierKind,
}

/// Handle the route subcommand.
pub fn handle_route(args: &RouteCommandArgs) -> Result<()> {
    let summary = compute_route(args)?;
    output::print_route(&summary, args.format)
}

pub fn compute_route(args: &RouteCommandArgs) -> Result<RouteSummary> {
    let (description, maze) = load_maze(&args.maze)?;
    let dimensions = maze.dimensions();
    let from = args.from.unwrap_or(description.start);
    dimensions.check(from)?;

    let goals = match args.to {
        Some(to) => {
            dimensions.check(to)?;
            vec![to]
        }
        None => description.cheese.clone(),
    };
    if goals.is_empty() {
        bail!("maze has no cheese; pass --to to pick a target");
    }

    let result = dijkstra_with(&maze, from, &goals, Termination::FirstGoal, args.frontier)?;
    let Some(to) = result.reached else {
        match args.to {
            Some(to) => bail!("cell {to} is not reachable from {from}"),
            None => bail!("no cheese is reachable from {from}"),
        }
    };

    let vertices = result.route_to(to)?;
    let actions = locations_to_actions(&vertices, dimensions)?;
    let distance = result.distance_to(to).unwrap_or_default();

    Ok(RouteSummary {
        from,
        to,
        distance,
        vertices,
        actions,
        settled: result.distances.len(),
        frontier: args.frontier,
    })
}
