// Module exports for CLI subcommands
//
// Each module handles a specific CLI subcommand. main.rs parses arguments and
// dispatches to these handlers; rendering lives in `crate::output`.

pub mod density;
pub mod route;
pub mod walk;

use std::path::Path;

use anyhow::{Context, Result};

use ratpath_lib::{AdjacencyMaze, MazeDescription};

/// Read a maze description and build its graph.
pub fn load_maze(path: &Path) -> Result<(MazeDescription, AdjacencyMaze)> {
    let description = MazeDescription::from_path(path)
        .with_context(|| format!("failed to load maze from {}", path.display()))?;
    let maze = description
        .build()
        .with_context(|| format!("invalid maze in {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        width = description.width,
        height = description.height,
        cheese = description.cheese.len(),
        "loaded maze"
    );
    Ok((description, maze))
}
