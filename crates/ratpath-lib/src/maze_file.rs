use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::{AdjacencyMaze, Dimensions, MazeBuilder, Vertex, Weight};

/// On-disk description of a maze and the cheese placed in it.
///
/// Either `adjacency` lists every edge explicitly, or a full grid is built
/// from `width`/`height` and then carved with `walls` and `mud`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeDescription {
    pub width: usize,
    pub height: usize,
    pub start: Vertex,
    #[serde(default)]
    pub cheese: Vec<Vertex>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub walls: Vec<(Vertex, Vertex)>,
    /// `(a, b, weight)` crossing costs between neighbouring cells.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mud: Vec<(Vertex, Vertex, i64)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjacency: Option<BTreeMap<Vertex, BTreeMap<Vertex, i64>>>,
}

impl MazeDescription {
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = fs::File::open(path).map_err(|source| Error::MazeRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let description: MazeDescription = serde_json::from_reader(reader)?;
        description.validate()?;
        Ok(description)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let description: MazeDescription = serde_json::from_str(json)?;
        description.validate()?;
        Ok(description)
    }

    pub fn dimensions(&self) -> Result<Dimensions> {
        Dimensions::new(self.width, self.height)
    }

    /// Check the grid size and that the start and every cheese are on it.
    pub fn validate(&self) -> Result<()> {
        let dimensions = self.dimensions()?;
        dimensions.check(self.start)?;
        for &cheese in &self.cheese {
            dimensions.check(cheese)?;
        }
        Ok(())
    }

    /// Build the maze graph this description stands for.
    pub fn build(&self) -> Result<AdjacencyMaze> {
        let dimensions = self.dimensions()?;

        if let Some(adjacency) = &self.adjacency {
            let mut edges = BTreeMap::new();
            for (&from, targets) in adjacency {
                let mut converted = BTreeMap::new();
                for (&to, &weight) in targets {
                    converted.insert(to, to_weight(from, to, weight)?);
                }
                edges.insert(from, converted);
            }
            return AdjacencyMaze::from_adjacency(dimensions, edges);
        }

        let mut builder = MazeBuilder::grid(dimensions);
        for &(a, b) in &self.walls {
            builder = builder.wall(a, b)?;
        }
        for &(a, b, weight) in &self.mud {
            builder = builder.mud(a, b, to_weight(a, b, weight)?)?;
        }
        Ok(builder.build_adjacency())
    }
}

/// Weights above [`Weight::MAX`] saturate, like traversal distances do.
/// Every move costs at least 1.
fn to_weight(from: Vertex, to: Vertex, weight: i64) -> Result<Weight> {
    if weight < 0 {
        return Err(Error::NegativeWeight { from, to, weight });
    }
    if weight == 0 {
        return Err(Error::ZeroWeight { from, to });
    }
    Ok(Weight::try_from(weight).unwrap_or(Weight::MAX))
}
