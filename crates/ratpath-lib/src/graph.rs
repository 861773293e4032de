use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Identifier of a maze cell: `row * width + col`.
pub type Vertex = usize;

/// Cost of crossing an edge. Base moves cost 1, mud costs more.
pub type Weight = u32;

/// Grid size shared by every maze representation. Both sides are non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDimensions")]
pub struct Dimensions {
    width: usize,
    height: usize,
}

#[derive(Deserialize)]
struct RawDimensions {
    width: usize,
    height: usize,
}

impl TryFrom<RawDimensions> for Dimensions {
    type Error = Error;

    fn try_from(raw: RawDimensions) -> Result<Self> {
        Self::new(raw.width, raw.height)
    }
}

impl Dimensions {
    /// Validate and build a grid size. Both sides must be non-zero.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    pub fn contains(&self, vertex: Vertex) -> bool {
        vertex < self.cell_count()
    }

    /// Fail with [`Error::VertexOutOfBounds`] unless `vertex` is a grid cell.
    pub fn check(&self, vertex: Vertex) -> Result<()> {
        if self.contains(vertex) {
            Ok(())
        } else {
            Err(Error::VertexOutOfBounds {
                vertex,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Split a vertex into `(row, col)`.
    pub fn row_col(&self, vertex: Vertex) -> (usize, usize) {
        (vertex / self.width, vertex % self.width)
    }

    /// Join `(row, col)` back into a vertex, `None` outside the grid.
    pub fn vertex_at(&self, row: usize, col: usize) -> Option<Vertex> {
        if row < self.height && col < self.width {
            Some(row * self.width + col)
        } else {
            None
        }
    }

    /// Whether two cells share a side.
    pub fn are_adjacent(&self, a: Vertex, b: Vertex) -> bool {
        let (ra, ca) = self.row_col(a);
        let (rb, cb) = self.row_col(b);
        ra.abs_diff(rb) + ca.abs_diff(cb) == 1
    }

    /// The up to four cells sharing a side with `vertex`, in north, south,
    /// west, east order.
    pub fn grid_neighbors(&self, vertex: Vertex) -> impl Iterator<Item = Vertex> + '_ {
        let (row, col) = self.row_col(vertex);
        let candidates = [
            row.checked_sub(1).map(|r| (r, col)),
            Some((row + 1, col)),
            col.checked_sub(1).map(|c| (row, c)),
            Some((row, col + 1)),
        ];
        candidates
            .into_iter()
            .flatten()
            .filter_map(move |(r, c)| self.vertex_at(r, c))
    }
}

/// Read-only access to a weighted maze.
///
/// Weights are non-negative by construction; traversal results are
/// undefined for any implementation that reports inconsistent weights.
pub trait Graph {
    /// Grid size the vertices of this graph are laid out on.
    fn dimensions(&self) -> Dimensions;

    /// Append the neighbours of `vertex` into `buf`. The caller clears `buf`.
    fn neighbors(&self, vertex: Vertex, buf: &mut Vec<Vertex>);

    /// Cost of the edge `from -> to`, `None` when there is no such edge.
    fn weight(&self, from: Vertex, to: Vertex) -> Option<Weight>;
}

/// Maze stored as a mapping from vertex to (neighbour -> weight).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyMaze {
    dimensions: Dimensions,
    adjacency: BTreeMap<Vertex, BTreeMap<Vertex, Weight>>,
}

impl AdjacencyMaze {
    /// Maze with the given size and no edges.
    pub fn empty(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            adjacency: BTreeMap::new(),
        }
    }

    /// Wrap an existing adjacency mapping. Every edge must join two
    /// neighbouring grid cells and carry a positive weight.
    ///
    /// Edges are taken as given; a one-way entry yields a one-way edge.
    pub fn from_adjacency(
        dimensions: Dimensions,
        adjacency: BTreeMap<Vertex, BTreeMap<Vertex, Weight>>,
    ) -> Result<Self> {
        for (&from, targets) in &adjacency {
            for (&to, &weight) in targets {
                check_edge(dimensions, from, to, weight)?;
            }
        }
        Ok(Self {
            dimensions,
            adjacency,
        })
    }

    /// Insert or overwrite the undirected edge `a <-> b`.
    pub fn connect(&mut self, a: Vertex, b: Vertex, weight: Weight) -> Result<()> {
        check_edge(self.dimensions, a, b, weight)?;
        self.adjacency.entry(a).or_default().insert(b, weight);
        self.adjacency.entry(b).or_default().insert(a, weight);
        Ok(())
    }

    /// Remove the undirected edge `a <-> b`. Returns whether it existed.
    pub fn disconnect(&mut self, a: Vertex, b: Vertex) -> bool {
        let forward = self
            .adjacency
            .get_mut(&a)
            .and_then(|targets| targets.remove(&b))
            .is_some();
        let backward = self
            .adjacency
            .get_mut(&b)
            .and_then(|targets| targets.remove(&a))
            .is_some();
        forward || backward
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeMap::len).sum()
    }

    /// Dense copy of this maze.
    pub fn to_matrix(&self) -> MatrixMaze {
        let mut matrix = MatrixMaze::empty(self.dimensions);
        for (&from, targets) in &self.adjacency {
            for (&to, &weight) in targets {
                matrix.set(from, to, weight);
            }
        }
        matrix
    }
}

fn check_edge(dimensions: Dimensions, from: Vertex, to: Vertex, weight: Weight) -> Result<()> {
    dimensions.check(from)?;
    dimensions.check(to)?;
    if !dimensions.are_adjacent(from, to) {
        return Err(Error::NotAdjacent { from, to });
    }
    if weight == 0 {
        return Err(Error::ZeroWeight { from, to });
    }
    Ok(())
}

impl Graph for AdjacencyMaze {
    fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    fn neighbors(&self, vertex: Vertex, buf: &mut Vec<Vertex>) {
        if let Some(targets) = self.adjacency.get(&vertex) {
            buf.extend(targets.keys().copied());
        }
    }

    fn weight(&self, from: Vertex, to: Vertex) -> Option<Weight> {
        self.adjacency
            .get(&from)
            .and_then(|targets| targets.get(&to))
            .copied()
    }
}

/// Maze stored as a dense `cells x cells` weight matrix. A zero entry means
/// "no edge", which is why every maze edge costs at least 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixMaze {
    dimensions: Dimensions,
    weights: Vec<Weight>,
}

impl MatrixMaze {
    pub fn empty(dimensions: Dimensions) -> Self {
        let cells = dimensions.cell_count();
        Self {
            dimensions,
            weights: vec![0; cells * cells],
        }
    }

    fn set(&mut self, from: Vertex, to: Vertex, weight: Weight) {
        let cells = self.dimensions.cell_count();
        self.weights[from * cells + to] = weight;
    }
}

impl Graph for MatrixMaze {
    fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    fn neighbors(&self, vertex: Vertex, buf: &mut Vec<Vertex>) {
        let cells = self.dimensions.cell_count();
        if vertex >= cells {
            return;
        }
        let row = &self.weights[vertex * cells..(vertex + 1) * cells];
        buf.extend(
            row.iter()
                .enumerate()
                .filter(|(_, &weight)| weight > 0)
                .map(|(to, _)| to),
        );
    }

    fn weight(&self, from: Vertex, to: Vertex) -> Option<Weight> {
        let cells = self.dimensions.cell_count();
        if from >= cells || to >= cells {
            return None;
        }
        match self.weights[from * cells + to] {
            0 => None,
            weight => Some(weight),
        }
    }
}

/// Builder for grid-shaped mazes: start fully connected with unit weights,
/// then carve walls and lay mud.
#[derive(Debug, Clone)]
pub struct MazeBuilder {
    maze: AdjacencyMaze,
}

impl MazeBuilder {
    /// Fully connected four-neighbour grid with unit weights.
    pub fn grid(dimensions: Dimensions) -> Self {
        let mut maze = AdjacencyMaze::empty(dimensions);
        for vertex in 0..dimensions.cell_count() {
            let targets: BTreeMap<Vertex, Weight> = dimensions
                .grid_neighbors(vertex)
                .map(|neighbor| (neighbor, 1))
                .collect();
            maze.adjacency.insert(vertex, targets);
        }
        Self { maze }
    }

    /// Remove the passage between two neighbouring cells.
    pub fn wall(mut self, a: Vertex, b: Vertex) -> Result<Self> {
        let dimensions = self.maze.dimensions;
        dimensions.check(a)?;
        dimensions.check(b)?;
        if !dimensions.are_adjacent(a, b) {
            return Err(Error::NotAdjacent { from: a, to: b });
        }
        self.maze.disconnect(a, b);
        Ok(self)
    }

    /// Set the crossing cost between two neighbouring cells. The cost must be
    /// at least 1.
    pub fn mud(mut self, a: Vertex, b: Vertex, weight: Weight) -> Result<Self> {
        self.maze.connect(a, b, weight)?;
        Ok(self)
    }

    pub fn build_adjacency(self) -> AdjacencyMaze {
        self.maze
    }

    pub fn build_matrix(self) -> MatrixMaze {
        self.maze.to_matrix()
    }
}
