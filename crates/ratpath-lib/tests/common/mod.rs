//! Common test utilities and fixture helpers.
//!
//! Provides the JSON maze fixture, seeded random mazes and an independent
//! Bellman-Ford reference used to check traversal distances.

use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratpath_lib::{AdjacencyMaze, Dimensions, Graph, MazeBuilder, MazeDescription, Vertex};

/// Path to fixtures directory used by tests.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// The 5x5 fixture maze with walls, mud and three cheese.
#[allow(dead_code)]
pub fn small_maze() -> MazeDescription {
    let path = fixtures_dir().join("small_maze.json");
    MazeDescription::from_path(&path).expect("load fixture small_maze.json")
}

/// Grid maze where each passage is walled with probability 1/5 and turned
/// into mud (weight 2..=9) with probability 1/5.
#[allow(dead_code)]
pub fn random_maze(seed: u64, width: usize, height: usize) -> AdjacencyMaze {
    let dimensions = Dimensions::new(width, height).expect("non-empty maze");
    let mut rng = StdRng::seed_from_u64(seed);
    let mut builder = MazeBuilder::grid(dimensions);

    for vertex in 0..dimensions.cell_count() {
        let (row, col) = dimensions.row_col(vertex);
        let forward = [
            dimensions.vertex_at(row, col + 1),
            dimensions.vertex_at(row + 1, col),
        ];
        for neighbor in forward.into_iter().flatten() {
            let roll = rng.gen_range(0..5);
            builder = match roll {
                0 => builder.wall(vertex, neighbor).expect("adjacent cells"),
                1 => builder
                    .mud(vertex, neighbor, rng.gen_range(2..=9))
                    .expect("adjacent cells"),
                _ => builder,
            };
        }
    }

    builder.build_adjacency()
}

/// Random sample of distinct cells.
#[allow(dead_code)]
pub fn random_goals(seed: u64, dimensions: Dimensions, count: usize) -> Vec<Vertex> {
    let mut rng = StdRng::seed_from_u64(seed ^ 0x5eed);
    let mut goals = Vec::with_capacity(count);
    while goals.len() < count.min(dimensions.cell_count()) {
        let candidate = rng.gen_range(0..dimensions.cell_count());
        if !goals.contains(&candidate) {
            goals.push(candidate);
        }
    }
    goals
}

/// Single-source shortest distances by Bellman-Ford. `None` means unreachable.
#[allow(dead_code)]
pub fn bellman_ford<G: Graph>(graph: &G, source: Vertex) -> Vec<Option<u64>> {
    let cells = graph.dimensions().cell_count();
    let mut distances = vec![None; cells];
    distances[source] = Some(0u64);

    let mut neighbors = Vec::new();
    for _ in 1..cells.max(2) {
        let mut changed = false;
        for from in 0..cells {
            let Some(base) = distances[from] else {
                continue;
            };
            neighbors.clear();
            graph.neighbors(from, &mut neighbors);
            for &to in &neighbors {
                let weight = graph.weight(from, to).expect("listed neighbour has a weight");
                let candidate = base + u64::from(weight);
                if distances[to].map_or(true, |current| candidate < current) {
                    distances[to] = Some(candidate);
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }

    distances
}
