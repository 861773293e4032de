use criterion::{criterion_group, criterion_main, Criterion};
use once_cell::sync::Lazy;
use ratpath_lib::{
    dijkstra_with, plan, AdjacencyMaze, AgentConfig, Dimensions, FrontierKind, MatrixMaze,
    MazeBuilder, Termination, Turn,
};
use std::hint::black_box;

const SIDE: usize = 41;

/// Serpentine maze: every other row is walled off except at alternating ends,
/// with mud along the western half of the last row.
fn serpentine() -> AdjacencyMaze {
    let dimensions = Dimensions::new(SIDE, SIDE).expect("non-empty maze");
    let mut builder = MazeBuilder::grid(dimensions);
    for row in (1..SIDE).step_by(2) {
        let gap = if (row / 2) % 2 == 0 { SIDE - 1 } else { 0 };
        for col in (0..SIDE).filter(|&col| col != gap) {
            let above = dimensions.vertex_at(row - 1, col).expect("on grid");
            let here = dimensions.vertex_at(row, col).expect("on grid");
            builder = builder.wall(above, here).expect("adjacent cells");
        }
    }
    for col in 0..SIDE / 2 {
        let here = dimensions.vertex_at(SIDE - 1, col).expect("on grid");
        builder = builder.mud(here, here + 1, 4).expect("adjacent cells");
    }
    builder.build_adjacency()
}

static MAZE: Lazy<AdjacencyMaze> = Lazy::new(serpentine);
static MATRIX: Lazy<MatrixMaze> = Lazy::new(|| MAZE.to_matrix());
static CHEESE: Lazy<Vec<usize>> = Lazy::new(|| vec![SIDE * SIDE - 1, SIDE * 20 + 20, SIDE - 1]);

fn benchmark_traversal(c: &mut Criterion) {
    let maze = &*MAZE;
    let cheese = &*CHEESE;

    for kind in [FrontierKind::BinaryHeap, FrontierKind::PairingHeap] {
        c.bench_function(&format!("exhaust_{kind}"), |b| {
            b.iter(|| {
                let result = dijkstra_with(maze, 0, &[], Termination::Exhaust, kind)
                    .expect("source on grid");
                black_box(result.distances.len())
            });
        });

        c.bench_function(&format!("first_goal_{kind}"), |b| {
            b.iter(|| {
                let result = dijkstra_with(maze, 0, cheese, Termination::FirstGoal, kind)
                    .expect("source on grid");
                black_box(result.reached)
            });
        });
    }

    c.bench_function("exhaust_matrix_binary-heap", |b| {
        let matrix = &*MATRIX;
        b.iter(|| {
            let result =
                dijkstra_with(matrix, 0, &[], Termination::Exhaust, FrontierKind::default())
                    .expect("source on grid");
            black_box(result.distances.len())
        });
    });

    c.bench_function("agent_plan_density_aware", |b| {
        let config = AgentConfig::default();
        b.iter(|| {
            let plan = plan(&config, &Turn::new(maze, 0, cheese)).expect("reachable");
            black_box(plan.actions.len())
        });
    });
}

criterion_group!(benches, benchmark_traversal);
criterion_main!(benches);
