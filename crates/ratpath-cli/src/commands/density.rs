//! Density command handler: how clustered each cheese is.

use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use ratpath_lib::{densest, densities, Graph, Vertex};

use crate::commands::load_maze;
use crate::output::{self, OutputFormat};

/// Arguments for the density command.
#[derive(Debug, Clone)]
pub struct DensityCommandArgs {
    pub maze: PathBuf,
    pub radius: usize,
    pub format: OutputFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityEntry {
    pub cheese: Vertex,
    pub row: usize,
    pub col: usize,
    pub density: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityReport {
    pub radius: usize,
    pub entries: Vec<DensityEntry>,
    /// Highest-scoring cheese, first listed on ties.
    pub densest: Option<Vertex>,
}

impl DensityReport {
    /// Score every cheese would get if all were spread apart.
    pub fn uniform_share(&self) -> f64 {
        if self.entries.is_empty() {
            0.0
        } else {
            1.0 / self.entries.len() as f64
        }
    }
}

/// Handle the density subcommand.
pub fn handle_density(args: &DensityCommandArgs) -> Result<()> {
    let report = compute_density(args)?;
    output::print_density(&report, args.format)
}

pub fn compute_density(args: &DensityCommandArgs) -> Result<DensityReport> {
    let (description, maze) = load_maze(&args.maze)?;
    let dimensions = maze.dimensions();
    let cheese = &description.cheese;

    let entries = cheese
        .iter()
        .zip(densities(cheese, dimensions, args.radius))
        .map(|(&vertex, density)| {
            let (row, col) = dimensions.row_col(vertex);
            DensityEntry {
                cheese: vertex,
                row,
                col,
                density,
            }
        })
        .collect();

    Ok(DensityReport {
        radius: args.radius,
        entries,
        densest: densest(cheese, dimensions, args.radius).map(|(vertex, _)| vertex),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::write_maze;

    #[test]
    fn scores_every_cheese() {
        let (_dir, path) =
            write_maze(r#"{ "width": 10, "height": 10, "start": 0, "cheese": [99, 0, 1] }"#);
        let report = compute_density(&DensityCommandArgs {
            maze: path,
            radius: 3,
            format: OutputFormat::Json,
        })
        .unwrap();

        let scores: Vec<f64> = report.entries.iter().map(|entry| entry.density).collect();
        assert_eq!(scores, vec![1.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0]);
        assert_eq!(report.densest, Some(0));
        assert_eq!((report.entries[0].row, report.entries[0].col), (9, 9));
    }

    #[test]
    fn empty_cheese_list_has_no_densest() {
        let (_dir, path) = write_maze(r#"{ "width": 2, "height": 2, "start": 0 }"#);
        let report = compute_density(&DensityCommandArgs {
            maze: path,
            radius: 3,
            format: OutputFormat::Text,
        })
        .unwrap();
        assert!(report.entries.is_empty());
        assert_eq!(report.densest, None);
        assert_eq!(report.uniform_share(), 0.0);
    }
}
