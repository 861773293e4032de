//! Output formatting for command results.
//!
//! Every command renders either a human-friendly text view or a JSON
//! document on stdout. Text views use [`ColorPalette`] and degrade to plain
//! text under `NO_COLOR` or `TERM=dumb`.

use std::io::{self, Write};

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use ratpath_lib::{Action, Vertex};

use crate::commands::density::DensityReport;
use crate::commands::route::RouteSummary;
use crate::commands::walk::{StopReason, WalkSummary};
use crate::terminal::ColorPalette;

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub fn print_route(summary: &RouteSummary, format: OutputFormat) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Text => write_route_text(&mut out, summary, &ColorPalette::detect())?,
        OutputFormat::Json => write_json(&mut out, summary)?,
    }
    Ok(())
}

pub fn print_density(report: &DensityReport, format: OutputFormat) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Text => write_density_text(&mut out, report, &ColorPalette::detect())?,
        OutputFormat::Json => write_json(&mut out, report)?,
    }
    Ok(())
}

pub fn print_walk(summary: &WalkSummary, format: OutputFormat) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Text => write_walk_text(&mut out, summary, &ColorPalette::detect())?,
        OutputFormat::Json => write_json(&mut out, summary)?,
    }
    Ok(())
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn join_vertices(vertices: &[Vertex]) -> String {
    vertices
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn join_actions(actions: &[Action]) -> String {
    actions
        .iter()
        .map(|action| action.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render a route summary in text format.
pub fn write_route_text<W: Write>(
    out: &mut W,
    summary: &RouteSummary,
    palette: &ColorPalette,
) -> io::Result<()> {
    let p = palette;
    writeln!(
        out,
        "Route {}{}{} -> {}{}{} (distance {}{}{}, {} steps, {} settled via {})",
        p.white_bold,
        summary.from,
        p.reset,
        p.white_bold,
        summary.to,
        p.reset,
        p.green,
        summary.distance,
        p.reset,
        summary.actions.len(),
        summary.settled,
        summary.frontier,
    )?;
    writeln!(out, "Vertices: {}", join_vertices(&summary.vertices))?;
    writeln!(
        out,
        "Actions: {}{}{}",
        p.cyan,
        join_actions(&summary.actions),
        p.reset
    )
}

/// Render cheese densities as a table, densest first in the listing order.
pub fn write_density_text<W: Write>(
    out: &mut W,
    report: &DensityReport,
    palette: &ColorPalette,
) -> io::Result<()> {
    let p = palette;
    if report.entries.is_empty() {
        return writeln!(out, "No cheese in maze.");
    }

    writeln!(
        out,
        "Cheese density (radius {}, {} cheese):",
        report.radius,
        report.entries.len()
    )?;
    writeln!(
        out,
        "{:>8} {:>5} {:>5} {:>9}",
        "Cheese", "Row", "Col", "Density"
    )?;
    let share = report.uniform_share();
    for entry in &report.entries {
        let color = if entry.density > share { p.green } else { "" };
        let reset = if color.is_empty() { "" } else { p.reset };
        let marker = if report.densest == Some(entry.cheese) {
            format!(" {}DENSEST{}", p.tag_cheese, p.reset)
        } else {
            String::new()
        };
        writeln!(
            out,
            "{:>8} {:>5} {:>5} {color}{:>9.3}{reset}{marker}",
            entry.cheese, entry.row, entry.col, entry.density
        )?;
    }
    Ok(())
}

/// Render a walk replay in text format.
pub fn write_walk_text<W: Write>(
    out: &mut W,
    summary: &WalkSummary,
    palette: &ColorPalette,
) -> io::Result<()> {
    let p = palette;
    writeln!(
        out,
        "Walk from {}{}{} with {} strategy: {} turns, {} replans",
        p.white_bold, summary.start, p.reset, summary.strategy, summary.turns, summary.replans
    )?;
    writeln!(out, "Eaten: {}", join_vertices(&summary.eaten))?;
    writeln!(
        out,
        "Actions: {}{}{}",
        p.cyan,
        join_actions(&summary.actions),
        p.reset
    )?;
    writeln!(out, "Final position: {}", summary.final_position)?;
    match summary.stopped {
        StopReason::AllEaten => writeln!(out, "All cheese eaten."),
        StopReason::NoReachableCheese => writeln!(
            out,
            "{}Stopped: no reachable cheese ({} left: {}){}",
            p.orange,
            summary.remaining.len(),
            join_vertices(&summary.remaining),
            p.reset
        ),
        StopReason::TurnLimit => writeln!(
            out,
            "{}Stopped: turn limit reached ({} left: {}){}",
            p.orange,
            summary.remaining.len(),
            join_vertices(&summary.remaining),
            p.reset
        ),
    }
}
