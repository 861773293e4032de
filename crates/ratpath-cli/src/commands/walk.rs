//! Walk command handler: replay agent decision cycles on a static maze.
//!
//! Every emitted action is applied at once, mud included, and cheese is
//! removed as soon as the agent steps on it. This demonstrates the policy;
//! it does not model a full game.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use serde::Serialize;

use ratpath_lib::{Action, Agent, AgentConfig, Error as LibError, Graph, Strategy, Turn, Vertex};

use crate::commands::load_maze;
use crate::output::{self, OutputFormat};

/// Default cap on decision cycles.
pub const DEFAULT_MAX_TURNS: usize = 1000;

/// Arguments for the walk command.
#[derive(Debug, Clone)]
pub struct WalkCommandArgs {
    pub maze: PathBuf,
    /// JSON agent configuration; defaults apply when absent.
    pub config: Option<PathBuf>,
    /// Overrides the configured strategy.
    pub strategy: Option<Strategy>,
    pub max_turns: usize,
    pub format: OutputFormat,
}

/// Why the replay ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StopReason {
    AllEaten,
    NoReachableCheese,
    TurnLimit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalkSummary {
    pub strategy: Strategy,
    pub start: Vertex,
    pub final_position: Vertex,
    pub turns: usize,
    pub replans: usize,
    pub actions: Vec<Action>,
    /// Cheese in the order it was eaten.
    pub eaten: Vec<Vertex>,
    pub remaining: Vec<Vertex>,
    pub stopped: StopReason,
}

/// Handle the walk subcommand.
pub fn handle_walk(args: &WalkCommandArgs) -> Result<()> {
    let summary = run_walk(args)?;
    output::print_walk(&summary, args.format)
}

fn load_config(args: &WalkCommandArgs) -> Result<AgentConfig> {
    let mut config = match &args.config {
        Some(path) => AgentConfig::from_path(path)
            .with_context(|| format!("failed to load agent config from {}", path.display()))?,
        None => AgentConfig::default(),
    };
    if let Some(strategy) = args.strategy {
        config.strategy = strategy;
    }
    config.validate()?;
    Ok(config)
}

pub fn run_walk(args: &WalkCommandArgs) -> Result<WalkSummary> {
    let (description, maze) = load_maze(&args.maze)?;
    let config = load_config(args)?;
    let dimensions = maze.dimensions();

    let mut agent = Agent::new(config)?;
    let mut remaining = description.cheese.clone();
    let mut position = description.start;
    let mut actions = Vec::new();
    let mut eaten = Vec::new();

    // Cheese on the start cell is eaten before the first cycle.
    eat(&mut remaining, &mut eaten, position);

    let mut stopped = StopReason::AllEaten;
    if !remaining.is_empty() {
        match agent.preprocess(&Turn::new(&maze, position, &remaining)) {
            Ok(()) => {}
            Err(LibError::NoReachableGoal { .. }) => stopped = StopReason::NoReachableCheese,
            Err(err) => return Err(err.into()),
        }
    }

    while stopped == StopReason::AllEaten && !remaining.is_empty() {
        if actions.len() >= args.max_turns {
            stopped = StopReason::TurnLimit;
            break;
        }

        let action = match agent.turn(&Turn::new(&maze, position, &remaining)) {
            Ok(action) => action,
            Err(LibError::NoReachableGoal { .. }) => {
                stopped = StopReason::NoReachableCheese;
                break;
            }
            Err(err) => return Err(err.into()),
        };

        let Some(next) = action
            .apply(position, dimensions)
            .filter(|&next| maze.weight(position, next).is_some())
        else {
            bail!("agent played {action} from {position} into a wall");
        };

        tracing::debug!(turn = actions.len() + 1, %action, from = position, to = next, "step");
        position = next;
        actions.push(action);
        eat(&mut remaining, &mut eaten, position);
    }

    let report = agent.postprocess();
    Ok(WalkSummary {
        strategy: agent.config().strategy,
        start: description.start,
        final_position: position,
        turns: report.turns,
        replans: report.replans,
        actions,
        eaten,
        remaining,
        stopped,
    })
}

fn eat(remaining: &mut Vec<Vertex>, eaten: &mut Vec<Vertex>, position: Vertex) {
    if let Some(index) = remaining.iter().position(|&cheese| cheese == position) {
        eaten.push(remaining.remove(index));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::write_maze;

    fn args(maze: PathBuf) -> WalkCommandArgs {
        WalkCommandArgs {
            maze,
            config: None,
            strategy: None,
            max_turns: DEFAULT_MAX_TURNS,
            format: OutputFormat::Text,
        }
    }

    #[test]
    fn eats_cheese_in_a_line() {
        let (_dir, path) =
            write_maze(r#"{ "width": 5, "height": 1, "start": 2, "cheese": [4, 0] }"#);
        let summary = run_walk(&args(path)).unwrap();
        assert_eq!(summary.stopped, StopReason::AllEaten);
        // Both are two steps away; the lower cell wins the tie.
        assert_eq!(summary.eaten, vec![0, 4]);
        assert_eq!(summary.turns, 6);
        assert_eq!(summary.final_position, 4);
        assert_eq!(summary.actions.len(), summary.turns);
    }

    #[test]
    fn turn_limit_stops_the_walk() {
        let (_dir, path) = write_maze(r#"{ "width": 6, "height": 1, "start": 0, "cheese": [5] }"#);
        let summary = run_walk(&WalkCommandArgs {
            max_turns: 2,
            ..args(path)
        })
        .unwrap();
        assert_eq!(summary.stopped, StopReason::TurnLimit);
        assert_eq!(summary.final_position, 2);
        assert_eq!(summary.remaining, vec![5]);
    }

    #[test]
    fn walled_cheese_ends_with_no_reachable_cheese() {
        let (_dir, path) = write_maze(
            r#"{ "width": 3, "height": 1, "start": 1, "cheese": [0, 2], "walls": [[1, 2]] }"#,
        );
        let summary = run_walk(&args(path)).unwrap();
        assert_eq!(summary.eaten, vec![0]);
        assert_eq!(summary.remaining, vec![2]);
        assert_eq!(summary.stopped, StopReason::NoReachableCheese);
    }

    #[test]
    fn cheese_on_start_is_eaten_immediately() {
        let (_dir, path) = write_maze(r#"{ "width": 2, "height": 1, "start": 0, "cheese": [0] }"#);
        let summary = run_walk(&args(path)).unwrap();
        assert_eq!(summary.eaten, vec![0]);
        assert_eq!(summary.turns, 0);
    }

    #[test]
    fn strategy_flag_overrides_config_file() {
        let (dir, path) =
            write_maze(r#"{ "width": 5, "height": 1, "start": 2, "cheese": [4, 0] }"#);
        let config = dir.path().join("agent.json");
        std::fs::write(&config, r#"{ "strategy": "nearest" }"#).unwrap();

        let summary = run_walk(&WalkCommandArgs {
            config: Some(config.clone()),
            ..args(path.clone())
        })
        .unwrap();
        assert_eq!(summary.strategy, Strategy::Nearest);

        let summary = run_walk(&WalkCommandArgs {
            config: Some(config),
            strategy: Some(Strategy::Sweep),
            ..args(path)
        })
        .unwrap();
        assert_eq!(summary.strategy, Strategy::Sweep);
        assert_eq!(summary.eaten, vec![4, 0]);
    }
}
