//! Agent policy: picks a cheese, plans a route to it and emits one action per
//! decision cycle.
//!
//! The host calls [`Agent::preprocess`] once before the game, [`Agent::turn`]
//! every cycle and [`Agent::postprocess`] at the end. All state carried
//! between cycles lives in [`AgentMemory`], owned by the agent.
//!
//! # Phases
//!
//! | Phase | Meaning |
//! |---|---|
//! | [`AgentPhase::Initial`] | nothing planned yet |
//! | [`AgentPhase::EnRoute`] | actions remain for the current target |
//! | [`AgentPhase::Arrived`] | the last planned action was emitted; next cycle re-plans |

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::action::{locations_to_actions, Action, ActionQueue};
use crate::density::{densest, DEFAULT_WINDOW_RADIUS};
use crate::error::{Error, Result};
use crate::frontier::FrontierKind;
use crate::graph::{Graph, Vertex, Weight};
use crate::traversal::{dijkstra_with, Termination, TraversalResult};

/// Distance beyond which the density-aware strategy looks for a denser cluster.
pub const DEFAULT_RETARGET_THRESHOLD: Weight = 5;

/// How the agent chooses its next cheese.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Always chase the nearest cheese.
    Nearest,
    /// Chase the nearest cheese unless it is far and a denser cluster exists.
    #[default]
    DensityAware,
    /// Settle every cheese in one pass and chase the first listed reachable one.
    Sweep,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Strategy::Nearest => "nearest",
            Strategy::DensityAware => "density-aware",
            Strategy::Sweep => "sweep",
        };
        f.write_str(value)
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nearest" => Ok(Strategy::Nearest),
            "density-aware" | "density" => Ok(Strategy::DensityAware),
            "sweep" => Ok(Strategy::Sweep),
            other => Err(format!("unknown strategy: {other}")),
        }
    }
}

/// Tunables of the agent policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub strategy: Strategy,
    /// Nearest-cheese distance above which density re-targeting is considered.
    pub retarget_threshold: Weight,
    /// Half-side of the density window, in cells.
    pub window_radius: usize,
    /// Frontier used by every traversal the agent runs.
    pub frontier: FrontierKind,
    /// Re-evaluate the target on every cycle instead of only when the route runs out.
    pub replan_every_turn: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            retarget_threshold: DEFAULT_RETARGET_THRESHOLD,
            window_radius: DEFAULT_WINDOW_RADIUS,
            frontier: FrontierKind::default(),
            replan_every_turn: true,
        }
    }
}

impl AgentConfig {
    /// Parse a JSON configuration; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: AgentConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.strategy == Strategy::DensityAware && self.window_radius == 0 {
            return Err(Error::InvalidConfig {
                message: "window_radius must be at least 1 for density-aware targeting"
                    .to_string(),
            });
        }
        Ok(())
    }
}

/// Where the agent stands in its plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgentPhase {
    #[default]
    Initial,
    EnRoute,
    Arrived,
}

/// State the agent carries from one cycle to the next.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AgentMemory {
    pub phase: AgentPhase,
    pub target: Option<Vertex>,
    pub route: ActionQueue,
    /// Cell the agent should occupy once the host applied every emitted action.
    pub cursor: Option<Vertex>,
    pub turns: usize,
    pub replans: usize,
}

/// What the host hands the agent each cycle.
#[derive(Debug)]
pub struct Turn<'a, G: Graph + ?Sized> {
    pub maze: &'a G,
    pub position: Vertex,
    pub goals: &'a [Vertex],
    pub legal_actions: &'a [Action],
}

impl<'a, G: Graph + ?Sized> Turn<'a, G> {
    /// A turn where every action token is legal.
    pub fn new(maze: &'a G, position: Vertex, goals: &'a [Vertex]) -> Self {
        Self {
            maze,
            position,
            goals,
            legal_actions: &Action::ALL,
        }
    }

    pub fn with_legal_actions(mut self, legal_actions: &'a [Action]) -> Self {
        self.legal_actions = legal_actions;
        self
    }
}

/// Target chosen for a cycle together with the route to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub target: Vertex,
    pub distance: Weight,
    pub route: Vec<Vertex>,
    pub actions: Vec<Action>,
    /// Whether the density heuristic overrode the nearest cheese.
    pub retargeted: bool,
}

impl Plan {
    fn from_traversal<G: Graph + ?Sized>(
        maze: &G,
        traversal: &TraversalResult,
        target: Vertex,
        retargeted: bool,
    ) -> Result<Self> {
        let route = traversal.route_to(target)?;
        let actions = locations_to_actions(&route, maze.dimensions())?;
        let distance = traversal
            .distance_to(target)
            .ok_or(Error::TargetNotReached { target })?;
        Ok(Self {
            target,
            distance,
            route,
            actions,
            retargeted,
        })
    }
}

/// Choose a target for `turn` according to `config` and plan a route to it.
///
/// A cheese under the agent is being eaten this cycle and is ignored.
pub fn plan<G: Graph + ?Sized>(config: &AgentConfig, turn: &Turn<'_, G>) -> Result<Plan> {
    let position = turn.position;
    let goals: Vec<Vertex> = turn
        .goals
        .iter()
        .copied()
        .filter(|&goal| goal != position)
        .collect();
    let maze = turn.maze;

    if config.strategy == Strategy::Sweep {
        let sweep = dijkstra_with(maze, position, &goals, Termination::AllGoals, config.frontier)?;
        let target = goals
            .iter()
            .copied()
            .find(|&goal| sweep.is_settled(goal))
            .ok_or(Error::NoReachableGoal { position })?;
        return Plan::from_traversal(maze, &sweep, target, false);
    }

    let nearest = dijkstra_with(maze, position, &goals, Termination::FirstGoal, config.frontier)?;
    let target = nearest.reached.ok_or(Error::NoReachableGoal { position })?;
    let distance = nearest
        .distance_to(target)
        .ok_or(Error::TargetNotReached { target })?;

    if config.strategy == Strategy::DensityAware && distance > config.retarget_threshold {
        if let Some(dense) = denser_target(config, turn, &goals, target) {
            let focused =
                dijkstra_with(maze, position, &[dense], Termination::FirstGoal, config.frontier)?;
            if focused.reached == Some(dense) {
                tracing::info!(
                    nearest = target,
                    distance,
                    target = dense,
                    "re-targeting to denser cheese cluster"
                );
                return Plan::from_traversal(maze, &focused, dense, true);
            }
            tracing::warn!(
                target = dense,
                "densest cheese is unreachable; keeping nearest"
            );
        }
    }

    Plan::from_traversal(maze, &nearest, target, false)
}

/// Densest cheese when densities are not uniform and it differs from `nearest`.
fn denser_target<G: Graph + ?Sized>(
    config: &AgentConfig,
    turn: &Turn<'_, G>,
    goals: &[Vertex],
    nearest: Vertex,
) -> Option<Vertex> {
    let (dense, score) = densest(goals, turn.maze.dimensions(), config.window_radius)?;
    let uniform = 1.0 / goals.len() as f64;
    if score > uniform && dense != nearest {
        Some(dense)
    } else {
        None
    }
}

/// Summary returned by [`Agent::postprocess`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgentReport {
    pub turns: usize,
    pub replans: usize,
    pub phase: AgentPhase,
}

/// A maze agent with its private memory.
#[derive(Debug, Clone)]
pub struct Agent {
    config: AgentConfig,
    memory: AgentMemory,
}

impl Agent {
    pub fn new(config: AgentConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            memory: AgentMemory::default(),
        })
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn memory(&self) -> &AgentMemory {
        &self.memory
    }

    /// One-time setup before the first cycle: plan toward the first target.
    pub fn preprocess<G: Graph + ?Sized>(&mut self, turn: &Turn<'_, G>) -> Result<()> {
        let plan = plan(&self.config, turn)?;
        self.install(plan, turn.position);
        Ok(())
    }

    /// Run one decision cycle and return the action to play.
    pub fn turn<G: Graph + ?Sized>(&mut self, turn: &Turn<'_, G>) -> Result<Action> {
        if self.needs_replan(turn) {
            let plan = plan(&self.config, turn)?;
            self.install(plan, turn.position);
        }

        let action = self.memory.route.peek().ok_or(Error::RouteExhausted)?;
        if !turn.legal_actions.contains(&action) {
            return Err(Error::IllegalAction { action });
        }
        self.memory.route.pop_next()?;

        let dimensions = turn.maze.dimensions();
        self.memory.cursor = self
            .memory
            .cursor
            .and_then(|cursor| action.apply(cursor, dimensions));
        if self.memory.route.is_empty() {
            self.memory.phase = AgentPhase::Arrived;
        }
        self.memory.turns += 1;

        Ok(action)
    }

    /// End-of-game summary.
    pub fn postprocess(&self) -> AgentReport {
        let report = AgentReport {
            turns: self.memory.turns,
            replans: self.memory.replans,
            phase: self.memory.phase,
        };
        tracing::info!(
            turns = report.turns,
            replans = report.replans,
            phase = ?report.phase,
            "agent finished"
        );
        report
    }

    fn needs_replan<G: Graph + ?Sized>(&self, turn: &Turn<'_, G>) -> bool {
        let memory = &self.memory;
        let target_gone = memory
            .target
            .map_or(true, |target| !turn.goals.contains(&target));

        memory.phase != AgentPhase::EnRoute
            || memory.route.is_empty()
            || self.config.replan_every_turn
            || target_gone
            || memory.cursor != Some(turn.position)
    }

    /// Adopt `plan` unless it repeats the route already being followed.
    fn install(&mut self, plan: Plan, position: Vertex) {
        let memory = &mut self.memory;
        let on_track = memory.phase == AgentPhase::EnRoute
            && memory.target == Some(plan.target)
            && !memory.route.is_empty()
            && memory.cursor == Some(position);
        if on_track {
            return;
        }

        tracing::debug!(
            position,
            target = plan.target,
            distance = plan.distance,
            steps = plan.actions.len(),
            "planned new route"
        );
        memory.target = Some(plan.target);
        memory.route = ActionQueue::from(plan.actions);
        memory.cursor = Some(position);
        memory.phase = AgentPhase::EnRoute;
        memory.replans += 1;
    }
}
