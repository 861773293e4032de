//! Directional actions and the translation of vertex routes into them.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::{Dimensions, Vertex};

/// One move of the agent. Rows grow southward, columns grow eastward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    North,
    South,
    West,
    East,
    /// Stay in place. Part of the host alphabet, never produced from a route.
    Nothing,
}

impl Action {
    /// Every token the host accepts.
    pub const ALL: [Action; 5] = [
        Action::North,
        Action::South,
        Action::West,
        Action::East,
        Action::Nothing,
    ];

    /// `(Δrow, Δcol)` of this action.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Action::North => (-1, 0),
            Action::South => (1, 0),
            Action::West => (0, -1),
            Action::East => (0, 1),
            Action::Nothing => (0, 0),
        }
    }

    /// The action moving from `from` to the neighbouring cell `to`.
    pub fn between(from: Vertex, to: Vertex, dimensions: Dimensions) -> Result<Action> {
        dimensions.check(from)?;
        dimensions.check(to)?;
        let (from_row, from_col) = dimensions.row_col(from);
        let (to_row, to_col) = dimensions.row_col(to);
        let delta = (
            to_row as isize - from_row as isize,
            to_col as isize - from_col as isize,
        );
        match delta {
            (-1, 0) => Ok(Action::North),
            (1, 0) => Ok(Action::South),
            (0, -1) => Ok(Action::West),
            (0, 1) => Ok(Action::East),
            _ => Err(Error::NotAdjacent { from, to }),
        }
    }

    /// Cell reached by taking this action from `vertex`, `None` off the grid.
    pub fn apply(self, vertex: Vertex, dimensions: Dimensions) -> Option<Vertex> {
        if !dimensions.contains(vertex) {
            return None;
        }
        let (row, col) = dimensions.row_col(vertex);
        let (d_row, d_col) = self.delta();
        let row = row.checked_add_signed(d_row)?;
        let col = col.checked_add_signed(d_col)?;
        dimensions.vertex_at(row, col)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Action::North => "north",
            Action::South => "south",
            Action::West => "west",
            Action::East => "east",
            Action::Nothing => "nothing",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "north" | "n" => Ok(Action::North),
            "south" | "s" => Ok(Action::South),
            "west" | "w" => Ok(Action::West),
            "east" | "e" => Ok(Action::East),
            "nothing" => Ok(Action::Nothing),
            _ => Err(Error::UnknownAction {
                token: s.to_string(),
            }),
        }
    }
}

/// Turn a vertex route into one action per consecutive pair.
///
/// Every pair must be grid neighbours; anything else (same cell, diagonal,
/// row wrap, far jump) fails with [`Error::NotAdjacent`].
pub fn locations_to_actions(route: &[Vertex], dimensions: Dimensions) -> Result<Vec<Action>> {
    route
        .windows(2)
        .map(|pair| Action::between(pair[0], pair[1], dimensions))
        .collect()
}

/// Replay `actions` from `start`, returning every visited cell including `start`.
pub fn replay(start: Vertex, actions: &[Action], dimensions: Dimensions) -> Option<Vec<Vertex>> {
    let mut visited = Vec::with_capacity(actions.len() + 1);
    visited.push(start);
    let mut current = start;
    for action in actions {
        current = action.apply(current, dimensions)?;
        visited.push(current);
    }
    Some(visited)
}

/// First-in first-out queue of planned actions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionQueue {
    actions: VecDeque<Action>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next planned action.
    pub fn pop_next(&mut self) -> Result<Action> {
        self.actions.pop_front().ok_or(Error::RouteExhausted)
    }

    pub fn peek(&self) -> Option<Action> {
        self.actions.front().copied()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn clear(&mut self) {
        self.actions.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = Action> + '_ {
        self.actions.iter().copied()
    }
}

impl From<Vec<Action>> for ActionQueue {
    fn from(actions: Vec<Action>) -> Self {
        Self {
            actions: actions.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims() -> Dimensions {
        Dimensions::new(3, 3).unwrap()
    }

    #[test]
    fn cardinal_moves_map_to_actions() {
        let d = dims();
        assert_eq!(Action::between(4, 1, d).unwrap(), Action::North);
        assert_eq!(Action::between(4, 7, d).unwrap(), Action::South);
        assert_eq!(Action::between(4, 3, d).unwrap(), Action::West);
        assert_eq!(Action::between(4, 5, d).unwrap(), Action::East);
    }

    #[test]
    fn non_cardinal_moves_are_rejected() {
        let d = dims();
        for (from, to) in [(4, 4), (4, 0), (4, 8), (2, 3), (0, 6)] {
            assert!(
                matches!(Action::between(from, to, d), Err(Error::NotAdjacent { .. })),
                "{from} -> {to}"
            );
        }
    }

    #[test]
    fn off_grid_vertex_is_rejected() {
        assert!(matches!(
            Action::between(8, 9, dims()),
            Err(Error::VertexOutOfBounds { vertex: 9, .. })
        ));
    }

    #[test]
    fn apply_stops_at_the_border() {
        let d = dims();
        assert_eq!(Action::North.apply(1, d), None);
        assert_eq!(Action::West.apply(3, d), None);
        assert_eq!(Action::East.apply(5, d), None);
        assert_eq!(Action::South.apply(7, d), None);
        assert_eq!(Action::Nothing.apply(7, d), Some(7));
        assert_eq!(Action::East.apply(4, d), Some(5));
    }

    #[test]
    fn route_translates_and_replays() {
        let d = dims();
        let route = vec![0, 1, 2, 5, 8];
        let actions = locations_to_actions(&route, d).unwrap();
        assert_eq!(
            actions,
            vec![Action::East, Action::East, Action::South, Action::South]
        );
        assert_eq!(replay(0, &actions, d), Some(route));
    }

    #[test]
    fn single_vertex_route_has_no_actions() {
        assert!(locations_to_actions(&[4], dims()).unwrap().is_empty());
        assert!(locations_to_actions(&[], dims()).unwrap().is_empty());
    }

    #[test]
    fn tokens_round_trip_through_strings() {
        for action in Action::ALL {
            assert_eq!(action.to_string().parse::<Action>().unwrap(), action);
        }
        assert!(matches!(
            "up".parse::<Action>(),
            Err(Error::UnknownAction { .. })
        ));
        assert_eq!(serde_json::to_string(&Action::West).unwrap(), "\"west\"");
    }

    #[test]
    fn queue_reports_exhaustion() {
        let mut queue = ActionQueue::from(vec![Action::North, Action::East]);
        assert_eq!(queue.peek(), Some(Action::North));
        assert_eq!(queue.pop_next().unwrap(), Action::North);
        assert_eq!(queue.pop_next().unwrap(), Action::East);
        assert!(matches!(queue.pop_next(), Err(Error::RouteExhausted)));
    }
}
