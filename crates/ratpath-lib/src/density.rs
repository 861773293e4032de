//! Local cheese density used to bias target selection toward clusters.
//!
//! The density of a candidate is the share of all goals lying inside the
//! square window of side `2 * radius + 1` centred on it, clipped to the grid.

use crate::graph::{Dimensions, Vertex};

/// Half-side of the scoring window, in cells.
pub const DEFAULT_WINDOW_RADIUS: usize = 3;

/// Fraction of `goals` within `radius` rows and columns of `candidate`.
///
/// The candidate counts itself when it is one of the goals, so a member of a
/// non-empty goal set always scores at least `1 / goals.len()`. An empty goal
/// set scores `0.0`.
pub fn density(
    goals: &[Vertex],
    candidate: Vertex,
    dimensions: Dimensions,
    radius: usize,
) -> f64 {
    if goals.is_empty() {
        return 0.0;
    }
    let (row, col) = dimensions.row_col(candidate);
    let rows = row.saturating_sub(radius)..=(row + radius).min(dimensions.height() - 1);
    let cols = col.saturating_sub(radius)..=(col + radius).min(dimensions.width() - 1);

    let nearby = goals
        .iter()
        .map(|&goal| dimensions.row_col(goal))
        .filter(|(r, c)| rows.contains(r) && cols.contains(c))
        .count();
    nearby as f64 / goals.len() as f64
}

/// Density of every goal, aligned with `goals`.
pub fn densities(goals: &[Vertex], dimensions: Dimensions, radius: usize) -> Vec<f64> {
    goals
        .iter()
        .map(|&goal| density(goals, goal, dimensions, radius))
        .collect()
}

/// Goal with the highest density and its score. Ties go to the goal listed first.
pub fn densest(
    goals: &[Vertex],
    dimensions: Dimensions,
    radius: usize,
) -> Option<(Vertex, f64)> {
    goals
        .iter()
        .copied()
        .zip(densities(goals, dimensions, radius))
        .fold(None, |best, (goal, score)| match best {
            Some((_, best_score)) if best_score >= score => best,
            _ => Some((goal, score)),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(width: usize, height: usize) -> Dimensions {
        Dimensions::new(width, height).unwrap()
    }

    #[test]
    fn lone_goal_scores_one() {
        assert_eq!(density(&[12], 12, dims(5, 5), 3), 1.0);
    }

    #[test]
    fn isolated_goal_scores_its_own_share() {
        let d = dims(20, 20);
        let goals = [0, 399];
        assert_eq!(density(&goals, 0, d, 3), 0.5);
        assert_eq!(density(&goals, 399, d, 3), 0.5);
    }

    #[test]
    fn window_is_inclusive_of_radius() {
        let d = dims(10, 10);
        // (0,0) and (3,3) are exactly radius 3 apart on both axes; (0,4) is not.
        let goals = [0, 33, 4];
        assert_eq!(density(&goals, 0, d, 3), 2.0 / 3.0);
        assert_eq!(density(&goals, 33, d, 3), 1.0);
        assert_eq!(density(&goals, 4, d, 3), 2.0 / 3.0);
    }

    #[test]
    fn window_is_clipped_and_does_not_wrap() {
        let d = dims(10, 3);
        // 9 is the last cell of row 0, 10 is the first cell of row 1.
        let goals = [9, 10];
        assert_eq!(density(&goals, 9, d, 3), 0.5);
    }

    #[test]
    fn scores_lie_between_share_and_one() {
        let d = dims(8, 8);
        let goals = [0, 1, 9, 63, 62, 30];
        let floor = 1.0 / goals.len() as f64;
        for score in densities(&goals, d, 3) {
            assert!((floor..=1.0).contains(&score), "{score}");
        }
    }

    #[test]
    fn densest_prefers_first_on_ties() {
        let d = dims(20, 20);
        assert_eq!(densest(&[0, 399], d, 3), Some((0, 0.5)));
        assert_eq!(densest(&[], d, 3), None);

        let goals = [399, 0, 1, 20];
        let (goal, score) = densest(&goals, d, 3).unwrap();
        assert_eq!(goal, 0);
        assert_eq!(score, 0.75);
    }

    #[test]
    fn empty_goal_set_scores_zero() {
        assert_eq!(density(&[], 5, dims(4, 4), 3), 0.0);
    }
}
