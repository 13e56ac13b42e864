//! Leaderboard recomputation after a lesson completion.

use tracing::debug;

use crate::domain::{LeaderboardEntry, LearnerProfile};

/// Mirror the learner's points/streak/level into the row named `row_name`,
/// sort by points descending and reassign 1-based ranks.
///
/// `sort_by` is stable, so rows with equal points keep their prior order.
pub fn recompute(board: &mut [LeaderboardEntry], row_name: &str, learner: &LearnerProfile) {
  for e in board.iter_mut().filter(|e| e.name == row_name) {
    e.points = learner.points;
    e.streak = learner.streak;
    e.level = learner.level;
  }
  board.sort_by(|a, b| b.points.cmp(&a.points));
  for (i, e) in board.iter_mut().enumerate() {
    e.rank = i + 1;
  }
  debug!(target: "session", rank = rank_of(board, row_name), "Leaderboard recomputed");
}

pub fn rank_of(board: &[LeaderboardEntry], name: &str) -> Option<usize> {
  board.iter().find(|e| e.name == name).map(|e| e.rank)
}

pub fn best_streak(board: &[LeaderboardEntry]) -> u32 {
  board.iter().map(|e| e.streak).max().unwrap_or(0)
}

pub fn top_points(board: &[LeaderboardEntry]) -> u32 {
  board.iter().map(|e| e.points).max().unwrap_or(0)
}
