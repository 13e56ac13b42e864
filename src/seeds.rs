//! Seed data for the mock leaderboard.

use tracing::warn;

use crate::domain::{LeaderboardEntry, LearnerProfile};

/// Name of the row that mirrors the live learner.
pub const LEARNER_ROW_NAME: &str = "Student";

/// Four fixed rivals. They never change during a session.
pub fn seed_rivals() -> Vec<LeaderboardEntry> {
  vec![
    LeaderboardEntry { name: "Ahmed".into(), points: 2450, level: 3, rank: 1, streak: 15 },
    LeaderboardEntry { name: "Fatima".into(), points: 2100, level: 2, rank: 2, streak: 12 },
    LeaderboardEntry { name: "Omar".into(), points: 1850, level: 2, rank: 3, streak: 8 },
    LeaderboardEntry { name: "Aisha".into(), points: 1600, level: 2, rank: 4, streak: 5 },
  ]
}

/// Initial board: rivals (or an override from config) plus the learner's row
/// appended last, ranks as given by position. Override rows that reuse the
/// learner's name are dropped so exactly one row mirrors the learner.
pub fn seed_leaderboard(rivals: Option<&[LeaderboardEntry]>, learner: &LearnerProfile) -> Vec<LeaderboardEntry> {
  let mut board = match rivals {
    Some(r) if !r.is_empty() => r.to_vec(),
    _ => seed_rivals(),
  };
  let before = board.len();
  board.retain(|e| e.name != learner.name);
  if board.len() != before {
    warn!(target: "souq_arabic", name = %learner.name, dropped = before - board.len(), "Leaderboard seed reused the learner's name; rows dropped");
  }
  board.push(LeaderboardEntry {
    name: learner.name.clone(),
    points: learner.points,
    level: learner.level,
    rank: 0,
    streak: learner.streak,
  });
  for (i, e) in board.iter_mut().enumerate() {
    e.rank = i + 1;
  }
  board
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn learner_row_starts_last_with_rank_five() {
    let learner = LearnerProfile::new(LEARNER_ROW_NAME);
    let board = seed_leaderboard(None, &learner);
    assert_eq!(board.len(), 5);
    let me = board.iter().find(|e| e.name == LEARNER_ROW_NAME).unwrap();
    assert_eq!(me.rank, 5);
    assert_eq!(me.points, 0);
  }

  #[test]
  fn empty_override_falls_back_to_built_in_rivals() {
    let learner = LearnerProfile::new(LEARNER_ROW_NAME);
    let board = seed_leaderboard(Some(&[][..]), &learner);
    assert_eq!(board[0].name, "Ahmed");
  }

  #[test]
  fn override_cannot_duplicate_the_learner_row() {
    let learner = LearnerProfile::new(LEARNER_ROW_NAME);
    let rivals = vec![
      LeaderboardEntry { name: "Layla".into(), points: 900, level: 1, rank: 0, streak: 2 },
      LeaderboardEntry { name: LEARNER_ROW_NAME.into(), points: 5000, level: 3, rank: 0, streak: 40 },
    ];
    let board = seed_leaderboard(Some(rivals.as_slice()), &learner);
    let mine: Vec<_> = board.iter().filter(|e| e.name == LEARNER_ROW_NAME).collect();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].points, 0);
    assert_eq!(mine[0].rank, 2);
  }
}
