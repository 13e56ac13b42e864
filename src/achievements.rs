//! Achievement evaluation. A pure function of the profile; the caller appends
//! the result in one batch.

use crate::domain::LearnerProfile;

pub const FIRST_LESSON: &str = "first_lesson";
pub const ALPHABET_MASTER: &str = "alphabet_master";
pub const STREAK_WEEK: &str = "streak_week";

const STREAK_WEEK_THRESHOLD: u32 = 7;

/// Achievement ids the profile qualifies for but does not hold yet.
pub fn newly_earned(profile: &LearnerProfile) -> Vec<&'static str> {
  let mut earned = Vec::new();
  if profile.completed_lessons.len() == 1 && !profile.has_achievement(FIRST_LESSON) {
    earned.push(FIRST_LESSON);
  }
  if profile.has_completed("alphabet") && !profile.has_achievement(ALPHABET_MASTER) {
    earned.push(ALPHABET_MASTER);
  }
  if profile.streak >= STREAK_WEEK_THRESHOLD && !profile.has_achievement(STREAK_WEEK) {
    earned.push(STREAK_WEEK);
  }
  earned
}
