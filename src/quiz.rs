//! Multiple-choice question generation.
//!
//! The correct answer is always the entry currently on screen (the session
//! index), never a random pick. Distractors are drawn without replacement from
//! the rest of the same category, so generation is bounded and options are
//! always distinct. Categories with fewer than `OPTION_COUNT` entries produce
//! one option per entry.

use rand::seq::{IteratorRandom, SliceRandom};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::catalog;
use crate::domain::{Category, ContentEntry};

pub const OPTION_COUNT: usize = 4;

/// A question fixed at render time. Options are indices into the category's
/// content list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuizQuestion {
  /// Identifies this question for its reveal timer.
  pub ticket: u64,
  pub category: Category,
  pub target: usize,
  pub options: Vec<usize>,
}

impl QuizQuestion {
  pub fn prompt(&self) -> &'static ContentEntry {
    &catalog::content(self.category)[self.target]
  }

  pub fn option_entries(&self) -> impl Iterator<Item = &'static ContentEntry> + '_ {
    let data = catalog::content(self.category);
    self.options.iter().map(move |&i| &data[i])
  }

  /// Position of the correct answer among the options.
  pub fn correct_option(&self) -> Option<usize> {
    self.options.iter().position(|&i| i == self.target)
  }

  /// `None` when `option` is not one of the shown buttons.
  pub fn is_correct(&self, option: usize) -> Option<bool> {
    self.options.get(option).map(|&i| i == self.target)
  }
}

/// Build the question for `category` at `index`.
#[instrument(level = "debug", skip(rng, category), fields(category = category.id()))]
pub fn generate_question<R: Rng + ?Sized>(category: Category, index: usize, ticket: u64, rng: &mut R) -> QuizQuestion {
  let len = catalog::content(category).len();
  let target = index.min(len.saturating_sub(1));
  let options = pick_options(len, target, rng);

  debug!(target: "quiz", category = category.id(), target, ticket, options = ?options, "Generated question");
  QuizQuestion { ticket, category, target, options }
}

/// Shuffled option indices for a list of `len` entries: `target` plus up to
/// `OPTION_COUNT - 1` distinct others. Fewer entries give `len` options; an
/// empty list gives none.
fn pick_options<R: Rng + ?Sized>(len: usize, target: usize, rng: &mut R) -> Vec<usize> {
  if target >= len {
    return Vec::new();
  }
  let want = OPTION_COUNT.min(len) - 1;
  let mut options: Vec<usize> = (0..len).filter(|&i| i != target).choose_multiple(rng, want);
  options.push(target);
  options.shuffle(rng);
  options
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::rngs::StdRng;
  use rand::SeedableRng;
  use std::collections::HashSet;

  #[test]
  fn always_four_distinct_options_including_the_answer() {
    let mut rng = StdRng::seed_from_u64(7);
    for trial in 0..1000u64 {
      let category = Category::ALL[(trial as usize) % Category::ALL.len()];
      let len = catalog::content(category).len();
      let index = (trial as usize * 31) % len;
      let q = generate_question(category, index, trial, &mut rng);

      let distinct: HashSet<_> = q.options.iter().copied().collect();
      assert_eq!(distinct.len(), OPTION_COUNT);
      assert_eq!(q.options.len(), OPTION_COUNT);
      assert!(q.options.contains(&index));
      assert!(q.options.iter().all(|&i| i < len));
    }
  }

  #[test]
  fn short_lists_give_one_option_per_entry() {
    let mut rng = StdRng::seed_from_u64(3);
    for len in 1..OPTION_COUNT {
      for target in 0..len {
        let options = pick_options(len, target, &mut rng);
        let distinct: HashSet<_> = options.iter().copied().collect();
        assert_eq!(options.len(), len);
        assert_eq!(distinct.len(), len);
        assert!(options.contains(&target));
        assert!(options.iter().all(|&i| i < len));
      }
    }
  }

  #[test]
  fn empty_list_gives_no_options() {
    let mut rng = StdRng::seed_from_u64(3);
    assert!(pick_options(0, 0, &mut rng).is_empty());
  }

  #[test]
  fn prompt_is_the_entry_at_the_index() {
    let mut rng = StdRng::seed_from_u64(1);
    let q = generate_question(Category::Colors, 3, 0, &mut rng);
    assert_eq!(q.prompt().english, Some("Yellow"));
    let pos = q.correct_option().unwrap();
    assert_eq!(q.is_correct(pos), Some(true));
    let wrong = (pos + 1) % OPTION_COUNT;
    assert_eq!(q.is_correct(wrong), Some(false));
    assert_eq!(q.is_correct(OPTION_COUNT), None);
  }

  #[test]
  fn answer_position_moves_around() {
    let mut rng = StdRng::seed_from_u64(42);
    let positions: HashSet<_> = (0..200)
      .filter_map(|t| generate_question(Category::Alphabet, 0, t, &mut rng).correct_option())
      .collect();
    assert!(positions.len() > 1, "options were never shuffled");
  }
}
