//! Domain models: navigation views, lesson/category identifiers, content entries,
//! the learner profile and leaderboard rows.

use serde::{Deserialize, Serialize};

/// Top-level screen the learner is looking at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
  #[default]
  Home,
  Lessons,
  Games,
  Progress,
  Leaderboard,
}

/// How the active category is being studied inside the `games` view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
  /// Self-paced flashcards with Next/Previous.
  #[default]
  Learn,
  /// Multiple choice, four options, timed reveal.
  Quiz,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonType {
  Alphabet,
  Vocabulary,
  Grammar,
  Culture,
  Pronunciation,
}

/// Every content list the catalog can serve. Lessons without a list
/// (grammar, conversation, culture) have no `Category`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
  #[default]
  Alphabet,
  Numbers,
  Colors,
  Family,
  Greetings,
  Verbs,
  Adjectives,
  Phrases,
}

impl Category {
  pub const ALL: [Category; 8] = [
    Category::Alphabet,
    Category::Numbers,
    Category::Colors,
    Category::Family,
    Category::Greetings,
    Category::Verbs,
    Category::Adjectives,
    Category::Phrases,
  ];

  /// Lesson id that owns this content list (they share the same name).
  pub fn id(&self) -> &'static str {
    match self {
      Category::Alphabet => "alphabet",
      Category::Numbers => "numbers",
      Category::Colors => "colors",
      Category::Family => "family",
      Category::Greetings => "greetings",
      Category::Verbs => "verbs",
      Category::Adjectives => "adjectives",
      Category::Phrases => "phrases",
    }
  }

  pub fn from_lesson_id(id: &str) -> Option<Category> {
    Category::ALL.into_iter().find(|c| c.id() == id)
  }
}

/// One flashcard: either an alphabet letter (has `name` + `audio`) or a
/// vocabulary item (has `english`, numbers also carry an `ordinal`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ContentEntry {
  pub arabic: &'static str,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name: Option<&'static str>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub english: Option<&'static str>,
  pub pronunciation: &'static str,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub audio: Option<&'static str>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub ordinal: Option<u8>,
}

impl ContentEntry {
  /// Card heading: letter name, else the English gloss.
  pub fn title(&self) -> &'static str {
    self.name.or(self.english).unwrap_or(self.arabic)
  }

  /// Quiz option label: English gloss, else the letter name.
  pub fn answer_label(&self) -> &'static str {
    self.english.or(self.name).unwrap_or(self.arabic)
  }
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct LessonDescriptor {
  pub id: &'static str,
  pub title: &'static str,
  #[serde(rename = "type")]
  pub lesson_type: LessonType,
  pub level: u8,
  pub points: u32,
  /// Always false in the catalog; completion lives on the learner profile.
  pub completed: bool,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct AchievementDef {
  pub id: &'static str,
  pub name: &'static str,
  pub description: &'static str,
  pub icon: &'static str,
}

/// The learner. Lives for one session, never persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearnerProfile {
  pub id: String,
  pub name: String,
  pub points: u32,
  pub level: u8,
  /// Completion counter: +1 per newly completed lesson, never decremented.
  pub streak: u32,
  pub completed_lessons: Vec<String>,
  pub achievements: Vec<String>,
  pub total_study_time: u32,
}

impl LearnerProfile {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      id: "1".into(),
      name: name.into(),
      points: 0,
      level: 1,
      streak: 0,
      completed_lessons: Vec::new(),
      achievements: Vec::new(),
      total_study_time: 0,
    }
  }

  pub fn has_completed(&self, lesson_id: &str) -> bool {
    self.completed_lessons.iter().any(|l| l == lesson_id)
  }

  pub fn has_achievement(&self, achievement_id: &str) -> bool {
    self.achievements.iter().any(|a| a == achievement_id)
  }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
  pub name: String,
  pub points: u32,
  pub level: u8,
  #[serde(default)]
  pub rank: usize,
  pub streak: u32,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn category_ids_round_trip_through_lesson_ids() {
    for c in Category::ALL {
      assert_eq!(Category::from_lesson_id(c.id()), Some(c));
    }
    assert_eq!(Category::from_lesson_id("grammar1"), None);
    assert_eq!(Category::from_lesson_id(""), None);
  }

  #[test]
  fn new_profile_starts_empty_at_level_one() {
    let p = LearnerProfile::new("Student");
    assert_eq!(p.points, 0);
    assert_eq!(p.level, 1);
    assert_eq!(p.streak, 0);
    assert!(p.completed_lessons.is_empty());
    assert!(!p.has_completed("alphabet"));
  }

  #[test]
  fn labels_prefer_name_for_titles_and_english_for_answers() {
    let letter = ContentEntry {
      arabic: "ب", name: Some("Ba"), english: None, pronunciation: "b", audio: None, ordinal: None,
    };
    let word = ContentEntry {
      arabic: "أب", name: None, english: Some("Father"), pronunciation: "ab", audio: None, ordinal: None,
    };
    assert_eq!(letter.title(), "Ba");
    assert_eq!(letter.answer_label(), "Ba");
    assert_eq!(word.title(), "Father");
    assert_eq!(word.answer_label(), "Father");
  }

  #[test]
  fn views_serialize_snake_case() {
    assert_eq!(serde_json::to_string(&View::Leaderboard).unwrap(), "\"leaderboard\"");
    let v: GameMode = serde_json::from_str("\"quiz\"").unwrap();
    assert_eq!(v, GameMode::Quiz);
  }
}
