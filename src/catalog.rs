//! Static content catalog: the 28 letters, vocabulary grouped by level and
//! category, the lesson path (5/4/3 lessons) and achievement definitions.
//!
//! Nothing here is ever mutated. Category dispatch goes through the closed
//! `Category` enum, so there is no "unknown category" fallback.

use crate::domain::{AchievementDef, Category, ContentEntry, LessonDescriptor, LessonType};

/// Points awarded when a completed lesson is not found in the level-1 list.
pub const DEFAULT_LESSON_POINTS: u32 = 50;

/// Lesson path levels, 1-based.
pub const LEVELS: [u8; 3] = [1, 2, 3];

const fn letter(arabic: &'static str, name: &'static str, pronunciation: &'static str, audio: &'static str) -> ContentEntry {
  ContentEntry { arabic, name: Some(name), english: None, pronunciation, audio: Some(audio), ordinal: None }
}

const fn word(arabic: &'static str, english: &'static str, pronunciation: &'static str) -> ContentEntry {
  ContentEntry { arabic, name: None, english: Some(english), pronunciation, audio: None, ordinal: None }
}

const fn number(arabic: &'static str, english: &'static str, pronunciation: &'static str, n: u8) -> ContentEntry {
  ContentEntry { arabic, name: None, english: Some(english), pronunciation, audio: None, ordinal: Some(n) }
}

const fn lesson(id: &'static str, title: &'static str, lesson_type: LessonType, level: u8, points: u32) -> LessonDescriptor {
  LessonDescriptor { id, title, lesson_type, level, points, completed: false }
}

pub static ALPHABET: [ContentEntry; 28] = [
  letter("ا", "Alif", "a", "/audio/alif.mp3"),
  letter("ب", "Ba", "b", "/audio/ba.mp3"),
  letter("ت", "Ta", "t", "/audio/ta.mp3"),
  letter("ث", "Tha", "th", "/audio/tha.mp3"),
  letter("ج", "Jim", "j", "/audio/jim.mp3"),
  letter("ح", "Ha", "h", "/audio/ha.mp3"),
  letter("خ", "Kha", "kh", "/audio/kha.mp3"),
  letter("د", "Dal", "d", "/audio/dal.mp3"),
  letter("ذ", "Dhal", "dh", "/audio/dhal.mp3"),
  letter("ر", "Ra", "r", "/audio/ra.mp3"),
  letter("ز", "Zay", "z", "/audio/zay.mp3"),
  letter("س", "Sin", "s", "/audio/sin.mp3"),
  letter("ش", "Shin", "sh", "/audio/shin.mp3"),
  letter("ص", "Sad", "s", "/audio/sad.mp3"),
  letter("ض", "Dad", "d", "/audio/dad.mp3"),
  letter("ط", "Ta", "t", "/audio/ta2.mp3"),
  letter("ظ", "Za", "z", "/audio/za.mp3"),
  letter("ع", "Ain", "a", "/audio/ain.mp3"),
  letter("غ", "Ghain", "gh", "/audio/ghain.mp3"),
  letter("ف", "Fa", "f", "/audio/fa.mp3"),
  letter("ق", "Qaf", "q", "/audio/qaf.mp3"),
  letter("ك", "Kaf", "k", "/audio/kaf.mp3"),
  letter("ل", "Lam", "l", "/audio/lam.mp3"),
  letter("م", "Mim", "m", "/audio/mim.mp3"),
  letter("ن", "Nun", "n", "/audio/nun.mp3"),
  letter("ه", "Ha", "h", "/audio/ha2.mp3"),
  letter("و", "Waw", "w", "/audio/waw.mp3"),
  letter("ي", "Ya", "y", "/audio/ya.mp3"),
];

// Level 1
pub static NUMBERS: [ContentEntry; 10] = [
  number("واحد", "One", "wahid", 1),
  number("اثنان", "Two", "ithnan", 2),
  number("ثلاثة", "Three", "thalatha", 3),
  number("أربعة", "Four", "arba'a", 4),
  number("خمسة", "Five", "khamsa", 5),
  number("ستة", "Six", "sitta", 6),
  number("سبعة", "Seven", "sab'a", 7),
  number("ثمانية", "Eight", "thamaniya", 8),
  number("تسعة", "Nine", "tis'a", 9),
  number("عشرة", "Ten", "ashara", 10),
];

pub static COLORS: [ContentEntry; 8] = [
  word("أحمر", "Red", "ahmar"),
  word("أزرق", "Blue", "azraq"),
  word("أخضر", "Green", "akhdar"),
  word("أصفر", "Yellow", "asfar"),
  word("أسود", "Black", "aswad"),
  word("أبيض", "White", "abyad"),
  word("بني", "Brown", "bunni"),
  word("وردي", "Pink", "wardi"),
];

pub static FAMILY: [ContentEntry; 8] = [
  word("أب", "Father", "ab"),
  word("أم", "Mother", "umm"),
  word("ابن", "Son", "ibn"),
  word("ابنة", "Daughter", "ibna"),
  word("أخ", "Brother", "akh"),
  word("أخت", "Sister", "ukht"),
  word("جد", "Grandfather", "jadd"),
  word("جدة", "Grandmother", "jadda"),
];

pub static GREETINGS: [ContentEntry; 8] = [
  word("السلام عليكم", "Peace be upon you", "as-salamu alaykum"),
  word("مرحبا", "Hello", "marhaban"),
  word("صباح الخير", "Good morning", "sabah al-khayr"),
  word("مساء الخير", "Good evening", "masa' al-khayr"),
  word("شكرا", "Thank you", "shukran"),
  word("عفوا", "You're welcome", "afwan"),
  word("معذرة", "Excuse me", "ma'dhira"),
  word("مع السلامة", "Goodbye", "ma'a as-salama"),
];

// Level 2
pub static VERBS: [ContentEntry; 8] = [
  word("يأكل", "Eat", "ya'kul"),
  word("يشرب", "Drink", "yashrab"),
  word("يذهب", "Go", "yadhhab"),
  word("يأتي", "Come", "ya'ti"),
  word("يقرأ", "Read", "yaqra'"),
  word("يكتب", "Write", "yaktub"),
  word("يتكلم", "Speak", "yatakallam"),
  word("يسمع", "Listen", "yasma'"),
];

pub static ADJECTIVES: [ContentEntry; 8] = [
  word("كبير", "Big", "kabir"),
  word("صغير", "Small", "saghir"),
  word("طويل", "Tall/Long", "tawil"),
  word("قصير", "Short", "qasir"),
  word("جميل", "Beautiful", "jamil"),
  word("قبيح", "Ugly", "qabih"),
  word("سريع", "Fast", "sari'"),
  word("بطيء", "Slow", "bati'"),
];

// Level 3
pub static PHRASES: [ContentEntry; 6] = [
  word("كيف حالك؟", "How are you?", "kayf halak?"),
  word("ما اسمك؟", "What is your name?", "ma ismak?"),
  word("من أين أنت؟", "Where are you from?", "min ayna anta?"),
  word("كم عمرك؟", "How old are you?", "kam umrak?"),
  word("أين تسكن؟", "Where do you live?", "ayna taskun?"),
  word("ماذا تعمل؟", "What do you do?", "madha ta'mal?"),
];

pub static LESSONS: [LessonDescriptor; 12] = [
  lesson("alphabet", "Arabic Alphabet", LessonType::Alphabet, 1, 100),
  lesson("numbers", "Numbers 1-10", LessonType::Vocabulary, 1, 80),
  lesson("colors", "Colors", LessonType::Vocabulary, 1, 60),
  lesson("family", "Family Members", LessonType::Vocabulary, 1, 70),
  lesson("greetings", "Greetings", LessonType::Vocabulary, 1, 50),
  lesson("verbs", "Common Verbs", LessonType::Vocabulary, 2, 90),
  lesson("adjectives", "Adjectives", LessonType::Vocabulary, 2, 80),
  lesson("grammar1", "Basic Grammar", LessonType::Grammar, 2, 120),
  lesson("sentences", "Simple Sentences", LessonType::Grammar, 2, 100),
  lesson("phrases", "Common Phrases", LessonType::Vocabulary, 3, 110),
  lesson("conversation", "Basic Conversation", LessonType::Grammar, 3, 150),
  lesson("culture", "Arabic Culture", LessonType::Culture, 3, 100),
];

/// `vocabulary_builder`, `level_one`, `quiz_master`, `pronunciation_pro` and
/// `culture_explorer` are listed for display only; nothing awards them.
pub static ACHIEVEMENTS: [AchievementDef; 8] = [
  AchievementDef { id: "first_lesson", name: "First Steps", description: "Complete your first lesson", icon: "🎯" },
  AchievementDef { id: "alphabet_master", name: "Alphabet Master", description: "Master all Arabic letters", icon: "📝" },
  AchievementDef { id: "vocabulary_builder", name: "Vocabulary Builder", description: "Learn 100 words", icon: "📚" },
  AchievementDef { id: "streak_week", name: "Week Warrior", description: "7-day learning streak", icon: "🔥" },
  AchievementDef { id: "level_one", name: "Level One Complete", description: "Complete all Level 1 lessons", icon: "⭐" },
  AchievementDef { id: "quiz_master", name: "Quiz Master", description: "Score 100% on 10 quizzes", icon: "🏆" },
  AchievementDef { id: "pronunciation_pro", name: "Pronunciation Pro", description: "Complete pronunciation challenges", icon: "🎤" },
  AchievementDef { id: "culture_explorer", name: "Culture Explorer", description: "Learn about Arabic culture", icon: "🌍" },
];

/// Ordered content list for a category.
pub fn content(category: Category) -> &'static [ContentEntry] {
  match category {
    Category::Alphabet => &ALPHABET,
    Category::Numbers => &NUMBERS,
    Category::Colors => &COLORS,
    Category::Family => &FAMILY,
    Category::Greetings => &GREETINGS,
    Category::Verbs => &VERBS,
    Category::Adjectives => &ADJECTIVES,
    Category::Phrases => &PHRASES,
  }
}

pub fn lesson_by_id(id: &str) -> Option<&'static LessonDescriptor> {
  LESSONS.iter().find(|l| l.id == id)
}

pub fn lessons_for_level(level: u8) -> impl Iterator<Item = &'static LessonDescriptor> {
  LESSONS.iter().filter(move |l| l.level == level)
}

/// Point value used when a lesson is completed from the flashcards. Only the
/// level-1 list is consulted; anything else earns `DEFAULT_LESSON_POINTS`.
pub fn completion_points(lesson_id: &str) -> u32 {
  lessons_for_level(1)
    .find(|l| l.id == lesson_id)
    .map(|l| l.points)
    .unwrap_or(DEFAULT_LESSON_POINTS)
}

pub fn achievement(id: &str) -> Option<&'static AchievementDef> {
  ACHIEVEMENTS.iter().find(|a| a.id == id)
}

pub fn level_title(level: u8) -> &'static str {
  match level {
    1 => "Foundations",
    2 => "Building",
    3 => "Communication",
    _ => "",
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashSet;

  #[test]
  fn alphabet_has_28_letters() {
    assert_eq!(content(Category::Alphabet).len(), 28);
    assert!(ALPHABET.iter().all(|l| l.name.is_some() && l.audio.is_some()));
  }

  #[test]
  fn lesson_path_is_5_4_3() {
    assert_eq!(lessons_for_level(1).count(), 5);
    assert_eq!(lessons_for_level(2).count(), 4);
    assert_eq!(lessons_for_level(3).count(), 3);
    assert!(LESSONS.iter().all(|l| !l.completed));
  }

  #[test]
  fn every_category_is_a_lesson_with_enough_entries_for_a_quiz() {
    for c in Category::ALL {
      assert!(lesson_by_id(c.id()).is_some(), "{} has no lesson", c.id());
      assert!(content(c).len() >= 4, "{} too small for a quiz", c.id());
    }
  }

  #[test]
  fn entries_within_a_category_are_distinct() {
    for c in Category::ALL {
      let glyphs: HashSet<_> = content(c).iter().map(|e| e.arabic).collect();
      assert_eq!(glyphs.len(), content(c).len(), "duplicate glyph in {}", c.id());
    }
  }

  #[test]
  fn completion_points_only_consult_level_one() {
    assert_eq!(completion_points("alphabet"), 100);
    assert_eq!(completion_points("colors"), 60);
    assert_eq!(completion_points("verbs"), DEFAULT_LESSON_POINTS);
    assert_eq!(completion_points("nope"), DEFAULT_LESSON_POINTS);
  }

  #[test]
  fn achievement_ids_are_unique() {
    let ids: HashSet<_> = ACHIEVEMENTS.iter().map(|a| a.id).collect();
    assert_eq!(ids.len(), 8);
    assert_eq!(achievement("streak_week").map(|a| a.name), Some("Week Warrior"));
  }
}
