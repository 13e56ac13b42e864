//! Rendering surface: a pure function from session state to a serializable
//! view model. The browser lays these out; it never mutates state directly.

use serde::Serialize;

use crate::catalog;
use crate::domain::{AchievementDef, Category, GameMode, LeaderboardEntry, LearnerProfile, LessonType, View};
use crate::leaderboard;
use crate::session::LearningSession;

/// Rank shown when the learner row cannot be found.
const FALLBACK_RANK: usize = 5;
const RECENT_ACHIEVEMENTS: usize = 3;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Screen {
  pub header: Header,
  #[serde(flatten)]
  pub body: ViewModel,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
  pub level: u8,
  pub points: u32,
  pub streak: u32,
}

#[derive(Debug, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ViewModel {
  Home(HomeView),
  Lessons(LessonsView),
  Games(GamesView),
  Progress(ProgressView),
  Leaderboard(LeaderboardView),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeView {
  pub points: u32,
  pub level: u8,
  pub streak: u32,
  pub lessons_done: usize,
  pub daily_goal_minutes: u32,
  pub today_study_minutes: u32,
  /// 0..=100
  pub daily_goal_percent: f32,
  pub recent_achievements: Vec<AchievementDef>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonsView {
  pub tabs: Vec<LessonTab>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonTab {
  pub level: u8,
  pub title: String,
  pub enabled: bool,
  pub lessons: Vec<LessonCard>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonCard {
  pub id: &'static str,
  pub title: &'static str,
  #[serde(rename = "type")]
  pub lesson_type: LessonType,
  pub points: u32,
  pub completed: bool,
  pub startable: bool,
  /// "Review" or "Start Lesson"
  pub action: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GamesView {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub lesson: Option<String>,
  pub category: Category,
  pub mode: GameMode,
  /// 1-based position shown as "Progress: n / total".
  pub position: usize,
  pub total: usize,
  pub score: u32,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub learn: Option<LearnCard>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub quiz: Option<QuizCard>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearnCard {
  pub arabic: &'static str,
  pub title: &'static str,
  pub pronunciation: &'static str,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub subtitle: Option<&'static str>,
  pub can_previous: bool,
  /// "Next" or "Complete Lesson"
  pub next_label: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizCard {
  pub ticket: u64,
  pub arabic: &'static str,
  pub prompt: &'static str,
  pub options: Vec<&'static str>,
  pub locked: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub reveal: Option<RevealPanel>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealPanel {
  pub chosen: usize,
  /// Button holding the right answer.
  pub answer_option: Option<usize>,
  pub correct: bool,
  pub answer: &'static str,
  pub pronunciation: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressView {
  pub learner: LearnerProfile,
  pub points: u32,
  pub level: u8,
  pub lessons_completed: usize,
  pub streak: u32,
  pub levels: Vec<LevelProgress>,
  pub achievements: Vec<AchievementStatus>,
  pub level_one: Vec<LessonStatus>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelProgress {
  pub level: u8,
  pub done: usize,
  pub total: usize,
  pub percent: f32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementStatus {
  #[serde(flatten)]
  pub def: AchievementDef,
  pub earned: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonStatus {
  pub id: &'static str,
  pub title: &'static str,
  pub completed: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardView {
  pub entries: Vec<LeaderboardRow>,
  pub your_rank: usize,
  pub best_streak: u32,
  pub top_points: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardRow {
  #[serde(flatten)]
  pub entry: LeaderboardEntry,
  pub is_you: bool,
}

pub fn render(s: &LearningSession) -> Screen {
  let header = Header { level: s.profile.level, points: s.profile.points, streak: s.profile.streak };
  let body = match s.view {
    View::Home => ViewModel::Home(home(s)),
    View::Lessons => ViewModel::Lessons(lessons(s)),
    View::Games => ViewModel::Games(games(s)),
    View::Progress => ViewModel::Progress(progress(s)),
    View::Leaderboard => ViewModel::Leaderboard(board(s)),
  };
  Screen { header, body }
}

fn percent(part: usize, whole: usize) -> f32 {
  if whole == 0 { 0.0 } else { (part as f32 / whole as f32) * 100.0 }
}

fn home(s: &LearningSession) -> HomeView {
  let p = &s.profile;
  let skip = p.achievements.len().saturating_sub(RECENT_ACHIEVEMENTS);
  HomeView {
    points: p.points,
    level: p.level,
    streak: p.streak,
    lessons_done: p.completed_lessons.len(),
    daily_goal_minutes: s.daily_goal_minutes,
    today_study_minutes: s.today_study_minutes,
    daily_goal_percent: percent(s.today_study_minutes as usize, s.daily_goal_minutes as usize).min(100.0),
    recent_achievements: p.achievements[skip..].iter().filter_map(|id| catalog::achievement(id).copied()).collect(),
  }
}

fn lessons(s: &LearningSession) -> LessonsView {
  let tabs = catalog::LEVELS
    .iter()
    .map(|&level| LessonTab {
      level,
      title: format!("Level {} - {}", level, catalog::level_title(level)),
      enabled: s.profile.level >= level,
      lessons: catalog::lessons_for_level(level)
        .map(|l| {
          let completed = s.profile.has_completed(l.id);
          LessonCard {
            id: l.id,
            title: l.title,
            lesson_type: l.lesson_type,
            points: l.points,
            completed,
            startable: s.lesson_unlocked(l) && Category::from_lesson_id(l.id).is_some(),
            action: if completed { "Review" } else { "Start Lesson" },
          }
        })
        .collect(),
    })
    .collect();
  LessonsView { tabs }
}

fn games(s: &LearningSession) -> GamesView {
  let item = s.current_item();
  let (learn, quiz) = match s.mode {
    GameMode::Learn => (
      Some(LearnCard {
        arabic: item.arabic,
        title: item.title(),
        pronunciation: item.pronunciation,
        subtitle: item.name.and(item.english),
        can_previous: s.index > 0,
        next_label: if s.is_last_card() { "Complete Lesson" } else { "Next" },
      }),
      None,
    ),
    GameMode::Quiz => (
      None,
      s.question.as_ref().map(|q| QuizCard {
        ticket: q.ticket,
        arabic: q.prompt().arabic,
        prompt: "What does this mean?",
        options: q.option_entries().map(|e| e.answer_label()).collect(),
        locked: s.reveal.is_some(),
        reveal: s.reveal.map(|r| RevealPanel {
          chosen: r.chosen,
          answer_option: q.correct_option(),
          correct: r.correct,
          answer: q.prompt().answer_label(),
          pronunciation: q.prompt().pronunciation,
        }),
      }),
    ),
  };
  GamesView {
    lesson: s.current_lesson.clone(),
    category: s.category,
    mode: s.mode,
    position: s.index + 1,
    total: s.content().len(),
    score: s.score,
    learn,
    quiz,
  }
}

fn progress(s: &LearningSession) -> ProgressView {
  let p = &s.profile;
  let levels = catalog::LEVELS
    .iter()
    .map(|&level| {
      let total = catalog::lessons_for_level(level).count();
      let done = catalog::lessons_for_level(level).filter(|l| p.has_completed(l.id)).count().min(total);
      LevelProgress { level, done, total, percent: percent(done, total) }
    })
    .collect();
  ProgressView {
    learner: p.clone(),
    points: p.points,
    level: p.level,
    lessons_completed: p.completed_lessons.len(),
    streak: p.streak,
    levels,
    achievements: catalog::ACHIEVEMENTS
      .iter()
      .map(|a| AchievementStatus { def: *a, earned: p.has_achievement(a.id) })
      .collect(),
    level_one: catalog::lessons_for_level(1)
      .map(|l| LessonStatus { id: l.id, title: l.title, completed: p.has_completed(l.id) })
      .collect(),
  }
}

fn board(s: &LearningSession) -> LeaderboardView {
  let me = &s.profile.name;
  LeaderboardView {
    entries: s
      .leaderboard
      .iter()
      .map(|e| LeaderboardRow { entry: e.clone(), is_you: &e.name == me })
      .collect(),
    your_rank: leaderboard::rank_of(&s.leaderboard, me).unwrap_or(FALLBACK_RANK),
    best_streak: leaderboard::best_streak(&s.leaderboard),
    top_points: leaderboard::top_points(&s.leaderboard),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::AppConfig;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  fn session() -> LearningSession {
    LearningSession::with_rng("v", &AppConfig::default(), StdRng::seed_from_u64(9))
  }

  #[test]
  fn home_shows_last_three_achievements() {
    let mut s = session();
    s.profile.achievements = vec!["first_lesson".into(), "alphabet_master".into(), "streak_week".into(), "quiz_master".into()];
    let ViewModel::Home(h) = render(&s).body else { panic!("not home") };
    let ids: Vec<_> = h.recent_achievements.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec!["alphabet_master", "streak_week", "quiz_master"]);
    assert_eq!(h.daily_goal_minutes, 30);
    assert_eq!(h.daily_goal_percent, 0.0);
  }

  #[test]
  fn lessons_tab_gating_and_actions() {
    let mut s = session();
    s.complete_lesson("alphabet", 100);
    s.navigate(View::Lessons);
    let ViewModel::Lessons(l) = render(&s).body else { panic!("not lessons") };
    assert_eq!(l.tabs.len(), 3);
    assert!(l.tabs[0].enabled);
    assert!(!l.tabs[1].enabled);
    assert_eq!(l.tabs[0].title, "Level 1 - Foundations");
    let cards = &l.tabs[0].lessons;
    assert_eq!(cards[0].action, "Review");
    assert!(cards[1].startable);
    assert!(!cards[2].startable);
    assert_eq!(cards[2].action, "Start Lesson");
  }

  #[test]
  fn learn_card_labels() {
    let mut s = session();
    s.start_lesson("alphabet").unwrap();
    let ViewModel::Games(g) = render(&s).body else { panic!("not games") };
    let card = g.learn.unwrap();
    assert_eq!((g.position, g.total), (1, 28));
    assert_eq!(card.title, "Alif");
    assert!(!card.can_previous);
    assert_eq!(card.next_label, "Next");
    for _ in 0..27 {
      s.next().unwrap();
    }
    let ViewModel::Games(g) = render(&s).body else { panic!("not games") };
    assert_eq!(g.learn.unwrap().next_label, "Complete Lesson");
  }

  #[test]
  fn quiz_card_reveals_after_answer() {
    let mut s = session();
    s.start_lesson("alphabet").unwrap();
    s.set_mode(GameMode::Quiz).unwrap();
    let ViewModel::Games(g) = render(&s).body else { panic!("not games") };
    let q = g.quiz.unwrap();
    assert_eq!(q.options.len(), 4);
    assert!(q.options.contains(&"Alif"));
    assert!(!q.locked);
    s.answer(0).unwrap();
    let ViewModel::Games(g) = render(&s).body else { panic!("not games") };
    let q = g.quiz.unwrap();
    assert!(q.locked);
    let reveal = q.reveal.unwrap();
    assert_eq!(reveal.answer, "Alif");
    assert_eq!(reveal.correct, reveal.answer_option == Some(0));
  }

  #[test]
  fn progress_counts_per_level() {
    let mut s = session();
    s.complete_lesson("alphabet", 100);
    s.complete_lesson("phrases", 50);
    s.navigate(View::Progress);
    let ViewModel::Progress(p) = render(&s).body else { panic!("not progress") };
    let done: Vec<_> = p.levels.iter().map(|l| (l.done, l.total)).collect();
    assert_eq!(done, vec![(1, 5), (0, 4), (1, 3)]);
    assert_eq!(p.achievements.len(), 8);
    assert_eq!(p.achievements.iter().filter(|a| a.earned).count(), 2);
  }

  #[test]
  fn leaderboard_summary() {
    let mut s = session();
    s.navigate(View::Leaderboard);
    let screen = render(&s);
    let ViewModel::Leaderboard(b) = &screen.body else { panic!("not leaderboard") };
    assert_eq!(b.your_rank, 5);
    assert_eq!(b.best_streak, 15);
    assert_eq!(b.top_points, 2450);
    assert!(b.entries[4].is_you);

    let json = serde_json::to_value(&screen).unwrap();
    assert_eq!(json["view"], "leaderboard");
    assert_eq!(json["header"]["points"], 0);
  }
}
