//! Learning session controller.
//!
//! One `LearningSession` owns everything a learner can change: the profile,
//! the current view, lesson/category/index, the quiz score and question, the
//! reveal lock and the leaderboard. Every mutation goes through the methods
//! below; presentation code only reads (see `views`).
//!
//! The controller is synchronous. The reveal delay is driven from outside
//! (`state`): an answer returns a ticket, and `expire_reveal(ticket)` only has
//! an effect while that ticket is still the pending one.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, instrument, warn};

use crate::achievements;
use crate::catalog;
use crate::config::{AppConfig, SpeechConfig};
use crate::domain::{Category, ContentEntry, GameMode, LeaderboardEntry, LearnerProfile, LessonDescriptor, View};
use crate::error::SessionError;
use crate::leaderboard;
use crate::quiz::{self, QuizQuestion};
use crate::seeds::seed_leaderboard;
use crate::speech::{self, SpeechSink};

const MAX_LEVEL: u8 = 3;

/// A submitted answer waiting for its reveal delay to pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reveal {
    pub ticket: u64,
    pub chosen: usize,
    pub correct: bool,
}

/// What a lesson completion changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Completion {
    /// False when the lesson was already completed; nothing changed then.
    pub awarded: bool,
    pub points: u32,
    pub new_achievements: Vec<&'static str>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Moved { index: usize },
    /// Next on the last card: lesson completed and view switched to `lessons`.
    Completed(Completion),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub ticket: u64,
    pub delay: Duration,
}

pub struct LearningSession {
    pub id: String,
    pub profile: LearnerProfile,
    pub view: View,
    pub current_lesson: Option<String>,
    pub category: Category,
    pub mode: GameMode,
    pub index: usize,
    /// Quiz score for this session. Separate from profile points.
    pub score: u32,
    pub question: Option<QuizQuestion>,
    pub reveal: Option<Reveal>,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub daily_goal_minutes: u32,
    pub today_study_minutes: u32,
    quiz_points: u32,
    reveal_delay: Duration,
    speech: SpeechConfig,
    next_ticket: u64,
    rng: StdRng,
}

impl LearningSession {
    pub fn new(id: impl Into<String>, cfg: &AppConfig) -> Self {
        Self::with_rng(id, cfg, StdRng::from_entropy())
    }

    pub fn with_rng(id: impl Into<String>, cfg: &AppConfig, rng: StdRng) -> Self {
        let profile = LearnerProfile::new(cfg.learner_name.clone());
        let leaderboard = seed_leaderboard(Some(cfg.leaderboard.as_slice()), &profile);
        Self {
            id: id.into(),
            profile,
            view: View::Home,
            current_lesson: None,
            category: Category::default(),
            mode: GameMode::Learn,
            index: 0,
            score: 0,
            question: None,
            reveal: None,
            leaderboard,
            daily_goal_minutes: cfg.daily_goal_minutes,
            today_study_minutes: 0,
            quiz_points: cfg.quiz_points,
            reveal_delay: cfg.reveal_delay(),
            speech: cfg.speech.clone(),
            next_ticket: 1,
            rng,
        }
    }

    pub fn content(&self) -> &'static [ContentEntry] {
        catalog::content(self.category)
    }

    pub fn current_item(&self) -> &'static ContentEntry {
        let data = self.content();
        &data[self.index.min(data.len() - 1)]
    }

    pub fn is_last_card(&self) -> bool {
        self.index + 1 >= self.content().len()
    }

    /// Ticket of the answer currently being revealed.
    pub fn pending_reveal(&self) -> Option<u64> {
        self.reveal.map(|r| r.ticket)
    }

    pub fn reveal_delay(&self) -> Duration {
        self.reveal_delay
    }

    /// Gating: `alphabet` is always open, other level-1 lessons need the
    /// previous one done, higher levels need the profile level.
    pub fn lesson_unlocked(&self, lesson: &LessonDescriptor) -> bool {
        if lesson.level > 1 {
            return self.profile.level >= lesson.level;
        }
        let level_one: Vec<_> = catalog::lessons_for_level(1).collect();
        match level_one.iter().position(|l| l.id == lesson.id) {
            Some(0) | None => true,
            Some(k) => self.profile.has_completed(level_one[k - 1].id),
        }
    }

    #[instrument(level = "debug", skip(self), fields(session = %self.id))]
    pub fn navigate(&mut self, view: View) {
        self.cancel_reveal();
        self.view = view;
        self.refresh_question();
    }

    #[instrument(level = "info", skip(self), fields(session = %self.id))]
    pub fn start_lesson(&mut self, lesson_id: &str) -> Result<(), SessionError> {
        let lesson = catalog::lesson_by_id(lesson_id).ok_or_else(|| SessionError::LessonNotFound(lesson_id.to_string()))?;
        if !self.lesson_unlocked(lesson) {
            return Err(SessionError::LessonLocked(lesson.id.to_string()));
        }
        let category = Category::from_lesson_id(lesson.id).ok_or_else(|| SessionError::NoContent(lesson.id.to_string()))?;

        self.cancel_reveal();
        self.current_lesson = Some(lesson.id.to_string());
        self.category = category;
        self.index = 0;
        self.mode = GameMode::Learn;
        self.question = None;
        self.view = View::Games;
        info!(target: "session", session = %self.id, lesson = lesson.id, "Lesson started");
        Ok(())
    }

    pub fn set_mode(&mut self, mode: GameMode) -> Result<(), SessionError> {
        self.require_view(View::Games)?;
        self.cancel_reveal();
        self.mode = mode;
        self.refresh_question();
        debug!(target: "session", session = %self.id, ?mode, "Mode switched");
        Ok(())
    }

    /// Flashcard "Next". On the last card this is "Complete Lesson".
    #[instrument(level = "debug", skip(self), fields(session = %self.id, index = self.index))]
    pub fn next(&mut self) -> Result<Step, SessionError> {
        self.require_learn()?;
        if !self.is_last_card() {
            self.index += 1;
            return Ok(Step::Moved { index: self.index });
        }
        let lesson_id = self.category.id();
        let completion = self.complete_lesson(lesson_id, catalog::completion_points(lesson_id));
        self.view = View::Lessons;
        Ok(Step::Completed(completion))
    }

    /// Flashcard "Previous"; stays put at the first card.
    pub fn previous(&mut self) -> Result<usize, SessionError> {
        self.require_learn()?;
        self.index = self.index.saturating_sub(1);
        Ok(self.index)
    }

    /// Pick quiz option `option` of the question on screen and lock the
    /// question until `expire_reveal` is called with the returned ticket.
    #[instrument(level = "info", skip(self), fields(session = %self.id, index = self.index))]
    pub fn answer(&mut self, option: usize) -> Result<AnswerOutcome, SessionError> {
        self.require_view(View::Games)?;
        if self.mode != GameMode::Quiz {
            return Err(SessionError::WrongMode(self.mode));
        }
        if self.reveal.is_some() {
            return Err(SessionError::RevealInProgress);
        }
        let question = self.question.as_ref().ok_or(SessionError::NoQuestion)?;
        let correct = question.is_correct(option).ok_or(SessionError::OptionOutOfRange(option))?;
        let ticket = question.ticket;

        if correct {
            self.score += self.quiz_points;
        }
        self.reveal = Some(Reveal { ticket, chosen: option, correct });
        info!(target: "quiz", session = %self.id, ticket, correct, score = self.score, "Answer submitted");
        Ok(AnswerOutcome { correct, ticket, delay: self.reveal_delay })
    }

    /// End the reveal for `ticket`: unlock, advance the index circularly and
    /// put a fresh question up. Stale tickets are ignored.
    pub fn expire_reveal(&mut self, ticket: u64) -> bool {
        match self.reveal {
            Some(r) if r.ticket == ticket => {
                self.reveal = None;
                self.index = (self.index + 1) % self.content().len();
                self.question = None;
                self.refresh_question();
                debug!(target: "quiz", session = %self.id, ticket, index = self.index, "Reveal expired");
                true
            }
            _ => {
                debug!(target: "quiz", session = %self.id, ticket, "Ignoring stale reveal");
                false
            }
        }
    }

    /// Idempotent per lesson id: a repeat completion changes nothing.
    #[instrument(level = "info", skip(self), fields(session = %self.id))]
    pub fn complete_lesson(&mut self, lesson_id: &str, points: u32) -> Completion {
        if self.profile.has_completed(lesson_id) {
            debug!(target: "session", session = %self.id, lesson = lesson_id, "Lesson already completed; nothing awarded");
            return Completion::default();
        }

        self.profile.points += points;
        self.profile.completed_lessons.push(lesson_id.to_string());
        self.profile.streak += 1;

        let row = self.profile.name.clone();
        leaderboard::recompute(&mut self.leaderboard, &row, &self.profile);

        let new_achievements = achievements::newly_earned(&self.profile);
        self.profile
            .achievements
            .extend(new_achievements.iter().map(|a| a.to_string()));

        info!(
            target: "session",
            session = %self.id,
            lesson = lesson_id,
            points,
            total = self.profile.points,
            streak = self.profile.streak,
            achievements = ?new_achievements,
            "Lesson completed"
        );
        Completion { awarded: true, points, new_achievements }
    }

    /// Manually move the learner to another level (unlocks lesson tabs).
    pub fn set_level(&mut self, level: u8) -> Result<(), SessionError> {
        if !(1..=MAX_LEVEL).contains(&level) {
            return Err(SessionError::LevelOutOfRange(level));
        }
        self.profile.level = level;
        let row = self.profile.name.clone();
        for e in self.leaderboard.iter_mut().filter(|e| e.name == row) {
            e.level = level;
        }
        info!(target: "session", session = %self.id, level, "Level set");
        Ok(())
    }

    pub fn play_audio(&self, text: &str, sink: &dyn SpeechSink) {
        speech::play_audio(&self.speech, sink, text);
    }

    fn cancel_reveal(&mut self) {
        if let Some(r) = self.reveal.take() {
            warn!(target: "quiz", session = %self.id, ticket = r.ticket, "Reveal cancelled");
            self.question = None;
        }
    }

    /// Keep a question on screen whenever the quiz is visible.
    fn refresh_question(&mut self) {
        let visible = self.view == View::Games && self.mode == GameMode::Quiz;
        if !visible {
            return;
        }
        let current = self
            .question
            .as_ref()
            .is_some_and(|q| q.category == self.category && q.target == self.index);
        if current {
            return;
        }
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.question = Some(quiz::generate_question(self.category, self.index, ticket, &mut self.rng));
    }

    fn require_view(&self, view: View) -> Result<(), SessionError> {
        if self.view != view {
            return Err(SessionError::WrongView(self.view));
        }
        Ok(())
    }

    fn require_learn(&self) -> Result<(), SessionError> {
        self.require_view(View::Games)?;
        if self.mode != GameMode::Learn {
            return Err(SessionError::WrongMode(self.mode));
        }
        Ok(())
    }
}
