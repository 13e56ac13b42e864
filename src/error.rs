//! Refusals returned by the session controller. HTTP maps them to status
//! codes, WebSocket sends the message text.

use thiserror::Error;

use crate::domain::{GameMode, View};

/// Why the controller refused an intent. A refused intent never mutates state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Unknown lesson: {0}")]
    LessonNotFound(String),

    #[error("Lesson '{0}' is locked.")]
    LessonLocked(String),

    #[error("Lesson '{0}' has no study content yet.")]
    NoContent(String),

    #[error("Not available in the {0:?} view.")]
    WrongView(View),

    #[error("Not available in {0:?} mode.")]
    WrongMode(GameMode),

    #[error("Answer already submitted; wait for the next question.")]
    RevealInProgress,

    #[error("Answer option {0} does not exist.")]
    OptionOutOfRange(usize),

    #[error("No question is on screen.")]
    NoQuestion,

    #[error("Level must be between 1 and 3, got {0}.")]
    LevelOutOfRange(u8),

    #[error("Unknown session: {0}")]
    SessionNotFound(String),
}
