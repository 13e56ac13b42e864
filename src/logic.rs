//! Core behaviors shared by both HTTP and WebSocket handlers: apply one user
//! intent to a session and render the resulting screen.

use tracing::{debug, info, instrument, warn};

use crate::error::SessionError;
use crate::protocol::{AnswerOut, Intent};
use crate::session::Step;
use crate::speech::{SpeechOutbox, SpeechRequest};
use crate::state::SessionHandle;
use crate::views::{self, Screen};

/// Everything an intent produced for the client.
pub struct Dispatch {
  pub screen: Screen,
  pub speak: Vec<SpeechRequest>,
  pub answer: Option<AnswerOut>,
}

#[instrument(level = "info", skip(handle), fields(session = %handle.id))]
pub async fn apply_intent(handle: &SessionHandle, intent: Intent) -> Result<Dispatch, SessionError> {
  let outbox = SpeechOutbox::default();
  let result = handle
    .apply(|s| -> Result<_, SessionError> {
      let answer = match intent {
        Intent::Navigate { view } => {
          s.navigate(view);
          None
        }
        Intent::StartLesson { lesson_id } => {
          s.start_lesson(&lesson_id)?;
          None
        }
        Intent::SetMode { mode } => {
          s.set_mode(mode)?;
          None
        }
        Intent::Next => {
          match s.next()? {
            Step::Moved { index } => debug!(target: "session", session = %s.id, index, "Next card"),
            Step::Completed(c) => {
              info!(target: "session", session = %s.id, awarded = c.awarded, points = c.points, "Lesson finished from flashcards")
            }
          }
          None
        }
        Intent::Previous => {
          s.previous()?;
          None
        }
        Intent::Answer { option } => {
          let o = s.answer(option)?;
          Some(AnswerOut { correct: o.correct, score: s.score, reveal_ms: o.delay.as_millis() as u64 })
        }
        Intent::PlayAudio { text } => {
          s.play_audio(&text, &outbox);
          None
        }
        Intent::SetLevel { level } => {
          s.set_level(level)?;
          None
        }
        Intent::Snapshot => None,
      };
      Ok((answer, views::render(s)))
    })
    .await;

  match result {
    Ok((answer, screen)) => Ok(Dispatch { screen, speak: outbox.drain(), answer }),
    Err(e) => {
      warn!(target: "session", session = %handle.id, error = %e, "Intent refused");
      Err(e)
    }
  }
}

pub async fn render_session(handle: &SessionHandle) -> Screen {
  handle.read(views::render).await
}
