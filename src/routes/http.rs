//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs the session id and basic result info.

use std::sync::Arc;
use axum::{extract::{Path, State}, http::StatusCode, Json, response::IntoResponse};
use tracing::{info, instrument};

use crate::error::SessionError;
use crate::logic::{apply_intent, render_session};
use crate::protocol::*;
use crate::state::AppState;
use crate::views::Screen;

type ApiError = (StatusCode, Json<ErrorOut>);

fn api_error(e: SessionError) -> ApiError {
  let status = match &e {
    SessionError::SessionNotFound(_) | SessionError::LessonNotFound(_) => StatusCode::NOT_FOUND,
    SessionError::OptionOutOfRange(_) | SessionError::LevelOutOfRange(_) => StatusCode::BAD_REQUEST,
    _ => StatusCode::CONFLICT,
  };
  (status, Json(ErrorOut { error: e.to_string() }))
}

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state))]
pub async fn http_create_session(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let handle = state.create_session().await;
  let screen = render_session(&handle).await;
  info!(target: "session", session = %handle.id, "HTTP session created");
  (StatusCode::CREATED, Json(SessionOut { session_id: handle.id.clone(), screen }))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_session(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<Screen>, ApiError> {
  let handle = state.get_session(&id).await.ok_or_else(|| api_error(SessionError::SessionNotFound(id.clone())))?;
  Ok(Json(render_session(&handle).await))
}

#[instrument(level = "info", skip(state, intent))]
pub async fn http_post_intent(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
  Json(intent): Json<Intent>,
) -> Result<Json<IntentOut>, ApiError> {
  let handle = state.get_session(&id).await.ok_or_else(|| api_error(SessionError::SessionNotFound(id.clone())))?;
  let d = apply_intent(&handle, intent).await.map_err(api_error)?;
  Ok(Json(IntentOut { screen: d.screen, speak: d.speak, answer: d.answer }))
}

#[instrument(level = "info", skip(state))]
pub async fn http_delete_session(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
  if state.end_session(&id).await {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(api_error(SessionError::SessionNotFound(id)))
  }
}
