//! Souq Arabic · Arabic learning backend
//!
//! - Axum HTTP + WebSocket API around an in-memory learning session controller
//!   (lessons, flashcards, quizzes, points, achievements, mock leaderboard)
//! - Static SPA fallback (./static/index.html); the page renders the screens
//!   and plays speech requests through the browser's speech synthesis
//!
//! Important env variables:
//!   PORT               : u16 (default 3000)
//!   ARABIC_CONFIG_PATH : path to TOML config (learner name, reveal delay, speech, leaderboard)
//!   LOG_LEVEL          : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT         : "pretty" (default) or "json"

mod achievements;
mod catalog;
mod config;
mod domain;
mod error;
mod leaderboard;
mod logic;
mod protocol;
mod quiz;
mod routes;
mod seeds;
mod session;
mod speech;
mod state;
mod telemetry;
mod views;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use crate::config::load_config_from_env;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Sessions are created per client; nothing is loaded or persisted.
  let state = Arc::new(AppState::new(load_config_from_env()));
  let reaper = state.spawn_reaper();

  let app = build_router(state.clone());

  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "souq_arabic", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  reaper.abort();
  info!(target: "souq_arabic", sessions = state.session_count().await, "Server stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(target: "souq_arabic", error = %e, "Failed to listen for ctrl-c");
  }
}
