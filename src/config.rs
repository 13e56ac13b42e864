//! Loading application configuration from TOML.
//!
//! Every field has a default equal to the built-in constant, so a missing or
//! broken file simply means "defaults". See `AppConfig` for the schema.

use std::time::Duration;

use serde::Deserialize;
use tracing::{error, info};

use crate::domain::LeaderboardEntry;
use crate::seeds::LEARNER_ROW_NAME;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AppConfig {
  /// Name of the learner, and of the leaderboard row that mirrors them.
  pub learner_name: String,
  pub daily_goal_minutes: u32,
  /// How long a quiz answer stays revealed before the next question.
  pub reveal_delay_ms: u64,
  /// Session score added per correct quiz answer.
  pub quiz_points: u32,
  /// HTTP sessions untouched for this long are dropped by the reaper.
  pub session_idle_secs: u64,
  pub speech: SpeechConfig,
  /// Optional replacement for the built-in rival rows.
  pub leaderboard: Vec<LeaderboardEntry>,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      learner_name: LEARNER_ROW_NAME.into(),
      daily_goal_minutes: 30,
      reveal_delay_ms: 2000,
      quiz_points: 10,
      session_idle_secs: 1800,
      speech: SpeechConfig::default(),
      leaderboard: Vec::new(),
    }
  }
}

impl AppConfig {
  pub fn reveal_delay(&self) -> Duration {
    Duration::from_millis(self.reveal_delay_ms)
  }

  pub fn session_idle(&self) -> Duration {
    Duration::from_secs(self.session_idle_secs)
  }
}

/// Text-to-speech request parameters. `enabled = false` behaves like a
/// browser without speech synthesis: playback is a silent no-op.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
  pub enabled: bool,
  pub locale: String,
  pub rate: f32,
}

impl Default for SpeechConfig {
  fn default() -> Self {
    Self { enabled: true, locale: "ar-SA".into(), rate: 0.8 }
  }
}

pub fn parse_config(s: &str) -> Result<AppConfig, toml::de::Error> {
  toml::from_str::<AppConfig>(s)
}

/// Load `AppConfig` from ARABIC_CONFIG_PATH. On any IO/parse error, or when the
/// variable is unset, returns the defaults.
pub fn load_config_from_env() -> AppConfig {
  let Ok(path) = std::env::var("ARABIC_CONFIG_PATH") else {
    info!(target: "souq_arabic", "ARABIC_CONFIG_PATH not set; using built-in defaults");
    return AppConfig::default();
  };
  match std::fs::read_to_string(&path) {
    Ok(s) => match parse_config(&s) {
      Ok(cfg) => {
        info!(target: "souq_arabic", %path, "Loaded config (TOML)");
        cfg
      }
      Err(e) => {
        error!(target: "souq_arabic", %path, error = %e, "Failed to parse TOML config; using defaults");
        AppConfig::default()
      }
    },
    Err(e) => {
      error!(target: "souq_arabic", %path, error = %e, "Failed to read TOML config file; using defaults");
      AppConfig::default()
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_file_gives_defaults() {
    let cfg = parse_config("").unwrap();
    assert_eq!(cfg.learner_name, "Student");
    assert_eq!(cfg.daily_goal_minutes, 30);
    assert_eq!(cfg.reveal_delay(), Duration::from_secs(2));
    assert_eq!(cfg.quiz_points, 10);
    assert_eq!(cfg.session_idle(), Duration::from_secs(1800));
    assert!(cfg.speech.enabled);
    assert_eq!(cfg.speech.locale, "ar-SA");
  }

  #[test]
  fn partial_overrides() {
    let cfg = parse_config(
      r#"
        reveal_delay_ms = 500
        [speech]
        enabled = false

        [[leaderboard]]
        name = "Layla"
        points = 900
        level = 1
        streak = 2
      "#,
    )
    .unwrap();
    assert_eq!(cfg.reveal_delay_ms, 500);
    assert!(!cfg.speech.enabled);
    assert_eq!(cfg.speech.rate, 0.8);
    assert_eq!(cfg.leaderboard.len(), 1);
    assert_eq!(cfg.leaderboard[0].rank, 0);
  }

  #[test]
  fn bad_types_are_rejected() {
    assert!(parse_config("quiz_points = \"ten\"").is_err());
  }
}
