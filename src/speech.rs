//! Text-to-speech seam.
//!
//! The speech device belongs to the client (browser speech synthesis), so the
//! server only emits requests. Fire-and-forget: no completion, no error channel.

use std::sync::Mutex;

use serde::Serialize;
use tracing::debug;

use crate::config::SpeechConfig;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SpeechRequest {
    pub text: String,
    pub locale: String,
    pub rate: f32,
}

pub trait SpeechSink: Send + Sync {
    fn speak(&self, text: &str, locale: &str, rate: f32);
}

/// Collects requests so a handler can forward them to the client.
#[derive(Default)]
pub struct SpeechOutbox {
    queued: Mutex<Vec<SpeechRequest>>,
}

impl SpeechOutbox {
    pub fn drain(&self) -> Vec<SpeechRequest> {
        match self.queued.lock() {
            Ok(mut q) => std::mem::take(&mut *q),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl SpeechSink for SpeechOutbox {
    fn speak(&self, text: &str, locale: &str, rate: f32) {
        let req = SpeechRequest { text: text.to_string(), locale: locale.to_string(), rate };
        match self.queued.lock() {
            Ok(mut q) => q.push(req),
            Err(poisoned) => poisoned.into_inner().push(req),
        }
    }
}

/// Ask `sink` to pronounce `text`. When speech is disabled this does nothing.
pub fn play_audio(cfg: &SpeechConfig, sink: &dyn SpeechSink, text: &str) {
    if !cfg.enabled {
        debug!(target: "session", "Speech disabled; skipping playback");
        return;
    }
    sink.speak(text, &cfg.locale, cfg.rate);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enabled_speech_queues_arabic_request() {
        let outbox = SpeechOutbox::default();
        play_audio(&SpeechConfig::default(), &outbox, "مرحبا");
        let drained = outbox.drain();
        assert_eq!(
            drained,
            vec![SpeechRequest { text: "مرحبا".into(), locale: "ar-SA".into(), rate: 0.8 }]
        );
        assert!(outbox.drain().is_empty());
    }

    #[test]
    fn disabled_speech_is_silent() {
        let outbox = SpeechOutbox::default();
        let cfg = SpeechConfig { enabled: false, ..SpeechConfig::default() };
        play_audio(&cfg, &outbox, "شكرا");
        assert!(outbox.drain().is_empty());
    }
}
