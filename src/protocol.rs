//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Client messages are user intents; server messages carry rendered screens.

use serde::{Deserialize, Serialize};

use crate::domain::{GameMode, View};
use crate::speech::SpeechRequest;
use crate::views::Screen;

/// A user intent. Shared by the WebSocket and `POST .../intent`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    Navigate {
        view: View,
    },
    StartLesson {
        #[serde(rename = "lessonId")]
        lesson_id: String,
    },
    SetMode {
        mode: GameMode,
    },
    Next,
    Previous,
    Answer {
        option: usize,
    },
    PlayAudio {
        text: String,
    },
    SetLevel {
        level: u8,
    },
    Snapshot,
}

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ClientWsMessage {
    Ping(PingMessage),
    Intent(Intent),
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PingMessage {
    Ping,
}

/// Result of a quiz answer, reported before the reveal delay runs out.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOut {
    pub correct: bool,
    pub score: u32,
    pub reveal_ms: u64,
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Session {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
    View {
        screen: Screen,
    },
    AnswerResult(AnswerOut),
    Speak(SpeechRequest),
    Error {
        message: String,
    },
}

//
// HTTP request/response DTOs
//

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOut {
    pub session_id: String,
    pub screen: Screen,
}

#[derive(Serialize)]
pub struct IntentOut {
    pub screen: Screen,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub speak: Vec<SpeechRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<AnswerOut>,
}

#[derive(Serialize)]
pub struct ErrorOut {
    pub error: String,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intents_parse_from_tagged_json() {
        let i: Intent = serde_json::from_str(r#"{"type":"start_lesson","lessonId":"colors"}"#).unwrap();
        assert!(matches!(i, Intent::StartLesson { lesson_id } if lesson_id == "colors"));
        let i: Intent = serde_json::from_str(r#"{"type":"navigate","view":"progress"}"#).unwrap();
        assert!(matches!(i, Intent::Navigate { view: View::Progress }));
        let i: Intent = serde_json::from_str(r#"{"type":"answer","option":2}"#).unwrap();
        assert!(matches!(i, Intent::Answer { option: 2 }));
        assert!(serde_json::from_str::<Intent>(r#"{"type":"navigate","view":"nowhere"}"#).is_err());
    }

    #[test]
    fn ws_messages_split_ping_from_intents() {
        let m: ClientWsMessage = serde_json::from_str(r#"{"type":"ping"}"#).unwrap();
        assert!(matches!(m, ClientWsMessage::Ping(PingMessage::Ping)));
        let m: ClientWsMessage = serde_json::from_str(r#"{"type":"next"}"#).unwrap();
        assert!(matches!(m, ClientWsMessage::Intent(Intent::Next)));
    }

    #[test]
    fn server_messages_are_tagged() {
        let out = serde_json::to_value(ServerWsMessage::Speak(SpeechRequest {
            text: "ب".into(),
            locale: "ar-SA".into(),
            rate: 0.8,
        }))
        .unwrap();
        assert_eq!(out["type"], "speak");
        assert_eq!(out["locale"], "ar-SA");
        let out = serde_json::to_value(ServerWsMessage::AnswerResult(AnswerOut { correct: true, score: 10, reveal_ms: 2000 })).unwrap();
        assert_eq!(out["type"], "answer_result");
        assert_eq!(out["revealMs"], 2000);
    }
}
