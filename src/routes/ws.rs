//! WebSocket upgrade + message loop. One learning session per connection: it
//! is created on connect and ended on disconnect. Each client intent is
//! answered with any speech/answer messages followed by the fresh screen;
//! reveal expiries push a screen unprompted.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{debug, error, info, instrument};

use crate::logic::{apply_intent, render_session};
use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::state::{AppState, SessionHandle};

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "souq_arabic", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

/// What the loop does with one client frame.
#[derive(Debug, PartialEq)]
enum Frame {
  Text(String),
  /// Control reply sent straight back (pong for ping).
  Reply(Message),
  Close,
  Skip,
}

fn classify(msg: Message) -> Frame {
  match msg {
    Message::Text(txt) => Frame::Text(txt),
    Message::Ping(payload) => Frame::Reply(Message::Pong(payload)),
    Message::Close(_) => Frame::Close,
    _ => Frame::Skip,
  }
}

async fn send_raw(socket: &mut WebSocket, msg: Message) -> bool {
  if let Err(e) = socket.send(msg).await {
    error!(target: "souq_arabic", error = %e, "WS send error");
    return false;
  }
  true
}

async fn send(socket: &mut WebSocket, msg: &ServerWsMessage) -> bool {
  let out = serde_json::to_string(msg).unwrap_or_else(|e| {
    serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
  });
  send_raw(socket, Message::Text(out)).await
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  let handle = state.create_session().await;
  let mut changes = handle.subscribe();
  info!(target: "souq_arabic", session = %handle.id, "WebSocket connected");

  let hello = [
    ServerWsMessage::Session { session_id: handle.id.clone() },
    ServerWsMessage::View { screen: render_session(&handle).await },
  ];
  let mut open = true;
  for m in &hello {
    open = open && send(&mut socket, m).await;
  }

  while open {
    tokio::select! {
      incoming = socket.recv() => {
        let Some(Ok(msg)) = incoming else { break };
        match classify(msg) {
          Frame::Text(txt) => {
            let replies = match serde_json::from_str::<ClientWsMessage>(&txt) {
              Ok(m) => {
                debug!(target: "souq_arabic", "WS received: {:?}", &m);
                handle_client_ws(m, &handle).await
              }
              Err(e) => vec![ServerWsMessage::Error { message: format!("Invalid message: {}", e) }],
            };
            for r in &replies {
              if !send(&mut socket, r).await {
                open = false;
                break;
              }
            }
          }
          Frame::Reply(reply) => open = send_raw(&mut socket, reply).await,
          Frame::Close => break,
          Frame::Skip => {}
        }
      }
      changed = changes.changed() => {
        if changed.is_err() { break; }
        let screen = render_session(&handle).await;
        open = send(&mut socket, &ServerWsMessage::View { screen }).await;
      }
    }
  }

  state.end_session(&handle.id).await;
  info!(target: "souq_arabic", session = %handle.id, "WebSocket disconnected");
}

async fn handle_client_ws(msg: ClientWsMessage, handle: &SessionHandle) -> Vec<ServerWsMessage> {
  let intent = match msg {
    ClientWsMessage::Ping(_) => return vec![ServerWsMessage::Pong],
    ClientWsMessage::Intent(i) => i,
  };
  match apply_intent(handle, intent).await {
    Ok(d) => {
      let mut out: Vec<ServerWsMessage> = d.speak.into_iter().map(ServerWsMessage::Speak).collect();
      if let Some(a) = d.answer {
        out.push(ServerWsMessage::AnswerResult(a));
      }
      out.push(ServerWsMessage::View { screen: d.screen });
      out
    }
    Err(e) => vec![ServerWsMessage::Error { message: e.to_string() }],
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn ping_is_answered_through_the_checked_send_path() {
    assert_eq!(classify(Message::Ping(vec![1, 2])), Frame::Reply(Message::Pong(vec![1, 2])));
  }

  #[test]
  fn text_close_and_other_frames() {
    assert_eq!(classify(Message::Text("{}".into())), Frame::Text("{}".into()));
    assert_eq!(classify(Message::Close(None)), Frame::Close);
    assert_eq!(classify(Message::Pong(vec![])), Frame::Skip);
    assert_eq!(classify(Message::Binary(vec![0])), Frame::Skip);
  }
}
