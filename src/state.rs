//! Application state: config plus the in-memory session store.
//!
//! This module owns:
//!   - the sessions, by id (one `LearningSession` each, behind its own lock)
//!   - the reveal timer of each session (a cancellable tokio task)
//!   - a change counter per session so WebSocket clients can re-render when a
//!     timer fires without any client request
//!   - the idle reaper, which drops sessions nobody has touched for
//!     `session_idle_secs` (HTTP clients that never send DELETE)
//!
//! Sessions are volatile: dropping one (or restarting the process) loses it.

use std::{collections::HashMap, sync::Arc, time::Duration};
use tokio::sync::{watch, Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::session::LearningSession;

struct SessionSlot {
    session: LearningSession,
    /// Ticket and task of the scheduled reveal expiry, if any.
    reveal_task: Option<(u64, JoinHandle<()>)>,
    /// Last client access through `apply` or `read`. Timer expiries do not count.
    last_touched: Instant,
}

/// How often the reaper looks for idle sessions.
const REAP_EVERY: Duration = Duration::from_secs(60);

/// Cheap, cloneable handle on one session.
#[derive(Clone)]
pub struct SessionHandle {
    pub id: String,
    slot: Arc<Mutex<SessionSlot>>,
    changes: Arc<watch::Sender<u64>>,
}

impl SessionHandle {
    fn new(session: LearningSession) -> Self {
        let (tx, _rx) = watch::channel(0u64);
        Self {
            id: session.id.clone(),
            slot: Arc::new(Mutex::new(SessionSlot { session, reveal_task: None, last_touched: Instant::now() })),
            changes: Arc::new(tx),
        }
    }

    /// Run a mutation, then bring the reveal timer in line with the session:
    /// a different (or no) pending ticket aborts the old task, a new ticket
    /// schedules one.
    pub async fn apply<T>(&self, f: impl FnOnce(&mut LearningSession) -> T) -> T {
        let mut slot = self.slot.lock().await;
        slot.last_touched = Instant::now();
        let out = f(&mut slot.session);
        self.reconcile_timer(&mut slot);
        out
    }

    pub async fn read<T>(&self, f: impl FnOnce(&LearningSession) -> T) -> T {
        let mut slot = self.slot.lock().await;
        slot.last_touched = Instant::now();
        f(&slot.session)
    }

    async fn idle_for(&self) -> Duration {
        self.slot.lock().await.last_touched.elapsed()
    }

    /// Receiver that ticks whenever a background timer changed the session.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    async fn shutdown(&self) {
        let mut slot = self.slot.lock().await;
        if let Some((_, task)) = slot.reveal_task.take() {
            task.abort();
        }
    }

    fn reconcile_timer(&self, slot: &mut SessionSlot) {
        let pending = slot.session.pending_reveal();
        let scheduled = slot.reveal_task.as_ref().map(|(t, _)| *t);
        if pending == scheduled {
            return;
        }
        if let Some((ticket, task)) = slot.reveal_task.take() {
            task.abort();
            debug!(target: "quiz", session = %self.id, ticket, "Reveal timer aborted");
        }
        if let Some(ticket) = pending {
            let delay = slot.session.reveal_delay();
            let handle = self.clone();
            let task = tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                handle.fire_reveal(ticket).await;
            });
            slot.reveal_task = Some((ticket, task));
            debug!(target: "quiz", session = %self.id, ticket, delay_ms = delay.as_millis() as u64, "Reveal timer scheduled");
        }
    }

    async fn fire_reveal(&self, ticket: u64) {
        let mut slot = self.slot.lock().await;
        if slot.reveal_task.as_ref().is_some_and(|(t, _)| *t == ticket) {
            // Our own handle; finishing now, nothing to abort.
            slot.reveal_task = None;
        }
        if slot.session.expire_reveal(ticket) {
            self.changes.send_modify(|v| *v += 1);
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    sessions: Arc<RwLock<HashMap<String, SessionHandle>>>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        info!(
            target: "souq_arabic",
            learner = %config.learner_name,
            reveal_delay_ms = config.reveal_delay_ms,
            speech = config.speech.enabled,
            "Session store ready"
        );
        Self { config: Arc::new(config), sessions: Arc::new(RwLock::new(HashMap::new())) }
    }

    #[instrument(level = "info", skip(self))]
    pub async fn create_session(&self) -> SessionHandle {
        let id = Uuid::new_v4().to_string();
        let handle = SessionHandle::new(LearningSession::new(id.clone(), &self.config));
        self.sessions.write().await.insert(id.clone(), handle.clone());
        info!(target: "session", session = %id, "Session created");
        handle
    }

    pub async fn get_session(&self, id: &str) -> Option<SessionHandle> {
        self.sessions.read().await.get(id).cloned()
    }

    /// End a session; any pending reveal timer is cancelled.
    #[instrument(level = "info", skip(self))]
    pub async fn end_session(&self, id: &str) -> bool {
        let removed = self.sessions.write().await.remove(id);
        match removed {
            Some(handle) => {
                handle.shutdown().await;
                info!(target: "session", session = %id, "Session ended");
                true
            }
            None => false,
        }
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// End every session idle for at least `max_idle`. Returns how many went.
    pub async fn reap_idle(&self, max_idle: Duration) -> usize {
        let handles: Vec<SessionHandle> = self.sessions.read().await.values().cloned().collect();
        let mut reaped = 0;
        for h in handles {
            if h.idle_for().await >= max_idle && self.end_session(&h.id).await {
                reaped += 1;
            }
        }
        if reaped > 0 {
            let remaining = self.session_count().await;
            info!(target: "session", reaped, remaining, "Idle sessions reaped");
        }
        reaped
    }

    /// Background sweep over the store every `REAP_EVERY`.
    pub fn spawn_reaper(&self) -> JoinHandle<()> {
        let state = self.clone();
        let max_idle = state.config.session_idle();
        tokio::spawn(async move {
            let mut tick = tokio::time::interval(REAP_EVERY);
            tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tick.tick().await;
                state.reap_idle(max_idle).await;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GameMode, View};
    use std::time::Duration;

    async fn quiz_session(state: &AppState) -> SessionHandle {
        let h = state.create_session().await;
        h.apply(|s| {
            s.start_lesson("alphabet").unwrap();
            s.set_mode(GameMode::Quiz).unwrap();
        })
        .await;
        h
    }

    #[tokio::test(start_paused = true)]
    async fn reveal_expires_after_delay() {
        let state = AppState::new(AppConfig::default());
        let h = quiz_session(&state).await;
        let mut changes = h.subscribe();

        h.apply(|s| s.answer(0).map(|_| ())).await.unwrap();
        assert!(h.read(|s| s.reveal.is_some()).await);

        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert!(h.read(|s| s.reveal.is_some()).await);

        changes.changed().await.unwrap();
        assert_eq!(h.read(|s| (s.reveal.is_some(), s.index)).await, (false, 1));
    }

    #[tokio::test(start_paused = true)]
    async fn navigating_away_cancels_the_timer() {
        let state = AppState::new(AppConfig::default());
        let h = quiz_session(&state).await;

        h.apply(|s| s.answer(0).map(|_| ())).await.unwrap();
        h.apply(|s| s.navigate(View::Home)).await;
        tokio::time::sleep(Duration::from_secs(5)).await;

        assert_eq!(h.read(|s| s.index).await, 0);
        assert_eq!(*h.subscribe().borrow(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn ending_a_session_drops_it() {
        let state = AppState::new(AppConfig::default());
        let h = quiz_session(&state).await;
        h.apply(|s| s.answer(0).map(|_| ())).await.unwrap();

        assert_eq!(state.session_count().await, 1);
        assert!(state.end_session(&h.id).await);
        assert!(!state.end_session(&h.id).await);
        assert!(state.get_session(&h.id).await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn abandoned_sessions_are_reaped() {
        let state = AppState::new(AppConfig::default());
        for _ in 0..50 {
            state.create_session().await;
        }
        let reaper = state.spawn_reaper();

        tokio::time::sleep(Duration::from_secs(24 * 60 * 60)).await;
        assert_eq!(state.session_count().await, 0);
        reaper.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn recently_used_sessions_survive_the_sweep() {
        let state = AppState::new(AppConfig { session_idle_secs: 600, ..AppConfig::default() });
        let busy = state.create_session().await;
        let idle = quiz_session(&state).await;
        idle.apply(|s| s.answer(0).map(|_| ())).await.unwrap();

        tokio::time::sleep(Duration::from_secs(300)).await;
        busy.read(|s| s.index).await;
        tokio::time::sleep(Duration::from_secs(300)).await;

        assert_eq!(state.reap_idle(state.config.session_idle()).await, 1);
        assert!(state.get_session(&busy.id).await.is_some());
        assert!(state.get_session(&idle.id).await.is_none());
    }
}
