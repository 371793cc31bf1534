//! Per-user session store for the guided upload flow
//!
//! Keyed by Telegram user id; the flow handlers never touch the underlying
//! map directly. Updates for a single user arrive serialized from the
//! dispatcher, so `get` → `advance` → `put` is race-free per entry.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;

use super::machine::DocumentSession;

/// In-memory store with one [`DocumentSession`] per user.
#[derive(Default)]
pub struct SessionStore {
    sessions: DashMap<i64, DocumentSession>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Snapshot of the user's session, if any.
    pub fn get(&self, user_id: i64) -> Option<DocumentSession> {
        self.sessions.get(&user_id).map(|entry| entry.value().clone())
    }

    /// Inserts or replaces the user's session (last write wins) and stamps
    /// its activity time.
    pub fn put(&self, mut session: DocumentSession) {
        session.last_activity = Instant::now();
        self.sessions.insert(session.user_id, session);
    }

    /// Drops the user's session, returning it when one existed.
    pub fn remove(&self, user_id: i64) -> Option<DocumentSession> {
        self.sessions.remove(&user_id).map(|(_, session)| session)
    }

    pub fn contains(&self, user_id: i64) -> bool {
        self.sessions.contains_key(&user_id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Removes sessions idle longer than `idle`; returns how many were dropped.
    pub fn remove_idle(&self, idle: Duration) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| session.last_activity.elapsed() < idle);
        before - self.sessions.len()
    }

    /// Spawns a background sweep dropping abandoned sessions.
    ///
    /// The state machine has no expiry of its own; this keeps the map from
    /// accumulating sessions users walked away from.
    pub fn spawn_cleanup_task(self: Arc<Self>, every: Duration, idle: Duration) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.tick().await; // first tick fires immediately
            loop {
                ticker.tick().await;
                let dropped = self.remove_idle(idle);
                if dropped > 0 {
                    log::info!("Dropped {} abandoned upload session(s)", dropped);
                }
            }
        })
    }
}
