//! Handler types and dependencies

use std::sync::Arc;

use teloxide::types::Message;

use crate::flow::SessionStore;
use crate::storage::DocumentSink;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub sessions: Arc<SessionStore>,
    pub sink: Arc<dyn DocumentSink>,
}

impl HandlerDeps {
    pub fn new(sessions: Arc<SessionStore>, sink: Arc<dyn DocumentSink>) -> Self {
        Self { sessions, sink }
    }
}

/// Identity of the sender, as the flow records it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderInfo {
    pub user_id: i64,
    pub display_name: String,
}

impl SenderInfo {
    /// Extracts the sender from a message. Returns None for channel posts
    /// and other messages without a `from` user.
    pub fn from_message(msg: &Message) -> Option<Self> {
        let user = msg.from.as_ref()?;
        let display_name = user
            .username
            .clone()
            .unwrap_or_else(|| user.first_name.clone());
        Some(Self {
            user_id: i64::try_from(user.id.0).ok()?,
            display_name,
        })
    }
}
