//! Telegram bot handler tree configuration
//!
//! The handlers are organized so integration tests can use the same handler
//! tree as production code.

mod commands;
mod document;
mod schema;
mod types;

pub use schema::schema;
pub use types::{HandlerDeps, HandlerError, SenderInfo};
