//! Granobot - Telegram bot for registering payment documents of a coffee
//! purchase/sale operation
//!
//! This library provides all the functionality for the bot, including the
//! guided upload conversation, document storage, environment diagnostics and
//! the spreadsheet export used by the `export-sheets` binary.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, logging, diagnostics, credentials
//! - `flow`: the guided upload state machine and per-user session store
//! - `storage`: durable storage for submitted documents
//! - `export`: workbook → CSV export
//! - `telegram`: Telegram bot integration and handlers

pub mod cli;
pub mod core;
pub mod export;
pub mod flow;
pub mod storage;
pub mod telegram;

// Re-export commonly used types for convenience
pub use crate::core::{config, AppError, AppResult};
pub use flow::{DocumentSession, FlowStep, SessionStore};
pub use storage::{DocumentSink, FolderSink};
pub use telegram::{create_bot, schema, HandlerDeps};
