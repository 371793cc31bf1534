//! Core utilities: configuration, errors, logging, diagnostics

pub mod config;
pub mod credentials;
pub mod diagnostics;
pub mod error;
pub mod logging;

pub use error::{AppError, AppResult};
pub use logging::{init_logger, log_drive_configuration};
