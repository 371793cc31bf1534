use thiserror::Error;

/// Centralized error types for the application
///
/// All errors in the application are converted to this enum for consistent
/// error handling. Uses `thiserror` for automatic conversion and display
/// formatting.
#[derive(Error, Debug)]
pub enum AppError {
    /// Telegram API errors
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// HTTP/download errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// Document storage errors (the upload collaborator)
    #[error("Storage error: {0}")]
    Sink(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Anyhow errors (for general error handling)
    #[error("Application error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

impl From<String> for AppError {
    fn from(err: String) -> Self {
        AppError::Sink(err)
    }
}

impl From<&str> for AppError {
    fn from(err: &str) -> Self {
        AppError::Sink(err.to_string())
    }
}
