use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

/// Configuration constants for the bot

/// Folder where confirmed payment documents are stored.
/// Read from UPLOADS_FOLDER environment variable, defaults to ./uploads.
pub static UPLOADS_FOLDER: Lazy<String> = Lazy::new(|| {
    env::var("UPLOADS_FOLDER").unwrap_or_else(|_| "./uploads".to_string())
});

/// Whether the Google Drive integration is enabled.
/// Read from DRIVE_ENABLED environment variable ("1"/"true"/"yes").
/// When disabled, documents are only stored in the local uploads folder.
pub static DRIVE_ENABLED: Lazy<bool> = Lazy::new(|| {
    env::var("DRIVE_ENABLED")
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
});

/// Drive folder that receives uploaded documents.
/// Required when DRIVE_ENABLED is set; checked by `check-credentials`.
pub static DRIVE_FOLDER_ID: Lazy<Option<String>> = Lazy::new(|| {
    env::var("DRIVE_FOLDER_ID").ok().filter(|s| !s.trim().is_empty())
});

/// Spreadsheet holding the bookkeeping sheets (Compras, Ventas, ...).
pub static SPREADSHEET_ID: Lazy<Option<String>> = Lazy::new(|| {
    env::var("SPREADSHEET_ID").ok().filter(|s| !s.trim().is_empty())
});

/// Service-account credentials: either a path to a JSON key file or the
/// JSON document inline. Validated by the `check-credentials` binary.
pub static GOOGLE_CREDENTIALS: Lazy<Option<String>> = Lazy::new(|| {
    env::var("GOOGLE_CREDENTIALS").ok().filter(|s| !s.trim().is_empty())
});

/// Session configuration for the guided upload flow
pub mod session {
    use std::time::Duration;

    /// Seconds an abandoned session survives before the cleanup sweep drops
    /// it. 0 disables the sweep entirely.
    /// Read from SESSION_IDLE_TIMEOUT_SECS, defaults to 30 minutes.
    pub fn idle_timeout() -> Option<Duration> {
        let secs = std::env::var("SESSION_IDLE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(1800);
        (secs > 0).then(|| Duration::from_secs(secs))
    }

    /// Interval between cleanup sweeps (in seconds)
    pub const CLEANUP_INTERVAL_SECS: u64 = 300;

    /// Cleanup sweep interval duration
    pub fn cleanup_interval() -> Duration {
        Duration::from_secs(CLEANUP_INTERVAL_SECS)
    }
}

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for HTTP requests (in seconds).
    /// Generous because payment scans from phone cameras can be large.
    pub const REQUEST_TIMEOUT_SECS: u64 = 300;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

/// Validation configuration
pub mod validation {
    /// Maximum accepted document size (Telegram Bot API limit for downloads)
    pub const MAX_DOCUMENT_SIZE_BYTES: u32 = 20 * 1024 * 1024; // 20 MB

    /// Maximum length of an operation identifier
    pub const MAX_OPERATION_ID_LENGTH: usize = 64;
}
