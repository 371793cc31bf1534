//! Logging initialization and startup configuration checking
//!
//! This module provides:
//! - Logger initialization (console, RUST_LOG-aware)
//! - Drive/uploads configuration validation and logging at startup

use anyhow::Result;

use crate::core::config;

/// Initialize the process-wide logger.
///
/// Honors RUST_LOG; defaults to `info` so operators see the startup
/// configuration check without extra setup. Safe to call once at process
/// start only.
pub fn init_logger() -> Result<()> {
    let mut builder = pretty_env_logger::formatted_timed_builder();
    builder.filter_level(log::LevelFilter::Info);
    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }
    builder
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;
    Ok(())
}

/// Logs the uploads/Drive configuration at application startup.
///
/// Validates and logs:
/// - UPLOADS_FOLDER existence (created lazily on first upload)
/// - DRIVE_ENABLED and the folder/spreadsheet identifiers it requires
/// - GOOGLE_CREDENTIALS presence
pub fn log_drive_configuration() {
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    log::info!("📋 Uploads Configuration Check");
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let uploads = config::UPLOADS_FOLDER.as_str();
    if std::path::Path::new(uploads).is_dir() {
        log::info!("✅ UPLOADS_FOLDER: {} (exists)", uploads);
    } else {
        log::warn!("⚠️  UPLOADS_FOLDER: {} (missing, will be created on first upload)", uploads);
    }

    if *config::DRIVE_ENABLED {
        log::info!("✅ DRIVE_ENABLED: yes");

        match *config::DRIVE_FOLDER_ID {
            Some(ref id) => log::info!("✅ DRIVE_FOLDER_ID: {}", id),
            None => log::error!("❌ DRIVE_FOLDER_ID: not set (required when DRIVE_ENABLED)"),
        }
        match *config::SPREADSHEET_ID {
            Some(ref id) => log::info!("✅ SPREADSHEET_ID: {}", id),
            None => log::error!("❌ SPREADSHEET_ID: not set (required when DRIVE_ENABLED)"),
        }
        match *config::GOOGLE_CREDENTIALS {
            Some(_) => log::info!("✅ GOOGLE_CREDENTIALS: set"),
            None => {
                log::error!("❌ GOOGLE_CREDENTIALS: not set");
                log::error!("   Run `check-credentials` for remediation steps");
            }
        }
    } else {
        log::info!("ℹ️  DRIVE_ENABLED: no (documents stay in the local uploads folder)");
    }

    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
}
