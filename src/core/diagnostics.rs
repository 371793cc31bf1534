//! Environment and runtime status report
//!
//! Feeds the `/estado` command. The report is a plain string so the same
//! builder serves the Telegram handler and the startup log.

use std::fmt::Write as _;
use std::path::Path;

use crate::core::config;

/// Result of probing the uploads directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadsDirStatus {
    /// Directory exists and a probe file could be written and removed
    Writable,
    /// Directory exists but writing failed
    ReadOnly,
    /// Directory does not exist
    Missing,
}

/// Checks that the uploads directory exists and is writable by writing and
/// removing a probe file.
pub fn probe_uploads_dir(path: &str) -> UploadsDirStatus {
    let dir = Path::new(path);
    if !dir.is_dir() {
        return UploadsDirStatus::Missing;
    }

    let probe = dir.join(format!(".granobot-probe-{}", std::process::id()));
    match std::fs::write(&probe, b"probe") {
        Ok(()) => {
            let _ = std::fs::remove_file(&probe);
            UploadsDirStatus::Writable
        }
        Err(_) => UploadsDirStatus::ReadOnly,
    }
}

fn flag_line(out: &mut String, label: &str, value: Option<&str>) {
    match value {
        Some(v) => {
            let _ = writeln!(out, "✅ {}: {}", label, v);
        }
        None => {
            let _ = writeln!(out, "❌ {}: no configurado", label);
        }
    }
}

/// Builds the human-readable status report shown by `/estado`.
///
/// Read-only apart from the uploads-dir probe file.
pub fn build_status_report() -> String {
    let mut out = String::new();

    let _ = writeln!(out, "🤖 Estado del bot (v{})", env!("CARGO_PKG_VERSION"));
    let _ = writeln!(out, "━━━━━━━━━━━━━━━━━━━━");
    let _ = writeln!(
        out,
        "🖥 Sistema: {} / {} (pid {})",
        std::env::consts::OS,
        std::env::consts::ARCH,
        std::process::id()
    );
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "{} Integración con Drive: {}",
        if *config::DRIVE_ENABLED { "✅" } else { "ℹ️" },
        if *config::DRIVE_ENABLED { "activada" } else { "desactivada" }
    );
    flag_line(&mut out, "Carpeta de subidas", Some(config::UPLOADS_FOLDER.as_str()));
    flag_line(&mut out, "Hoja de cálculo", config::SPREADSHEET_ID.as_deref());
    flag_line(
        &mut out,
        "Credenciales",
        config::GOOGLE_CREDENTIALS.as_deref().map(|_| "presentes"),
    );

    let _ = writeln!(out);
    match probe_uploads_dir(&config::UPLOADS_FOLDER) {
        UploadsDirStatus::Writable => {
            let _ = writeln!(out, "✅ Carpeta de subidas: accesible y con permisos de escritura");
        }
        UploadsDirStatus::ReadOnly => {
            let _ = writeln!(out, "⚠️ Carpeta de subidas: existe pero no se puede escribir");
        }
        UploadsDirStatus::Missing => {
            let _ = writeln!(out, "⚠️ Carpeta de subidas: no existe (se creará con la primera subida)");
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_missing_dir() {
        let status = probe_uploads_dir("/nonexistent/granobot-test-dir");
        assert_eq!(status, UploadsDirStatus::Missing);
    }

    #[test]
    fn test_probe_writable_dir() {
        let dir = tempfile::tempdir().unwrap();
        let status = probe_uploads_dir(dir.path().to_str().unwrap());
        assert_eq!(status, UploadsDirStatus::Writable);
        // Probe file must not be left behind
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_report_contains_runtime_identity() {
        let report = build_status_report();
        assert!(report.contains(std::env::consts::OS));
        assert!(report.contains(&std::process::id().to_string()));
        assert!(report.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_report_mentions_drive_flag() {
        let report = build_status_report();
        assert!(report.contains("Integración con Drive"));
    }
}
