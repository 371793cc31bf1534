//! Upload collaborator: durable storage for confirmed payment documents
//!
//! [`DocumentSink::submit`] is called exactly once per confirmed flow. The
//! production sink pulls the file from the Bot API and drops it into the
//! uploads folder; tests substitute a recording mock.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use url::Url;

use crate::core::config;
use crate::core::error::{AppError, AppResult};
use crate::flow::CompletedUpload;
use crate::telegram::Bot;

/// Receipt returned by a successful submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDocument {
    /// Where the document landed
    pub path: PathBuf,
    /// Bytes written
    pub size: u64,
}

/// Destination for confirmed uploads.
#[async_trait]
pub trait DocumentSink: Send + Sync {
    async fn submit(&self, upload: &CompletedUpload) -> AppResult<StoredDocument>;
}

/// Stores documents in the configured uploads folder, named after the
/// operation they evidence.
pub struct FolderSink {
    bot: Bot,
    folder: PathBuf,
}

impl FolderSink {
    pub fn new(bot: Bot) -> Self {
        Self {
            bot,
            folder: PathBuf::from(config::UPLOADS_FOLDER.as_str()),
        }
    }

    pub fn with_folder(bot: Bot, folder: impl Into<PathBuf>) -> Self {
        Self {
            bot,
            folder: folder.into(),
        }
    }
}

#[async_trait]
impl DocumentSink for FolderSink {
    async fn submit(&self, upload: &CompletedUpload) -> AppResult<StoredDocument> {
        use teloxide::prelude::*;
        use teloxide::types::FileId;
        use tokio::io::AsyncWriteExt;

        let file = self.bot.get_file(FileId(upload.file.file_id.clone())).await?;
        log::info!(
            "Storing document for {} {} (remote path {}, {} bytes)",
            upload.operation_type,
            upload.operation_id,
            file.path,
            file.size
        );

        tokio::fs::create_dir_all(&self.folder).await?;

        let dest_name = destination_filename(upload, &file.path, chrono::Local::now());
        let dest_path = self.folder.join(&dest_name);
        let tmp_path = self.folder.join(format!("{}.part", dest_name));

        let file_url = build_file_url(self.bot.token(), &file.path)?;
        let client = reqwest::Client::builder().timeout(config::network::timeout()).build()?;

        let mut resp = client.get(file_url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(AppError::Sink(format!(
                "descarga del documento falló (path={}, status={}): {}",
                file.path, status, body
            )));
        }

        let mut written: u64 = 0;
        let mut dst = tokio::fs::File::create(&tmp_path).await?;
        while let Some(chunk) = resp.chunk().await? {
            written += chunk.len() as u64;
            dst.write_all(&chunk).await?;
        }
        dst.flush().await?;
        tokio::fs::rename(&tmp_path, &dest_path).await?;

        log::info!("Document stored at {:?} ({} bytes)", dest_path, written);
        Ok(StoredDocument {
            path: dest_path,
            size: written,
        })
    }
}

/// Builds `<base>/file/bot<token>/<path>` against the official API or a
/// BOT_API_URL override.
fn build_file_url(token: &str, file_path: &str) -> AppResult<Url> {
    let base = std::env::var("BOT_API_URL").unwrap_or_else(|_| "https://api.telegram.org".to_string());
    let mut url = Url::parse(&base)?;
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| AppError::Sink("BOT_API_URL cannot be a base URL".to_string()))?;
        segments.push("file");
        segments.push(&format!("bot{token}"));
        for seg in file_path.split('/').filter(|s| !s.is_empty()) {
            segments.push(seg);
        }
    }
    Ok(url)
}

/// Keeps identifiers filesystem-safe without losing readability.
fn sanitize_component(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
        .collect()
}

/// `compra_PED-2024-001_20240513-143002.pdf` — type, operation and timestamp
/// make the folder auditable without opening files.
fn destination_filename(upload: &CompletedUpload, remote_path: &str, now: chrono::DateTime<chrono::Local>) -> String {
    let extension = upload
        .file
        .file_name
        .as_deref()
        .and_then(|n| Path::new(n).extension())
        .or_else(|| Path::new(remote_path).extension())
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_else(|| ".bin".to_string());

    format!(
        "{}_{}_{}{}",
        upload.operation_type.to_string().to_lowercase(),
        sanitize_component(&upload.operation_id),
        now.format("%Y%m%d-%H%M%S"),
        extension
    )
}
