//! Recording mock for the document sink
//!
//! Stands in for `FolderSink` so flow tests can assert exactly what reached
//! the upload collaborator without touching the network.

use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use granobot::core::error::{AppError, AppResult};
use granobot::flow::CompletedUpload;
use granobot::storage::{DocumentSink, StoredDocument};

/// Sink that records every submit and can be told to fail.
#[derive(Default)]
pub struct MockSink {
    submissions: Mutex<Vec<CompletedUpload>>,
    fail_next: Mutex<bool>,
}

impl MockSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next submit return an error.
    pub fn fail_next(&self) {
        *self.fail_next.lock().unwrap() = true;
    }

    /// Everything submitted so far, in order.
    pub fn submissions(&self) -> Vec<CompletedUpload> {
        self.submissions.lock().unwrap().clone()
    }

    pub fn submission_count(&self) -> usize {
        self.submissions.lock().unwrap().len()
    }
}

#[async_trait]
impl DocumentSink for MockSink {
    async fn submit(&self, upload: &CompletedUpload) -> AppResult<StoredDocument> {
        let mut fail = self.fail_next.lock().unwrap();
        if *fail {
            *fail = false;
            return Err(AppError::Sink("mock sink failure".to_string()));
        }

        self.submissions.lock().unwrap().push(upload.clone());
        Ok(StoredDocument {
            path: PathBuf::from(format!("/uploads/{}.pdf", upload.operation_id)),
            size: 1024,
        })
    }
}
