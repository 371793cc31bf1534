//! Durable storage for submitted documents

pub mod sink;

pub use sink::{DocumentSink, FolderSink, StoredDocument};
