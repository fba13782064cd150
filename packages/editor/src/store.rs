//! # Content Store
//!
//! Persistence backend contract for the document's canonical text, plus a
//! filesystem-backed implementation for hosts that save straight to disk.
//!
//! The persist operation is asynchronous and settles at the store's
//! discretion; the controller models no timeout and no partial success.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Backend error: {0}")]
    Backend(String),
}

/// Asynchronous persistence backend for canonical text.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn persist(&self, text: &str) -> Result<(), StoreError>;
}

/// Content store that writes the canonical text to a local file.
#[derive(Debug)]
pub struct FsContentStore {
    path: PathBuf,
}

impl FsContentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ContentStore for FsContentStore {
    async fn persist(&self, text: &str) -> Result<(), StoreError> {
        tokio::fs::write(&self.path, text).await?;
        Ok(())
    }
}
