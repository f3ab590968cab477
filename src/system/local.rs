//! Local filesystem implementation of AssetSystem
//!
//! Wraps `tokio::fs` so every primitive is a suspension point on the runtime.

use dpiwatch_core_interface::{AssetSystem, AssetSystemError, FileMetadata, Result};
use std::path::Path;
use std::time::SystemTime;
use tokio::fs;
use tokio::io::{AsyncRead, AsyncWrite};

/// Local filesystem implementation of AssetSystem
#[derive(Debug, Clone, Copy)]
pub struct LocalSystem;

impl LocalSystem {
    /// Create a new LocalSystem instance
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalSystem {
    fn default() -> Self {
        Self::new()
    }
}

fn to_metadata(path: &Path, meta: &std::fs::Metadata) -> FileMetadata {
    FileMetadata {
        path: path.to_path_buf(),
        len: if meta.is_dir() { 0 } else { meta.len() },
        is_dir: meta.is_dir(),
        modified: meta.modified().unwrap_or(SystemTime::UNIX_EPOCH),
    }
}

#[async_trait::async_trait]
impl AssetSystem for LocalSystem {
    async fn metadata(&self, path: &Path) -> Result<FileMetadata> {
        let meta = fs::metadata(path)
            .await
            .map_err(|e| AssetSystemError::from_io(e, path))?;
        Ok(to_metadata(path, &meta))
    }

    async fn read_dir(&self, path: &Path) -> Result<Vec<FileMetadata>> {
        let mut entries = Vec::new();
        let mut dir = fs::read_dir(path)
            .await
            .map_err(|e| AssetSystemError::from_io(e, path))?;

        while let Some(entry) = dir.next_entry().await.map_err(AssetSystemError::Io)? {
            let entry_path = entry.path();
            // Entries can vanish between listing and stat; skip them.
            if let Ok(meta) = entry.metadata().await {
                entries.push(to_metadata(&entry_path, &meta));
            }
        }

        Ok(entries)
    }

    async fn create_dir_all(&self, path: &Path) -> Result<()> {
        // `create_dir_all` already succeeds when another task got there
        // first, so AlreadyExists only surfaces for a non-directory in the way.
        fs::create_dir_all(path)
            .await
            .map_err(|e| AssetSystemError::from_io(e, path))
    }

    async fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        fs::rename(from, to)
            .await
            .map_err(|e| AssetSystemError::from_io(e, from))
    }

    async fn reader(&self, path: &Path) -> Result<Box<dyn AsyncRead + Unpin + Send>> {
        let file = fs::File::open(path)
            .await
            .map_err(|e| AssetSystemError::from_io(e, path))?;
        Ok(Box::new(file))
    }

    async fn writer(&self, path: &Path) -> Result<Box<dyn AsyncWrite + Unpin + Send>> {
        let file = fs::File::create(path)
            .await
            .map_err(|e| AssetSystemError::from_io(e, path))?;
        Ok(Box::new(file))
    }
}
