//! dpiwatch Core Interface: filesystem capabilities
//!
//! This crate defines the `AssetSystem` trait, the set of raw filesystem
//! primitives the asset router consumes: existence probes, listing,
//! recursive directory creation, rename and streaming reads/writes.
//!
//! The router never touches `std::fs` or `tokio::fs` directly. Production code
//! plugs in a local implementation, tests plug in an in-memory one with fault
//! injection.
//!
//! # Example
//!
//! ```rust,no_run
//! use dpiwatch_core_interface::{AssetSystem, AssetSystemError};
//! use std::path::Path;
//!
//! async fn is_directory<S: AssetSystem>(system: &S, path: &Path) -> Result<bool, AssetSystemError> {
//!     match system.metadata(path).await {
//!         Ok(meta) => Ok(meta.is_dir),
//!         Err(AssetSystemError::NotFound(_)) => Ok(false),
//!         Err(e) => Err(e),
//!     }
//! }
//! ```

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetSystemError {
    #[error("Not found: {0}")]
    NotFound(PathBuf),

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl AssetSystemError {
    /// Map an I/O error for `path` onto the variants callers branch on.
    ///
    /// Only `NotFound`, `PermissionDenied` and `AlreadyExists` are lifted out;
    /// every other kind stays wrapped in `Io`.
    pub fn from_io(err: io::Error, path: &Path) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => AssetSystemError::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => {
                AssetSystemError::PermissionDenied(path.to_path_buf())
            }
            io::ErrorKind::AlreadyExists => AssetSystemError::AlreadyExists(path.to_path_buf()),
            _ => AssetSystemError::Io(err),
        }
    }

    /// True when the failure means "nothing is there".
    pub fn is_not_found(&self) -> bool {
        matches!(self, AssetSystemError::NotFound(_))
    }

    /// True when the failure means "something is already there".
    pub fn is_already_exists(&self) -> bool {
        matches!(self, AssetSystemError::AlreadyExists(_))
    }
}

pub type Result<T> = std::result::Result<T, AssetSystemError>;

/// Metadata for a file or directory
#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// Full path to the file/directory
    pub path: PathBuf,

    /// Size in bytes (0 for directories)
    pub len: u64,

    /// Whether this is a directory
    pub is_dir: bool,

    /// Last modification time
    pub modified: SystemTime,
}

impl FileMetadata {
    /// Create metadata for a file
    pub fn file(path: impl Into<PathBuf>, len: u64, modified: SystemTime) -> Self {
        Self {
            path: path.into(),
            len,
            is_dir: false,
            modified,
        }
    }

    /// Create metadata for a directory
    pub fn directory(path: impl Into<PathBuf>, modified: SystemTime) -> Self {
        Self {
            path: path.into(),
            len: 0,
            is_dir: true,
            modified,
        }
    }
}

/// Raw filesystem capabilities consumed by the asset router
///
/// Every operation is a suspension point. Implementations must be
/// `Send + Sync + 'static` so one instance can be shared by all per-event tasks.
#[async_trait]
pub trait AssetSystem: Send + Sync + 'static {
    // ═══════════════════════════════════════════════════════════════════════
    // 1. Discovery Operations
    // ═══════════════════════════════════════════════════════════════════════

    /// Probe a path
    ///
    /// # Errors
    ///
    /// Returns `AssetSystemError::NotFound` if the path doesn't exist.
    /// Returns `AssetSystemError::PermissionDenied` if access is denied.
    async fn metadata(&self, path: &Path) -> Result<FileMetadata>;

    /// List directory contents (non-recursive)
    async fn read_dir(&self, path: &Path) -> Result<Vec<FileMetadata>>;

    // ═══════════════════════════════════════════════════════════════════════
    // 2. Mutation Operations
    // ═══════════════════════════════════════════════════════════════════════

    /// Create a directory and all missing ancestors
    ///
    /// When the directory appears between the caller's probe and this call,
    /// implementations return `AssetSystemError::AlreadyExists` rather than
    /// hiding it, so the caller decides whether that is benign.
    async fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Move `from` to `to`, replacing any file already at `to`
    async fn rename(&self, from: &Path, to: &Path) -> Result<()>;

    // ═══════════════════════════════════════════════════════════════════════
    // 3. Data Access Operations
    // ═══════════════════════════════════════════════════════════════════════

    /// Open a file for reading (streaming)
    async fn reader(&self, path: &Path) -> Result<Box<dyn tokio::io::AsyncRead + Unpin + Send>>;

    /// Open a file for writing
    ///
    /// Creates the file if it doesn't exist, truncates if it does. The parent
    /// directory must already exist.
    async fn writer(&self, path: &Path) -> Result<Box<dyn tokio::io::AsyncWrite + Unpin + Send>>;
}

/// Convenience operations derived from the core trait
#[async_trait]
pub trait AssetSystemExt: AssetSystem {
    /// Check whether a path exists, treating probe errors as absence
    async fn exists(&self, path: &Path) -> bool {
        self.metadata(path).await.is_ok()
    }

    /// Stream-copy `from` into `to`
    ///
    /// The writer is shut down before the byte count is returned, so a
    /// successful result means the destination is complete.
    async fn copy_file(&self, from: &Path, to: &Path) -> Result<u64> {
        use tokio::io::AsyncWriteExt;
        let mut reader = self.reader(from).await?;
        let mut writer = self.writer(to).await?;
        let copied = tokio::io::copy(&mut reader, &mut writer).await?;
        writer.shutdown().await?;
        Ok(copied)
    }

    /// Read entire file contents into memory
    async fn read_all(&self, path: &Path) -> Result<Vec<u8>> {
        use tokio::io::AsyncReadExt;
        let mut reader = self.reader(path).await?;
        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer).await?;
        Ok(buffer)
    }

    /// Write entire buffer to a file
    async fn write_all(&self, path: &Path, data: &[u8]) -> Result<()> {
        use tokio::io::AsyncWriteExt;
        let mut writer = self.writer(path).await?;
        writer.write_all(data).await?;
        writer.shutdown().await?;
        Ok(())
    }
}

impl<T: AssetSystem + ?Sized> AssetSystemExt for T {}
