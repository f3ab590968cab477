/*!
 * Error types for dpiwatch
 */

use std::fmt;
use std::io;
use std::path::PathBuf;

use dpiwatch_core_interface::AssetSystemError;

use crate::config::TransferMode;

pub type Result<T> = std::result::Result<T, DpiError>;

/// Exit code constants for structured process exit
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FATAL: i32 = 2;

#[derive(Debug)]
pub enum DpiError {
    /// Empty, whitespace-only or otherwise unusable path
    InvalidPath(PathBuf),

    /// Destination directory could not be ensured
    Provision {
        path: PathBuf,
        source: AssetSystemError,
    },

    /// Directory listing failed during the startup scan
    Scan {
        path: PathBuf,
        source: AssetSystemError,
    },

    /// Move or copy failed
    Transfer {
        mode: TransferMode,
        from: PathBuf,
        to: PathBuf,
        source: AssetSystemError,
    },

    /// Change-notification subscription error
    Watch(notify::Error),

    /// Configuration error
    Config(String),

    /// I/O error
    Io(io::Error),

    /// Per-event task died (panic or cancellation)
    Task(String),
}

impl DpiError {
    /// Get the process exit code for this error
    ///
    /// Only startup errors ever reach the process boundary, so all of them
    /// are fatal.
    pub fn exit_code(&self) -> i32 {
        EXIT_FATAL
    }

    /// Get error category for logging
    pub fn category(&self) -> ErrorCategory {
        match self {
            DpiError::InvalidPath(_) => ErrorCategory::Validation,
            DpiError::Provision { .. } => ErrorCategory::Provisioning,
            DpiError::Scan { .. } => ErrorCategory::IoError,
            DpiError::Transfer { .. } => ErrorCategory::Transfer,
            DpiError::Watch(_) => ErrorCategory::Subscription,
            DpiError::Config(_) => ErrorCategory::Configuration,
            DpiError::Io(_) => ErrorCategory::IoError,
            DpiError::Task(_) => ErrorCategory::Concurrency,
        }
    }
}

/// Error category for classification and reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Path validation errors
    Validation,
    /// Destination directory creation/probe errors
    Provisioning,
    /// Move/copy errors
    Transfer,
    /// Watcher setup errors
    Subscription,
    /// Configuration errors
    Configuration,
    /// I/O operation errors
    IoError,
    /// Task failures
    Concurrency,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Validation => write!(f, "validation"),
            ErrorCategory::Provisioning => write!(f, "provisioning"),
            ErrorCategory::Transfer => write!(f, "transfer"),
            ErrorCategory::Subscription => write!(f, "subscription"),
            ErrorCategory::Configuration => write!(f, "configuration"),
            ErrorCategory::IoError => write!(f, "io"),
            ErrorCategory::Concurrency => write!(f, "concurrency"),
        }
    }
}

impl fmt::Display for DpiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DpiError::InvalidPath(path) => {
                write!(f, "Invalid path: '{}'", path.display())
            }
            DpiError::Provision { path, source } => {
                write!(f, "Could not create {}: {}", path.display(), source)
            }
            DpiError::Scan { path, source } => {
                write!(f, "Could not scan {}: {}", path.display(), source)
            }
            DpiError::Transfer {
                mode,
                from,
                to,
                source,
            } => {
                write!(
                    f,
                    "Failed to {} {} -> {}: {}",
                    mode,
                    from.display(),
                    to.display(),
                    source
                )
            }
            DpiError::Watch(err) => {
                write!(f, "Watch error: {}", err)
            }
            DpiError::Config(msg) => {
                write!(f, "Configuration error: {}", msg)
            }
            DpiError::Io(err) => {
                write!(f, "I/O error: {}", err)
            }
            DpiError::Task(msg) => {
                write!(f, "Event task failed: {}", msg)
            }
        }
    }
}

impl std::error::Error for DpiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DpiError::Provision { source, .. }
            | DpiError::Scan { source, .. }
            | DpiError::Transfer { source, .. } => Some(source),
            DpiError::Watch(err) => Some(err),
            DpiError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for DpiError {
    fn from(err: io::Error) -> Self {
        DpiError::Io(err)
    }
}

impl From<notify::Error> for DpiError {
    fn from(err: notify::Error) -> Self {
        DpiError::Watch(err)
    }
}
