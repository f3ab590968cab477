/*!
 * Directory provisioning: idempotent "ensure directory exists"
 */

use std::path::Path;
use std::sync::Arc;

use dpiwatch_core_interface::{AssetSystem, AssetSystemError};
use tracing::{debug, info};

use crate::error::{DpiError, Result};

/// What `ensure_dir` found or did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provisioned {
    /// Directory was already there (possibly created by a concurrent task)
    Existing,
    /// This call created it
    Created,
}

/// Ensures destination directories exist
///
/// No locking: two tasks may both observe a directory as absent and both
/// create it. The loser sees `AlreadyExists`, which counts as success.
pub struct DirectoryProvisioner<S: AssetSystem> {
    system: Arc<S>,
}

impl<S: AssetSystem> DirectoryProvisioner<S> {
    pub fn new(system: Arc<S>) -> Self {
        Self { system }
    }

    /// Probe `path`, creating it (and its ancestors) only when the probe
    /// says it does not exist
    ///
    /// Any probe error other than "not found" is a failure and nothing is
    /// created, so permission or I/O problems are never mistaken for absence.
    pub async fn ensure_dir(&self, path: &Path) -> Result<Provisioned> {
        if path.to_string_lossy().trim().is_empty() {
            return Err(DpiError::InvalidPath(path.to_path_buf()));
        }

        match self.system.metadata(path).await {
            Ok(meta) if meta.is_dir => return Ok(Provisioned::Existing),
            Ok(_) => {
                return Err(DpiError::Provision {
                    path: path.to_path_buf(),
                    source: AssetSystemError::AlreadyExists(path.to_path_buf()),
                })
            }
            Err(AssetSystemError::NotFound(_)) => {}
            Err(source) => {
                return Err(DpiError::Provision {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }

        info!("creating {}", path.display());
        match self.system.create_dir_all(path).await {
            Ok(()) => Ok(Provisioned::Created),
            Err(AssetSystemError::AlreadyExists(_)) => {
                debug!("{} appeared concurrently", path.display());
                Ok(Provisioned::Existing)
            }
            Err(source) => Err(DpiError::Provision {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}
