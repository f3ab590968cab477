/*!
 * Transfer execution - dispatches to rename (move) or stream copy
 */

use std::path::Path;
use std::sync::Arc;

use dpiwatch_core_interface::{AssetSystem, AssetSystemExt};

use crate::config::TransferMode;
use crate::error::{DpiError, Result};

/// Outcome of a successful transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transferred {
    Moved,
    /// Bytes written to the destination
    Copied(u64),
}

/// Performs the configured transfer for one resolved source/destination pair
///
/// Each call settles exactly once. There is no retry: a failed transfer is
/// reported to the caller and the event is dropped.
pub struct TransferExecutor<S: AssetSystem> {
    system: Arc<S>,
    mode: TransferMode,
}

impl<S: AssetSystem> TransferExecutor<S> {
    pub fn new(system: Arc<S>, mode: TransferMode) -> Self {
        Self { system, mode }
    }

    pub fn mode(&self) -> TransferMode {
        self.mode
    }

    /// Move or copy `from` to `to`; an existing destination is overwritten
    pub async fn transfer(&self, from: &Path, to: &Path) -> Result<Transferred> {
        let outcome = match self.mode {
            TransferMode::Move => self.system.rename(from, to).await.map(|()| Transferred::Moved),
            TransferMode::Copy => self
                .system
                .copy_file(from, to)
                .await
                .map(Transferred::Copied),
        };

        outcome.map_err(|source| DpiError::Transfer {
            mode: self.mode,
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source,
        })
    }
}
