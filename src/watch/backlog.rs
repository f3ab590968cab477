/*!
 * Startup backlog: synthesize add events for what is already on disk
 */

use std::path::Path;

use dpiwatch_core_interface::AssetSystem;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, warn};

use super::event::{WatchEvent, WatchEventKind};
use super::filter::IgnoreFilter;
use crate::error::{DpiError, Result};

/// Walk `root` and return one synthetic event per non-ignored entry
///
/// Files become `Add`, directories `AddDir`; the root itself is not
/// reported. Only an unreadable root is an error. Unreadable subdirectories
/// are logged and skipped.
pub async fn scan<S: AssetSystem>(
    system: &S,
    root: &Path,
    filter: &IgnoreFilter,
) -> Result<Vec<WatchEvent>> {
    let mut events = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    let mut is_root = true;

    while let Some(dir) = pending.pop() {
        let mut entries = match system.read_dir(&dir).await {
            Ok(entries) => entries,
            Err(source) if is_root => {
                return Err(DpiError::Scan {
                    path: dir,
                    source,
                })
            }
            Err(e) => {
                warn!("skipping unreadable {}: {}", dir.display(), e);
                continue;
            }
        };
        is_root = false;

        entries.sort_by(|a, b| a.path.cmp(&b.path));

        for entry in entries {
            if filter.is_ignored(&entry.path) {
                continue;
            }
            if entry.is_dir {
                events.push(WatchEvent::backlog(WatchEventKind::AddDir, entry.path.clone()));
                pending.push(entry.path);
            } else {
                events.push(WatchEvent::backlog(WatchEventKind::Add, entry.path));
            }
        }
    }

    Ok(events)
}

/// Scan and feed the result into the live event channel
///
/// Returns the number of queued events. Failures are logged, never
/// propagated: the live subscription keeps running without a backlog.
pub async fn queue<S: AssetSystem>(
    system: &S,
    root: &Path,
    filter: &IgnoreFilter,
    tx: &UnboundedSender<WatchEvent>,
) -> usize {
    let events = match scan(system, root, filter).await {
        Ok(events) => events,
        Err(e) => {
            error!("initial scan failed: {}", e);
            return 0;
        }
    };

    let mut queued = 0;
    for event in events {
        if tx.send(event).is_err() {
            break;
        }
        queued += 1;
    }
    debug!("queued {} backlog events", queued);
    queued
}
