/*!
 * notify-backed change source
 */

use notify::event::{CreateKind, ModifyKind, RemoveKind, RenameMode};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::Path;
use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

use super::event::{WatchEvent, WatchEventKind};
use super::filter::IgnoreFilter;
use crate::error::Result;

/// Live subscription to filesystem changes under the watch root
///
/// Dropping the handle ends the subscription; sessions keep it for the
/// lifetime of the process.
pub struct WatchSubscription {
    _watcher: RecommendedWatcher,
}

impl WatchSubscription {
    /// Subscribe recursively to `root`, forwarding translated, non-ignored
    /// events into `tx`
    ///
    /// Errors here are startup errors; no events can flow without a watcher.
    pub fn subscribe(
        root: &Path,
        filter: IgnoreFilter,
        tx: UnboundedSender<WatchEvent>,
    ) -> Result<Self> {
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) => {
                for watch_event in translate(&event) {
                    if filter.is_ignored(&watch_event.path) {
                        continue;
                    }
                    // The receiver only goes away when the session does.
                    let _ = tx.send(watch_event);
                }
            }
            Err(e) => warn!("watcher error: {}", e),
        })?;

        watcher.watch(root, RecursiveMode::Recursive)?;

        Ok(Self { _watcher: watcher })
    }
}

/// Translate a notify event into zero or more pipeline events
pub fn translate(event: &Event) -> Vec<WatchEvent> {
    let single = |kind: WatchEventKind| -> Vec<WatchEvent> {
        event
            .paths
            .iter()
            .map(|path| WatchEvent::live(kind, path.clone()))
            .collect()
    };

    match event.kind {
        EventKind::Create(CreateKind::Folder) => single(WatchEventKind::AddDir),
        EventKind::Create(_) => single(WatchEventKind::Add),
        EventKind::Modify(ModifyKind::Name(RenameMode::From)) => single(WatchEventKind::Unlink),
        EventKind::Modify(ModifyKind::Name(RenameMode::To)) => single(WatchEventKind::Add),
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => match event.paths.as_slice() {
            [from, to] => vec![
                WatchEvent::live(WatchEventKind::Unlink, from.clone()),
                WatchEvent::live(WatchEventKind::Add, to.clone()),
            ],
            _ => Vec::new(),
        },
        // Backends that cannot tell the two sides of a rename apart.
        EventKind::Modify(ModifyKind::Name(_)) => event
            .paths
            .iter()
            .map(|path| {
                let kind = if path.exists() {
                    WatchEventKind::Add
                } else {
                    WatchEventKind::Unlink
                };
                WatchEvent::live(kind, path.clone())
            })
            .collect(),
        EventKind::Modify(ModifyKind::Metadata(_)) => Vec::new(),
        EventKind::Modify(_) => single(WatchEventKind::Change),
        EventKind::Remove(RemoveKind::Folder) => single(WatchEventKind::UnlinkDir),
        EventKind::Remove(_) => single(WatchEventKind::Unlink),
        EventKind::Access(_) | EventKind::Any | EventKind::Other => Vec::new(),
    }
}
