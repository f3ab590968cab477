/*!
 * Change events delivered to the pipeline
 */

use std::fmt;
use std::path::PathBuf;

/// Kind of filesystem change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WatchEventKind {
    Add,
    AddDir,
    Change,
    Unlink,
    UnlinkDir,
}

impl WatchEventKind {
    /// Removals are never routed
    pub fn is_removal(&self) -> bool {
        matches!(self, WatchEventKind::Unlink | WatchEventKind::UnlinkDir)
    }
}

impl fmt::Display for WatchEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WatchEventKind::Add => write!(f, "ADD"),
            WatchEventKind::AddDir => write!(f, "ADDDIR"),
            WatchEventKind::Change => write!(f, "CHANGE"),
            WatchEventKind::Unlink => write!(f, "UNLINK"),
            WatchEventKind::UnlinkDir => write!(f, "UNLINKDIR"),
        }
    }
}

/// Where an event came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOrigin {
    /// Reported by the change-notification subscription
    Live,
    /// Synthesized by the startup scan
    Backlog,
}

/// One `{kind, path}` unit of work
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchEvent {
    pub kind: WatchEventKind,
    pub path: PathBuf,
    pub origin: EventOrigin,
}

impl WatchEvent {
    pub fn live(kind: WatchEventKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
            origin: EventOrigin::Live,
        }
    }

    pub fn backlog(kind: WatchEventKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
            origin: EventOrigin::Backlog,
        }
    }
}
