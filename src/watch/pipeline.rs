/*!
 * Per-event routing pipeline: classify -> resolve -> transfer
 */

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dpiwatch_core_interface::AssetSystem;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error, info, warn, Instrument, Span};

use super::event::WatchEvent;
use crate::config::WatchConfig;
use crate::core::{
    classify, CaseStyle, Classification, DestinationResolver, SizeAliasTable, TransferExecutor,
    Transferred,
};
use crate::error::{DpiError, Result};

/// What happened to one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// Removal event; never routed
    Ignored,
    /// Name did not classify
    Unmatched,
    Routed {
        source: PathBuf,
        destination: PathBuf,
        transferred: Transferred,
    },
}

/// Tally of processed events
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteStats {
    pub routed: u64,
    pub ignored: u64,
    pub unmatched: u64,
    pub failed: u64,
}

impl RouteStats {
    fn record(&mut self, result: &Result<EventOutcome>) {
        match result {
            Ok(EventOutcome::Routed { .. }) => self.routed += 1,
            Ok(EventOutcome::Ignored) => self.ignored += 1,
            Ok(EventOutcome::Unmatched) => self.unmatched += 1,
            Err(_) => self.failed += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.routed + self.ignored + self.unmatched + self.failed
    }
}

/// Drives every event through classification, resolution and transfer
///
/// Shared read-only by all event tasks; nothing here is mutated after
/// construction.
pub struct Pipeline<S: AssetSystem> {
    watch_root: PathBuf,
    case_style: CaseStyle,
    resolver: DestinationResolver<S>,
    executor: TransferExecutor<S>,
}

impl<S: AssetSystem> Pipeline<S> {
    pub fn new(config: &WatchConfig, system: Arc<S>) -> Result<Self> {
        let aliases: Arc<SizeAliasTable> = Arc::new(config.alias_table()?);
        Ok(Self {
            watch_root: config.watch_root.clone(),
            case_style: config.case_style,
            resolver: DestinationResolver::new(
                Arc::clone(&system),
                aliases,
                config.destination_root(),
                config.dir_prefix.clone(),
            ),
            executor: TransferExecutor::new(system, config.transfer_mode),
        })
    }

    /// Source path for an event path
    ///
    /// Absolute paths and paths already under the watch root are used as-is;
    /// anything else is taken relative to the watch root.
    pub fn source_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() || path.starts_with(&self.watch_root) {
            path.to_path_buf()
        } else {
            self.watch_root.join(path)
        }
    }

    /// Process one event to completion
    pub async fn process(&self, event: &WatchEvent) -> Result<EventOutcome> {
        debug!(origin = ?event.origin, "{}: {}", event.kind, event.path.display());

        if event.kind.is_removal() {
            return Ok(EventOutcome::Ignored);
        }

        let name = match classify(&event.path) {
            Classification::Matched(name) => name,
            Classification::NoMatch => return Ok(EventOutcome::Unmatched),
        };
        debug!(
            base = %name.base_name,
            token = %name.size_token,
            extension = %name.extension,
            "matched {}",
            event.path.display()
        );

        let source = self.source_path(&event.path);
        let file_name = name.output_file_name(self.case_style);
        let destination = self.resolver.resolve(&name.size_token, &file_name).await?;

        info!(
            "{} {} -> {}",
            self.executor.mode().verb(),
            source.display(),
            destination.display()
        );
        let transferred = self.executor.transfer(&source, &destination).await?;

        Ok(EventOutcome::Routed {
            source,
            destination,
            transferred,
        })
    }

    /// Per-event failure boundary: errors are logged here and go no further
    pub async fn handle(&self, event: WatchEvent) -> Result<EventOutcome> {
        let result = self.process(&event).await;
        if let Err(e) = &result {
            warn!("{}", error_chain(e));
        }
        result
    }

    /// Consume events until the channel closes, one task per event
    ///
    /// Task panics are caught and counted as failures. In a live session
    /// the channel never closes, so this only returns in tests.
    pub async fn run(self: Arc<Self>, mut rx: UnboundedReceiver<WatchEvent>) -> RouteStats {
        let mut stats = RouteStats::default();
        let mut tasks = JoinSet::new();
        let span = Span::current();

        loop {
            tokio::select! {
                received = rx.recv() => match received {
                    Some(event) => {
                        let pipeline = Arc::clone(&self);
                        tasks.spawn(async move { pipeline.handle(event).await }.instrument(span.clone()));
                    }
                    None => break,
                },
                Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                    stats.record(&flatten(joined));
                }
            }
        }

        while let Some(joined) = tasks.join_next().await {
            stats.record(&flatten(joined));
        }
        stats
    }
}

fn flatten(joined: std::result::Result<Result<EventOutcome>, JoinError>) -> Result<EventOutcome> {
    joined.unwrap_or_else(|e| {
        let err = DpiError::Task(e.to_string());
        error!("{}", err);
        Err(err)
    })
}

/// Render an error with its full `source()` chain
fn error_chain(err: &DpiError) -> String {
    let mut rendered = err.to_string();
    let mut current: Option<&dyn std::error::Error> = std::error::Error::source(err);
    while let Some(cause) = current {
        let cause_text = cause.to_string();
        if !rendered.contains(&cause_text) {
            rendered.push_str(": ");
            rendered.push_str(&cause_text);
        }
        current = cause.source();
    }
    rendered
}
