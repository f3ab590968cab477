/*!
 * Watch session: subscription, startup backlog and the event pipeline
 */

pub mod backlog;
pub mod event;
pub mod filter;
pub mod pipeline;
pub mod source;

pub use event::{EventOrigin, WatchEvent, WatchEventKind};
pub use filter::IgnoreFilter;
pub use pipeline::{EventOutcome, Pipeline, RouteStats};
pub use source::WatchSubscription;

use std::sync::Arc;

use dpiwatch_core_interface::AssetSystem;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{info, info_span, Instrument, Span};

use crate::config::WatchConfig;
use crate::error::Result;

/// Session lifecycle. There is no terminal state; the process is stopped
/// externally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    Starting,
    Watching,
}

pub struct WatchSession<S: AssetSystem> {
    pipeline: Arc<Pipeline<S>>,
    subscription: WatchSubscription,
    rx: UnboundedReceiver<WatchEvent>,
    state: WatchState,
    span: Span,
}

impl<S: AssetSystem> WatchSession<S> {
    /// Subscribe to the watch root, then queue the startup backlog
    ///
    /// Must be called from within a tokio runtime. The subscription is
    /// established before the scan so nothing created in between is lost;
    /// a file may therefore be seen twice.
    pub fn start(config: Arc<WatchConfig>, system: Arc<S>) -> Result<Self> {
        let span = info_span!("watch", root = %config.watch_root.display());
        let entered = span.enter();

        let pipeline = Arc::new(Pipeline::new(&config, Arc::clone(&system))?);
        let filter = IgnoreFilter::from_config(&config)?;
        let (tx, rx) = mpsc::unbounded_channel();

        let subscription = WatchSubscription::subscribe(&config.watch_root, filter.clone(), tx.clone())?;

        let root = config.watch_root.clone();
        tokio::spawn(
            async move {
                backlog::queue(system.as_ref(), &root, &filter, &tx).await;
            }
            .instrument(span.clone()),
        );

        info!(
            "started watching {} -> {} ({})",
            config.watch_root.display(),
            config.destination_root().display(),
            config.transfer_mode
        );

        drop(entered);
        Ok(Self {
            pipeline,
            subscription,
            rx,
            state: WatchState::Watching,
            span,
        })
    }

    pub fn state(&self) -> WatchState {
        self.state
    }

    /// Route events until the subscription ends
    pub async fn run(self) -> RouteStats {
        let Self {
            pipeline,
            subscription,
            rx,
            span,
            ..
        } = self;
        let stats = pipeline.run(rx).instrument(span).await;
        drop(subscription);
        stats
    }
}

/// Start a session and run it to completion
pub async fn run<S: AssetSystem>(config: Arc<WatchConfig>, system: Arc<S>) -> Result<RouteStats> {
    let session = WatchSession::start(config, system)?;
    Ok(session.run().await)
}
