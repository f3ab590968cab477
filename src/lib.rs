/*!
 * dpiwatch - density-bucket asset router
 *
 * Watches a directory for PNG assets named after their pixel density
 * (`icon@2x.png`, `icon-hdpi.png`, `icon.png`) and moves or copies each one
 * into the matching `<prefix>-<qualifier>` resource directory:
 * - Regex classification with a configurable size-alias table
 * - Race-tolerant destination directory provisioning
 * - Startup backlog scan plus live notify subscription
 * - One cooperative task per event; failures stay with their event
 */

pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod system;
pub mod watch;

// Re-export commonly used types
pub use config::{LogLevel, TransferMode, WatchConfig};
pub use core::{classify, CaseStyle, Classification, ClassifiedName, SizeAliasTable};
pub use error::{DpiError, Result};
pub use system::LocalSystem;
pub use watch::{EventOutcome, Pipeline, RouteStats, WatchEvent, WatchEventKind, WatchSession};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
