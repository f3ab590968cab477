/*!
 * Logging and tracing initialization
 */

use std::fs::File;
use std::path::Path;
use tracing::Level;
use tracing_subscriber::{
    filter::Directive,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::WatchConfig;
use crate::error::{DpiError, Result};

/// Effective level: `debug` forces DEBUG regardless of `log_level`
pub fn effective_level(config: &WatchConfig) -> Level {
    if config.debug {
        Level::DEBUG
    } else {
        config.log_level.to_tracing_level()
    }
}

/// Filter directive used when `RUST_LOG` is not set
pub fn default_directive(config: &WatchConfig) -> String {
    format!("dpiwatch={}", effective_level(config))
}

/// Build the log filter: `RUST_LOG` when set, else the configured level
///
/// `debug` always adds a `dpiwatch=debug` directive on top, so raw events
/// and matches surface even under a restrictive `RUST_LOG`.
pub fn build_filter(config: &WatchConfig) -> Result<EnvFilter> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(config)))
        .map_err(|e| DpiError::Config(format!("Failed to create log filter: {}", e)))?;

    if !config.debug {
        return Ok(env_filter);
    }
    let directive: Directive = format!("dpiwatch={}", Level::DEBUG)
        .parse()
        .map_err(|e| DpiError::Config(format!("Invalid debug log directive: {}", e)))?;
    Ok(env_filter.add_directive(directive))
}

/// Initialize structured logging based on configuration
pub fn init_logging(config: &WatchConfig) -> Result<()> {
    let env_filter = build_filter(config)?;

    if let Some(ref log_path) = config.log_file {
        init_file_logging(log_path, env_filter)?;
    } else {
        init_stderr_logging(env_filter);
    }

    Ok(())
}

/// Compact human-readable lines on stderr
fn init_stderr_logging(env_filter: EnvFilter) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_span_events(FmtSpan::NONE)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

/// JSON lines to a file
fn init_file_logging(log_path: &Path, env_filter: EnvFilter) -> Result<()> {
    let file = File::create(log_path).map_err(|e| {
        DpiError::Config(format!(
            "Failed to create log file {}: {}",
            log_path.display(),
            e
        ))
    })?;

    let fmt_layer = fmt::layer()
        .with_writer(file)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .json();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}

/// Initialize logging with custom format for testing
#[cfg(test)]
pub fn init_test_logging() {
    use std::sync::Once;
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dpiwatch=debug"));

        let fmt_layer = fmt::layer().with_test_writer().with_target(false).compact();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .ok();
    });
}
