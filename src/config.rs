/*!
 * Configuration types for dpiwatch
 */

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::alias::SizeAliasTable;
use crate::core::naming::CaseStyle;
use crate::error::{DpiError, Result};

/// Directory prefix used for generated density directories
pub const DEFAULT_DIR_PREFIX: &str = "drawable";

/// Main configuration for a watch session
///
/// Built once at startup (file, then CLI overrides) and shared read-only
/// behind an `Arc` afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Directory to watch for new assets
    #[serde(default = "default_root")]
    pub watch_root: PathBuf,

    /// Output root holding the `<prefix>-<qualifier>` directories
    #[serde(default = "default_root")]
    pub dest_root: PathBuf,

    /// When set, the output root is this path under `watch_root`
    #[serde(default)]
    pub relative_dest: Option<PathBuf>,

    /// Move or copy matched files
    #[serde(default)]
    pub transfer_mode: TransferMode,

    /// Case style applied to the base file name
    #[serde(default)]
    pub case_style: CaseStyle,

    /// Extra size-token aliases (`token -> qualifier`)
    #[serde(default)]
    pub sizes: BTreeMap<String, String>,

    /// Prefix of generated output directories
    #[serde(default = "default_dir_prefix")]
    pub dir_prefix: String,

    /// Extra glob patterns to ignore (relative to `watch_root`)
    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    /// Surface every raw event and classification match
    #[serde(default)]
    pub debug: bool,

    /// Log level for diagnostic output
    #[serde(default)]
    pub log_level: LogLevel,

    /// Log file path (None = stderr)
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            watch_root: default_root(),
            dest_root: default_root(),
            relative_dest: None,
            transfer_mode: TransferMode::default(),
            case_style: CaseStyle::default(),
            sizes: BTreeMap::new(),
            dir_prefix: default_dir_prefix(),
            ignore_patterns: Vec::new(),
            debug: false,
            log_level: LogLevel::default(),
            log_file: None,
        }
    }
}

/// How a classified file reaches its destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransferMode {
    /// Rename into place; the source disappears
    #[default]
    Move,

    /// Stream the bytes; the source stays
    Copy,
}

impl TransferMode {
    /// Present participle used in log lines
    pub fn verb(&self) -> &'static str {
        match self {
            TransferMode::Move => "moving",
            TransferMode::Copy => "copying",
        }
    }
}

impl fmt::Display for TransferMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferMode::Move => write!(f, "move"),
            TransferMode::Copy => write!(f, "copy"),
        }
    }
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Only errors
    Error,

    /// Warnings and errors
    Warn,

    /// Info, warnings, and errors
    #[default]
    Info,

    /// Debug and above
    Debug,

    /// All messages including traces
    Trace,
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_dir_prefix() -> String {
    DEFAULT_DIR_PREFIX.to_string()
}

impl WatchConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            DpiError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str(&contents)
            .map_err(|e| DpiError::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Effective output root, honouring relative-destination mode
    pub fn destination_root(&self) -> PathBuf {
        match &self.relative_dest {
            Some(relative) => self.watch_root.join(relative),
            None => self.dest_root.clone(),
        }
    }

    /// Build the read-only alias table: defaults plus `sizes` overrides
    pub fn alias_table(&self) -> Result<SizeAliasTable> {
        SizeAliasTable::default().with_overrides(
            self.sizes
                .iter()
                .map(|(token, qualifier)| (token.clone(), qualifier.clone())),
        )
    }

    /// Anchor relative roots at `cwd`
    pub fn absolutize(mut self, cwd: &Path) -> Self {
        if self.watch_root.is_relative() {
            self.watch_root = cwd.join(&self.watch_root);
        }
        if self.dest_root.is_relative() {
            self.dest_root = cwd.join(&self.dest_root);
        }
        self
    }

    /// Reject configurations no session could run with
    pub fn validate(&self) -> Result<()> {
        if self.dir_prefix.trim().is_empty() {
            return Err(DpiError::Config("Directory prefix must not be empty".to_string()));
        }
        if self.dir_prefix.contains(['/', '\\']) {
            return Err(DpiError::Config(format!(
                "Directory prefix must not contain a path separator: {}",
                self.dir_prefix
            )));
        }
        if let Some(relative) = &self.relative_dest {
            if relative.is_absolute() {
                return Err(DpiError::Config(format!(
                    "Relative destination must be a relative path: {}",
                    relative.display()
                )));
            }
        }
        self.alias_table().map(|_| ())
    }
}
