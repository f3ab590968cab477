/*!
 * Standing ignore filter applied to live and backlog events
 */

use glob::Pattern as GlobPattern;
use std::path::{Component, Path, PathBuf};

use crate::config::WatchConfig;
use crate::error::{DpiError, Result};

/// Directory names that are always skipped
const IGNORED_DIRS: &[&str] = &[".idea", "node_modules"];

/// Decides which paths under the watch root are never looked at
///
/// Skipped: hidden entries (any component starting with `.`), IDE metadata
/// and dependency-cache directories, user globs, and the generated
/// `<prefix>-*` output directories when they live under the watch root.
#[derive(Debug, Clone)]
pub struct IgnoreFilter {
    watch_root: PathBuf,
    output_root: PathBuf,
    output_prefix: String,
    patterns: Vec<GlobPattern>,
}

impl IgnoreFilter {
    pub fn new(
        watch_root: impl Into<PathBuf>,
        output_root: impl Into<PathBuf>,
        output_prefix: impl Into<String>,
        patterns: &[String],
    ) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|raw| {
                GlobPattern::new(raw).map_err(|e| {
                    DpiError::Config(format!("Invalid ignore pattern '{}': {}", raw, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            watch_root: watch_root.into(),
            output_root: output_root.into(),
            output_prefix: format!("{}-", output_prefix.into()),
            patterns,
        })
    }

    pub fn from_config(config: &WatchConfig) -> Result<Self> {
        Self::new(
            config.watch_root.clone(),
            config.destination_root(),
            config.dir_prefix.clone(),
            &config.ignore_patterns,
        )
    }

    pub fn is_ignored(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.watch_root).unwrap_or(path);

        let hidden_or_cache = relative.components().any(|component| match component {
            Component::Normal(name) => {
                let name = name.to_string_lossy();
                name.starts_with('.') || IGNORED_DIRS.contains(&name.as_ref())
            }
            _ => false,
        });
        if hidden_or_cache {
            return true;
        }

        if self.is_generated_output(path) {
            return true;
        }

        self.patterns
            .iter()
            .any(|pattern| pattern.matches_path(relative))
    }

    /// Inside `<output_root>/<prefix>-*`
    fn is_generated_output(&self, path: &Path) -> bool {
        let Ok(relative) = path.strip_prefix(&self.output_root) else {
            return false;
        };
        match relative.components().next() {
            Some(Component::Normal(first)) => first
                .to_string_lossy()
                .starts_with(self.output_prefix.as_str()),
            _ => false,
        }
    }
}
