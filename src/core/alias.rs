/*!
 * Size alias table: classifier token -> directory qualifier
 */

use std::collections::HashMap;

use crate::error::{DpiError, Result};

/// Built-in aliases for scale-factor tokens
///
/// The empty token stands for "no suffix". Density literals such as `hdpi`
/// are deliberately absent: they pass through as their own qualifier.
const DEFAULT_ALIASES: &[(&str, &str)] = &[
    ("", "mdpi"),
    ("@1x", "mdpi"),
    ("@1.5x", "hdpi"),
    ("@2x", "xhdpi"),
    ("@3x", "xxhdpi"),
    ("@4x", "xxxhdpi"),
];

/// Mapping from size token to directory qualifier
///
/// Built once at startup and never mutated afterwards; sessions share it
/// behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeAliasTable {
    aliases: HashMap<String, String>,
}

impl Default for SizeAliasTable {
    fn default() -> Self {
        Self {
            aliases: DEFAULT_ALIASES
                .iter()
                .map(|(token, qualifier)| (token.to_string(), qualifier.to_string()))
                .collect(),
        }
    }
}

impl SizeAliasTable {
    /// Layer overrides on top of the current entries
    ///
    /// Later pairs win over earlier ones and over defaults. Qualifiers must be
    /// non-empty and must not contain a path separator.
    pub fn with_overrides<I>(mut self, overrides: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (token, qualifier) in overrides {
            validate_qualifier(&token, &qualifier)?;
            self.aliases.insert(token, qualifier);
        }
        Ok(self)
    }

    /// Resolve a token, falling back to the token itself
    pub fn qualifier_for<'a>(&'a self, token: &'a str) -> &'a str {
        self.aliases.get(token).map(String::as_str).unwrap_or(token)
    }
}

/// Parse a `token=qualifier` override
///
/// Splits on the first `=`, so the token may be empty (`=nodpi` remaps
/// suffix-less files) but the qualifier may not.
pub fn parse_size_override(raw: &str) -> Result<(String, String)> {
    let (token, qualifier) = raw.split_once('=').ok_or_else(|| {
        DpiError::Config(format!(
            "Invalid size override '{}': expected TOKEN=QUALIFIER",
            raw
        ))
    })?;
    let token = token.trim().to_string();
    let qualifier = qualifier.trim().to_string();
    validate_qualifier(&token, &qualifier)?;
    Ok((token, qualifier))
}

fn validate_qualifier(token: &str, qualifier: &str) -> Result<()> {
    if qualifier.is_empty() {
        return Err(DpiError::Config(format!(
            "Size override for '{}' has an empty qualifier",
            token
        )));
    }
    if qualifier.contains(['/', '\\']) {
        return Err(DpiError::Config(format!(
            "Size override for '{}' must not contain a path separator: {}",
            token, qualifier
        )));
    }
    Ok(())
}
