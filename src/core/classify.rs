/*!
 * Filename classification: `<base><size token>.png`
 */

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

/// Density literals, longest first so alternation never stops early
const DENSITY_TOKENS: &str = "xxxhdpi|xxhdpi|xhdpi|hdpi|mdpi|ldpi";

/// Anchored over the whole final path segment
///
/// Non-word characters may surround the base and the token and are stripped.
/// The base name is lazy so a density literal glued to it (`iconhdpi.png`)
/// is split off as the token instead of being swallowed. Scale digits are
/// ASCII only.
static ASSET_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^[^A-Za-z0-9_]*(?P<base>[A-Za-z0-9_]+?)[^A-Za-z0-9_]*(?P<token>{}|@[0-9]+(?:\.[0-9])?x)?(?P<ext>\.png)$",
        DENSITY_TOKENS
    ))
    .expect("asset pattern is a valid regex")
});

/// Three-part view of a matched asset filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedName {
    /// Base name with surrounding separators stripped
    pub base_name: String,
    /// Size token (`@2x`, `hdpi`, ...), empty when absent
    pub size_token: String,
    /// Extension including the dot
    pub extension: String,
}

/// Result of classifying a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    NoMatch,
    Matched(ClassifiedName),
}

impl Classification {
    pub fn is_match(&self) -> bool {
        matches!(self, Classification::Matched(_))
    }
}

/// Classify the final segment of `path`
///
/// Pure and deterministic. Paths without a UTF-8 file name never match.
pub fn classify(path: &Path) -> Classification {
    let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
        return Classification::NoMatch;
    };

    match ASSET_PATTERN.captures(file_name) {
        Some(caps) => Classification::Matched(ClassifiedName {
            base_name: caps["base"].to_string(),
            size_token: caps
                .name("token")
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
            extension: caps["ext"].to_string(),
        }),
        None => Classification::NoMatch,
    }
}
