/*!
 * Output file naming and base-name case styles
 */

use serde::{Deserialize, Serialize};

use super::classify::ClassifiedName;

/// Case transformation for the base file name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CaseStyle {
    /// Keep the base name exactly as classified
    #[default]
    Preserve,

    /// `IconHome` -> `icon_home`, `HTTPIcon` -> `http_icon`
    Snake,
}

impl CaseStyle {
    /// Apply the style to a base name
    pub fn apply(&self, base_name: &str) -> String {
        match self {
            CaseStyle::Preserve => base_name.to_string(),
            CaseStyle::Snake => to_snake_case(base_name),
        }
    }
}

fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();
            let word_start = match prev {
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                // End of an acronym: `HTTPIcon` splits before `I`
                Some(p) if p.is_uppercase() => next.is_some_and(|n| n.is_lowercase()),
                _ => false,
            };
            if word_start && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }

    out
}

impl ClassifiedName {
    /// Destination file name: styled base name plus extension
    pub fn output_file_name(&self, style: CaseStyle) -> String {
        format!("{}{}", style.apply(&self.base_name), self.extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserve_round_trips() {
        for name in ["IconHome", "icon_home", "HTTPIcon", "a1"] {
            assert_eq!(CaseStyle::Preserve.apply(name), name);
        }
    }

    #[test]
    fn test_snake_case() {
        assert_eq!(CaseStyle::Snake.apply("IconHome"), "icon_home");
        assert_eq!(CaseStyle::Snake.apply("iconHome"), "icon_home");
        assert_eq!(CaseStyle::Snake.apply("HTTPIcon"), "http_icon");
        assert_eq!(CaseStyle::Snake.apply("Foo_Bar"), "foo_bar");
        assert_eq!(CaseStyle::Snake.apply("icon2Large"), "icon2_large");
        assert_eq!(CaseStyle::Snake.apply("already_snake"), "already_snake");
        assert_eq!(CaseStyle::Snake.apply("ABC"), "abc");
    }

    #[test]
    fn test_output_file_name() {
        let name = ClassifiedName {
            base_name: "IconHome".to_string(),
            size_token: "@2x".to_string(),
            extension: ".png".to_string(),
        };
        assert_eq!(name.output_file_name(CaseStyle::Preserve), "IconHome.png");
        assert_eq!(name.output_file_name(CaseStyle::Snake), "icon_home.png");
    }
}
