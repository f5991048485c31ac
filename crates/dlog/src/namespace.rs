//! crates/dlog/src/namespace.rs
//! Per-namespace configuration and style overrides.

use dlog_sink::Style;

/// Name of the reserved fallback namespace seeded into every registry.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Color used when palette colors are disabled or exhausted.
pub const DEFAULT_FALLBACK_COLOR: &str = "#63666A";

/// Size token assigned to namespaces created without an explicit size.
pub const DEFAULT_SIZE: &str = "8pt";

/// Size token of the seeded `default` namespace.
pub const DEFAULT_ENTRY_SIZE: &str = "10pt";

/// Activation flag and display style of one namespace.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NamespaceConfig {
    /// Whether records from this namespace pass the per-namespace check.
    pub active: bool,
    /// Style applied to standard-channel records.
    pub style: Style,
}

impl NamespaceConfig {
    /// Creates a configuration.
    #[must_use]
    pub const fn new(active: bool, style: Style) -> Self {
        Self { active, style }
    }

    /// The seeded `default` entry: inactive, fallback color, `10pt`.
    #[must_use]
    pub fn seeded_default() -> Self {
        Self::new(false, Style::new(DEFAULT_FALLBACK_COLOR, DEFAULT_ENTRY_SIZE))
    }
}

/// Partial style supplied when a namespace is first created.
///
/// Missing tokens are filled in by the registry: the color from the palette
/// (or the fallback color) and the size from [`DEFAULT_SIZE`].
///
/// # Examples
///
/// ```
/// use dlog::StyleOverride;
///
/// let style = StyleOverride::color("#FF4858").with_size("12pt");
/// assert_eq!(style.color.as_deref(), Some("#FF4858"));
/// assert_eq!(style.size.as_deref(), Some("12pt"));
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyleOverride {
    /// Explicit color token.
    pub color: Option<String>,
    /// Explicit size token.
    pub size: Option<String>,
}

impl StyleOverride {
    /// Override carrying only a color.
    pub fn color(color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            size: None,
        }
    }

    /// Override carrying only a size.
    pub fn size(size: impl Into<String>) -> Self {
        Self {
            color: None,
            size: Some(size.into()),
        }
    }

    /// Replaces the color token.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Replaces the size token.
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }
}

impl From<Style> for StyleOverride {
    fn from(style: Style) -> Self {
        Self {
            color: Some(style.color().to_owned()),
            size: Some(style.size().to_owned()),
        }
    }
}

/// Reports whether `name` can key a new registry entry.
pub(crate) fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_default_is_inactive() {
        let config = NamespaceConfig::seeded_default();
        assert!(!config.active);
        assert_eq!(config.style, Style::new("#63666A", "10pt"));
    }

    #[test]
    fn blank_names_are_invalid() {
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("   "));
        assert!(!is_valid_name("\t\n"));
        assert!(is_valid_name("debug"));
        assert!(is_valid_name(" padded "));
    }

    #[test]
    fn override_from_full_style() {
        let style = StyleOverride::from(Style::new("#FF4858", "12pt"));
        assert_eq!(style, StyleOverride::color("#FF4858").with_size("12pt"));
    }

    #[test]
    fn size_only_override() {
        let style = StyleOverride::size("9pt");
        assert!(style.color.is_none());
        assert_eq!(style.size.as_deref(), Some("9pt"));
    }
}
