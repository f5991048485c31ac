//! crates/dlog/src/registry.rs
//! Namespace registry with first-use creation and fallback lookup.

use rustc_hash::FxHashMap;

use dlog_sink::Style;

use crate::namespace::{
    DEFAULT_FALLBACK_COLOR, DEFAULT_NAMESPACE, DEFAULT_SIZE, NamespaceConfig, StyleOverride,
    is_valid_name,
};
use crate::palette::ColorAssigner;

/// Mapping from namespace name to its configuration.
///
/// The reserved `default` entry is always present and is returned by
/// [`get`](Self::get) for any name that has not been registered, including
/// blank names which are never stored.
#[derive(Clone, Debug)]
pub struct Registry {
    entries: FxHashMap<String, NamespaceConfig>,
    fallback: NamespaceConfig,
    colors: ColorAssigner,
    use_color: bool,
    fallback_color: String,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Creates a registry holding only the inactive `default` entry.
    #[must_use]
    pub fn new() -> Self {
        Self::with_palette(ColorAssigner::default())
    }

    /// Creates a registry that assigns colors from `colors`.
    #[must_use]
    pub fn with_palette(colors: ColorAssigner) -> Self {
        Self {
            entries: FxHashMap::default(),
            fallback: NamespaceConfig::seeded_default(),
            colors,
            use_color: true,
            fallback_color: DEFAULT_FALLBACK_COLOR.to_owned(),
        }
    }

    /// Inserts `name` on first use and returns its configuration.
    ///
    /// A new entry starts active. Its color is the override color, else the
    /// next palette color while color usage is enabled, else the fallback
    /// color. Its size is the override size, else `8pt`. The palette index
    /// advances for every entry created without an override color.
    ///
    /// An existing entry is returned unchanged and `style` is ignored. Blank
    /// names are never stored and yield `None`.
    pub fn ensure(&mut self, name: &str, style: Option<&StyleOverride>) -> Option<&NamespaceConfig> {
        if !is_valid_name(name) {
            diag!(debug, "dlog::registry", name, "blank namespace name rejected");
            return None;
        }
        if name == DEFAULT_NAMESPACE {
            return Some(&self.fallback);
        }
        if !self.entries.contains_key(name) {
            let config = NamespaceConfig::new(true, self.build_style(style));
            diag!(
                trace,
                "dlog::registry",
                name,
                color = config.style.color(),
                size = config.style.size(),
                "namespace created"
            );
            self.entries.insert(name.to_owned(), config);
        }
        self.entries.get(name)
    }

    fn build_style(&mut self, style: Option<&StyleOverride>) -> Style {
        let color = match style.and_then(|style| style.color.clone()) {
            Some(color) => color,
            None => {
                let assigned = self.colors.next_color();
                match assigned {
                    Some(color) if self.use_color => color,
                    _ => self.fallback_color.clone(),
                }
            }
        };
        let size = style
            .and_then(|style| style.size.clone())
            .unwrap_or_else(|| DEFAULT_SIZE.to_owned());
        Style::new(color, size)
    }

    /// Looks up `name`, falling back to the `default` entry.
    #[must_use]
    pub fn get(&self, name: &str) -> &NamespaceConfig {
        self.entries.get(name).unwrap_or(&self.fallback)
    }

    /// Mutable lookup of a registered name, including `default`.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut NamespaceConfig> {
        if name == DEFAULT_NAMESPACE {
            return Some(&mut self.fallback);
        }
        self.entries.get_mut(name)
    }

    /// Sets the active flag of a registered name.
    ///
    /// Returns `false` when `name` is not registered; no entry is created.
    pub fn set_active(&mut self, name: &str, active: bool) -> bool {
        match self.get_mut(name) {
            Some(config) => {
                config.active = active;
                true
            }
            None => false,
        }
    }

    /// Marks every entry, `default` included, inactive.
    pub fn deactivate_all(&mut self) {
        self.fallback.active = false;
        for config in self.entries.values_mut() {
            config.active = false;
        }
    }

    /// Reports whether `name` is registered. `default` always is.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        name == DEFAULT_NAMESPACE || self.entries.contains_key(name)
    }

    /// Registered names in sorted order, `default` included.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.keys().cloned().collect();
        names.push(DEFAULT_NAMESPACE.to_owned());
        names.sort_unstable();
        names
    }

    /// Number of registered names, `default` included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len() + 1
    }

    /// Always `false`: the `default` entry cannot be removed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Enables or disables palette colors for namespaces created afterwards.
    pub fn set_color_usage(&mut self, use_color: bool) {
        self.use_color = use_color;
    }

    /// Reports whether palette colors are assigned.
    #[must_use]
    pub const fn uses_color(&self) -> bool {
        self.use_color
    }

    /// Replaces the color used when palette colors are disabled.
    pub fn set_fallback_color(&mut self, color: impl Into<String>) {
        self.fallback_color = color.into();
    }

    /// Returns the color used when palette colors are disabled.
    #[must_use]
    pub fn fallback_color(&self) -> &str {
        &self.fallback_color
    }

    /// Replaces the palette and rewinds the rotation.
    pub fn set_palette<I, T>(&mut self, palette: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.colors = ColorAssigner::new(palette);
    }

    /// Returns the color assigner.
    #[must_use]
    pub const fn colors(&self) -> &ColorAssigner {
        &self.colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::DEFAULT_PALETTE;

    #[test]
    fn new_registry_holds_only_default() {
        let registry = Registry::new();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.names(), vec!["default"]);
        assert!(!registry.get("default").active);
    }

    #[test]
    fn ensure_creates_active_entry_with_palette_color() {
        let mut registry = Registry::new();
        let config = registry.ensure("debug", None).cloned();
        let config = config.expect("debug should be created");
        assert!(config.active);
        assert_eq!(config.style, Style::new(DEFAULT_PALETTE[0], "8pt"));
    }

    #[test]
    fn ensure_is_idempotent_and_ignores_later_overrides() {
        let mut registry = Registry::new();
        registry.ensure("db", Some(&StyleOverride::color("blue")));
        let again = registry
            .ensure("db", Some(&StyleOverride::color("red")))
            .cloned()
            .expect("db exists");
        assert_eq!(again.style.color(), "blue");
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.colors().index(), 0);
    }

    #[test]
    fn blank_names_fall_back_to_default() {
        let mut registry = Registry::new();
        assert!(registry.ensure("", None).is_none());
        assert!(registry.ensure("   ", None).is_none());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(""), &NamespaceConfig::seeded_default());
        assert_eq!(registry.colors().index(), 0);
    }

    #[test]
    fn ensure_default_returns_seeded_entry() {
        let mut registry = Registry::new();
        let config = registry.ensure("default", None).cloned();
        assert_eq!(config, Some(NamespaceConfig::seeded_default()));
        assert_eq!(registry.colors().index(), 0);
    }

    #[test]
    fn disabled_color_uses_fallback_but_advances_index() {
        let mut registry = Registry::new();
        registry.set_color_usage(false);
        registry.set_fallback_color("gray");
        let color = registry
            .ensure("quiet", None)
            .map(|config| config.style.color().to_owned());
        assert_eq!(color.as_deref(), Some("gray"));
        assert_eq!(registry.colors().index(), 1);
    }

    #[test]
    fn size_override_keeps_palette_color() {
        let mut registry = Registry::new();
        let config = registry
            .ensure("sized", Some(&StyleOverride::size("12pt")))
            .cloned()
            .expect("created");
        assert_eq!(config.style, Style::new(DEFAULT_PALETTE[0], "12pt"));
    }

    #[test]
    fn set_active_never_creates() {
        let mut registry = Registry::new();
        assert!(!registry.set_active("ghost", true));
        assert!(!registry.contains("ghost"));
        registry.ensure("real", None);
        assert!(registry.set_active("real", false));
        assert!(!registry.get("real").active);
    }

    #[test]
    fn deactivate_all_covers_default() {
        let mut registry = Registry::new();
        registry.set_active("default", true);
        registry.ensure("a", None);
        registry.ensure("b", None);
        registry.deactivate_all();
        assert!(registry.names().iter().all(|name| !registry.get(name).active));
    }

    #[test]
    fn set_palette_rewinds() {
        let mut registry = Registry::new();
        registry.ensure("a", None);
        registry.set_palette(["x", "y"]);
        let color = registry
            .ensure("b", None)
            .map(|config| config.style.color().to_owned());
        assert_eq!(color.as_deref(), Some("x"));
    }

    #[test]
    fn keys_are_stored_untrimmed() {
        let mut registry = Registry::new();
        registry.ensure(" padded ", None);
        assert!(registry.contains(" padded "));
        assert!(!registry.contains("padded"));
    }
}
