//! crates/dlog/src/gate.rs
//! Emission decision: global silence, allow-list, then the active flag.

use dlog_sink::Style;

use crate::namespace::DEFAULT_ENTRY_SIZE;
use crate::registry::Registry;

/// Color of the one-time allow-list notice.
pub const NOTICE_COLOR: &str = "#00A499";

/// Global filter flags shared by every namespace of one logger.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FilterState {
    silenced: bool,
    allow_list: Vec<String>,
    announced: bool,
}

/// Outcome of a single gate evaluation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GateDecision {
    /// Whether the triggering record may be emitted.
    pub emit: bool,
    /// Notice to write before the record, at most once per logger.
    pub notice: Option<String>,
}

impl FilterState {
    /// Creates an unsilenced state with no allow-list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the global silence flag.
    pub fn set_silenced(&mut self, silenced: bool) {
        self.silenced = silenced;
    }

    /// Reports whether all output is suppressed.
    #[must_use]
    pub const fn is_silenced(&self) -> bool {
        self.silenced
    }

    /// Replaces the allow-list. Duplicates are dropped keeping first
    /// occurrence order; an empty list disables allow-list filtering.
    pub fn set_allow_list<I, T>(&mut self, names: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut list: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            if !list.contains(&name) {
                list.push(name);
            }
        }
        self.allow_list = list;
    }

    /// Returns the allow-list.
    #[must_use]
    pub fn allow_list(&self) -> &[String] {
        &self.allow_list
    }

    /// Reports whether the allow-list notice has been produced.
    #[must_use]
    pub const fn announced(&self) -> bool {
        self.announced
    }

    /// Decides whether `name` may emit without touching the notice flag.
    #[must_use]
    pub fn permits(&self, registry: &Registry, name: &str) -> bool {
        if self.silenced {
            return false;
        }
        if self.allow_list.is_empty() {
            registry.get(name).active
        } else {
            self.allow_list.iter().any(|allowed| allowed == name)
        }
    }

    /// Evaluates the gate for `name`, producing the allow-list notice the
    /// first time a non-empty allow-list is consulted while not silenced.
    pub fn evaluate(&mut self, registry: &Registry, name: &str) -> GateDecision {
        let notice = if !self.silenced && !self.allow_list.is_empty() && !self.announced {
            self.announced = true;
            diag!(debug, "dlog::gate", allowed = ?self.allow_list, "allow-list notice emitted");
            Some(notice_text(&self.allow_list))
        } else {
            None
        };
        GateDecision {
            emit: self.permits(registry, name),
            notice,
        }
    }
}

/// Style of the allow-list notice.
#[must_use]
pub fn notice_style() -> Style {
    Style::new(NOTICE_COLOR, DEFAULT_ENTRY_SIZE)
}

/// Renders `Showing logs for ["a","b"] only.`.
#[must_use]
pub fn notice_text(names: &[String]) -> String {
    let rendered = serde_json::to_string(names).unwrap_or_else(|_| format!("{names:?}"));
    format!("Showing logs for {rendered} only.")
}
