//! crates/dlog/src/handle.rs
//! Lightweight handle bound to one namespace.

use std::fmt;

use dlog_sink::{Channel, ConsoleSink};

use crate::context::{Dlog, StdioWriter};

/// Handle that logs under a fixed namespace.
///
/// The handle stores only the name and a shared reference to its [`Dlog`];
/// every handle for the same name acts on the same registry entry.
pub struct Namespace<S = StdioWriter> {
    name: String,
    owner: Dlog<S>,
}

impl<S> Clone for Namespace<S> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            owner: self.owner.clone(),
        }
    }
}

impl<S> fmt::Debug for Namespace<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Namespace").field("name", &self.name).finish()
    }
}

impl<S: ConsoleSink> Namespace<S> {
    pub(crate) const fn new(name: String, owner: Dlog<S>) -> Self {
        Self { name, owner }
    }

    /// Writes `args` to the standard channel if the gate allows it.
    pub fn log(&self, args: &[&dyn fmt::Display]) {
        self.owner.dispatch(Channel::Standard, &self.name, args);
    }

    /// Writes `args` to the error channel if the gate allows it.
    pub fn error(&self, args: &[&dyn fmt::Display]) {
        self.owner.dispatch(Channel::Error, &self.name, args);
    }

    /// The namespace name, as given.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reports the active flag this name resolves to.
    pub fn is_active(&self) -> bool {
        self.owner.config(&self.name).active
    }

    /// Activates the namespace. Returns `false` for blank names.
    pub fn activate(&self) -> bool {
        self.owner.activate(&self.name)
    }

    /// Deactivates the namespace. Returns `false` for blank names.
    pub fn deactivate(&self) -> bool {
        self.owner.deactivate(&self.name)
    }
}
