//! crates/dlog/src/context.rs
//! The `Dlog` context object owning the registry, filter state, and sink.

use std::cell::RefCell;
use std::fmt;
use std::io::{self, Stderr, Stdout};
use std::rc::Rc;

use dlog_sink::{Channel, ConsoleSink, ConsoleWriter};

use crate::config::DlogConfig;
use crate::emit;
use crate::gate::{self, FilterState};
use crate::handle::Namespace;
use crate::namespace::{NamespaceConfig, StyleOverride};
use crate::registry::Registry;

/// Sink used by [`Dlog::new`].
pub type StdioWriter = ConsoleWriter<Stdout, Stderr>;

pub(crate) struct State<S> {
    registry: Registry,
    filter: FilterState,
    stack_trace: bool,
    sink: S,
}

impl<S: ConsoleSink> State<S> {
    fn new(sink: S) -> Self {
        Self {
            registry: Registry::new(),
            filter: FilterState::new(),
            stack_trace: false,
            sink,
        }
    }

    /// Runs the gate for `name`, writing the allow-list notice if due.
    fn gate(&mut self, name: &str) -> bool {
        let decision = self.filter.evaluate(&self.registry, name);
        if let Some(message) = decision.notice {
            emit::notice(&mut self.sink, &gate::notice_style(), &message);
        }
        decision.emit
    }

    fn dispatch(&mut self, channel: Channel, name: &str, args: &[&dyn fmt::Display]) {
        self.registry.ensure(name, None);
        if !self.gate(name) {
            return;
        }
        let style = &self.registry.get(name).style;
        emit::emit(&mut self.sink, channel, name, style, args, self.stack_trace);
    }

    fn apply(&mut self, config: &DlogConfig) {
        self.filter.set_silenced(config.silenced);
        self.filter.set_allow_list(config.allow_list.iter().cloned());
        self.registry.set_color_usage(config.use_color);
        self.registry.set_fallback_color(config.fallback_color.clone());
        if self.registry.colors().palette() != config.palette.as_slice() {
            self.registry.set_palette(config.palette.iter().cloned());
        }
        self.stack_trace = config.stack_trace;
    }

    fn snapshot(&self) -> DlogConfig {
        DlogConfig {
            silenced: self.filter.is_silenced(),
            allow_list: self.filter.allow_list().to_vec(),
            use_color: self.registry.uses_color(),
            fallback_color: self.registry.fallback_color().to_owned(),
            palette: self.registry.colors().palette().to_vec(),
            stack_trace: self.stack_trace,
        }
    }
}

/// Namespaced console logger.
///
/// A `Dlog` owns a namespace registry, global filter flags, and the sink that
/// receives permitted records. Clones and the [`Namespace`] handles derived
/// from it share that state, so configuration changes made through any of
/// them are seen by all.
///
/// All operations are total. A call made while another call on the same
/// logger is still running (for example from an argument's `Display`
/// implementation) is discarded.
///
/// # Examples
///
/// ```
/// use dlog::{CaptureSink, Dlog};
///
/// let capture = CaptureSink::new();
/// let logger = Dlog::with_sink(capture.clone());
/// let debug = logger.namespace("debug");
///
/// debug.log(&[&"visible"]);
/// logger.set_global_silence(true);
/// debug.log(&[&"hidden"]);
///
/// assert_eq!(capture.lines(), vec!["debug: visible"]);
/// ```
pub struct Dlog<S = StdioWriter> {
    state: Rc<RefCell<State<S>>>,
}

impl Dlog<StdioWriter> {
    /// Creates a logger writing to the process's stdout and stderr.
    #[must_use]
    pub fn new() -> Self {
        Self::with_sink(ConsoleWriter::stdio())
    }
}

impl Default for Dlog<StdioWriter> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Clone for Dlog<S> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<S: ConsoleSink> Dlog<S> {
    /// Creates a logger writing to `sink`, seeded with the inactive
    /// `default` namespace.
    pub fn with_sink(sink: S) -> Self {
        Self {
            state: Rc::new(RefCell::new(State::new(sink))),
        }
    }

    /// Creates a logger writing to `sink` and applies `config`.
    pub fn with_config(sink: S, config: &DlogConfig) -> Self {
        let logger = Self::with_sink(sink);
        logger.apply(config);
        logger
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut State<S>) -> R) -> Option<R> {
        match self.state.try_borrow_mut() {
            Ok(mut state) => Some(f(&mut state)),
            Err(_) => {
                diag!(warn, "dlog::gate", "re-entrant logger call dropped");
                None
            }
        }
    }

    /// Returns a handle for `name`, creating the namespace on first use.
    pub fn namespace(&self, name: impl Into<String>) -> Namespace<S> {
        let name = name.into();
        self.with_state(|state| {
            state.registry.ensure(&name, None);
        });
        Namespace::new(name, self.clone())
    }

    /// Returns a handle for `name`, creating the namespace with `style` on
    /// first use. The style is ignored when the namespace already exists.
    pub fn namespace_with_style(&self, name: impl Into<String>, style: StyleOverride) -> Namespace<S> {
        let name = name.into();
        self.with_state(|state| {
            state.registry.ensure(&name, Some(&style));
        });
        Namespace::new(name, self.clone())
    }

    pub(crate) fn dispatch(&self, channel: Channel, name: &str, args: &[&dyn fmt::Display]) {
        self.with_state(|state| state.dispatch(channel, name, args));
    }

    /// Marks every namespace inactive. Silence and the allow-list are kept.
    pub fn deactivate_all(&self) {
        self.with_state(|state| state.registry.deactivate_all());
    }

    /// Activates a registered namespace; returns `false` if it is unknown.
    pub fn activate(&self, name: &str) -> bool {
        self.with_state(|state| state.registry.set_active(name, true))
            .unwrap_or(false)
    }

    /// Deactivates a registered namespace; returns `false` if it is unknown.
    pub fn deactivate(&self, name: &str) -> bool {
        self.with_state(|state| state.registry.set_active(name, false))
            .unwrap_or(false)
    }

    /// Suppresses (or restores) all output. Active flags are untouched.
    pub fn set_global_silence(&self, silenced: bool) {
        self.with_state(|state| state.filter.set_silenced(silenced));
    }

    /// Reports whether all output is suppressed.
    pub fn is_silenced(&self) -> bool {
        self.with_state(|state| state.filter.is_silenced())
            .unwrap_or(false)
    }

    /// Replaces the allow-list; an empty list turns allow-list filtering off.
    pub fn set_allow_list<I, T>(&self, names: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.with_state(|state| state.filter.set_allow_list(names));
    }

    /// Returns the allow-list.
    pub fn allow_list(&self) -> Vec<String> {
        self.with_state(|state| state.filter.allow_list().to_vec())
            .unwrap_or_default()
    }

    /// Enables or disables palette colors for namespaces created afterwards.
    pub fn set_color_usage(&self, use_color: bool) {
        self.with_state(|state| state.registry.set_color_usage(use_color));
    }

    /// Sets the color given to new namespaces while palette colors are off.
    pub fn set_fallback_color(&self, color: impl Into<String>) {
        let color = color.into();
        self.with_state(|state| state.registry.set_fallback_color(color));
    }

    /// Replaces the palette and restarts the color rotation.
    pub fn set_palette<I, T>(&self, palette: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.with_state(|state| state.registry.set_palette(palette));
    }

    /// Appends a short stack excerpt after each emitted record when enabled.
    pub fn set_stack_trace(&self, enabled: bool) {
        self.with_state(|state| state.stack_trace = enabled);
    }

    /// Runs the gate for `name`.
    ///
    /// The first evaluation against a non-empty allow-list writes the
    /// allow-list notice, exactly as a log call would.
    pub fn should_emit(&self, name: &str) -> bool {
        self.with_state(|state| state.gate(name)).unwrap_or(false)
    }

    /// Returns the configuration `name` resolves to, `default` if unknown.
    pub fn config(&self, name: &str) -> NamespaceConfig {
        self.with_state(|state| state.registry.get(name).clone())
            .unwrap_or_else(NamespaceConfig::seeded_default)
    }

    /// Reports whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.with_state(|state| state.registry.contains(name))
            .unwrap_or(false)
    }

    /// Registered namespace names, sorted, `default` included.
    pub fn names(&self) -> Vec<String> {
        self.with_state(|state| state.registry.names())
            .unwrap_or_default()
    }

    /// Applies every setting in `config`.
    ///
    /// The palette rotation only restarts when the palette actually changes.
    pub fn apply(&self, config: &DlogConfig) {
        self.with_state(|state| state.apply(config));
    }

    /// Captures the current settings.
    pub fn snapshot(&self) -> DlogConfig {
        self.with_state(|state| state.snapshot()).unwrap_or_default()
    }

    /// Runs `f` against the sink.
    pub fn with_sink_mut<R>(&self, f: impl FnOnce(&mut S) -> R) -> Option<R> {
        self.with_state(|state| f(&mut state.sink))
    }

    /// Flushes the sink.
    pub fn flush(&self) -> io::Result<()> {
        self.with_state(|state| state.sink.flush())
            .unwrap_or(Ok(()))
    }
}

impl<S> fmt::Debug for Dlog<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Dlog");
        if let Ok(state) = self.state.try_borrow() {
            debug
                .field("namespaces", &state.registry.len())
                .field("silenced", &state.filter.is_silenced())
                .field("allow_list", &state.filter.allow_list())
                .field("stack_trace", &state.stack_trace);
        }
        debug.finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use dlog_sink::CaptureSink;

    use super::*;

    #[test]
    fn clones_share_state() {
        let logger = Dlog::with_sink(CaptureSink::new());
        let other = logger.clone();
        other.namespace("shared");
        assert!(logger.contains("shared"));
        other.set_global_silence(true);
        assert!(logger.is_silenced());
    }

    #[test]
    fn snapshot_reflects_setters() {
        let logger = Dlog::with_sink(CaptureSink::new());
        logger.set_global_silence(true);
        logger.set_allow_list(["a"]);
        logger.set_color_usage(false);
        logger.set_fallback_color("gray");
        logger.set_stack_trace(true);
        let config = logger.snapshot();
        assert!(config.silenced);
        assert_eq!(config.allow_list, vec!["a"]);
        assert!(!config.use_color);
        assert_eq!(config.fallback_color, "gray");
        assert!(config.stack_trace);
    }

    #[test]
    fn apply_keeps_rotation_when_palette_is_unchanged() {
        let logger = Dlog::with_sink(CaptureSink::new());
        logger.namespace("first");
        logger.apply(&DlogConfig::default());
        logger.namespace("second");
        assert_eq!(logger.config("second").style.color(), "#CC3300");
    }

    #[test]
    fn debug_output_summarizes_state() {
        let logger = Dlog::with_sink(CaptureSink::new());
        let rendered = format!("{logger:?}");
        assert!(rendered.contains("namespaces: 1"));
    }
}
