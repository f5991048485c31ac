//! crates/dlog/src/tracing_sink.rs
//! Sink that forwards namespace output into `tracing` events.
//!
//! Hosts that already run a `tracing-subscriber` pipeline can pass a
//! [`TracingSink`] to [`Dlog::with_sink`](crate::Dlog::with_sink). Every
//! permitted record becomes an event with target `dlog` and a `namespace`
//! field; standard records are `INFO`, error records are `ERROR`, notices are
//! `INFO` without a namespace, and stack excerpts are `DEBUG`.
//!
//! ```
//! use dlog::{Dlog, TracingSink};
//!
//! let logger = Dlog::with_sink(TracingSink::new());
//! logger.namespace("db").log(&[&"connected"]);
//! ```

use std::fmt;
use std::io;

use dlog_sink::{Channel, ConsoleSink, Style, render_args};

/// [`ConsoleSink`] that emits `tracing` events.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink {
    _private: (),
}

impl TracingSink {
    /// Creates the sink.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

fn namespace_of(prefix: &str) -> &str {
    prefix.strip_suffix(':').unwrap_or(prefix)
}

impl ConsoleSink for TracingSink {
    fn write_standard(
        &mut self,
        prefix: &str,
        style: Option<&Style>,
        args: &[&dyn fmt::Display],
    ) -> io::Result<()> {
        let text = render_args(args);
        let style = style.map(Style::css).unwrap_or_default();
        tracing::info!(target: "dlog", namespace = namespace_of(prefix), style = %style, "{text}");
        Ok(())
    }

    fn write_error(&mut self, prefix: &str, args: &[&dyn fmt::Display]) -> io::Result<()> {
        let text = render_args(args);
        tracing::error!(target: "dlog", namespace = namespace_of(prefix), "{text}");
        Ok(())
    }

    fn write_notice(&mut self, _style: &Style, message: &str) -> io::Result<()> {
        tracing::info!(target: "dlog", "{message}");
        Ok(())
    }

    fn write_trace(&mut self, channel: Channel, frames: &[String]) -> io::Result<()> {
        tracing::debug!(target: "dlog", error_channel = channel.is_error(), frames = ?frames, "stack excerpt");
        Ok(())
    }
}
