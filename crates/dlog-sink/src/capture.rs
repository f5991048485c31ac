//! crates/dlog-sink/src/capture.rs
//! In-memory sink that records every emission for later inspection.

use std::cell::RefCell;
use std::fmt;
use std::io;
use std::rc::Rc;

use crate::sink::{Channel, ConsoleSink, render_args};
use crate::style::Style;

/// A single record observed by a [`CaptureSink`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Emission {
    /// Record written to the standard channel.
    Standard {
        /// The `"<namespace>:"` prefix.
        prefix: String,
        /// The CSS-like style string, when the record was styled.
        style: Option<String>,
        /// Arguments joined with single spaces.
        text: String,
    },
    /// Record written to the error channel.
    Error {
        /// The `"<namespace>:"` prefix.
        prefix: String,
        /// Arguments joined with single spaces.
        text: String,
    },
    /// Informational notice not tied to a namespace.
    Notice {
        /// The CSS-like style string.
        style: String,
        /// The notice text.
        message: String,
    },
    /// Call-stack frames appended after a record.
    Trace {
        /// Channel the frames were written to.
        channel: Channel,
        /// Frame descriptions, innermost first.
        frames: Vec<String>,
    },
}

impl Emission {
    /// Returns the channel this emission was written to.
    #[must_use]
    pub const fn channel(&self) -> Channel {
        match self {
            Self::Standard { .. } | Self::Notice { .. } => Channel::Standard,
            Self::Error { .. } => Channel::Error,
            Self::Trace { channel, .. } => *channel,
        }
    }

    /// Returns the prefix of a namespace record.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        match self {
            Self::Standard { prefix, .. } | Self::Error { prefix, .. } => Some(prefix),
            Self::Notice { .. } | Self::Trace { .. } => None,
        }
    }

    /// Renders the emission the way a plain-text console would show it.
    #[must_use]
    pub fn line(&self) -> String {
        match self {
            Self::Standard { prefix, text, .. } | Self::Error { prefix, text } => {
                if text.is_empty() {
                    prefix.clone()
                } else {
                    format!("{prefix} {text}")
                }
            }
            Self::Notice { message, .. } => message.clone(),
            Self::Trace { frames, .. } => frames
                .iter()
                .map(|frame| format!("    at {frame}"))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// Sink that stores emissions in a shared buffer.
///
/// Clones share the same buffer, so a test can hand one clone to the logger
/// and keep another to [`drain`](Self::drain) what was written.
///
/// # Examples
///
/// ```
/// use dlog_sink::{CaptureSink, ConsoleSink, Emission};
///
/// let capture = CaptureSink::new();
/// let mut sink = capture.clone();
/// sink.write_error("net:", &[&"timeout", &30])?;
///
/// assert_eq!(
///     capture.drain(),
///     vec![Emission::Error { prefix: "net:".into(), text: "timeout 30".into() }]
/// );
/// assert!(capture.is_empty());
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct CaptureSink {
    events: Rc<RefCell<Vec<Emission>>>,
}

impl CaptureSink {
    /// Creates an empty capture buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns every recorded emission.
    pub fn drain(&self) -> Vec<Emission> {
        self.events.borrow_mut().drain(..).collect()
    }

    /// Returns a copy of the recorded emissions without clearing them.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Emission> {
        self.events.borrow().clone()
    }

    /// Returns the rendered lines of every recorded emission.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.events.borrow().iter().map(Emission::line).collect()
    }

    /// Returns the number of recorded emissions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// Reports whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    fn push(&self, emission: Emission) {
        self.events.borrow_mut().push(emission);
    }
}

impl ConsoleSink for CaptureSink {
    fn write_standard(
        &mut self,
        prefix: &str,
        style: Option<&Style>,
        args: &[&dyn fmt::Display],
    ) -> io::Result<()> {
        self.push(Emission::Standard {
            prefix: prefix.to_owned(),
            style: style.map(Style::css),
            text: render_args(args),
        });
        Ok(())
    }

    fn write_error(&mut self, prefix: &str, args: &[&dyn fmt::Display]) -> io::Result<()> {
        self.push(Emission::Error {
            prefix: prefix.to_owned(),
            text: render_args(args),
        });
        Ok(())
    }

    fn write_notice(&mut self, style: &Style, message: &str) -> io::Result<()> {
        self.push(Emission::Notice {
            style: style.css(),
            message: message.to_owned(),
        });
        Ok(())
    }

    fn write_trace(&mut self, channel: Channel, frames: &[String]) -> io::Result<()> {
        self.push(Emission::Trace {
            channel,
            frames: frames.to_vec(),
        });
        Ok(())
    }
}
