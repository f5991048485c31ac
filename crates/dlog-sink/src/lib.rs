#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/dlog-sink/src/lib.rs
//!
//! # Overview
//!
//! `dlog-sink` is the output boundary of the `dlog` namespaced logger. The
//! core crate decides *whether* a record is emitted; this crate decides *how*
//! it reaches the console. Records arrive already filtered, carrying the
//! `"<namespace>:"` prefix, an optional [`Style`], and the caller's arguments
//! in order.
//!
//! # Design
//!
//! - [`ConsoleSink`] is the seam between the logger and the host console. It
//!   exposes one method per logical channel plus notices and stack excerpts.
//! - [`ConsoleWriter`] renders records into any pair of [`std::io::Write`]
//!   targets, applying ANSI styles derived from the namespace color when
//!   color is enabled.
//! - [`CaptureSink`] records [`Emission`] values in a shared buffer so tests
//!   and embedders can inspect exactly what was written.
//! - [`Style`] stores the color and size tokens verbatim; [`ColorToken`]
//!   parses the color into an [`anstyle::Color`].
//!
//! # Invariants
//!
//! - Error-channel records are never styled.
//! - Arguments are formatted with [`std::fmt::Display`], joined by single
//!   spaces, and never reordered.
//! - Every record occupies exactly one line on its channel.
//!
//! # Errors
//!
//! Sink operations surface [`std::io::Error`] values from the underlying
//! writers. Color parsing reports [`StyleError`].
//!
//! # Examples
//!
//! ```
//! use dlog_sink::{CaptureSink, ConsoleSink, Emission, Style};
//!
//! let capture = CaptureSink::new();
//! let mut sink = capture.clone();
//! let style = Style::new("#CC3300", "8pt");
//!
//! sink.write_standard("db:", Some(&style), &[&"connected", &"pool=4"])?;
//! assert_eq!(capture.lines(), vec!["db: connected pool=4"]);
//! # Ok::<(), std::io::Error>(())
//! ```

mod capture;
mod sink;
mod style;
mod writer;

pub use capture::{CaptureSink, Emission};
pub use sink::{Channel, ConsoleSink, render_args};
pub use style::{ColorToken, Style, StyleError};
pub use writer::ConsoleWriter;
