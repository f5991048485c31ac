#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/dlog/src/lib.rs
//!
//! # Overview
//!
//! `dlog` is a namespaced console logger. Callers obtain a [`Namespace`]
//! handle from a [`Dlog`] context and log through it; each call passes a
//! filter gate before anything reaches the console. Namespaces carry their
//! own active flag and display style, and the context adds a global silence
//! switch and an optional allow-list of namespaces to show exclusively.
//!
//! # Design
//!
//! - [`Registry`] maps names to [`NamespaceConfig`] values, creating entries
//!   on first use with a color drawn from a rotating [`ColorAssigner`]. The
//!   reserved `default` entry is inactive and answers lookups for unknown
//!   names.
//! - [`FilterState`] evaluates global silence, then the allow-list, then the
//!   namespace's active flag. The first evaluation against a non-empty
//!   allow-list produces a one-time notice naming the allowed namespaces.
//! - [`Dlog`] owns the registry, the filter state, and a
//!   [`ConsoleSink`]. Clones and handles share that state.
//! - [`DlogConfig`] captures the adjustable settings and parses the `DLOG`
//!   directive syntax.
//!
//! # Invariants
//!
//! - Blank names never create registry entries.
//! - Global silence suppresses everything, including the allow-list notice.
//! - A non-empty allow-list decides emission on its own, overriding active
//!   flags in both directions.
//! - Error-channel output is never styled.
//!
//! # Errors
//!
//! Logging operations never fail; sink errors are discarded. Only
//! configuration parsing reports [`DlogError`].
//!
//! # Examples
//!
//! ```
//! use dlog::{CaptureSink, Dlog, StyleOverride, dlog};
//!
//! let capture = CaptureSink::new();
//! let logger = Dlog::with_sink(capture.clone());
//! let info = logger.namespace_with_style("info", StyleOverride::color("green"));
//! let debug = logger.namespace("debug");
//!
//! dlog!(info, "starting", 3, "workers");
//! logger.set_allow_list(["debug"]);
//! dlog!(info, "hidden by the allow-list");
//! dlog!(debug, "shown");
//!
//! assert_eq!(
//!     capture.lines(),
//!     vec![
//!         "info: starting 3 workers",
//!         r#"Showing logs for ["debug"] only."#,
//!         "debug: shown",
//!     ]
//! );
//! ```

#[macro_use]
mod macros;

mod config;
mod context;
mod emit;
mod error;
mod gate;
mod handle;
mod namespace;
mod palette;
mod registry;
mod stack;
#[cfg(feature = "tracing")]
mod tracing_sink;

pub use config::{DlogConfig, ENV_VAR};
pub use context::{Dlog, StdioWriter};
pub use error::DlogError;
pub use gate::{FilterState, GateDecision, NOTICE_COLOR, notice_style, notice_text};
pub use handle::Namespace;
pub use namespace::{
    DEFAULT_ENTRY_SIZE, DEFAULT_FALLBACK_COLOR, DEFAULT_NAMESPACE, DEFAULT_SIZE, NamespaceConfig,
    StyleOverride,
};
pub use palette::{ColorAssigner, DEFAULT_PALETTE};
pub use registry::Registry;
pub use stack::{MAX_STACK_FRAMES, capture_excerpt, excerpt_frames};
#[cfg(feature = "tracing")]
pub use tracing_sink::TracingSink;

pub use dlog_sink::{
    CaptureSink, Channel, ColorToken, ConsoleSink, ConsoleWriter, Emission, Style, StyleError,
};
