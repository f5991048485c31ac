//! crates/dlog/src/error.rs
//! Errors raised while building a configuration.

use std::env::VarError;

use dlog_sink::StyleError;
use thiserror::Error;

/// Failure to parse logger directives.
#[derive(Debug, Error)]
pub enum DlogError {
    /// The directive name is not recognised.
    #[error("unknown directive `{0}`")]
    UnknownDirective(String),

    /// The directive requires a `=value` part.
    #[error("directive `{0}` requires a value")]
    MissingValue(String),

    /// A switch value other than on/off/true/false/yes/no/1/0.
    #[error("invalid value `{value}` for `{directive}`: expected on or off")]
    InvalidSwitch {
        /// Directive name.
        directive: String,
        /// Rejected value.
        value: String,
    },

    /// A double quote that is unterminated or not around a whole item.
    #[error("malformed quoted value `{0}`")]
    MalformedQuote(String),

    /// A color token that cannot be parsed.
    #[error(transparent)]
    InvalidColor(#[from] StyleError),

    /// The `DLOG` variable is set but not valid Unicode.
    #[error("cannot read DLOG: {0}")]
    Environment(#[source] VarError),
}
