//! crates/dlog/src/emit.rs
//! Forwards a permitted record to the sink.

use std::fmt;

use dlog_sink::{Channel, ConsoleSink, Style};

use crate::stack;

/// Writes one record for `name` on `channel`.
///
/// Standard records carry `style`; error records are never styled. When
/// `stack_trace` is set a short stack excerpt follows on the same channel.
/// Sink failures are swallowed.
pub(crate) fn emit<S>(
    sink: &mut S,
    channel: Channel,
    name: &str,
    style: &Style,
    args: &[&dyn fmt::Display],
    stack_trace: bool,
) where
    S: ConsoleSink + ?Sized,
{
    let prefix = format!("{name}:");
    let written = match channel {
        Channel::Standard => sink.write_standard(&prefix, Some(style), args),
        Channel::Error => sink.write_error(&prefix, args),
    };
    if let Err(_error) = written {
        diag!(warn, "dlog::emit", namespace = name, error = %_error, "sink write failed");
        return;
    }
    if stack_trace {
        write_frames(sink, channel, name, &stack::capture_excerpt());
    }
}

/// Writes `frames` after a record on `channel`. Nothing is written for an
/// empty excerpt.
fn write_frames<S>(sink: &mut S, channel: Channel, name: &str, frames: &[String])
where
    S: ConsoleSink + ?Sized,
{
    if frames.is_empty() {
        return;
    }
    if let Err(_error) = sink.write_trace(channel, frames) {
        diag!(warn, "dlog::emit", namespace = name, error = %_error, "stack write failed");
    }
}

/// Writes a notice, swallowing sink failures.
pub(crate) fn notice<S>(sink: &mut S, style: &Style, message: &str)
where
    S: ConsoleSink + ?Sized,
{
    if let Err(_error) = sink.write_notice(style, message) {
        diag!(warn, "dlog::emit", error = %_error, "notice write failed");
    }
}
