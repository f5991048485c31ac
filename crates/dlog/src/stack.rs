//! crates/dlog/src/stack.rs
//! Short call-stack excerpts appended after emitted records.

use std::backtrace::{Backtrace, BacktraceStatus};

/// Upper bound on frames included in an excerpt.
pub const MAX_STACK_FRAMES: usize = 4;

/// Paths whose frames are left out of an excerpt. A path only matches at the
/// start of a segment, so `mydlog::run` is kept.
const SKIPPED_PATHS: [&str; 4] = ["dlog::", "dlog_sink::", "std::backtrace", "backtrace::"];

/// Captures the caller's stack and returns at most [`MAX_STACK_FRAMES`]
/// frames outside the logger itself.
///
/// Returns an empty vector when the platform cannot produce a backtrace.
#[must_use]
pub fn capture_excerpt() -> Vec<String> {
    let backtrace = Backtrace::force_capture();
    if backtrace.status() != BacktraceStatus::Captured {
        diag!(trace, "dlog::emit", "stack capture unavailable");
        return Vec::new();
    }
    excerpt_frames(&backtrace.to_string())
}

/// Extracts frame descriptions from rendered backtrace text.
///
/// Frame header lines look like `  12: crate::module::function`; the
/// indented `at file:line` lines that follow them are ignored.
#[must_use]
pub fn excerpt_frames(rendered: &str) -> Vec<String> {
    rendered
        .lines()
        .filter_map(frame_symbol)
        .filter(|symbol| !is_logger_frame(symbol))
        .take(MAX_STACK_FRAMES)
        .map(str::to_owned)
        .collect()
}

fn frame_symbol(line: &str) -> Option<&str> {
    let (index, symbol) = line.trim_start().split_once(": ")?;
    if index.is_empty() || !index.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    let symbol = symbol.trim();
    (!symbol.is_empty()).then_some(symbol)
}

fn is_logger_frame(symbol: &str) -> bool {
    SKIPPED_PATHS.iter().any(|path| {
        symbol.match_indices(path).any(|(index, _)| {
            symbol[..index]
                .chars()
                .next_back()
                .is_none_or(|c| !(c.is_alphanumeric() || c == '_'))
        })
    })
}
