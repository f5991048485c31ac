use std::fmt;
use std::io;

use crate::style::Style;

/// Output channel a record is written to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Channel {
    /// Standard output; records may carry a namespace style.
    Standard,
    /// Error output; records are never styled.
    Error,
}

impl Channel {
    /// Reports whether this is the error channel.
    #[must_use]
    pub const fn is_error(self) -> bool {
        matches!(self, Self::Error)
    }
}

/// Destination for namespaced console output.
///
/// A sink receives already-filtered records: the prefix (`"<namespace>:"`),
/// an optional style for the standard channel, and the caller's arguments in
/// the order they were supplied. Sinks format each argument with its
/// [`Display`](fmt::Display) implementation and never reorder or drop them.
pub trait ConsoleSink {
    /// Writes a record to the standard channel.
    fn write_standard(
        &mut self,
        prefix: &str,
        style: Option<&Style>,
        args: &[&dyn fmt::Display],
    ) -> io::Result<()>;

    /// Writes a record to the error channel.
    fn write_error(&mut self, prefix: &str, args: &[&dyn fmt::Display]) -> io::Result<()>;

    /// Writes an informational notice that belongs to no namespace.
    ///
    /// The default implementation forwards to
    /// [`write_standard`](Self::write_standard) with an empty prefix.
    fn write_notice(&mut self, style: &Style, message: &str) -> io::Result<()> {
        self.write_standard("", Some(style), &[&message])
    }

    /// Writes call-stack frames that follow a record on `channel`.
    fn write_trace(&mut self, channel: Channel, frames: &[String]) -> io::Result<()>;

    /// Flushes any buffered output.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<S> ConsoleSink for &mut S
where
    S: ConsoleSink + ?Sized,
{
    fn write_standard(
        &mut self,
        prefix: &str,
        style: Option<&Style>,
        args: &[&dyn fmt::Display],
    ) -> io::Result<()> {
        (**self).write_standard(prefix, style, args)
    }

    fn write_error(&mut self, prefix: &str, args: &[&dyn fmt::Display]) -> io::Result<()> {
        (**self).write_error(prefix, args)
    }

    fn write_notice(&mut self, style: &Style, message: &str) -> io::Result<()> {
        (**self).write_notice(style, message)
    }

    fn write_trace(&mut self, channel: Channel, frames: &[String]) -> io::Result<()> {
        (**self).write_trace(channel, frames)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

impl<S> ConsoleSink for Box<S>
where
    S: ConsoleSink + ?Sized,
{
    fn write_standard(
        &mut self,
        prefix: &str,
        style: Option<&Style>,
        args: &[&dyn fmt::Display],
    ) -> io::Result<()> {
        (**self).write_standard(prefix, style, args)
    }

    fn write_error(&mut self, prefix: &str, args: &[&dyn fmt::Display]) -> io::Result<()> {
        (**self).write_error(prefix, args)
    }

    fn write_notice(&mut self, style: &Style, message: &str) -> io::Result<()> {
        (**self).write_notice(style, message)
    }

    fn write_trace(&mut self, channel: Channel, frames: &[String]) -> io::Result<()> {
        (**self).write_trace(channel, frames)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

/// Joins arguments with single spaces, the way a console prints variadic input.
///
/// Every sink in this crate formats record arguments through this helper.
pub fn render_args(args: &[&dyn fmt::Display]) -> String {
    let mut text = String::new();
    for (index, arg) in args.iter().enumerate() {
        if index > 0 {
            text.push(' ');
        }
        // Writing into a String cannot fail.
        let _ = fmt::write(&mut text, format_args!("{arg}"));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_args_separates_with_spaces() {
        let count = 50;
        let args: [&dyn fmt::Display; 3] = [&"someFunc is doing", &count, &'!'];
        assert_eq!(render_args(&args), "someFunc is doing 50 !");
    }

    #[test]
    fn render_args_handles_empty_input() {
        assert_eq!(render_args(&[]), "");
    }

    #[test]
    fn channel_reports_error() {
        assert!(Channel::Error.is_error());
        assert!(!Channel::Standard.is_error());
    }
}
