use std::fmt;
use std::io::{self, Stderr, Stdout, Write};

use is_terminal::IsTerminal;

use crate::sink::{Channel, ConsoleSink, render_args};
use crate::style::Style;

/// Terminal sink that renders records into a pair of [`io::Write`] targets.
///
/// Standard-channel records go to the `stdout` writer and error-channel
/// records to the `stderr` writer, one line per record. When color is
/// enabled the `"<namespace>:"` prefix of standard records is wrapped in the
/// ANSI style derived from the namespace color; error records are always
/// written without styling.
///
/// # Examples
///
/// Collect output into in-memory buffers:
///
/// ```
/// use dlog_sink::{ConsoleSink, ConsoleWriter, Style};
///
/// let mut writer = ConsoleWriter::new(Vec::new(), Vec::new());
/// let style = Style::new("#007ACC", "8pt");
///
/// writer.write_standard("debug:", Some(&style), &[&"ready", &3])?;
/// writer.write_error("error:", &[&"failed"])?;
///
/// let (stdout, stderr) = writer.into_inner();
/// assert_eq!(stdout, b"debug: ready 3\n");
/// assert_eq!(stderr, b"error: failed\n");
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Clone)]
pub struct ConsoleWriter<O, E> {
    stdout: O,
    stderr: E,
    use_color: bool,
}

impl ConsoleWriter<Stdout, Stderr> {
    /// Creates a writer over the process's standard streams.
    ///
    /// Color is enabled only when standard output is a terminal.
    #[must_use]
    pub fn stdio() -> Self {
        let stdout = io::stdout();
        let use_color = stdout.is_terminal();
        Self::with_color(stdout, io::stderr(), use_color)
    }
}

impl Default for ConsoleWriter<Stdout, Stderr> {
    fn default() -> Self {
        Self::stdio()
    }
}

impl<O, E> ConsoleWriter<O, E> {
    /// Creates a writer that emits plain text.
    #[must_use]
    pub fn new(stdout: O, stderr: E) -> Self {
        Self::with_color(stdout, stderr, false)
    }

    /// Creates a writer with an explicit color setting.
    #[must_use]
    pub fn with_color(stdout: O, stderr: E, use_color: bool) -> Self {
        Self {
            stdout,
            stderr,
            use_color,
        }
    }

    /// Reports whether standard records are rendered with ANSI styles.
    #[must_use]
    pub const fn uses_color(&self) -> bool {
        self.use_color
    }

    /// Enables or disables ANSI styling for subsequent writes.
    pub fn set_color(&mut self, use_color: bool) {
        self.use_color = use_color;
    }

    /// Borrows the standard-output writer.
    #[must_use]
    pub fn stdout(&self) -> &O {
        &self.stdout
    }

    /// Borrows the error-output writer.
    #[must_use]
    pub fn stderr(&self) -> &E {
        &self.stderr
    }

    /// Consumes the sink and returns both writers.
    #[must_use]
    pub fn into_inner(self) -> (O, E) {
        (self.stdout, self.stderr)
    }
}

impl<O, E> ConsoleWriter<O, E>
where
    O: Write,
    E: Write,
{
    fn write_styled(&mut self, style: Option<&Style>, text: &str) -> io::Result<()> {
        match style {
            Some(style) if self.use_color => {
                let ansi = style.ansi();
                write!(self.stdout, "{}{}{}", ansi.render(), text, ansi.render_reset())
            }
            _ => self.stdout.write_all(text.as_bytes()),
        }
    }
}

impl<O, E> ConsoleSink for ConsoleWriter<O, E>
where
    O: Write,
    E: Write,
{
    fn write_standard(
        &mut self,
        prefix: &str,
        style: Option<&Style>,
        args: &[&dyn fmt::Display],
    ) -> io::Result<()> {
        self.write_styled(style, prefix)?;
        let text = render_args(args);
        if !prefix.is_empty() && !text.is_empty() {
            self.stdout.write_all(b" ")?;
        }
        self.stdout.write_all(text.as_bytes())?;
        self.stdout.write_all(b"\n")
    }

    fn write_error(&mut self, prefix: &str, args: &[&dyn fmt::Display]) -> io::Result<()> {
        let text = render_args(args);
        if text.is_empty() {
            writeln!(self.stderr, "{prefix}")
        } else {
            writeln!(self.stderr, "{prefix} {text}")
        }
    }

    fn write_notice(&mut self, style: &Style, message: &str) -> io::Result<()> {
        self.write_styled(Some(style), message)?;
        self.stdout.write_all(b"\n")
    }

    fn write_trace(&mut self, channel: Channel, frames: &[String]) -> io::Result<()> {
        let target: &mut dyn Write = match channel {
            Channel::Standard => &mut self.stdout,
            Channel::Error => &mut self.stderr,
        };
        for frame in frames {
            writeln!(target, "    at {frame}")?;
        }
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()?;
        self.stderr.flush()
    }
}

impl<O, E> fmt::Debug for ConsoleWriter<O, E>
where
    O: fmt::Debug,
    E: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleWriter")
            .field("stdout", &self.stdout)
            .field("stderr", &self.stderr)
            .field("use_color", &self.use_color)
            .finish()
    }
}
