use std::ffi::OsString;
use std::fmt;
use std::io::Write;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use dlog::{Dlog, DlogConfig, DlogError, StyleOverride, TracingSink, dlog, dlog_error};
use dlog_sink::{ColorToken, ConsoleSink, ConsoleWriter};

/// Exit status for configuration errors.
const EXIT_CONFIG: u8 = 1;
/// Exit status for command-line usage errors.
const EXIT_USAGE: u8 = 2;

/// Replays the dlog sample scenario.
///
/// Settings come from the `DLOG` environment variable, then `--config`, then
/// the individual flags.
#[derive(Parser, Debug)]
#[command(name = "dlog-demo")]
#[command(version)]
pub struct Cli {
    /// Suppress all namespace output.
    #[arg(long)]
    pub silent: bool,

    /// Show only this namespace (repeatable).
    #[arg(long = "only", value_name = "NS")]
    pub only: Vec<String>,

    /// When to color the namespace prefix.
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Color for namespaces created while palette colors are off.
    #[arg(long, value_name = "C")]
    pub fallback_color: Option<String>,

    /// Append a short stack excerpt after each record.
    #[arg(long)]
    pub trace: bool,

    /// Route namespace output into tracing events instead of the console.
    #[arg(long)]
    pub tracing: bool,

    /// Directive string applied after `DLOG`, e.g. "only=debug;trace".
    #[arg(long, value_name = "DIRECTIVES")]
    pub config: Option<String>,
}

/// Terminal coloring policy.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum ColorChoice {
    /// Color when stdout is a terminal.
    #[default]
    Auto,
    /// Always color.
    Always,
    /// Never color.
    Never,
}

impl ColorChoice {
    const fn resolve(self, terminal: bool) -> bool {
        match self {
            Self::Auto => terminal,
            Self::Always => true,
            Self::Never => false,
        }
    }
}

impl Cli {
    /// Layers `--config` and the flags over `base`.
    pub fn settings(&self, mut base: DlogConfig) -> Result<DlogConfig, DlogError> {
        if let Some(directives) = &self.config {
            base.apply_directives(directives)?;
        }
        if self.silent {
            base.silenced = true;
        }
        if !self.only.is_empty() {
            base.allow_list = self.only.clone();
        }
        if let Some(color) = &self.fallback_color {
            color.parse::<ColorToken>()?;
            base.fallback_color = color.clone();
        }
        if self.trace {
            base.stack_trace = true;
        }
        Ok(base)
    }
}

struct Payload {
    stuff1: bool,
    num_value: u32,
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ stuff1: {}, numValue: {} }}", self.stuff1, self.num_value)
    }
}

/// Runs the sample scenario against `logger`.
///
/// Global silence is restored to its configured value after the silence
/// step, so `--silent` keeps the whole run quiet.
pub fn run_scenario<S: ConsoleSink>(logger: &Dlog<S>) {
    let debug = logger.namespace_with_style("debug", StyleOverride::color("#007ACC"));
    let error = logger.namespace_with_style("error", StyleOverride::color("#CC3300"));
    let info = logger.namespace_with_style("info", StyleOverride::color("#33CC33"));

    dlog!(debug, "Debugging the new feature.");
    dlog_error!(error, "Error encountered while processing.");
    dlog!(info, "Information: Process started.");

    let configured_silence = logger.is_silenced();
    logger.set_global_silence(true);
    dlog!(debug, "This debug message should not appear due to global silence.");
    dlog_error!(error, "This error message should also not appear due to global silence.");
    logger.set_global_silence(configured_silence);

    debug.deactivate();
    dlog!(debug, "This debug message should not appear as the debug namespace is deactivated.");

    logger.deactivate_all();
    dlog!(info, "This info message should not appear as all namespaces are deactivated.");

    error.activate();
    dlog_error!(
        error,
        "This error message should appear even after deactivating all namespaces, as the error namespace was reactivated."
    );

    let module1 = logger.namespace("module1");
    dlog!(module1, "someFunc is doing some stuff here", 50);
    dlog!(
        module1,
        "someFunc2 is doing stuff here...",
        Payload {
            stuff1: true,
            num_value: 25,
        }
    );

    let inline = logger.namespace("InlineModule");
    dlog!(inline, "This is from an inline call to dlog", "With additional args");
}

/// Parses `args`, builds a logger writing to `stdout`/`stderr`, and runs the
/// scenario.
///
/// `base` is the configuration read from the environment and `terminal`
/// tells whether the real stdout is a terminal, for `--color auto`.
#[must_use]
pub fn run_with<I, O, E>(
    args: I,
    base: Result<DlogConfig, DlogError>,
    terminal: bool,
    stdout: &mut O,
    stderr: &mut E,
) -> ExitCode
where
    I: IntoIterator,
    I::Item: Into<OsString> + Clone,
    O: Write,
    E: Write,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) if error.use_stderr() => {
            let _ = write!(stderr, "{error}");
            return ExitCode::from(EXIT_USAGE);
        }
        Err(error) => {
            let _ = write!(stdout, "{error}");
            return ExitCode::SUCCESS;
        }
    };

    let settings = match base.and_then(|base| cli.settings(base)) {
        Ok(settings) => settings,
        Err(error) => {
            let _ = writeln!(stderr, "dlog-demo: {error}");
            return ExitCode::from(EXIT_CONFIG);
        }
    };
    tracing::debug!(settings = %settings, "starting scenario");

    if cli.tracing {
        let logger = Dlog::with_config(TracingSink::new(), &settings);
        run_scenario(&logger);
    } else {
        let use_color = cli.color.resolve(terminal);
        let writer = ConsoleWriter::with_color(&mut *stdout, &mut *stderr, use_color);
        let logger = Dlog::with_config(writer, &settings);
        run_scenario(&logger);
        if let Err(error) = logger.flush() {
            tracing::warn!(%error, "flush failed");
        }
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(args: &[&str], base: Result<DlogConfig, DlogError>) -> (ExitCode, String, String) {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let mut argv = vec!["dlog-demo"];
        argv.extend_from_slice(args);
        let code = run_with(argv, base, false, &mut stdout, &mut stderr);
        (
            code,
            String::from_utf8(stdout).expect("utf-8"),
            String::from_utf8(stderr).expect("utf-8"),
        )
    }

    #[test]
    fn default_run_replays_scenario() {
        let (code, stdout, stderr) = run(&[], Ok(DlogConfig::default()));
        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(
            stdout,
            "debug: Debugging the new feature.\n\
             info: Information: Process started.\n\
             module1: someFunc is doing some stuff here 50\n\
             module1: someFunc2 is doing stuff here... { stuff1: true, numValue: 25 }\n\
             InlineModule: This is from an inline call to dlog With additional args\n"
        );
        assert_eq!(
            stderr,
            "error: Error encountered while processing.\n\
             error: This error message should appear even after deactivating all namespaces, as the error namespace was reactivated.\n"
        );
    }

    #[test]
    fn silent_run_prints_nothing() {
        let (code, stdout, stderr) = run(&["--silent"], Ok(DlogConfig::default()));
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(stdout.is_empty());
        assert!(stderr.is_empty());
    }

    #[test]
    fn only_flag_announces_allow_list() {
        let (_, stdout, stderr) = run(&["--only", "module1"], Ok(DlogConfig::default()));
        let mut lines = stdout.lines();
        assert_eq!(lines.next(), Some(r#"Showing logs for ["module1"] only."#));
        assert!(lines.all(|line| line.starts_with("module1:")));
        assert!(stderr.is_empty());
    }

    #[test]
    fn flags_override_base_config() {
        let base = DlogConfig::parse("silent only=info").expect("valid");
        let cli = Cli::try_parse_from(["dlog-demo", "--config", "silent=off", "--only", "error"])
            .expect("valid args");
        let settings = cli.settings(base).expect("valid settings");
        assert!(!settings.silenced);
        assert_eq!(settings.allow_list, vec!["error"]);
    }

    #[test]
    fn bad_directive_exits_with_config_error() {
        let (code, stdout, stderr) = run(&["--config", "loud"], Ok(DlogConfig::default()));
        assert_eq!(code, ExitCode::from(EXIT_CONFIG));
        assert!(stdout.is_empty());
        assert!(stderr.contains("unknown directive `loud`"));
    }

    #[test]
    fn bad_fallback_color_exits_with_config_error() {
        let (code, _, stderr) = run(&["--fallback-color", "#zz"], Ok(DlogConfig::default()));
        assert_eq!(code, ExitCode::from(EXIT_CONFIG));
        assert!(stderr.contains("#zz"));
    }

    #[test]
    fn base_config_error_is_reported() {
        let base = DlogConfig::parse("nonsense");
        let (code, _, stderr) = run(&[], base);
        assert_eq!(code, ExitCode::from(EXIT_CONFIG));
        assert!(stderr.starts_with("dlog-demo: "));
    }

    #[test]
    fn unknown_flag_is_usage_error() {
        let (code, stdout, stderr) = run(&["--definitely-invalid"], Ok(DlogConfig::default()));
        assert_eq!(code, ExitCode::from(EXIT_USAGE));
        assert!(stdout.is_empty());
        assert!(!stderr.is_empty());
    }

    #[test]
    fn help_goes_to_stdout() {
        let (code, stdout, stderr) = run(&["--help"], Ok(DlogConfig::default()));
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(stdout.contains("--only"));
        assert!(stderr.is_empty());
    }

    #[test]
    fn color_choice_resolution() {
        assert!(ColorChoice::Auto.resolve(true));
        assert!(!ColorChoice::Auto.resolve(false));
        assert!(ColorChoice::Always.resolve(false));
        assert!(!ColorChoice::Never.resolve(true));
    }
}
