#![deny(unsafe_code)]

#[path = "demo.rs"]
mod demo;

use std::{env, io, process::ExitCode};

use dlog::DlogConfig;
use is_terminal::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "warn,dlog=info";

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let terminal = io::stdout().is_terminal();
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    demo::run_with(
        env::args_os(),
        DlogConfig::from_env(),
        terminal,
        &mut stdout,
        &mut stderr,
    )
}
