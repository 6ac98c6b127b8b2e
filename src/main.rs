#![forbid(unsafe_code)]

use clap::Parser;
use std::process::ExitCode;
use subcommander::cli::{self, Cli};
use subcommander::ExitValue;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // stdout carries the inspector's output, so logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    ExitValue::from_code(cli::run_cli(&cli)).into()
}
