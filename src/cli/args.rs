//! Command-line arguments of the `subcommander` inspector

use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Dispatch arguments against a TOML command definition and show what runs
#[derive(Debug, Parser)]
#[command(name = "subcommander", version, about)]
pub struct Cli {
    /// Definition file describing commands and flags
    #[arg(
        short,
        long,
        global = true,
        value_name = "FILE",
        default_value = "subcommander.toml"
    )]
    pub definition: PathBuf,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// When to use colors
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Dispatch ARGS and print the command, positional arguments and flags
    /// that the handler received
    Run {
        /// Arguments as the defined program would receive them
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Print the commands and flags of the definition
    Describe,
    /// Validate the definition file
    Check,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Jsonl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Resolves `Auto` against whether stdout is a terminal
    pub fn to_termcolor(self) -> termcolor::ColorChoice {
        match self {
            ColorChoice::Always => termcolor::ColorChoice::Always,
            ColorChoice::Never => termcolor::ColorChoice::Never,
            ColorChoice::Auto if std::io::stdout().is_terminal() => termcolor::ColorChoice::Auto,
            ColorChoice::Auto => termcolor::ColorChoice::Never,
        }
    }
}
