//! Inspector CLI: argument parsing and the `run`, `describe` and `check`
//! subcommands

pub mod args;
pub mod inspect;

// Re-export types for convenient access
pub use args::{Cli, ColorChoice, Command, OutputFormat};
pub use inspect::run_cli;
