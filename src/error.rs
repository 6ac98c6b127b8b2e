#![forbid(unsafe_code)]

//! Error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by `App::run`
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// No handler matched and no fallback is configured
    #[error("no handler for command '{command}' and no fallback configured")]
    NoHandler { command: String },
}

/// Errors loading a command definition file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read definition '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse definition: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid definition: {0}")]
    Invalid(String),
}
