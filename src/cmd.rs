#![forbid(unsafe_code)]

//! Invocation context handed to handlers, and their return value

use crate::args::Args;
use crate::parameter::Parameters;
use serde::Serialize;
use std::fmt;
use std::process::ExitCode;

/// What a single `App::run` resolved: the command name, the positional
/// arguments left after flag extraction, and every extracted parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cmd {
    name: String,
    args: Args,
    parameters: Parameters,
}

impl Cmd {
    pub fn new(name: impl Into<String>, args: Args, parameters: Parameters) -> Self {
        Cmd {
            name: name.into(),
            args,
            parameters,
        }
    }

    /// Command name as resolved before any `before` hook override
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &Args {
        &self.args
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Shorthand for `parameters().is_set(name)`
    pub fn flag(&self, name: &str) -> bool {
        self.parameters.is_set(name)
    }

    /// Shorthand for `parameters().value(name)`
    pub fn value(&self, name: &str) -> Option<&str> {
        self.parameters.value(name)
    }
}

/// Result of a command handler or fallback
///
/// Maps to a process exit status in the binary; the optional message is for
/// callers that want to report something alongside the code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExitValue {
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ExitValue {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;

    pub fn success() -> Self {
        Self::from_code(Self::SUCCESS)
    }

    pub fn failure(code: i32) -> Self {
        Self::from_code(code)
    }

    pub fn from_code(code: i32) -> Self {
        ExitValue {
            code,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.code == Self::SUCCESS
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl Default for ExitValue {
    fn default() -> Self {
        Self::success()
    }
}

impl fmt::Display for ExitValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{} (exit {})", message, self.code),
            None => write!(f, "exit {}", self.code),
        }
    }
}

impl From<ExitValue> for ExitCode {
    /// Codes outside `0..=255` are reported as a generic failure
    fn from(value: ExitValue) -> Self {
        match u8::try_from(value.code) {
            Ok(code) => ExitCode::from(code),
            Err(_) => ExitCode::FAILURE,
        }
    }
}
