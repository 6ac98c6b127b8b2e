#![forbid(unsafe_code)]

//! JSONL output formatter for machine-readable output
//!
//! An app description is written as one JSON object per line, in
//! registration order:
//! 1. One app record
//! 2. All global flag records
//! 3. All command records, each carrying its scoped flags
//!
//! A dispatched invocation is a single record.

use crate::app::{App, DefaultCommandPolicy};
use crate::cmd::Cmd;
use crate::flag::Flag;
use crate::parameter::Parameters;
use serde::Serialize;

/// JSONL output formatter
pub struct JsonlFormatter;

impl JsonlFormatter {
    pub fn new() -> Self {
        JsonlFormatter
    }

    /// Describe the registry of `app`
    pub fn format_app(&self, app: &App) -> String {
        let mut output = String::new();

        push_record(
            &mut output,
            &AppRecord {
                record_type: "app",
                version: app.version(),
                default_command: app.default_command(),
                default_policy: app.default_policy(),
                commands: app.commands().count(),
                flags: app.flags().count(),
            },
        );

        for flag in app.flags() {
            push_record(
                &mut output,
                &FlagRecord {
                    record_type: "flag",
                    flag,
                },
            );
        }

        for command in app.commands() {
            push_record(
                &mut output,
                &CommandRecord {
                    record_type: "command",
                    name: command.name(),
                    help: command.help_text(),
                    flags: command.flags().collect(),
                },
            );
        }

        output
    }

    /// Describe one dispatched invocation
    ///
    /// `resolved` is the command whose handler ran, which differs from
    /// `cmd.name()` after a `before` hook redirect.
    pub fn format_invocation(&self, cmd: &Cmd, resolved: &str) -> String {
        let mut output = String::new();
        push_record(
            &mut output,
            &InvocationRecord {
                record_type: "invocation",
                command: resolved,
                invoked_as: cmd.name(),
                args: cmd.args().as_slice(),
                parameters: cmd.parameters(),
            },
        );
        output
    }
}

impl Default for JsonlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn push_record<T: Serialize>(output: &mut String, record: &T) {
    if let Ok(json) = serde_json::to_string(record) {
        output.push_str(&json);
        output.push('\n');
    }
}

/// App record for JSONL output
#[derive(Debug, Serialize)]
struct AppRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    version: Option<&'a str>,
    default_command: Option<&'a str>,
    default_policy: DefaultCommandPolicy,
    commands: usize,
    flags: usize,
}

/// Global flag record for JSONL output
#[derive(Debug, Serialize)]
struct FlagRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    #[serde(flatten)]
    flag: &'a Flag,
}

/// Command record for JSONL output
#[derive(Debug, Serialize)]
struct CommandRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    name: &'a str,
    help: Option<&'a str>,
    flags: Vec<&'a Flag>,
}

/// Invocation record for JSONL output
#[derive(Debug, Serialize)]
struct InvocationRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    command: &'a str,
    invoked_as: &'a str,
    args: &'a [String],
    parameters: &'a Parameters,
}
