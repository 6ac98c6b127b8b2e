#![forbid(unsafe_code)]

//! TOML definitions of an app's commands and flags
//!
//! A definition describes the registry declaratively so an [`App`] can be
//! built without code:
//!
//! ```toml
//! name = "tool"
//! version = "1.2.0"
//! default_command = "help"
//! default_policy = "when-unmatched"
//!
//! [redirect]
//! compile = "build"
//!
//! [[flags]]
//! long = "verbose"
//! short = "v"
//!
//! [[commands]]
//! name = "build"
//! help = "Build the project"
//!
//! [[commands.flags]]
//! long = "target"
//! takes_value = true
//! ```
//!
//! Every command in the built app runs the same handler, which is told the
//! name of the command it runs for; `redirect` entries become a `before`
//! hook that sends one command name to another. The hook matches the
//! resolved name or the typed first token, so a redirect source still works
//! when `when-unmatched` replaced it with the default command.

use crate::app::{App, DefaultCommandPolicy};
use crate::cmd::{Cmd, ExitValue};
use crate::command::Command;
use crate::error::ConfigError;
use crate::flag::Flag;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Top-level definition file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Definition {
    /// Program name shown in usage text
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub default_command: Option<String>,
    #[serde(default)]
    pub default_policy: DefaultCommandPolicy,
    /// Command name -> command name the `before` hook redirects it to
    #[serde(default)]
    pub redirect: IndexMap<String, String>,
    #[serde(default)]
    pub flags: Vec<Flag>,
    #[serde(default)]
    pub commands: Vec<CommandDefinition>,
}

/// One `[[commands]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandDefinition {
    pub name: String,
    #[serde(default)]
    pub help: Option<String>,
    #[serde(default)]
    pub flags: Vec<Flag>,
}

impl Definition {
    /// Reads and validates a definition file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded definition");
        Self::from_toml_str(&content)
    }

    /// Parses and validates a definition from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let definition: Definition = toml::from_str(content)?;
        definition.validate()?;
        Ok(definition)
    }

    /// Checks names and references
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if:
    /// - A command or flag name is empty, contains whitespace, or starts with `-`
    /// - A command name or a flag name within one scope is repeated
    /// - A redirect names a command that is not defined
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut commands = HashSet::new();
        for command in &self.commands {
            check_name("command", &command.name)?;
            if !commands.insert(command.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "command '{}' is defined more than once",
                    command.name
                )));
            }
            check_flags(&format!("command '{}'", command.name), &command.flags)?;
        }
        check_flags("global scope", &self.flags)?;

        for (from, to) in &self.redirect {
            check_name("redirect source", from)?;
            if !commands.contains(to.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "redirect '{}' targets undefined command '{}'",
                    from, to
                )));
            }
        }

        Ok(())
    }

    /// Builds an app whose every command runs `handler` with its own name
    pub fn into_app<F>(self, handler: F) -> App
    where
        F: Fn(&str, &Cmd) -> ExitValue + Send + Sync + 'static,
    {
        let handler = Arc::new(handler);
        let mut app = App::new().with_default_policy(self.default_policy);
        if let Some(version) = self.version {
            app = app.with_version(version);
        }
        if let Some(name) = self.default_command {
            app = app.with_default_command(name);
        }

        for flag in self.flags {
            app.register_flag(flag);
        }
        for definition in self.commands {
            let shared = Arc::clone(&handler);
            let name = definition.name.clone();
            let mut command =
                Command::new(definition.name, move |cmd: &Cmd| shared(name.as_str(), cmd));
            if let Some(help) = definition.help {
                command = command.help(help);
            }
            for flag in definition.flags {
                command.register_flag(flag);
            }
            app.register_command(command);
        }

        if !self.redirect.is_empty() {
            let redirect = self.redirect;
            app.set_before(move |cmd: &Cmd, name: &str| {
                redirect
                    .get(name)
                    .or_else(|| redirect.get(cmd.args().peek(0)))
                    .cloned()
            });
        }

        app
    }
}

fn check_name(kind: &str, name: &str) -> Result<(), ConfigError> {
    if name.is_empty() || name.starts_with('-') || name.chars().any(char::is_whitespace) {
        return Err(ConfigError::Invalid(format!(
            "{} name '{}' must be non-empty, must not start with '-' and must not contain whitespace",
            kind, name
        )));
    }
    Ok(())
}

fn check_flags(scope: &str, flags: &[Flag]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for flag in flags {
        check_name("flag", &flag.long)?;
        if !seen.insert(flag.long.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "flag '{}' is defined more than once in {}",
                flag.long, scope
            )));
        }
    }
    Ok(())
}
