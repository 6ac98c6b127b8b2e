#![forbid(unsafe_code)]

//! Command registry and dispatcher
//!
//! An [`App`] holds the registered commands, the global flags, and the
//! optional `before` hook and fallback handler. [`App::run`] drives one
//! dispatch:
//!
//! 1. Resolve the command name from the first token, or from the default
//!    command according to the [`DefaultCommandPolicy`]. The first token is
//!    only peeked, so it stays in the arguments handed to the command
//! 2. Extract every global flag, then every flag of the resolved command
//! 3. Build the [`Cmd`] handed to handlers
//! 4. Let the `before` hook redirect to another command
//! 5. Run the resolved handler, else the fallback, else report
//!    [`DispatchError::NoHandler`]

use crate::args::Args;
use crate::cmd::{Cmd, ExitValue};
use crate::command::Command;
use crate::error::DispatchError;
use crate::flag::Flag;
use crate::parameter::Parameters;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Pre-dispatch hook; a returned non-empty name redirects dispatch
pub type BeforeHook = Arc<dyn Fn(&Cmd, &str) -> Option<String> + Send + Sync>;

/// Handler run when no registered command matches
pub type FallbackHandler = Arc<dyn Fn(&Cmd, &str) -> ExitValue + Send + Sync>;

/// When the default command name replaces the first token
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DefaultCommandPolicy {
    /// Only when there are no arguments at all. An unrecognized first token
    /// is kept as the command name and reaches the hook and fallback.
    #[default]
    WhenEmpty,
    /// Also when the first token is not a registered command. That token
    /// stays in the positional arguments.
    WhenUnmatched,
}

/// Registry of commands and global flags
#[derive(Clone, Default)]
pub struct App {
    version: Option<String>,
    default_command: Option<String>,
    default_policy: DefaultCommandPolicy,
    commands: IndexMap<String, Command>,
    flags: IndexMap<String, Flag>,
    before: Option<BeforeHook>,
    fallback: Option<FallbackHandler>,
}

impl App {
    /// Creates an empty registry with the [`DefaultCommandPolicy::WhenEmpty`] policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the version shown in help output
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the command used when the policy calls for the default
    pub fn with_default_command(mut self, name: impl Into<String>) -> Self {
        self.default_command = Some(name.into());
        self
    }

    /// Sets when the default command replaces the first token
    pub fn with_default_policy(mut self, policy: DefaultCommandPolicy) -> Self {
        self.default_policy = policy;
        self
    }

    /// Builder form of [`App::register_command`]
    pub fn with_command(mut self, command: Command) -> Self {
        self.register_command(command);
        self
    }

    /// Builder form of [`App::register_flag`]
    pub fn with_flag(mut self, flag: Flag) -> Self {
        self.register_flag(flag);
        self
    }

    /// Builder form of [`App::set_before`]
    pub fn with_before<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Cmd, &str) -> Option<String> + Send + Sync + 'static,
    {
        self.set_before(hook);
        self
    }

    /// Builder form of [`App::set_fallback`]
    pub fn with_fallback<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Cmd, &str) -> ExitValue + Send + Sync + 'static,
    {
        self.set_fallback(handler);
        self
    }

    /// Registers a command under its name, replacing any earlier command
    /// with that name in place
    pub fn register_command(&mut self, command: Command) {
        let name = command.name().to_string();
        if self.commands.insert(name.clone(), command).is_some() {
            debug!(command = %name, "replaced previously registered command");
        }
    }

    /// Registers a global flag under its long name, replacing any earlier
    /// flag with that name in place
    pub fn register_flag(&mut self, flag: Flag) {
        let long = flag.long.clone();
        if self.flags.insert(long.clone(), flag).is_some() {
            debug!(flag = %long, "replaced previously registered global flag");
        }
    }

    /// Installs the pre-dispatch hook, replacing any earlier one
    pub fn set_before<F>(&mut self, hook: F)
    where
        F: Fn(&Cmd, &str) -> Option<String> + Send + Sync + 'static,
    {
        self.before = Some(Arc::new(hook));
    }

    /// Installs the handler for names no command answers to
    pub fn set_fallback<F>(&mut self, handler: F)
    where
        F: Fn(&Cmd, &str) -> ExitValue + Send + Sync + 'static,
    {
        self.fallback = Some(Arc::new(handler));
    }

    /// Version string, if one was set
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn default_command(&self) -> Option<&str> {
        self.default_command.as_deref()
    }

    pub fn default_policy(&self) -> DefaultCommandPolicy {
        self.default_policy
    }

    /// Registered commands in registration order
    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.commands.values()
    }

    /// Global flags in registration order
    pub fn flags(&self) -> impl Iterator<Item = &Flag> {
        self.flags.values()
    }

    /// Looks up a registered command by name
    pub fn get_command(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    /// Dispatches `raw` (the arguments without the program name)
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::NoHandler`] when neither a registered
    /// command nor a fallback can handle the invocation.
    pub fn run<I, S>(&self, raw: I) -> Result<ExitValue, DispatchError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = Args::new(raw);
        let (mut name, command) = self.resolve(&args);
        debug!(command = %name, registered = command.is_some(), "resolved command");

        let mut parameters = Parameters::new();
        let scoped = command.into_iter().flat_map(Command::flags);
        for flag in self.flags.values().chain(scoped) {
            let (parameter, rest) = args.extract(flag);
            parameters.add(parameter);
            args = rest;
        }

        let cmd = Cmd::new(name.as_str(), args, parameters);
        let mut target = command;

        if let Some(before) = &self.before
            && let Some(redirect) = before(&cmd, &name)
            && !redirect.is_empty()
        {
            debug!(from = %name, to = %redirect, "before hook redirected dispatch");
            target = self.commands.get(&redirect);
            name = redirect;
        }

        if let Some(command) = target {
            return Ok(command.run(&cmd));
        }

        match &self.fallback {
            Some(fallback) => {
                debug!(command = %name, "no handler registered, running fallback");
                Ok(fallback(&cmd, &name))
            }
            None => Err(DispatchError::NoHandler { command: name }),
        }
    }

    /// Picks the command name from the first token or the default command
    fn resolve(&self, args: &Args) -> (String, Option<&Command>) {
        let first = args.peek(0);
        if let Some(command) = self.commands.get(first) {
            return (first.to_string(), Some(command));
        }

        let default = self.default_command.as_deref().unwrap_or("");
        let name = match self.default_policy {
            DefaultCommandPolicy::WhenEmpty if first.is_empty() => default,
            DefaultCommandPolicy::WhenEmpty => first,
            DefaultCommandPolicy::WhenUnmatched if default.is_empty() => first,
            DefaultCommandPolicy::WhenUnmatched => default,
        }
        .to_string();

        let command = self.commands.get(&name);
        (name, command)
    }
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("version", &self.version)
            .field("default_command", &self.default_command)
            .field("default_policy", &self.default_policy)
            .field("commands", &self.commands)
            .field("flags", &self.flags)
            .field("before", &self.before.is_some())
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}
