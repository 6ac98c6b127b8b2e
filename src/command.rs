#![forbid(unsafe_code)]

//! Subcommand definitions

use crate::cmd::{Cmd, ExitValue};
use crate::flag::Flag;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Handler invoked when a command is dispatched
pub type Handler = Arc<dyn Fn(&Cmd) -> ExitValue + Send + Sync>;

/// A named, dispatchable unit with its own flag namespace
#[derive(Clone)]
pub struct Command {
    name: String,
    help: Option<String>,
    handler: Handler,
    flags: IndexMap<String, Flag>,
}

impl Command {
    /// Creates a command that runs `handler` when dispatched
    pub fn new<F>(name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Cmd) -> ExitValue + Send + Sync + 'static,
    {
        Self::with_handler(name, Arc::new(handler))
    }

    /// Creates a command around an already shared handler
    pub fn with_handler(name: impl Into<String>, handler: Handler) -> Self {
        Command {
            name: name.into(),
            help: None,
            handler,
            flags: IndexMap::new(),
        }
    }

    /// Sets the help text shown in command listings
    pub fn help(mut self, text: impl Into<String>) -> Self {
        self.help = Some(text.into());
        self
    }

    /// Builder form of [`Command::register_flag`]
    pub fn flag(mut self, flag: Flag) -> Self {
        self.register_flag(flag);
        self
    }

    /// Registers a command-scoped flag; a flag with the same long name
    /// replaces the earlier one
    pub fn register_flag(&mut self, flag: Flag) {
        self.flags.insert(flag.long.clone(), flag);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help_text(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Scoped flags in registration order
    pub fn flags(&self) -> impl Iterator<Item = &Flag> {
        self.flags.values()
    }

    /// Invokes the handler with the dispatched invocation
    pub fn run(&self, cmd: &Cmd) -> ExitValue {
        (self.handler)(cmd)
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("help", &self.help)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::Args;
    use crate::parameter::Parameters;

    #[test]
    fn test_flags_keep_registration_order() {
        let command = Command::new("build", |_| ExitValue::success())
            .flag(Flag::value("target"))
            .flag(Flag::boolean("release"))
            .flag(Flag::boolean("all"));

        let names: Vec<&str> = command.flags().map(|f| f.long.as_str()).collect();
        assert_eq!(names, vec!["target", "release", "all"]);
    }

    #[test]
    fn test_duplicate_flag_overwrites() {
        let command = Command::new("build", |_| ExitValue::success())
            .flag(Flag::boolean("target"))
            .flag(Flag::value("target").short('t'));

        let flags: Vec<&Flag> = command.flags().collect();
        assert_eq!(flags.len(), 1);
        assert!(flags[0].takes_value);
        assert_eq!(flags[0].short, Some('t'));
    }

    #[test]
    fn test_run_invokes_handler() {
        let command = Command::new("echo", |cmd| {
            ExitValue::success().with_message(cmd.args().peek(0))
        })
        .help("Print the first argument");

        let cmd = Cmd::new("echo", Args::new(["hi"]), Parameters::new());
        assert_eq!(command.run(&cmd).message(), Some("hi"));
        assert_eq!(command.help_text(), Some("Print the first argument"));
        assert_eq!(command.name(), "echo");
    }
}
