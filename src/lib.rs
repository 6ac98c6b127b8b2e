#![forbid(unsafe_code)]

//! Subcommander: subcommand registry and dispatch for small command-line tools
//!
//! An [`App`] holds commands and global flags. [`App::run`] picks a command
//! from the first argument, strips every recognized flag out of the argument
//! list into [`Parameters`], lets an optional `before` hook redirect the
//! dispatch, and runs the command's handler or the fallback.
//!
//! ```
//! use subcommander::{App, Command, ExitValue, Flag};
//!
//! let app = App::new()
//!     .with_flag(Flag::boolean("verbose").short('v'))
//!     .with_command(Command::new("build", |cmd| {
//!         let message = if cmd.flag("verbose") { "built loudly" } else { "built" };
//!         ExitValue::success().with_message(message)
//!     }));
//!
//! let exit = app.run(["build", "-v"]).unwrap();
//! assert_eq!(exit.message(), Some("built loudly"));
//! ```

pub mod app;
pub mod args;
pub mod cli;
pub mod cmd;
pub mod command;
pub mod config;
pub mod error;
pub mod flag;
pub mod output;
pub mod parameter;

pub use app::{App, DefaultCommandPolicy};
pub use args::Args;
pub use cmd::{Cmd, ExitValue};
pub use command::Command;
pub use error::{ConfigError, DispatchError};
pub use flag::Flag;
pub use parameter::{Parameter, Parameters};
