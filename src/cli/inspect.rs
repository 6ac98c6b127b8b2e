//! Inspector subcommands
//!
//! `run` builds an [`App`] from a definition file and dispatches the given
//! arguments through it. Every defined command prints what it received
//! instead of doing work, so the output shows exactly how the arguments
//! were split into command, flags and positional arguments.
//!
//! Commands that are not defined reach a fallback: `help` (or no command
//! at all) prints usage, anything else is reported as unknown.

use crate::app::App;
use crate::cli::args::{Cli, Command, OutputFormat};
use crate::cmd::{Cmd, ExitValue};
use crate::command::Command as AppCommand;
use crate::config::Definition;
use crate::output::{HumanFormatter, JsonlFormatter};
use std::io;
use std::path::Path;
use tracing::debug;

/// Exit codes for the inspector
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = ExitValue::FAILURE;
pub const EXIT_UNKNOWN_COMMAND: i32 = 2;

/// Run the inspector and return its process exit code
///
/// Errors loading the definition are printed to stderr and reported as
/// [`EXIT_ERROR`]. For `run`, the exit code is the dispatched handler's.
pub fn run_cli(cli: &Cli) -> i32 {
    match run_cli_inner(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_ERROR
        }
    }
}

fn run_cli_inner(cli: &Cli) -> Result<i32, String> {
    let definition = Definition::load(&cli.definition).map_err(|e| e.to_string())?;
    let program = program_name(&definition, &cli.definition);
    let renderer = Renderer {
        format: cli.format,
        human: HumanFormatter::new(program, cli.color.to_termcolor()),
    };

    match &cli.command {
        Command::Check => {
            println!(
                "{}: {} commands, {} global flags",
                cli.definition.display(),
                definition.commands.len(),
                definition.flags.len()
            );
            Ok(EXIT_SUCCESS)
        }
        Command::Describe => {
            let app = definition.into_app(|_, _| ExitValue::success());
            renderer.app(&app).map_err(|e| e.to_string())?;
            Ok(EXIT_SUCCESS)
        }
        Command::Run { args } => {
            let app = build_inspector(definition, renderer);
            debug!(?args, "dispatching");
            let exit = app.run(args.iter().cloned()).map_err(|e| e.to_string())?;
            Ok(exit.code)
        }
    }
}

/// Builds an app whose commands print their invocation and whose fallback
/// serves `help`
fn build_inspector(definition: Definition, renderer: Renderer) -> App {
    let printer = renderer.clone();
    let mut app = definition.into_app(move |resolved, cmd| {
        exit_for(printer.invocation(cmd, resolved))
    });

    let registry = app.clone();
    app.set_fallback(move |cmd, name| {
        if !name.is_empty() && name != "help" {
            eprintln!("Error: unknown command '{}'", name);
            return ExitValue::failure(EXIT_UNKNOWN_COMMAND)
                .with_message(format!("unknown command '{}'", name));
        }

        match help_topic(cmd, name).and_then(|topic| registry.get_command(topic)) {
            Some(command) => exit_for(renderer.command(command)),
            None => exit_for(renderer.app(&registry)),
        }
    });

    app
}

/// The command named after `help`, if any
///
/// A typed `help` token stays the first positional argument, so the topic
/// is the one after it.
fn help_topic<'a>(cmd: &'a Cmd, name: &str) -> Option<&'a str> {
    let args = cmd.args();
    let topic = if !name.is_empty() && args.peek(0) == name {
        args.peek(1)
    } else {
        args.peek(0)
    };
    (!topic.is_empty()).then_some(topic)
}

fn program_name(definition: &Definition, path: &Path) -> String {
    definition
        .name
        .clone()
        .or_else(|| {
            path.file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "app".to_string())
}

fn exit_for(result: io::Result<()>) -> ExitValue {
    match result {
        Ok(()) => ExitValue::success(),
        Err(e) => ExitValue::failure(EXIT_ERROR).with_message(e.to_string()),
    }
}

/// Writes to stdout in the selected format
#[derive(Clone)]
struct Renderer {
    format: OutputFormat,
    human: HumanFormatter,
}

impl Renderer {
    fn app(&self, app: &App) -> io::Result<()> {
        match self.format {
            OutputFormat::Human => self.human.app_to_stdout(app),
            OutputFormat::Jsonl => print_str(&JsonlFormatter::new().format_app(app)),
        }
    }

    fn command(&self, command: &AppCommand) -> io::Result<()> {
        match self.format {
            OutputFormat::Human => self.human.command_to_stdout(command),
            OutputFormat::Jsonl => {
                let app = App::new().with_command(command.clone());
                print_str(&JsonlFormatter::new().format_app(&app))
            }
        }
    }

    fn invocation(&self, cmd: &Cmd, resolved: &str) -> io::Result<()> {
        match self.format {
            OutputFormat::Human => self.human.invocation_to_stdout(cmd, resolved),
            OutputFormat::Jsonl => {
                print_str(&JsonlFormatter::new().format_invocation(cmd, resolved))
            }
        }
    }
}

fn print_str(text: &str) -> io::Result<()> {
    use std::io::Write;
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()
}
