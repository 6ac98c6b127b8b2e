#![forbid(unsafe_code)]

//! Human-readable help and invocation output with colorization support

use crate::app::App;
use crate::cmd::Cmd;
use crate::command::Command;
use crate::flag::Flag;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, NoColor, StandardStream, WriteColor};

/// Human-readable output formatter
///
/// Renders usage text for an app or a single command, and a summary of a
/// dispatched invocation. Every `format_*` method returns plain text; the
/// `write_*` methods emit the same text with colors.
#[derive(Debug, Clone)]
pub struct HumanFormatter {
    program: String,
    color_choice: ColorChoice,
}

impl HumanFormatter {
    /// Creates a formatter that names the program `program` in usage lines
    pub fn new(program: impl Into<String>, color_choice: ColorChoice) -> Self {
        HumanFormatter {
            program: program.into(),
            color_choice,
        }
    }

    pub fn format_app(&self, app: &App) -> String {
        self.render(|out| self.write_app(app, out))
    }

    pub fn format_command(&self, command: &Command) -> String {
        self.render(|out| self.write_command(command, out))
    }

    pub fn format_invocation(&self, cmd: &Cmd, resolved: &str) -> String {
        self.render(|out| self.write_invocation(cmd, resolved, out))
    }

    pub fn app_to_stdout(&self, app: &App) -> io::Result<()> {
        let mut stdout = StandardStream::stdout(self.color_choice);
        self.write_app(app, &mut stdout)
    }

    pub fn command_to_stdout(&self, command: &Command) -> io::Result<()> {
        let mut stdout = StandardStream::stdout(self.color_choice);
        self.write_command(command, &mut stdout)
    }

    pub fn invocation_to_stdout(&self, cmd: &Cmd, resolved: &str) -> io::Result<()> {
        let mut stdout = StandardStream::stdout(self.color_choice);
        self.write_invocation(cmd, resolved, &mut stdout)
    }

    /// Writes the app overview: version, usage, commands and global flags
    pub fn write_app<W: WriteColor>(&self, app: &App, out: &mut W) -> io::Result<()> {
        out.set_color(ColorSpec::new().set_bold(true))?;
        write!(out, "{}", self.program)?;
        out.reset()?;
        if let Some(version) = app.version() {
            write!(out, " {}", version)?;
        }
        writeln!(out)?;
        writeln!(out)?;

        writeln!(
            out,
            "Usage: {} [command] [flags] [args...]",
            self.program
        )?;

        let commands: Vec<(&str, Option<&str>)> =
            app.commands().map(|c| (c.name(), c.help_text())).collect();
        if !commands.is_empty() {
            writeln!(out)?;
            write_heading(out, "Commands:")?;
            let width = commands.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
            for (name, help) in commands {
                write!(out, "  ")?;
                out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
                match help {
                    Some(help) => {
                        write!(out, "{:<width$}", name, width = width)?;
                        out.reset()?;
                        writeln!(out, "  {}", help)?;
                    }
                    None => {
                        write!(out, "{}", name)?;
                        out.reset()?;
                        writeln!(out)?;
                    }
                }
            }
        }

        let flags: Vec<&Flag> = app.flags().collect();
        if !flags.is_empty() {
            writeln!(out)?;
            write_heading(out, "Flags:")?;
            write_flags(out, &flags)?;
        }

        if let Some(default) = app.default_command() {
            writeln!(out)?;
            writeln!(out, "Default command: {}", default)?;
        }

        Ok(())
    }

    /// Writes usage for one command and its scoped flags
    pub fn write_command<W: WriteColor>(&self, command: &Command, out: &mut W) -> io::Result<()> {
        write!(out, "Usage: {} ", self.program)?;
        out.set_color(ColorSpec::new().set_bold(true))?;
        write!(out, "{}", command.name())?;
        out.reset()?;
        writeln!(out, " [flags] [args...]")?;

        if let Some(help) = command.help_text() {
            writeln!(out)?;
            writeln!(out, "{}", help)?;
        }

        let flags: Vec<&Flag> = command.flags().collect();
        if !flags.is_empty() {
            writeln!(out)?;
            write_heading(out, "Flags:")?;
            write_flags(out, &flags)?;
        }

        Ok(())
    }

    /// Writes what a dispatch resolved to
    ///
    /// `resolved` is the command whose handler ran; it differs from
    /// `cmd.name()` when a `before` hook redirected the invocation.
    pub fn write_invocation<W: WriteColor>(
        &self,
        cmd: &Cmd,
        resolved: &str,
        out: &mut W,
    ) -> io::Result<()> {
        write!(out, "command: ")?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
        write!(out, "{}", resolved)?;
        out.reset()?;
        if cmd.name() != resolved {
            write!(out, " (invoked as {})", cmd.name())?;
        }
        writeln!(out)?;

        let args: Vec<&str> = cmd.args().iter().collect();
        writeln!(out, "args: {}", args.join(" "))?;

        let present: Vec<_> = cmd.parameters().iter().filter(|p| p.present).collect();
        if present.is_empty() {
            writeln!(out, "flags: none")?;
            return Ok(());
        }

        writeln!(out, "flags:")?;
        for parameter in present {
            write!(out, "  ")?;
            out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
            write!(out, "--{}", parameter.name)?;
            out.reset()?;
            match &parameter.value {
                Some(value) => writeln!(out, " = {}", value)?,
                None => writeln!(out)?,
            }
        }

        Ok(())
    }

    fn render<F>(&self, emit: F) -> String
    where
        F: FnOnce(&mut NoColor<Vec<u8>>) -> io::Result<()>,
    {
        let mut buffer = NoColor::new(Vec::new());
        // Writing into memory cannot fail
        emit(&mut buffer).ok();
        String::from_utf8_lossy(&buffer.into_inner()).into_owned()
    }
}

fn write_heading<W: WriteColor>(out: &mut W, heading: &str) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_bold(true))?;
    writeln!(out, "{}", heading)?;
    out.reset()
}

fn write_flags<W: WriteColor>(out: &mut W, flags: &[&Flag]) -> io::Result<()> {
    let usages: Vec<String> = flags.iter().map(|f| f.usage()).collect();
    let width = usages.iter().map(String::len).max().unwrap_or(0);
    for (flag, usage) in flags.iter().zip(&usages) {
        match &flag.help {
            Some(help) => writeln!(out, "  {:<width$}  {}", usage, help, width = width)?,
            None => writeln!(out, "  {}", usage)?,
        }
    }
    Ok(())
}
