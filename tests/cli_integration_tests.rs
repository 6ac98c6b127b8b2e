//! End-to-end tests for the subcommander inspector binary

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const DEFINITION: &str = r#"
name = "shop"
version = "0.3.1"
default_command = "help"

[redirect]
compile = "build"

[[flags]]
long = "verbose"
short = "v"
help = "Print more"

[[commands]]
name = "build"
help = "Build the storefront"

[[commands.flags]]
long = "target"
short = "t"
takes_value = true
help = "Deployment target"

[[commands]]
name = "deploy"
help = "Ship it"
"#;

/// Writes the definition into a fresh temp dir
fn definition(content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("shop.toml");
    fs::write(&path, content).unwrap();
    (dir, path)
}

fn subcommander(path: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("subcommander");
    cmd.arg("--definition").arg(path).arg("--color").arg("never");
    cmd
}

mod run {
    use super::*;

    #[test]
    fn dispatches_command_with_flags() {
        let (_dir, path) = definition(DEFINITION);
        subcommander(&path)
            .args(["run", "build", "src", "--target", "eu", "-v"])
            .assert()
            .success()
            .stdout(predicate::str::contains("command: build"))
            .stdout(predicate::str::contains("args: build src\n"))
            .stdout(predicate::str::contains("--verbose\n"))
            .stdout(predicate::str::contains("--target = eu"));
    }

    #[test]
    fn redirect_runs_target_command() {
        let (_dir, path) = definition(DEFINITION);
        subcommander(&path)
            .args(["run", "compile"])
            .assert()
            .success()
            .stdout(predicate::str::contains("command: build (invoked as compile)"));
    }

    #[test]
    fn unknown_command_exits_with_two() {
        let (_dir, path) = definition(DEFINITION);
        subcommander(&path)
            .args(["run", "refund"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("unknown command 'refund'"));
    }

    #[test]
    fn no_arguments_prints_help() {
        let (_dir, path) = definition(DEFINITION);
        subcommander(&path)
            .arg("run")
            .assert()
            .success()
            .stdout(predicate::str::contains("shop 0.3.1"))
            .stdout(predicate::str::contains("build   Build the storefront"))
            .stdout(predicate::str::contains("-v, --verbose  Print more"));
    }

    #[test]
    fn help_topic_prints_command_usage() {
        let (_dir, path) = definition(DEFINITION);
        subcommander(&path)
            .args(["run", "help", "build"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage: shop build [flags] [args...]"))
            .stdout(predicate::str::contains("-t, --target <value>  Deployment target"));
    }

    #[test]
    fn leading_flag_after_separator() {
        let (_dir, path) = definition(DEFINITION);
        // "--verbose" is the first token, so it is taken as the command name
        subcommander(&path)
            .args(["run", "--", "--verbose", "build"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("unknown command '--verbose'"));
    }

    #[test]
    fn jsonl_invocation() {
        let (_dir, path) = definition(DEFINITION);
        let output = subcommander(&path)
            .args(["--format", "jsonl", "run", "deploy", "--verbose", "now"])
            .output()
            .unwrap();

        assert!(output.status.success());
        let stdout = String::from_utf8(output.stdout).unwrap();
        let record: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
        assert_eq!(record["type"], "invocation");
        assert_eq!(record["command"], "deploy");
        assert_eq!(record["args"], serde_json::json!(["deploy", "now"]));
        assert_eq!(record["parameters"]["verbose"]["present"], true);
    }
}

mod describe {
    use super::*;

    #[test]
    fn human_lists_commands() {
        let (_dir, path) = definition(DEFINITION);
        subcommander(&path)
            .arg("describe")
            .assert()
            .success()
            .stdout(predicate::str::contains("Commands:"))
            .stdout(predicate::str::contains("deploy  Ship it"))
            .stdout(predicate::str::contains("Default command: help"));
    }

    #[test]
    fn jsonl_records() {
        let (_dir, path) = definition(DEFINITION);
        let output = subcommander(&path)
            .args(["--format", "jsonl", "describe"])
            .output()
            .unwrap();

        let stdout = String::from_utf8(output.stdout).unwrap();
        let types: Vec<String> = stdout
            .lines()
            .map(|line| {
                let value: serde_json::Value = serde_json::from_str(line).unwrap();
                value["type"].as_str().unwrap().to_string()
            })
            .collect();
        assert_eq!(types, vec!["app", "flag", "command", "command"]);
    }
}

mod check {
    use super::*;

    #[test]
    fn valid_definition() {
        let (_dir, path) = definition(DEFINITION);
        subcommander(&path)
            .arg("check")
            .assert()
            .success()
            .stdout(predicate::str::contains("2 commands, 1 global flags"));
    }

    #[test]
    fn invalid_definition_fails() {
        let (_dir, path) = definition("[redirect]\nold = \"new\"\n");
        subcommander(&path)
            .arg("check")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("undefined command 'new'"));
    }

    #[test]
    fn missing_definition_fails() {
        let dir = TempDir::new().unwrap();
        subcommander(&dir.path().join("nope.toml"))
            .arg("check")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("failed to read definition"));
    }
}
