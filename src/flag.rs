#![forbid(unsafe_code)]

//! Flag descriptors
//!
//! A flag is recognized by its long name (`--verbose`), by an optional
//! single-character short alias (`-v`), or, for value-taking flags, by the
//! inline form `--name=value`.

use serde::{Deserialize, Serialize};

/// Describes one recognized command-line switch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flag {
    /// Long name without the leading dashes; also the registry key
    pub long: String,
    /// Optional short alias without the leading dash
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<char>,
    /// Whether the flag consumes the following token as its value
    #[serde(default)]
    pub takes_value: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

/// How a single token matched a flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagMatch {
    /// `--name` or `-n`; a value, if any, is the next token
    Bare,
    /// `--name=value`
    Inline(String),
}

impl Flag {
    /// Creates a presence-only flag
    pub fn boolean(long: impl Into<String>) -> Self {
        Flag {
            long: long.into(),
            short: None,
            takes_value: false,
            help: None,
        }
    }

    /// Creates a flag that consumes the following token as its value
    pub fn value(long: impl Into<String>) -> Self {
        Flag {
            takes_value: true,
            ..Flag::boolean(long)
        }
    }

    /// Sets the single-character alias
    pub fn short(mut self, alias: char) -> Self {
        self.short = Some(alias);
        self
    }

    /// Sets the help text shown in usage output
    pub fn help(mut self, text: impl Into<String>) -> Self {
        self.help = Some(text.into());
        self
    }

    /// Checks whether `token` names this flag
    ///
    /// Returns `None` when the token is unrelated. The inline `--name=value`
    /// form is only recognized for value-taking flags; for a boolean flag it
    /// is treated as an unrelated token.
    pub fn matches(&self, token: &str) -> Option<FlagMatch> {
        if let Some(rest) = token.strip_prefix("--") {
            if rest == self.long {
                return Some(FlagMatch::Bare);
            }
            if self.takes_value
                && let Some(value) = rest
                    .strip_prefix(self.long.as_str())
                    .and_then(|tail| tail.strip_prefix('='))
            {
                return Some(FlagMatch::Inline(value.to_string()));
            }
            return None;
        }

        let mut chars = token.strip_prefix('-')?.chars();
        match (self.short, chars.next(), chars.next()) {
            (Some(alias), Some(c), None) if alias == c => Some(FlagMatch::Bare),
            _ => None,
        }
    }

    /// Usage fragment such as `-t, --target <value>`
    pub fn usage(&self) -> String {
        let mut usage = match self.short {
            Some(alias) => format!("-{}, --{}", alias, self.long),
            None => format!("    --{}", self.long),
        };
        if self.takes_value {
            usage.push_str(" <value>");
        }
        usage
    }
}
