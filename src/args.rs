#![forbid(unsafe_code)]

//! Owned view over the not-yet-consumed argument tokens
//!
//! Flag extraction consumes the view and hands back a reduced one, so every
//! step of dispatch works on exactly the tokens the previous step left
//! behind.

use crate::flag::{Flag, FlagMatch};
use crate::parameter::Parameter;
use serde::Serialize;

/// Token that ends flag scanning; everything after it is positional
pub const END_OF_FLAGS: &str = "--";

/// Remaining argument tokens
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Args {
    tokens: Vec<String>,
}

impl Args {
    /// Creates a view over `tokens`, without the program name
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Args {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the i-th remaining token, or `""` when out of range
    pub fn peek(&self, index: usize) -> &str {
        self.tokens.get(index).map(String::as_str).unwrap_or("")
    }

    /// Removes the first occurrence of `flag` (and its value token, if the
    /// flag takes one)
    ///
    /// Tokens after [`END_OF_FLAGS`] are never considered. A value-taking
    /// flag given as the last token is reported present with no value.
    pub fn extract(mut self, flag: &Flag) -> (Parameter, Args) {
        let found = self
            .tokens
            .iter()
            .take_while(|token| token.as_str() != END_OF_FLAGS)
            .enumerate()
            .find_map(|(index, token)| flag.matches(token).map(|m| (index, m)));

        let Some((index, matched)) = found else {
            return (Parameter::absent(flag.long.as_str()), self);
        };

        self.tokens.remove(index);
        let value = match matched {
            FlagMatch::Inline(value) => Some(value),
            FlagMatch::Bare if flag.takes_value => self.take_value_at(index),
            FlagMatch::Bare => None,
        };

        (Parameter::present(flag.long.as_str(), value), self)
    }

    // The value slot is empty at the end of the list and at the terminator
    fn take_value_at(&mut self, index: usize) -> Option<String> {
        let has_value = self
            .tokens
            .get(index)
            .is_some_and(|token| token != END_OF_FLAGS);
        has_value.then(|| self.tokens.remove(index))
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(args: &Args) -> Vec<&str> {
        args.iter().collect()
    }

    #[test]
    fn test_peek_in_and_out_of_range() {
        let args = Args::new(["build", "--verbose"]);
        assert_eq!(args.peek(0), "build");
        assert_eq!(args.peek(1), "--verbose");
        assert_eq!(args.peek(2), "");
        assert_eq!(Args::default().peek(0), "");
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn test_extract_boolean_flag() {
        let args = Args::new(["build", "--verbose", "src"]);
        let (param, rest) = args.extract(&Flag::boolean("verbose"));

        assert!(param.present);
        assert_eq!(param.name, "verbose");
        assert_eq!(param.value, None);
        assert_eq!(tokens(&rest), vec!["build", "src"]);
    }

    #[test]
    fn test_extract_value_flag_removes_value() {
        let args = Args::new(["build", "--target", "arm64", "src"]);
        let (param, rest) = args.extract(&Flag::value("target"));

        assert!(param.present);
        assert_eq!(param.value.as_deref(), Some("arm64"));
        assert_eq!(tokens(&rest), vec!["build", "src"]);
    }

    #[test]
    fn test_extract_by_short_alias() {
        let args = Args::new(["-t", "arm64", "build"]);
        let (param, rest) = args.extract(&Flag::value("target").short('t'));

        assert_eq!(param.name, "target");
        assert_eq!(param.value.as_deref(), Some("arm64"));
        assert_eq!(tokens(&rest), vec!["build"]);
    }

    #[test]
    fn test_extract_inline_value() {
        let args = Args::new(["build", "--target=arm64", "src"]);
        let (param, rest) = args.extract(&Flag::value("target"));

        assert_eq!(param.value.as_deref(), Some("arm64"));
        assert_eq!(tokens(&rest), vec!["build", "src"]);
    }

    #[test]
    fn test_extract_absent_leaves_args_unchanged() {
        let args = Args::new(["build", "src"]);
        let (param, rest) = args.clone().extract(&Flag::boolean("verbose"));

        assert!(!param.present);
        assert_eq!(param.value, None);
        assert_eq!(rest, args);
    }

    #[test]
    fn test_extract_only_first_occurrence() {
        let args = Args::new(["--tag", "a", "--tag", "b"]);
        let (param, rest) = args.extract(&Flag::value("tag"));

        assert_eq!(param.value.as_deref(), Some("a"));
        assert_eq!(tokens(&rest), vec!["--tag", "b"]);
    }

    #[test]
    fn test_value_flag_at_end_has_no_value() {
        let args = Args::new(["build", "--target"]);
        let (param, rest) = args.extract(&Flag::value("target"));

        assert!(param.present);
        assert_eq!(param.value, None);
        assert_eq!(tokens(&rest), vec!["build"]);
    }

    #[test]
    fn test_flags_after_terminator_are_positional() {
        let args = Args::new(["run", "--", "--verbose"]);
        let (param, rest) = args.extract(&Flag::boolean("verbose"));

        assert!(!param.present);
        assert_eq!(tokens(&rest), vec!["run", "--", "--verbose"]);
    }

    #[test]
    fn test_value_flag_does_not_swallow_terminator() {
        let args = Args::new(["--target", "--", "x"]);
        let (param, rest) = args.extract(&Flag::value("target"));

        assert!(param.present);
        assert_eq!(param.value, None);
        assert_eq!(tokens(&rest), vec!["--", "x"]);
    }
}
