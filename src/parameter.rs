#![forbid(unsafe_code)]

//! Extracted flag values

use indexmap::IndexMap;
use serde::Serialize;

/// The outcome of extracting one flag from the argument stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    /// Long name of the flag this parameter was extracted for
    pub name: String,
    /// Whether the flag appeared in the arguments
    pub present: bool,
    /// Value of a value-taking flag; `None` for boolean flags, absent flags,
    /// and a value-taking flag given as the final token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Parameter {
    /// Creates a parameter for a flag that did not appear
    pub fn absent(name: impl Into<String>) -> Self {
        Parameter {
            name: name.into(),
            present: false,
            value: None,
        }
    }

    /// Creates a parameter for a flag that appeared, with its value if any
    pub fn present(name: impl Into<String>, value: Option<String>) -> Self {
        Parameter {
            name: name.into(),
            present: true,
            value,
        }
    }
}

/// Parameters keyed by flag name, kept in extraction order
///
/// Adding a parameter for a name that is already recorded replaces the
/// earlier entry in place, unless the new one is absent and the recorded one
/// is present. This happens when a command declares a flag with the same long
/// name as a global flag: an occurrence already extracted stays recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Parameters {
    entries: IndexMap<String, Parameter>,
}

impl Parameters {
    /// Creates an empty parameter bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `parameter`; an absent result never hides a present one
    pub fn add(&mut self, parameter: Parameter) {
        if !parameter.present && self.is_set(&parameter.name) {
            return;
        }
        self.entries.insert(parameter.name.clone(), parameter);
    }

    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.entries.get(name)
    }

    /// True if the named flag was extracted and present
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some_and(|p| p.present)
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|p| p.value.as_deref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
