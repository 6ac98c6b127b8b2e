//! Command definition files

pub mod definition;

pub use definition::{CommandDefinition, Definition};
