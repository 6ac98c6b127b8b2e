//! Output formatters for help text, registry descriptions and invocations

pub mod human;
pub mod jsonl;

pub use human::HumanFormatter;
pub use jsonl::JsonlFormatter;
