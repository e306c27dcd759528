//! Process execution helpers.

pub mod command;

pub use command::{execute, CommandOptions, CommandResult};
