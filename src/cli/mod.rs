//! Command-line interface for bintool.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, CompletionsArgs, EnsureArgs, ListArgs, PathArgs};
pub use commands::{Command, CommandDispatcher, CommandResult, ProjectContext};
