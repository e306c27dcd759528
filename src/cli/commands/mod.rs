//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results. Commands are
//! dispatched via [`CommandDispatcher`], which routes CLI subcommands to
//! their implementations and shares the [`ProjectContext`] built from the
//! global flags.

pub mod completions;
pub mod dispatcher;
pub mod ensure;
pub mod list;
pub mod path;

pub use dispatcher::{Command, CommandDispatcher, CommandResult, ProjectContext};
