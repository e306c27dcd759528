//! Ensure command implementation.
//!
//! The `bintool ensure` command installs every missing or outdated tool.

use crate::cli::args::EnsureArgs;
use crate::error::{BintoolError, Result};
use crate::provision::provision;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, ProjectContext};

/// The ensure command implementation.
pub struct EnsureCommand {
    context: ProjectContext,
    args: EnsureArgs,
}

impl EnsureCommand {
    /// Create a new ensure command.
    pub fn new(context: ProjectContext, args: EnsureArgs) -> Self {
        Self { context, args }
    }
}

impl Command for EnsureCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = match self.context.load() {
            Ok(c) => c,
            Err(BintoolError::ConfigNotFound { path }) => {
                ui.error(&format!("No manifest found at {}", path.display()));
                return Ok(CommandResult::failure(2));
            }
            Err(e) => return Err(e),
        };

        let binaries = self.context.binaries(&config, &self.args.tools)?;
        if binaries.is_empty() {
            ui.message("No tools defined.");
            return Ok(CommandResult::success());
        }

        let report = provision(&binaries, ui);
        match report.into_result() {
            Ok(()) => Ok(CommandResult::success()),
            Err(err) => {
                ui.error(&err.to_string());
                Ok(CommandResult::failure(1))
            }
        }
    }
}
