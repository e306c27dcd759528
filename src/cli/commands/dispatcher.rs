//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`ProjectContext`] for the manifest and install directory of a run
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::binary::Binary;
use crate::cli::args::{Cli, Commands, EnsureArgs};
use crate::config::{load_project_config, validate, ManifestConfig};
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Where the manifest lives and where tools are installed.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    pub project_root: PathBuf,
    pub config_override: Option<PathBuf>,
    pub dir_override: Option<PathBuf>,
}

impl ProjectContext {
    /// Context for `project_root` with no overrides.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            config_override: None,
            dir_override: None,
        }
    }

    /// Load and validate the manifest.
    pub fn load(&self) -> Result<ManifestConfig> {
        let config = load_project_config(&self.project_root, self.config_override.as_deref())?;
        validate(&config)?;
        Ok(config)
    }

    /// Install directory, resolved against the project root.
    pub fn install_directory(&self, config: &ManifestConfig) -> PathBuf {
        self.project_root
            .join(config.install_directory(self.dir_override.as_deref()))
    }

    /// Descriptors for `names`, or for every tool when `names` is empty.
    ///
    /// # Errors
    ///
    /// Returns `Config` for a name the manifest does not define.
    pub fn binaries(&self, config: &ManifestConfig, names: &[String]) -> Result<Vec<Binary>> {
        let directory = self.install_directory(config);
        if names.is_empty() {
            return Ok(config.binaries(Some(directory.as_path())));
        }
        names
            .iter()
            .map(|name| config.binary(name, Some(directory.as_path())))
            .collect()
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    context: ProjectContext,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self {
            context: ProjectContext::new(project_root),
        }
    }

    /// Load the manifest from `path` instead of discovering it.
    pub fn with_config(mut self, path: Option<PathBuf>) -> Self {
        self.context.config_override = path;
        self
    }

    /// Install into `dir` instead of the manifest's directory.
    pub fn with_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.context.dir_override = dir;
        self
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.context.project_root
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Ensure(args)) => {
                super::ensure::EnsureCommand::new(self.context.clone(), args.clone()).execute(ui)
            }
            Some(Commands::Path(args)) => {
                super::path::PathCommand::new(self.context.clone(), args.clone()).execute(ui)
            }
            Some(Commands::List(args)) => {
                super::list::ListCommand::new(self.context.clone(), args.clone()).execute(ui)
            }
            Some(Commands::Completions(args)) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(ui)
            }
            None => super::ensure::EnsureCommand::new(self.context.clone(), EnsureArgs::default())
                .execute(ui),
        }
    }
}
