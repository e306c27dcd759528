//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// bintool - Install the exact tool versions a project needs.
#[derive(Debug, Parser)]
#[command(name = "bintool")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to manifest (overrides bintool.yml in the project root)
    #[arg(short, long, global = true, env = "BINTOOL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides discovery from the current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Install directory (overrides the manifest's `directory`)
    #[arg(short, long, global = true, env = "BINTOOL_DIR")]
    pub dir: Option<PathBuf>,

    /// Only print results, no step lines
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Install missing or outdated tools (default if no command specified)
    Ensure(EnsureArgs),

    /// Print the path of a tool's executable
    Path(PathArgs),

    /// List the tools in the manifest
    List(ListArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `ensure` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct EnsureArgs {
    /// Tools to ensure (all tools when empty)
    #[arg(value_name = "TOOL")]
    pub tools: Vec<String>,
}

/// Arguments for the `path` command.
#[derive(Debug, Clone, clap::Args)]
pub struct PathArgs {
    /// Tool name
    #[arg(value_name = "TOOL")]
    pub tool: String,

    /// Ensure the tool before printing its path
    #[arg(long)]
    pub ensure: bool,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
