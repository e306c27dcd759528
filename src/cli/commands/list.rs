//! List command implementation.
//!
//! The `bintool list` command lists the tools of the manifest and whether
//! they are installed.

use std::io::Write;

use serde::Serialize;

use crate::binary::Binary;
use crate::cli::args::ListArgs;
use crate::error::{BintoolError, Result};
use crate::ui::{should_use_colors, Theme, UserInterface};

use super::dispatcher::{Command, CommandResult, ProjectContext};

/// One row of `bintool list`.
#[derive(Debug, Clone, Serialize)]
pub struct ToolListing {
    pub name: String,
    pub version: String,
    pub origin: String,
    pub path: String,
    pub installed: bool,
}

impl From<&Binary> for ToolListing {
    fn from(binary: &Binary) -> Self {
        Self {
            name: binary.name().to_string(),
            version: binary.version().to_string(),
            origin: binary.origin_kind().to_string(),
            path: binary.bin_path().display().to_string(),
            installed: binary.is_installed(),
        }
    }
}

/// The list command implementation.
pub struct ListCommand {
    context: ProjectContext,
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(context: ProjectContext, args: ListArgs) -> Self {
        Self { context, args }
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = match self.context.load() {
            Ok(c) => c,
            Err(BintoolError::ConfigNotFound { path }) => {
                ui.error(&format!("No manifest found at {}", path.display()));
                return Ok(CommandResult::failure(2));
            }
            Err(e) => return Err(e),
        };

        let listings: Vec<ToolListing> = self
            .context
            .binaries(&config, &[])?
            .iter()
            .map(ToolListing::from)
            .collect();

        if self.args.json {
            let json = serde_json::to_string_pretty(&listings)
                .map_err(|e| BintoolError::Other(e.into()))?;
            writeln!(std::io::stdout(), "{}", json)?;
            return Ok(CommandResult::success());
        }

        let theme = if should_use_colors() {
            Theme::new()
        } else {
            Theme::plain()
        };
        for line in render(&listings, &theme) {
            ui.message(&line);
        }

        Ok(CommandResult::success())
    }
}

fn render(listings: &[ToolListing], theme: &Theme) -> Vec<String> {
    let width = listings.iter().map(|l| l.name.len()).max().unwrap_or(0);

    listings
        .iter()
        .map(|l| {
            let marker = if l.installed {
                theme.success.apply_to("✓").to_string()
            } else {
                theme.dim.apply_to("-").to_string()
            };
            format!(
                "  {} {}  {} {}",
                marker,
                theme
                    .highlight
                    .apply_to(format!("{:width$}", l.name, width = width)),
                l.version,
                theme.dim.apply_to(format!("({}, {})", l.origin, l.path)),
            )
        })
        .collect()
}
