//! The `bintool path` command prints where a tool's executable lives, so
//! scripts can run `$(bintool path jq)`.

use std::io::Write;

use crate::cli::args::PathArgs;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, ProjectContext};

/// The path command implementation.
pub struct PathCommand {
    context: ProjectContext,
    args: PathArgs,
}

impl PathCommand {
    /// Create a new path command.
    pub fn new(context: ProjectContext, args: PathArgs) -> Self {
        Self { context, args }
    }
}

impl Command for PathCommand {
    fn execute(&self, _ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.context.load()?;
        let binary = config.binary(
            &self.args.tool,
            Some(self.context.install_directory(&config).as_path()),
        )?;

        if self.args.ensure {
            binary.ensure()?;
        }

        writeln!(std::io::stdout(), "{}", binary.bin_path().display())?;
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BintoolError;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    const MANIFEST: &str = "tools:\n  jq:\n    version: \"1.7.1\"\n    origin: { kind: download, url: \"http://127.0.0.1:1/jq\" }\n";

    #[test]
    fn prints_without_installing() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("bintool.yml"), MANIFEST).unwrap();
        let cmd = PathCommand::new(
            ProjectContext::new(temp.path()),
            PathArgs {
                tool: "jq".into(),
                ensure: false,
            },
        );

        let result = cmd.execute(&mut MockUI::new()).unwrap();

        assert!(result.success);
        assert!(!temp.path().join("bin").exists());
    }

    #[test]
    fn ensure_failure_is_reported() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("bintool.yml"), MANIFEST).unwrap();
        let cmd = PathCommand::new(
            ProjectContext::new(temp.path()),
            PathArgs {
                tool: "jq".into(),
                ensure: true,
            },
        );

        let err = cmd.execute(&mut MockUI::new()).unwrap_err();

        assert!(matches!(err, BintoolError::Provision { .. }));
    }

    #[test]
    fn unknown_tool() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("bintool.yml"), MANIFEST).unwrap();
        let cmd = PathCommand::new(
            ProjectContext::new(temp.path()),
            PathArgs {
                tool: "yq".into(),
                ensure: false,
            },
        );

        let err = cmd.execute(&mut MockUI::new()).unwrap_err();

        assert!(err.to_string().contains("unknown tool 'yq'"));
    }
}
