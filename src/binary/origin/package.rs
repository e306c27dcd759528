//! Installation through a language package manager.

use super::{prepare_directory, Origin};
use crate::binary::template::Template;
use crate::binary::version::LATEST;
use crate::error::{BintoolError, Result};
use crate::shell::{execute, CommandOptions};
use std::path::{Path, PathBuf};

/// Package managers able to build a binary into a chosen directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    /// `go install`, directed by `GOBIN`.
    Go,
    /// `cargo install`, directed by `--root`.
    Cargo,
}

/// A fully planned package manager run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
}

impl Invocation {
    /// The command line, for display.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Installs a package with its ecosystem's installer.
///
/// The installed artifact must be named after the binary; differently
/// named artifacts are not renamed.
#[derive(Debug, Clone)]
pub struct PackageInstall {
    manager: PackageManager,
    package: String,
}

impl PackageInstall {
    /// `go install <package>@<version>`.
    pub fn go(package: impl Into<String>) -> Self {
        Self {
            manager: PackageManager::Go,
            package: package.into(),
        }
    }

    /// `cargo install <package> --version <version>`.
    pub fn cargo(package: impl Into<String>) -> Self {
        Self {
            manager: PackageManager::Cargo,
            package: package.into(),
        }
    }

    pub fn manager(&self) -> PackageManager {
        self.manager
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// Plan the installer run for `template` without executing it.
    pub fn invocation(&self, template: &Template) -> Result<Invocation> {
        let directory = absolute(Path::new(&template.directory))?;

        let invocation = match self.manager {
            PackageManager::Go => Invocation {
                program: "go".to_string(),
                args: vec![
                    "install".to_string(),
                    format!("{}@{}", self.package, template.version),
                ],
                env: vec![("GOBIN".to_string(), directory.display().to_string())],
            },
            PackageManager::Cargo => {
                let root = cargo_root(&directory).display().to_string();
                let mut args = vec!["install".to_string(), self.package.clone()];
                if template.version != LATEST {
                    let version = template
                        .version
                        .strip_prefix('v')
                        .unwrap_or(&template.version);
                    args.push("--version".to_string());
                    args.push(version.to_string());
                }
                args.push("--root".to_string());
                args.push(root.clone());

                Invocation {
                    program: "cargo".to_string(),
                    args,
                    env: vec![("CARGO_INSTALL_ROOT".to_string(), root)],
                }
            }
        };

        Ok(invocation)
    }
}

impl Origin for PackageInstall {
    fn install(&self, template: &Template) -> Result<()> {
        prepare_directory(template)?;

        let invocation = self.invocation(template)?;
        tracing::info!("running {}", invocation.display());

        let options = invocation
            .env
            .iter()
            .fold(CommandOptions::captured(), |options, (key, value)| {
                options.with_env(key, value)
            });
        let result = execute(&invocation.program, &invocation.args, &options).map_err(|err| {
            match err {
                BintoolError::CommandFailed { command, message } => BintoolError::Install {
                    message: format!("cannot run {}: {}", command, message),
                },
                other => other,
            }
        })?;

        if !result.success {
            let code = result
                .exit_code
                .map(|c| c.to_string())
                .unwrap_or_else(|| "signal".to_string());
            return Err(BintoolError::Install {
                message: format!(
                    "{} exited with {}: {}",
                    invocation.display(),
                    code,
                    result.stderr.trim()
                ),
            });
        }

        tracing::debug!("{} finished in {:?}", invocation.program, result.duration);
        Ok(())
    }

    fn kind(&self) -> &'static str {
        match self.manager {
            PackageManager::Go => "go",
            PackageManager::Cargo => "cargo",
        }
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|e| BintoolError::filesystem(path, e))
}

// cargo installs into `<root>/bin`
fn cargo_root(directory: &Path) -> PathBuf {
    match (directory.file_name(), directory.parent()) {
        (Some(name), Some(parent)) if name == "bin" => parent.to_path_buf(),
        _ => directory.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn template(directory: &Path, version: &str) -> Template {
        Template {
            directory: directory.display().to_string(),
            name: "tool".into(),
            path: directory.join("tool").display().to_string(),
            version: version.into(),
            ..Default::default()
        }
    }

    #[test]
    fn go_invocation_sets_gobin() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("bin");
        let origin = PackageInstall::go("github.com/example/tool");

        let invocation = origin.invocation(&template(&dir, "v1.2.3")).unwrap();

        assert_eq!(invocation.program, "go");
        assert_eq!(invocation.args, vec!["install", "github.com/example/tool@v1.2.3"]);
        assert_eq!(
            invocation.env,
            vec![("GOBIN".to_string(), dir.display().to_string())]
        );
    }

    #[test]
    fn go_invocation_uses_absolute_directory() {
        let origin = PackageInstall::go("github.com/example/tool");

        let invocation = origin
            .invocation(&template(Path::new("bin"), "latest"))
            .unwrap();

        assert!(Path::new(&invocation.env[0].1).is_absolute());
        assert_eq!(invocation.args[1], "github.com/example/tool@latest");
    }

    #[test]
    fn cargo_invocation_strips_v_and_uses_parent_root() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("bin");
        let origin = PackageInstall::cargo("cargo-nextest");

        let invocation = origin.invocation(&template(&dir, "v0.9.87")).unwrap();
        let root = temp.path().display().to_string();

        assert_eq!(invocation.program, "cargo");
        assert_eq!(
            invocation.args,
            vec!["install", "cargo-nextest", "--version", "0.9.87", "--root", root.as_str()]
        );
        assert_eq!(invocation.env, vec![("CARGO_INSTALL_ROOT".to_string(), root)]);
    }

    #[test]
    fn cargo_latest_omits_version() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("tools");
        let origin = PackageInstall::cargo("ripgrep");

        let invocation = origin.invocation(&template(&dir, "latest")).unwrap();

        assert!(!invocation.args.contains(&"--version".to_string()));
        assert_eq!(invocation.args.last().unwrap(), &dir.display().to_string());
    }

    #[test]
    fn display_joins_command_line() {
        let invocation = Invocation {
            program: "go".into(),
            args: vec!["install".into(), "x@v1".into()],
            env: vec![],
        };
        assert_eq!(invocation.display(), "go install x@v1");
    }

    #[test]
    fn kinds() {
        assert_eq!(PackageInstall::go("x").kind(), "go");
        assert_eq!(PackageInstall::cargo("x").kind(), "cargo");
        assert_eq!(PackageInstall::cargo("x").manager(), PackageManager::Cargo);
        assert_eq!(PackageInstall::go("x").package(), "x");
    }
}
