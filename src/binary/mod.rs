//! Provisioning of external binaries used by automation scripts.
//!
//! A [`Binary`] names a command, the version that should be installed and
//! the [`Origin`] it is obtained from. [`Binary::ensure`] installs it only
//! when it is missing or reports a different version, so it can be called
//! before every task that needs the tool.
//!
//! Three origins are provided:
//!
//! - [`PackageInstall`]: runs `go install` or `cargo install`
//! - [`DirectDownload`]: downloads a single executable
//! - [`ArchiveDownload`]: downloads an archive and extracts selected files
//!
//! Any other source can be supported by implementing [`Origin`].
//!
//! # Example
//!
//! ```no_run
//! use bintool::binary::{ArchiveDownload, Binary};
//!
//! let commitsar = Binary::new(
//!     "commitsar",
//!     "0.20.1",
//!     ArchiveDownload::new(
//!         "https://github.com/aevea/commitsar/releases/download/v{{ version }}/commitsar_{{ version }}_{{ os }}_{{ arch }}.tar.gz",
//!         [("commitsar", "commitsar")],
//!     ),
//! )
//! .with_os_mapping([("macos", "darwin")])
//! .with_arch_mapping([("x86_64", "amd64"), ("aarch64", "arm64")])
//! .with_version_cmd("{{ path }} version");
//!
//! commitsar.ensure()?;
//! std::process::Command::new(commitsar.bin_path()).arg("--help").status()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod extract;
pub mod origin;
pub mod template;
pub mod version;

pub use extract::{detect_format, extract, extract_reader, ArchiveFormat};
pub use origin::{ArchiveDownload, DirectDownload, Origin, PackageInstall, PackageManager};
pub use template::Template;
pub use version::{DEFAULT_VERSION_CMD, LATEST, SKIP_VERSION_CHECK};

use crate::error::{BintoolError, Result};
use std::fmt;
use std::path::{Path, PathBuf};

/// Directory binaries are installed to unless overridden.
pub const DEFAULT_DIRECTORY: &str = "bin";

/// Archive suffix used unless overridden.
pub const DEFAULT_ARCHIVE_EXTENSION: &str = ".tar.gz";

/// Outcome of [`Binary::ensure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ensured {
    /// The binary was already present at the expected version.
    Present,
    /// The origin was asked to install the binary.
    Installed,
}

/// An external binary, its requested version and where to obtain it.
pub struct Binary {
    name: String,
    version: String,
    directory: PathBuf,
    version_cmd: Option<String>,
    origin: Box<dyn Origin>,
    template: Template,
}

impl Binary {
    /// Describe a binary named `name` at `version`, provisioned by `origin`.
    ///
    /// The binary is installed to [`DEFAULT_DIRECTORY`], archives default to
    /// [`DEFAULT_ARCHIVE_EXTENSION`] and the version is verified with
    /// [`DEFAULT_VERSION_CMD`].
    pub fn new(name: impl Into<String>, version: impl Into<String>, origin: impl Origin + 'static) -> Self {
        let name = name.into();
        let version = version.into();
        let extension = if cfg!(windows) { ".exe" } else { "" };

        let template = Template {
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            directory: String::new(),
            name: name.clone(),
            path: String::new(),
            version: version.clone(),
            extension: extension.to_string(),
            archive_extension: DEFAULT_ARCHIVE_EXTENSION.to_string(),
        };

        Self {
            name,
            version,
            directory: PathBuf::new(),
            version_cmd: Some(DEFAULT_VERSION_CMD.to_string()),
            origin: Box::new(origin),
            template,
        }
        .with_directory(DEFAULT_DIRECTORY)
    }

    /// Install into `directory` instead of [`DEFAULT_DIRECTORY`].
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = directory.into();
        let path = self
            .directory
            .join(format!("{}{}", self.name, self.template.extension));

        self.template.directory = self.directory.display().to_string();
        self.template.path = path.display().to_string();
        self
    }

    /// Replace the operating system name used in templates.
    ///
    /// Keys are matched against the current value; e.g. `[("macos", "darwin")]`
    /// for vendors that publish `tool-darwin` builds.
    pub fn with_os_mapping<K, V>(mut self, mapping: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        if let Some(replacement) = lookup(mapping, &self.template.os) {
            self.template.os = replacement;
        }
        self
    }

    /// Replace the architecture name used in templates.
    ///
    /// e.g. `[("x86_64", "amd64"), ("aarch64", "arm64")]`.
    pub fn with_arch_mapping<K, V>(mut self, mapping: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        if let Some(replacement) = lookup(mapping, &self.template.arch) {
            self.template.arch = replacement;
        }
        self
    }

    /// Use `extension` as the archive suffix.
    pub fn with_archive_extension(mut self, extension: impl Into<String>) -> Self {
        self.template.archive_extension = extension.into();
        self
    }

    /// Pick the archive suffix per operating system, e.g. `[("windows", ".zip")]`.
    ///
    /// Keys are matched against the (possibly remapped) template OS first and
    /// the running OS second.
    pub fn with_archive_extension_mapping<K, V>(
        mut self,
        mapping: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let entries: Vec<(K, V)> = mapping.into_iter().collect();
        let host = std::env::consts::OS;
        let position = entries
            .iter()
            .position(|(k, _)| k.as_ref() == self.template.os)
            .or_else(|| entries.iter().position(|(k, _)| k.as_ref() == host));

        if let Some(index) = position {
            if let Some((_, extension)) = entries.into_iter().nth(index) {
                self.template.archive_extension = extension.into();
            }
        }
        self
    }

    /// Verify the installed version with `format`, a template such as
    /// `"{{ path }} version"`. [`SKIP_VERSION_CHECK`] disables the check.
    pub fn with_version_cmd(mut self, format: impl Into<String>) -> Self {
        let format = format.into();
        self.version_cmd = if format == SKIP_VERSION_CHECK {
            None
        } else {
            Some(format)
        };
        self
    }

    /// Disable version verification; an existing binary is assumed correct.
    pub fn without_version_check(self) -> Self {
        self.with_version_cmd(SKIP_VERSION_CHECK)
    }

    /// Command name of the binary.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Requested version.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Directory the binary is installed to.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Qualified path to the executable; use it to invoke the tool.
    pub fn bin_path(&self) -> &Path {
        Path::new(&self.template.path)
    }

    /// Template passed to the origin.
    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Version command template, `None` when verification is disabled.
    pub fn version_cmd(&self) -> Option<&str> {
        self.version_cmd.as_deref()
    }

    /// Short name of the origin kind.
    pub fn origin_kind(&self) -> &'static str {
        self.origin.kind()
    }

    /// Ensure the binary is installed at the expected version.
    ///
    /// # Errors
    ///
    /// Returns `Config` when no version is set, or `Provision` wrapping
    /// the origin's failure.
    pub fn ensure(&self) -> Result<Ensured> {
        if self.version.is_empty() {
            return Err(BintoolError::Config {
                message: format!("version must be set for {}", self.name),
            });
        }

        if self.is_installed() && self.is_expected_version() {
            tracing::debug!("{} {} already present", self.name, self.version);
            return Ok(Ensured::Present);
        }

        self.install()?;
        Ok(Ensured::Installed)
    }

    /// Install the binary unconditionally.
    pub fn install(&self) -> Result<()> {
        tracing::info!("installing {} {}", self.name, self.version);
        self.origin
            .install(&self.template)
            .map_err(|source| BintoolError::Provision {
                binary: self.name.clone(),
                source: Box::new(source),
            })
    }

    /// Whether an executable exists at [`Binary::bin_path`].
    pub fn is_installed(&self) -> bool {
        self.bin_path().exists()
    }

    /// Whether the installed binary reports the requested version.
    pub fn is_expected_version(&self) -> bool {
        version::is_expected_version(&self.version, self.version_cmd.as_deref(), &self.template)
    }
}

impl fmt::Debug for Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binary")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("directory", &self.directory)
            .field("version_cmd", &self.version_cmd)
            .field("origin", &self.origin.kind())
            .field("template", &self.template)
            .finish()
    }
}

fn lookup<K, V>(mapping: impl IntoIterator<Item = (K, V)>, key: &str) -> Option<String>
where
    K: AsRef<str>,
    V: Into<String>,
{
    mapping
        .into_iter()
        .find(|(k, _)| k.as_ref() == key)
        .map(|(_, v)| v.into())
}

/// Make `path` executable (mode 0755). No-op on non-unix platforms.
#[cfg(unix)]
pub(crate) fn set_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
}

/// Make `path` executable (mode 0755). No-op on non-unix platforms.
#[cfg(not(unix))]
pub(crate) fn set_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
