//! Tool manifest schema.
//!
//! This module contains the struct definitions that map to the
//! `bintool.yml` file format.

use crate::binary::{
    ArchiveDownload, Binary, DirectDownload, Origin, PackageInstall, DEFAULT_DIRECTORY,
};
use crate::error::{BintoolError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Root structure of `bintool.yml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestConfig {
    /// Install directory, relative to the project root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,

    /// Tool definitions keyed by command name
    pub tools: BTreeMap<String, ToolConfig>,
}

/// A single tool entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Requested version, or `latest`
    #[serde(default)]
    pub version: String,

    /// Where the tool comes from
    pub origin: OriginConfig,

    /// Version command template, defaults to `{{ path }} --version`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_cmd: Option<String>,

    /// Accept any installed version
    #[serde(default, skip_serializing_if = "is_false")]
    pub skip_version_check: bool,

    /// Operating system renames, e.g. `macos: darwin`
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub os_map: HashMap<String, String>,

    /// Architecture renames, e.g. `x86_64: amd64`
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub arch_map: HashMap<String, String>,

    /// Archive suffix override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archive_extension: Option<String>,

    /// Archive suffix per operating system, e.g. `windows: .zip`
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub archive_extension_map: HashMap<String, String>,
}

/// Origin of a tool, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OriginConfig {
    /// `go install <package>@<version>`
    Go { package: String },

    /// `cargo install <package>`
    Cargo { package: String },

    /// Download the executable from `url`
    Download { url: String },

    /// Download the archive at `url` and extract `files`
    Archive {
        url: String,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        files: BTreeMap<String, String>,
    },
}

impl OriginConfig {
    /// Build the origin this entry describes.
    pub fn to_origin(&self) -> Box<dyn Origin> {
        match self {
            Self::Go { package } => Box::new(PackageInstall::go(package)),
            Self::Cargo { package } => Box::new(PackageInstall::cargo(package)),
            Self::Download { url } => Box::new(DirectDownload::new(url)),
            Self::Archive { url, files } => Box::new(ArchiveDownload::new(url, files.clone())),
        }
    }

    /// Templates this origin will resolve.
    pub fn templates(&self) -> Vec<&str> {
        match self {
            Self::Go { .. } | Self::Cargo { .. } => Vec::new(),
            Self::Download { url } => vec![url.as_str()],
            Self::Archive { url, files } => std::iter::once(url.as_str())
                .chain(files.iter().flat_map(|(k, v)| [k.as_str(), v.as_str()]))
                .collect(),
        }
    }
}

impl ToolConfig {
    /// Build the binary descriptor for the tool named `name`, installed
    /// into `directory`.
    pub fn to_binary(&self, name: &str, directory: &Path) -> Binary {
        let mut binary = Binary::new(name, self.version.clone(), self.origin.to_origin())
            .with_directory(directory)
            .with_os_mapping(&self.os_map)
            .with_arch_mapping(&self.arch_map);

        if let Some(extension) = &self.archive_extension {
            binary = binary.with_archive_extension(extension);
        }
        binary = binary.with_archive_extension_mapping(&self.archive_extension_map);

        if let Some(version_cmd) = &self.version_cmd {
            binary = binary.with_version_cmd(version_cmd);
        }
        if self.skip_version_check {
            binary = binary.without_version_check();
        }

        binary
    }
}

impl ManifestConfig {
    /// Install directory: `dir_override`, the manifest's `directory`, or
    /// the default `bin`.
    pub fn install_directory(&self, dir_override: Option<&Path>) -> PathBuf {
        dir_override
            .map(Path::to_path_buf)
            .or_else(|| self.directory.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DIRECTORY))
    }

    /// Descriptors for every tool, in name order.
    pub fn binaries(&self, dir_override: Option<&Path>) -> Vec<Binary> {
        let directory = self.install_directory(dir_override);
        self.tools
            .iter()
            .map(|(name, tool)| tool.to_binary(name, &directory))
            .collect()
    }

    /// Descriptor for the tool named `name`.
    ///
    /// # Errors
    ///
    /// Returns `Config` when the manifest does not define `name`.
    pub fn binary(&self, name: &str, dir_override: Option<&Path>) -> Result<Binary> {
        let tool = self.tools.get(name).ok_or_else(|| BintoolError::Config {
            message: format!("unknown tool '{}'", name),
        })?;
        Ok(tool.to_binary(name, &self.install_directory(dir_override)))
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}
