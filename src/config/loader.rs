//! Manifest discovery and loading.

use crate::config::schema::ManifestConfig;
use crate::error::{BintoolError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Manifest file names, in lookup order.
pub const MANIFEST_NAMES: &[&str] = &["bintool.yml", ".bintool.yml"];

/// Manifest locations for a project.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Project root the lookup started from
    pub root: PathBuf,

    /// First existing manifest: `bintool.yml`, then `.bintool.yml`
    pub project: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover the manifest for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self {
            root: project_root.to_path_buf(),
            project: MANIFEST_NAMES
                .iter()
                .map(|name| project_root.join(name))
                .find(|path| path.is_file()),
        }
    }

    /// Check if a manifest exists.
    pub fn has_project_config(&self) -> bool {
        self.project.is_some()
    }
}

/// Find the project root by walking up from `start`.
///
/// The first directory holding a manifest wins; a `.git` directory is the
/// fallback.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if ConfigPaths::discover(&current).has_project_config() {
            return Some(current);
        }

        if current.join(".git").exists() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load and parse a single manifest file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParse` if the YAML is invalid.
pub fn load_config(path: &Path) -> Result<ManifestConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            BintoolError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            BintoolError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into a [`ManifestConfig`].
///
/// `source_path` is only used for error reporting.
pub fn parse_config(content: &str, source_path: &Path) -> Result<ManifestConfig> {
    serde_yaml::from_str(content).map_err(|e| BintoolError::ConfigParse {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load the manifest of a project.
///
/// `config_override` is loaded as is; otherwise the manifest is discovered
/// in `project_root`.
pub fn load_project_config(
    project_root: &Path,
    config_override: Option<&Path>,
) -> Result<ManifestConfig> {
    if let Some(path) = config_override {
        return load_config(path);
    }

    let paths = ConfigPaths::discover(project_root);
    match &paths.project {
        Some(path) => {
            tracing::debug!("loading manifest {}", path.display());
            load_config(path)
        }
        None => Err(BintoolError::ConfigNotFound {
            path: project_root.join(MANIFEST_NAMES[0]),
        }),
    }
}
