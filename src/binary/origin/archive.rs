//! Archive downloads.
//!
//! The archive is stored next to the binaries under the last segment of the
//! URL path and reused when it is already there. It is streamed to a
//! `.part` file first and only renamed once complete, so an interrupted
//! transfer is never mistaken for a cached archive. A successful
//! extraction deletes the archive.

use super::download::fetch_to;
use super::{prepare_directory, Origin};
use crate::binary::extract::extract;
use crate::binary::template::Template;
use crate::error::{BintoolError, Result};
use reqwest::Url;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Downloads an archive and extracts selected files from it.
#[derive(Debug, Clone)]
pub struct ArchiveDownload {
    url: String,
    files: BTreeMap<String, String>,
}

impl ArchiveDownload {
    /// Create an origin for the archive at `url`.
    ///
    /// `files` maps entry paths inside the archive to output paths relative
    /// to the install directory. Both sides are templates. An empty mapping
    /// extracts every entry under its own path.
    pub fn new<K, V>(url: impl Into<String>, files: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            url: url.into(),
            files: files
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Create an origin extracting the whole archive at `url`.
    pub fn extract_all(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            files: BTreeMap::new(),
        }
    }

    /// URL template.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Entry to output mapping, unresolved.
    pub fn files(&self) -> &BTreeMap<String, String> {
        &self.files
    }

    fn resolve_files(&self, template: &Template) -> Result<BTreeMap<String, String>> {
        self.files
            .iter()
            .map(|(entry, output)| Ok((template.resolve(entry)?, template.resolve(output)?)))
            .collect()
    }
}

impl Origin for ArchiveDownload {
    fn install(&self, template: &Template) -> Result<()> {
        let url = template.resolve(&self.url)?;
        let files = self.resolve_files(template)?;
        prepare_directory(template)?;

        let directory = Path::new(&template.directory);
        let archive = directory.join(archive_name(&url)?);

        if archive.exists() {
            tracing::debug!("skipping download, {} cached", archive.display());
        } else {
            let partial = partial_path(&archive);
            tracing::info!("downloading {}", url);
            fetch_to(&url, &partial)?;
            fs::rename(&partial, &archive).map_err(|e| BintoolError::filesystem(&archive, e))?;
        }

        extract(&archive, directory, |entry| {
            if files.is_empty() {
                return Some(entry.to_string());
            }
            let entry = entry.strip_prefix("./").unwrap_or(entry);
            files.get(entry).cloned()
        })?;

        if !Path::new(&template.path).is_file() {
            return Err(BintoolError::Install {
                message: format!("archive {} did not provide {}", url, template.path),
            });
        }
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "archive"
    }
}

/// Last non-empty segment of the URL path.
fn archive_name(url: &str) -> Result<String> {
    let parsed = Url::parse(url).map_err(|e| BintoolError::Download {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    parsed
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or_else(|| BintoolError::Download {
            url: url.to_string(),
            message: "URL path has no file name".to_string(),
        })
}

fn partial_path(archive: &Path) -> PathBuf {
    let mut name = archive.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}
