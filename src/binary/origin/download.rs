//! Single-file downloads.

use super::{prepare_directory, Origin};
use crate::binary::set_executable;
use crate::binary::template::Template;
use crate::error::{BintoolError, Result};
use crate::ui::download_bar;
use reqwest::blocking::Client;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Duration;

/// Downloads the executable itself from a templated URL.
#[derive(Debug, Clone)]
pub struct DirectDownload {
    url: String,
}

impl DirectDownload {
    /// Create an origin downloading from `url`, a template such as
    /// `"https://example.com/{{ version }}/tool-{{ os }}-{{ arch }}"`.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// URL template.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Origin for DirectDownload {
    fn install(&self, template: &Template) -> Result<()> {
        let url = template.resolve(&self.url)?;
        prepare_directory(template)?;

        let path = Path::new(&template.path);
        tracing::info!("downloading {} to {}", url, path.display());
        fetch_to(&url, path)?;

        set_executable(path).map_err(|e| BintoolError::filesystem(path, e))
    }

    fn kind(&self) -> &'static str {
        "download"
    }
}

fn client() -> Result<Client> {
    Client::builder()
        .user_agent(concat!("bintool/", env!("CARGO_PKG_VERSION")))
        .timeout(None::<Duration>)
        .build()
        .map_err(|e| BintoolError::Download {
            url: String::new(),
            message: format!("cannot build HTTP client: {}", e),
        })
}

/// GET `url` and stream the body into a new file at `destination`.
///
/// Returns the number of bytes written. Fails with
/// [`BintoolError::Download`] on transport errors and non-2xx responses;
/// nothing is written in the latter case.
pub fn fetch_to(url: &str, destination: &Path) -> Result<u64> {
    let download_error = |message: String| BintoolError::Download {
        url: url.to_string(),
        message,
    };

    let response = client()?
        .get(url)
        .send()
        .map_err(|e| download_error(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(download_error(format!("HTTP {}", status)));
    }

    let bar = download_bar(response.content_length());
    let file = File::create(destination).map_err(|e| BintoolError::filesystem(destination, e))?;
    let mut writer = BufWriter::new(file);

    let written = io::copy(&mut bar.wrap_read(response), &mut writer)
        .map_err(|e| download_error(e.to_string()))?;
    writer
        .flush()
        .map_err(|e| BintoolError::filesystem(destination, e))?;
    bar.finish_and_clear();

    tracing::debug!("downloaded {} bytes from {}", written, url);
    Ok(written)
}
