//! Selective archive extraction.
//!
//! The archive format is determined by sniffing the first bytes of the
//! content, never by file name. Every entry is offered to a selector which
//! either skips it or names the path it should be written to, relative to
//! the destination directory. Extracted files are always made executable.

use crate::binary::set_executable;
use crate::error::{BintoolError, Result};
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Component, Path, PathBuf};

/// Archive formats that can be extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    /// gzip-compressed tarball
    TarGz,
    /// zip archive
    Zip,
}

/// Detect the archive format from the leading bytes of its content.
pub fn detect_format(header: &[u8]) -> Option<ArchiveFormat> {
    match header {
        [0x1F, 0x8B, ..] => Some(ArchiveFormat::TarGz),
        [0x50, 0x4B, 0x03, 0x04, ..] | [0x50, 0x4B, 0x05, 0x06, ..] => Some(ArchiveFormat::Zip),
        _ => None,
    }
}

/// Extract the archive at `archive` into `destination`.
///
/// The selector receives each entry path (with `/` separators) and returns
/// the output path to write it to, or `None` to skip the entry. The archive
/// file is deleted after a fully successful extraction and kept otherwise.
pub fn extract<F>(archive: &Path, destination: &Path, selector: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    tracing::info!("extracting {}", archive.display());

    let file = File::open(archive).map_err(|e| BintoolError::filesystem(archive, e))?;
    extract_from(file, archive, destination, &selector)?;

    fs::remove_file(archive).map_err(|e| BintoolError::filesystem(archive, e))?;
    Ok(())
}

/// Extract archive content from any seekable reader into `destination`.
///
/// Behaves like [`extract`] without owning (or deleting) a source file.
pub fn extract_reader<R, F>(reader: R, destination: &Path, selector: F) -> Result<()>
where
    R: Read + Seek,
    F: Fn(&str) -> Option<String>,
{
    extract_from(reader, Path::new("<stream>"), destination, &selector)
}

fn extract_from<R>(
    mut reader: R,
    source: &Path,
    destination: &Path,
    selector: &dyn Fn(&str) -> Option<String>,
) -> Result<()>
where
    R: Read + Seek,
{
    let format = sniff(&mut reader).map_err(|e| extraction_error(source, e))?;
    let Some(format) = format else {
        return Err(BintoolError::UnsupportedFormat {
            path: source.to_path_buf(),
        });
    };
    tracing::debug!("{} sniffed as {:?}", source.display(), format);

    fs::create_dir_all(destination).map_err(|e| BintoolError::filesystem(destination, e))?;

    match format {
        ArchiveFormat::TarGz => untar(reader, source, destination, selector),
        ArchiveFormat::Zip => unzip(reader, source, destination, selector),
    }
}

fn sniff<R: Read + Seek>(reader: &mut R) -> io::Result<Option<ArchiveFormat>> {
    let mut header = Vec::with_capacity(8);
    reader.by_ref().take(8).read_to_end(&mut header)?;
    reader.seek(SeekFrom::Start(0))?;
    Ok(detect_format(&header))
}

fn untar<R: Read>(
    reader: R,
    source: &Path,
    destination: &Path,
    selector: &dyn Fn(&str) -> Option<String>,
) -> Result<()> {
    let mut archive = tar::Archive::new(GzDecoder::new(reader));
    let entries = archive
        .entries()
        .map_err(|e| extraction_error(source, e))?;

    for entry in entries {
        let mut entry = entry.map_err(|e| extraction_error(source, e))?;
        let name = String::from_utf8_lossy(&entry.path_bytes()).into_owned();

        let Some(output) = selector(&name) else {
            continue;
        };
        let target = target_path(destination, &output, source)?;
        let kind = entry.header().entry_type();

        if kind.is_dir() {
            fs::create_dir_all(&target).map_err(|e| BintoolError::filesystem(&target, e))?;
        } else if kind.is_file() {
            write_entry(&mut entry, &target)?;
        } else {
            tracing::debug!("skipping {:?} entry {}", kind, name);
        }
    }

    Ok(())
}

fn unzip<R: Read + Seek>(
    reader: R,
    source: &Path,
    destination: &Path,
    selector: &dyn Fn(&str) -> Option<String>,
) -> Result<()> {
    let mut archive = zip::ZipArchive::new(reader).map_err(|e| extraction_error(source, e))?;

    for index in 0..archive.len() {
        let mut file = archive
            .by_index(index)
            .map_err(|e| extraction_error(source, e))?;
        let name = file.name().to_string();

        let Some(output) = selector(&name) else {
            continue;
        };
        let target = target_path(destination, &output, source)?;

        if file.is_dir() {
            fs::create_dir_all(&target).map_err(|e| BintoolError::filesystem(&target, e))?;
        } else {
            write_entry(&mut file, &target)?;
        }
    }

    Ok(())
}

/// Join a selector output onto the destination, refusing to leave it.
fn target_path(destination: &Path, output: &str, source: &Path) -> Result<PathBuf> {
    let relative = Path::new(output);
    let contained = relative
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));

    if !contained {
        return Err(BintoolError::Extraction {
            path: source.to_path_buf(),
            message: format!("entry output '{}' escapes the destination", output),
        });
    }

    Ok(destination.join(relative))
}

fn write_entry(contents: &mut dyn Read, target: &Path) -> Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| BintoolError::filesystem(parent, e))?;
    }

    let mut out = File::create(target).map_err(|e| BintoolError::filesystem(target, e))?;
    io::copy(contents, &mut out).map_err(|e| extraction_error(target, e))?;
    set_executable(target).map_err(|e| BintoolError::filesystem(target, e))?;

    tracing::debug!("extracted {}", target.display());
    Ok(())
}

fn extraction_error(path: &Path, err: impl std::fmt::Display) -> BintoolError {
    BintoolError::Extraction {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}
