//! Strategies for obtaining a binary.
//!
//! An [`Origin`] receives the fully populated [`Template`] of a binary and
//! must leave an executable at `template.path`, or fail.

pub mod archive;
pub mod download;
pub mod package;

pub use archive::ArchiveDownload;
pub use download::DirectDownload;
pub use package::{PackageInstall, PackageManager};

use crate::binary::template::Template;
use crate::error::{BintoolError, Result};
use std::fs;
use std::path::Path;

/// A way of installing a binary.
pub trait Origin: Send + Sync {
    /// Install the binary described by `template`.
    fn install(&self, template: &Template) -> Result<()>;

    /// Short name used in listings and logs.
    fn kind(&self) -> &'static str {
        "custom"
    }
}

impl<O: Origin + ?Sized> Origin for Box<O> {
    fn install(&self, template: &Template) -> Result<()> {
        (**self).install(template)
    }

    fn kind(&self) -> &'static str {
        (**self).kind()
    }
}

/// Create the install directory (and parents) of `template`.
pub(crate) fn prepare_directory(template: &Template) -> Result<()> {
    let directory = Path::new(&template.directory);
    fs::create_dir_all(directory).map_err(|e| BintoolError::filesystem(directory, e))
}
