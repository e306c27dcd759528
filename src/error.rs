//! Error types for bintool operations.
//!
//! This module defines [`BintoolError`], the error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Origin failures are wrapped in [`BintoolError::Provision`] so the
//!   caller always knows which binary could not be provisioned
//! - Nothing is retried and nothing is downgraded to a warning, except a
//!   failing version-check command which simply means "not confirmed"
//! - Use `anyhow::Error` (via `BintoolError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for bintool operations.
#[derive(Debug, Error)]
pub enum BintoolError {
    /// A binary or manifest is missing a required setting.
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// Manifest file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse manifest file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// A template references an unknown field or is malformed.
    #[error("Invalid template '{template}': {message}")]
    Template { template: String, message: String },

    /// A file or directory could not be created or written.
    #[error("Filesystem error at {path}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Non-2xx response or transport failure.
    #[error("Download of {url} failed: {message}")]
    Download { url: String, message: String },

    /// A process could not be spawned.
    #[error("Failed to run {command}: {message}")]
    CommandFailed { command: String, message: String },

    /// Archive content is neither gzip-compressed tar nor zip.
    #[error("Unsupported archive format: {path}")]
    UnsupportedFormat { path: PathBuf },

    /// Package manager or generic origin failure.
    #[error("Install failed: {message}")]
    Install { message: String },

    /// An archive entry could not be decompressed or written.
    #[error("Extraction of {path} failed: {message}")]
    Extraction { path: PathBuf, message: String },

    /// An origin failed while provisioning a specific binary.
    #[error("failed to provision {binary}: {source}")]
    Provision {
        binary: String,
        #[source]
        source: Box<BintoolError>,
    },

    /// One or more binaries of a batch could not be provisioned.
    #[error("provisioning failed for: {}", failed.join(", "))]
    ProvisionFailed { failed: Vec<String> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BintoolError {
    /// Build a [`BintoolError::Filesystem`] from an io error and the path it concerns.
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// The innermost error, looking through [`BintoolError::Provision`] wrappers.
    pub fn root_cause(&self) -> &BintoolError {
        match self {
            Self::Provision { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Result type alias for bintool operations.
pub type Result<T> = std::result::Result<T, BintoolError>;
