//! Tool manifest loading, parsing, and validation.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use bintool::config::{load_project_config, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(
//!     temp.path().join("bintool.yml"),
//!     "tools:\n  goimports:\n    version: latest\n    origin: { kind: go, package: golang.org/x/tools/cmd/goimports }\n",
//! )
//! .unwrap();
//!
//! let config = load_project_config(temp.path(), None).unwrap();
//! validate(&config).unwrap();
//! assert_eq!(config.tools["goimports"].version, "latest");
//! ```
//!
//! # Manifest locations
//!
//! The manifest is `bintool.yml` or `.bintool.yml` in the project root,
//! unless a path is given explicitly.

pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{
    find_project_root, load_config, load_project_config, parse_config, ConfigPaths,
    MANIFEST_NAMES,
};
pub use schema::{ManifestConfig, OriginConfig, ToolConfig};
pub use validator::{validate, validate_config, ValidationError};
