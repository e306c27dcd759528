//! bintool - On-demand provisioning of the CLI tools a project depends on.
//!
//! Build and automation scripts declare the external binaries they need,
//! each with a version and an origin. Before a task runs, the binary is
//! installed into a project-local directory unless it is already there at
//! the right version.
//!
//! # Modules
//!
//! - [`binary`] - Binary descriptors, origins, templates and archive extraction
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Tool manifest loading and validation
//! - [`error`] - Error types and result aliases
//! - [`provision`] - Ensuring a batch of binaries
//! - [`shell`] - Process execution
//! - [`ui`] - Terminal output and download progress
//!
//! # Example
//!
//! ```
//! use bintool::binary::Template;
//!
//! let template = Template {
//!     os: "linux".to_string(),
//!     arch: "amd64".to_string(),
//!     name: "golangci-lint".to_string(),
//!     version: "1.55.2".to_string(),
//!     ..Default::default()
//! };
//! let url = template
//!     .resolve("https://example.com/v{{ version }}/{{ name }}-{{ os }}-{{ arch }}")
//!     .unwrap();
//! assert_eq!(url, "https://example.com/v1.55.2/golangci-lint-linux-amd64");
//! ```

pub mod binary;
pub mod cli;
pub mod config;
pub mod error;
pub mod provision;
pub mod shell;
pub mod ui;

pub use binary::{Binary, Ensured};
pub use error::{BintoolError, Result};
