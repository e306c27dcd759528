//! User-facing terminal output.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] writing status lines to stderr
//! - [`MockUI`] capturing output for tests
//! - the download progress bar and duration formatting
//!
//! Status lines go to stderr so that stdout stays free for data such as
//! `bintool path`.
//!
//! # Example
//!
//! ```
//! use bintool::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.step("provisioning 1 binaries: jq");
//! ui.success("jq 4ms");
//! assert_eq!(ui.successes(), &["jq 4ms".to_string()]);
//! ```

pub mod mock;
pub mod output;
pub mod progress;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use progress::{download_bar, format_duration};
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, Theme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a step line.
    fn step(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);
}
