//! Output mode.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show step lines and status.
    #[default]
    Normal,
    /// Show status results only (`--quiet`).
    Quiet,
}

impl OutputMode {
    /// Check if this mode shows step lines.
    pub fn shows_steps(&self) -> bool {
        matches!(self, Self::Normal)
    }
}
