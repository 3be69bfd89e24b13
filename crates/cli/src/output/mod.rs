//! Output formatting utilities
//!
//! Formatter for consistent human-readable output plus progress
//! indication for transfers.

mod formatter;
mod progress;

pub use formatter::Formatter;
pub use progress::Progress;

/// Output configuration derived from CLI flags
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Disable colored output
    pub no_color: bool,
    /// Disable progress indicators
    pub no_progress: bool,
    /// Suppress non-error output
    pub quiet: bool,
}
