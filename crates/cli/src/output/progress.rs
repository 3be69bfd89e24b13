//! Progress indication for transfer operations
//!
//! Transfers stream without a known total, so progress is a spinner,
//! optionally with a running byte counter. Suppressed in quiet mode or
//! with --no-progress.

use super::OutputConfig;

/// Spinner wrapper around indicatif
#[derive(Debug)]
pub struct Progress {
    bar: Option<indicatif::ProgressBar>,
}

#[allow(dead_code)]
impl Progress {
    /// Create a plain spinner with a message
    pub fn spinner(config: OutputConfig, message: &str) -> Self {
        Self::with_template(config, message, "{spinner:.green} {msg}")
    }

    /// Create a spinner with a running byte counter
    pub fn bytes(config: OutputConfig, message: &str) -> Self {
        Self::with_template(config, message, "{spinner:.green} {msg} {bytes}")
    }

    fn with_template(config: OutputConfig, message: &str, template: &str) -> Self {
        let bar = if config.quiet || config.no_progress {
            None
        } else {
            let bar = indicatif::ProgressBar::new_spinner();
            bar.set_style(
                indicatif::ProgressStyle::default_spinner()
                    .template(template)
                    .expect("valid template"),
            );
            bar.set_message(message.to_string());
            bar.enable_steady_tick(std::time::Duration::from_millis(100));
            Some(bar)
        };

        Self { bar }
    }

    /// Advance the byte counter
    pub fn inc(&self, delta: u64) {
        if let Some(bar) = &self.bar {
            bar.inc(delta);
        }
    }

    /// Finish and clear the spinner
    pub fn finish_and_clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }

    /// Check if the spinner is visible
    pub fn is_visible(&self) -> bool {
        self.bar.is_some()
    }
}
