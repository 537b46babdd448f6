//! Spinner showing the fetch currently in flight.

use std::time::Duration;

use gacha_ledger_scraper::HarvestProgress;
use indicatif::{ProgressBar, ProgressStyle};

/// A single spinner line driven by harvest progress callbacks.
///
/// Phase start and end messages are logged above the spinner; per-banner
/// updates only change the spinner text.
pub(crate) struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    /// Create a spinner. When `quiet` is true it is hidden.
    pub(crate) fn new(quiet: bool) -> Self {
        let pb = if quiet {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::with_template("  {spinner:.cyan} {msg}") {
                pb.set_style(style.tick_chars("/-\\|"));
            }
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        };
        Self { pb }
    }

    /// Stop ticking and clear the line.
    pub(crate) fn finish(&self) {
        self.pb.disable_steady_tick();
        self.pb.finish_and_clear();
    }
}

impl HarvestProgress for Spinner {
    fn on_phase(&self, message: &str) {
        self.pb.suspend(|| log::info!("{}", message));
        self.pb.set_message(message.to_string());
    }

    fn on_banner(&self, current: usize, total: usize, name: &str) {
        self.pb.suspend(|| log::debug!("  [{}/{}] {}", current, total, name));
        self.pb.set_message(format!("[{}/{}] {}", current, total, name));
    }

    fn on_complete(&self, message: &str) {
        self.pb.set_message("");
        self.pb.suspend(|| log::debug!("{}", message));
    }
}
