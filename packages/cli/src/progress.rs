//! Progress line for the file being copied.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::sync::{Mutex, PoisonError};

use colored::Colorize;
use copier_operations::CopyProgress;
use indicatif::{ProgressBar, ProgressStyle};

/// Owns the progress line of the transfer in flight.
///
/// Updates arrive from the reporter thread while start and finish come from
/// the copying thread, so the active bar sits behind a mutex.
pub struct ProgressManager {
    enabled: bool,
    active: Mutex<Option<ProgressBar>>,
}

impl ProgressManager {
    /// Create a new progress manager.
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self {
            enabled,
            active: Mutex::new(None),
        }
    }

    /// Show a fresh progress line for the next file.
    ///
    /// If progress is disabled, the line is a hidden progress bar.
    pub fn start_file(&self) {
        let bar = if self.enabled {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::default_spinner()
                    .template("{prefix} [ {msg} % ]")
                    .expect("Invalid progress bar template"),
            );
            bar.set_prefix("[INFO]".blue().bold().to_string());
            bar.set_message(format!("{:.1}", 0.0));
            bar
        } else {
            ProgressBar::hidden()
        };

        if let Some(previous) = self.lock().replace(bar) {
            previous.finish_and_clear();
        }
    }

    /// Render a reporter sample.
    pub fn update(&self, progress: &CopyProgress) {
        if let Some(bar) = self.lock().as_ref() {
            bar.set_message(format!("{:.1}", progress.percentage()));
        }
    }

    /// Remove the progress line of the finished file.
    pub fn finish_file(&self) {
        if let Some(bar) = self.lock().take() {
            bar.finish_and_clear();
        }
    }

    /// Whether progress lines are drawn.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<ProgressBar>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
