//! Configuration types for copier.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// What to do when one file's transfer fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop copying the remaining files of the current source.
    #[default]
    Abort,
    /// Record the failure and move on to the next queued file.
    Continue,
}

/// Metadata groups to preserve on copied files and directories.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(clippy::struct_excessive_bools)]
pub struct PreserveConfig {
    /// Copy access and modification times.
    pub times: bool,
    /// Copy owning user and group.
    pub ownership: bool,
    /// Copy permission bits.
    pub permissions: bool,
}

impl Default for PreserveConfig {
    fn default() -> Self {
        Self {
            times: true,
            ownership: true,
            permissions: true,
        }
    }
}

/// Progress display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressConfig {
    /// Show the live percentage line.
    pub enabled: bool,
    /// Milliseconds between two reporter polls.
    pub poll_interval_ms: u64,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            poll_interval_ms: 50,
        }
    }
}

impl ProgressConfig {
    /// Poll interval as a [`Duration`].
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Copier configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Behavior when a file transfer fails.
    #[serde(default)]
    pub on_error: FailurePolicy,

    /// Metadata preservation.
    #[serde(default)]
    pub preserve: PreserveConfig,

    /// Progress display.
    #[serde(default)]
    pub progress: ProgressConfig,
}

/// A loaded configuration with its origin.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    /// The parsed configuration.
    pub config: Config,
    /// File the configuration was read from, `None` for built-in defaults.
    pub config_path: Option<PathBuf>,
}
