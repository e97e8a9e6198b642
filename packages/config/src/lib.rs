//! Configuration loading for copier.
//!
//! Settings live in a TOML file, by default `copier/config.toml` under the
//! platform config directory. Every key is optional.
//!
//! ```toml
//! onError = "continue"
//!
//! [preserve]
//! ownership = false
//!
//! [progress]
//! pollIntervalMs = 100
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use copier_config::load_config;
//!
//! let loaded = load_config(None)?;
//! println!("on error: {:?}", loaded.config.on_error);
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod discovery;
mod error;
mod toml_loader;
mod types;

pub use discovery::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, default_config_path, discover_config};
pub use error::ConfigError;
pub use toml_loader::load_toml_config;
pub use types::{Config, FailurePolicy, LoadedConfig, PreserveConfig, ProgressConfig};

use std::path::Path;

/// Load the effective configuration.
///
/// # Arguments
///
/// * `explicit` - Config file given on the command line, if any
///
/// # Errors
///
/// * If an explicit file does not exist
/// * If the file cannot be read or parsed
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    let Some(path) = discover_config(explicit)? else {
        return Ok(LoadedConfig::default());
    };

    let config = load_toml_config(&path)?;

    Ok(LoadedConfig {
        config,
        config_path: Some(path),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_explicit_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("copier.toml");
        fs::write(&path, "onError = \"continue\"\n").unwrap();

        let loaded = load_config(Some(&path)).unwrap();

        assert_eq!(loaded.config.on_error, FailurePolicy::Continue);
        assert_eq!(loaded.config_path, Some(path));
    }
}
