//! Configuration file discovery.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Name of the config file inside the user config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Directory under the platform config dir that holds copier settings.
pub const CONFIG_DIR_NAME: &str = "copier";

/// Default location of the user config file, e.g.
/// `~/.config/copier/config.toml` on Linux.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Find the config file to load.
///
/// An explicit path must exist. Without one, the default location is used
/// if a file is present there; otherwise `None` means built-in defaults.
///
/// # Errors
///
/// * If `explicit` is given but is not a file
pub fn discover_config(explicit: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        log::debug!("Using explicit config {}", path.display());
        return Ok(Some(path.to_path_buf()));
    }

    let found = default_config_path().filter(|path| path.is_file());
    match &found {
        Some(path) => log::debug!("Found user config {}", path.display()),
        None => log::debug!("No user config found, using defaults"),
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_config_is_used() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("copier.toml");
        fs::write(&path, "").unwrap();

        assert_eq!(discover_config(Some(&path)).unwrap(), Some(path));
    }

    #[test]
    fn test_missing_explicit_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.toml");

        assert!(matches!(
            discover_config(Some(&path)),
            Err(ConfigError::NotFound(p)) if p == path
        ));
    }

    #[test]
    fn test_explicit_directory_is_rejected() {
        let dir = TempDir::new().unwrap();

        assert!(discover_config(Some(dir.path())).is_err());
    }

    #[test]
    fn test_default_path_layout() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("copier/config.toml"));
        }
    }
}
