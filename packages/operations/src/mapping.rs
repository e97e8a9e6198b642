//! Source to destination path mapping.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::{Path, PathBuf};

use crate::error::OperationError;

/// How a source root was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// A single regular file.
    File,
    /// A directory tree.
    Directory,
}

/// Maps paths discovered under a source root to their destination.
///
/// For a directory `/data/photos` copied into `/backup`, the discovered path
/// `/data/photos/2024/a.jpg` maps to `/backup/photos/2024/a.jpg`. A single
/// file maps to `destination_root/<file name>`.
#[derive(Debug, Clone)]
pub struct DestinationMapper {
    kind: SourceKind,
    scan_root: PathBuf,
    destination_root: PathBuf,
    base: PathBuf,
}

impl DestinationMapper {
    /// Create a mapper for `source_root` copied into `destination_root`.
    ///
    /// # Errors
    ///
    /// * If `source_root` has no final component (e.g. `/`)
    pub fn new(
        source_root: &Path,
        destination_root: &Path,
        kind: SourceKind,
    ) -> Result<Self, OperationError> {
        let name = source_root
            .file_name()
            .ok_or_else(|| OperationError::NoFileName(source_root.to_path_buf()))?;

        Ok(Self {
            kind,
            scan_root: source_root.to_path_buf(),
            destination_root: destination_root.to_path_buf(),
            base: destination_root.join(name),
        })
    }

    /// Use `scan_root` as the prefix that discovered paths are relative to.
    ///
    /// Needed when the source root is a symlink and the scan runs on its
    /// resolved target.
    #[must_use]
    pub fn with_scan_root(mut self, scan_root: PathBuf) -> Self {
        self.scan_root = scan_root;
        self
    }

    /// Destination path for a discovered `path`.
    ///
    /// # Errors
    ///
    /// * If a directory job is handed a path outside its source root
    /// * If a file job is handed a path without a file name
    pub fn map(&self, path: &Path) -> Result<PathBuf, OperationError> {
        match self.kind {
            SourceKind::File => path
                .file_name()
                .map(|name| self.destination_root.join(name))
                .ok_or_else(|| OperationError::NoFileName(path.to_path_buf())),
            SourceKind::Directory => {
                let relative = path.strip_prefix(&self.scan_root).map_err(|_| {
                    OperationError::OutsideSource {
                        path: path.to_path_buf(),
                        source_root: self.scan_root.clone(),
                    }
                })?;

                if relative.as_os_str().is_empty() {
                    Ok(self.base.clone())
                } else {
                    Ok(self.base.join(relative))
                }
            }
        }
    }
}
