//! Error types for copy jobs and batches.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while planning or running a copy.
#[derive(Debug, Error)]
pub enum OperationError {
    /// One or more requested sources do not exist.
    #[error("Source path(s) do not exist: {}", join_paths(paths))]
    SourcesNotFound {
        /// Every missing path, in request order.
        paths: Vec<PathBuf>,
    },

    /// The manifest file does not exist.
    #[error("Manifest {} does not exist", .0.display())]
    ManifestNotFound(PathBuf),

    /// A path expected to be a plain file is a directory or special file.
    #[error("{} is not a regular file", .0.display())]
    NotARegularFile(PathBuf),

    /// Failed to read the manifest file.
    #[error("Failed to read manifest {}: {source}", path.display())]
    ManifestReadError {
        /// Manifest path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The destination is missing or not a directory.
    #[error("Destination {} is not a directory", .0.display())]
    DestinationNotDirectory(PathBuf),

    /// The source path has no final component to copy under.
    #[error("Source {} has no file name", .0.display())]
    NoFileName(PathBuf),

    /// A discovered path does not live under the job's source root.
    #[error("{} is outside source root {}", path.display(), source_root.display())]
    OutsideSource {
        /// The offending path.
        path: PathBuf,
        /// The job's source root.
        source_root: PathBuf,
    },

    /// The job was asked to copy before its source was classified.
    #[error("Source {} has not been classified yet", .0.display())]
    NotClassified(PathBuf),

    /// IO error while inspecting a path.
    #[error("IO error at {}: {source}", path.display())]
    IoError {
        /// Path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Directory scanning failed.
    #[error("Failed to scan {}: {message}", path.display())]
    ScanError {
        /// The entry or directory that could not be read.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Failed to create a destination directory.
    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDirError {
        /// The directory path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Copy module error.
    #[error(transparent)]
    Copy(#[from] copier_copy::CopyError),
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
