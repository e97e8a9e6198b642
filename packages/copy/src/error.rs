//! Error types for copy operations.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

/// Failure while streaming chunks from a reader into a writer.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// Reading the next chunk failed.
    #[error("read failed: {0}")]
    Read(#[source] std::io::Error),

    /// Writing a chunk failed.
    #[error("write failed: {0}")]
    Write(#[source] std::io::Error),
}

/// Errors that can occur during copy operations.
#[derive(Debug, thiserror::Error)]
pub enum CopyError {
    /// Failed to open the source file for reading.
    #[error("Failed to open {}: {io_error}", path.display())]
    OpenSource {
        /// The source path.
        path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Failed to create or truncate the target file.
    #[error("Failed to create {}: {io_error}", path.display())]
    CreateTarget {
        /// The target path.
        path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Streaming bytes from source to target failed.
    #[error("Failed to copy {} to {}: {error}", source_path.display(), target_path.display())]
    Transfer {
        /// Source file path.
        source_path: PathBuf,
        /// Target file path.
        target_path: PathBuf,
        /// Which side of the transfer failed.
        error: TransferError,
    },

    /// Failed to get file metadata.
    #[error("Failed to get metadata for {}: {io_error}", path.display())]
    MetadataError {
        /// The file path.
        path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Failed to set access and modification times.
    #[error("Failed to set timestamps on {}: {io_error}", path.display())]
    SetTimesError {
        /// The target path.
        path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Failed to change owner or group.
    #[error("Failed to change owner of {} to {uid}:{gid}: {io_error}", path.display())]
    ChownError {
        /// The target path.
        path: PathBuf,
        /// Requested user id.
        uid: u32,
        /// Requested group id.
        gid: u32,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Failed to set permission bits.
    #[error("Failed to set permissions on {}: {io_error}", path.display())]
    SetPermissionsError {
        /// The target path.
        path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },
}
