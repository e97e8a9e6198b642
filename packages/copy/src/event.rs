//! Notices emitted while copying.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::Path;

use crate::error::CopyError;
use crate::progress::CopyProgress;

/// Totals for one completed file transfer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransferStats {
    /// Chunks handed off to the writer.
    pub chunks: u64,
    /// Bytes written.
    pub bytes: u64,
}

/// Event reported to the caller's callback.
///
/// `Progress` is delivered from the reporter thread; every other variant is
/// delivered from the thread driving the copy.
#[derive(Debug)]
pub enum CopyEvent<'a> {
    /// A file transfer is about to start.
    Started {
        /// Source file.
        source: &'a Path,
        /// Destination file.
        destination: &'a Path,
    },
    /// Periodic update from the reporter.
    Progress(CopyProgress),
    /// A file transfer completed.
    Finished {
        /// Source file.
        source: &'a Path,
        /// Destination file.
        destination: &'a Path,
        /// Transfer totals.
        stats: TransferStats,
    },
    /// A file transfer failed.
    Failed {
        /// Source file.
        source: &'a Path,
        /// Destination file.
        destination: &'a Path,
        /// What went wrong.
        error: &'a CopyError,
    },
    /// A scanned entry was neither a regular file nor a directory.
    Skipped {
        /// The skipped entry.
        path: &'a Path,
        /// Why it was skipped.
        reason: &'static str,
    },
}
