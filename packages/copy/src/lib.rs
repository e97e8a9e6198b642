//! Chunked file copying with live progress and metadata preservation.
//!
//! This crate provides the byte-level half of the copier:
//!
//! * Fixed-size (50 KiB) chunked reading with a lazy chunk iterator
//! * A background reporter thread that polls chunk counters
//! * Per-transfer stop flags so a failed copy never leaves the reporter running
//! * Timestamp, ownership and permission copying
//!
//! # Example
//!
//! ```rust,ignore
//! use copier_copy::{CopyEvent, PreserveOptions, TransferOptions, copy_files, copy_stat};
//!
//! copy_files(source, target, &TransferOptions::default(), &|event: &CopyEvent<'_>| {
//!     if let CopyEvent::Progress(progress) = event {
//!         print!("[ {:.1} % ]\r", progress.percentage());
//!     }
//! })?;
//! copy_stat(source, target, &PreserveOptions::all())?;
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod chunks;
mod copy;
mod error;
mod event;
mod progress;
mod stat;

pub use chunks::{CHUNK_SIZE, ChunkedReader, Chunks, chunk_count};
pub use copy::{TransferOptions, copy_files, transfer};
pub use error::{CopyError, TransferError};
pub use event::{CopyEvent, TransferStats};
pub use progress::{
    CopyProgress, DEFAULT_POLL_INTERVAL, ProgressTracker, StopFlag, spawn_reporter,
};
pub use stat::{PreserveOptions, copy_stat, copy_times};
