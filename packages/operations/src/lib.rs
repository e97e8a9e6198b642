//! Traversal and copy engine for copier.
//!
//! This crate turns source paths into copy jobs:
//!
//! * Source resolution, manifest reading and up-front validation
//! * Classification of each source as a file or a directory tree
//! * Directory recreation, parents first, before any file is copied
//! * A FIFO file drain with per-file progress and metadata preservation
//!
//! # Example
//!
//! ```rust,ignore
//! use copier_operations::{JobOptions, resolve_sources, run_batch};
//!
//! let sources = resolve_sources(&args.paths, &cwd);
//! let summary = run_batch(&sources, &destination, &JobOptions::default(), &|event| {
//!     println!("{event:?}");
//! })?;
//! println!("{} files copied", summary.totals.files_copied);
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod batch;
mod error;
mod job;
mod mapping;

pub use batch::{
    BatchSummary, read_manifest, resolve_sources, run_batch, validate_destination,
    validate_sources,
};
pub use copier_config::FailurePolicy;
pub use copier_copy::{CopyEvent, CopyProgress};
pub use error::OperationError;
pub use job::{CopyJob, JobOptions, JobSummary, run_copy_job};
pub use mapping::{DestinationMapper, SourceKind};
