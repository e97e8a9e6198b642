//! Single-file chunked copy with a live progress reporter.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::Path;
use std::thread;
use std::time::Duration;

use crate::chunks::ChunkedReader;
use crate::error::{CopyError, TransferError};
use crate::event::{CopyEvent, TransferStats};
use crate::progress::{
    CopyProgress, DEFAULT_POLL_INTERVAL, ProgressTracker, StopFlag, spawn_reporter,
};

/// Options for a single file transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferOptions {
    /// Delay between two reporter polls.
    pub poll_interval: Duration,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Copy one file from `source` to `destination` in fixed-size chunks.
///
/// The destination is created or truncated. A reporter thread runs for the
/// duration of the transfer and feeds [`CopyEvent::Progress`] to `on_event`.
/// The reporter is always stopped and joined before this returns, including
/// on failure. A partially written destination is left in place.
///
/// # Arguments
///
/// * `source` - Source file path
/// * `destination` - Destination file path
/// * `options` - Transfer options
/// * `on_event` - Callback for start, progress, completion and failure notices
///
/// # Errors
///
/// * If the source cannot be opened or stat'ed
/// * If the destination cannot be created
/// * If reading or writing fails mid-transfer
pub fn copy_files<F>(
    source: &Path,
    destination: &Path,
    options: &TransferOptions,
    on_event: &F,
) -> Result<TransferStats, CopyError>
where
    F: Fn(&CopyEvent<'_>) + Sync,
{
    log::debug!(
        "Copying file: {} -> {}",
        source.display(),
        destination.display()
    );

    on_event(&CopyEvent::Started {
        source,
        destination,
    });

    match stream_file(source, destination, options, on_event) {
        Ok(stats) => {
            log::trace!(
                "Copied {} bytes in {} chunks to {}",
                stats.bytes,
                stats.chunks,
                destination.display()
            );
            on_event(&CopyEvent::Finished {
                source,
                destination,
                stats,
            });
            Ok(stats)
        }
        Err(error) => {
            log::debug!("Copy failed: {error}");
            on_event(&CopyEvent::Failed {
                source,
                destination,
                error: &error,
            });
            Err(error)
        }
    }
}

fn stream_file<F>(
    source: &Path,
    destination: &Path,
    options: &TransferOptions,
    on_event: &F,
) -> Result<TransferStats, CopyError>
where
    F: Fn(&CopyEvent<'_>) + Sync,
{
    let input = File::open(source).map_err(|e| CopyError::OpenSource {
        path: source.to_path_buf(),
        io_error: e,
    })?;

    let size = input
        .metadata()
        .map_err(|e| CopyError::MetadataError {
            path: source.to_path_buf(),
            io_error: e,
        })?
        .len();

    let mut output = create_target(destination)?;

    let on_progress = |progress: &CopyProgress| on_event(&CopyEvent::Progress(*progress));

    transfer(input, size, &mut output, options, &on_progress).map_err(|error| {
        CopyError::Transfer {
            source_path: source.to_path_buf(),
            target_path: destination.to_path_buf(),
            error,
        }
    })
}

/// Create or truncate `destination`.
///
/// A read-only destination left behind by an earlier copy is made
/// owner-writable and created again; the caller restores the exact mode with
/// the rest of the metadata.
fn create_target(destination: &Path) -> Result<File, CopyError> {
    match File::create(destination) {
        Err(e) if e.kind() == ErrorKind::PermissionDenied && make_writable(destination) => {
            log::debug!("Made read-only {} writable to overwrite it", destination.display());
            File::create(destination)
        }
        result => result,
    }
    .map_err(|e| CopyError::CreateTarget {
        path: destination.to_path_buf(),
        io_error: e,
    })
}

#[cfg(unix)]
fn make_writable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    let Ok(metadata) = fs::symlink_metadata(path) else {
        return false;
    };
    let mode = metadata.permissions().mode();
    if !metadata.is_file() || mode & 0o200 != 0 {
        return false;
    }

    fs::set_permissions(path, fs::Permissions::from_mode(mode | 0o200)).is_ok()
}

#[cfg(not(unix))]
#[allow(clippy::permissions_set_readonly_false)]
fn make_writable(path: &Path) -> bool {
    let Ok(metadata) = fs::symlink_metadata(path) else {
        return false;
    };
    let mut permissions = metadata.permissions();
    if !metadata.is_file() || !permissions.readonly() {
        return false;
    }

    permissions.set_readonly(false);
    fs::set_permissions(path, permissions).is_ok()
}

/// Stream `reader` into `writer` chunk by chunk while a reporter thread
/// reports progress.
///
/// `size` is the number of bytes the reader is expected to produce; it
/// determines the chunk total the reporter compares against.
///
/// # Errors
///
/// * [`TransferError::Read`] if reading a chunk fails
/// * [`TransferError::Write`] if writing or flushing fails
pub fn transfer<R, W, F>(
    reader: R,
    size: u64,
    writer: &mut W,
    options: &TransferOptions,
    on_progress: &F,
) -> Result<TransferStats, TransferError>
where
    R: Read,
    W: Write,
    F: Fn(&CopyProgress) + Sync,
{
    let tracker = ProgressTracker::new();
    let stop = StopFlag::new();
    let mut chunked = ChunkedReader::new(reader, size, &tracker);
    chunked.number_chunks();

    thread::scope(|scope| {
        let reporter =
            spawn_reporter(scope, &tracker, &stop, options.poll_interval, on_progress);

        let result = write_chunks(&mut chunked, writer);

        stop.raise();
        match reporter.join() {
            Ok(rendered) => log::trace!("Reporter rendered {rendered} updates"),
            Err(_) => log::warn!("Progress reporter panicked"),
        }

        result
    })
}

fn write_chunks<R: Read, W: Write>(
    chunked: &mut ChunkedReader<'_, R>,
    writer: &mut W,
) -> Result<TransferStats, TransferError> {
    let mut stats = TransferStats::default();

    for chunk in chunked.read_chunks() {
        let chunk = chunk.map_err(TransferError::Read)?;
        writer.write_all(&chunk).map_err(TransferError::Write)?;
        stats.chunks += 1;
        stats.bytes += chunk.len() as u64;
    }

    writer.flush().map_err(TransferError::Write)?;
    Ok(stats)
}
