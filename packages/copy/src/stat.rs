//! Metadata preservation: timestamps, ownership and permission bits.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs::{self, Metadata};
use std::path::Path;

use filetime::FileTime;

use crate::error::CopyError;

/// Which metadata groups to carry over from source to destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct PreserveOptions {
    /// Access and modification times.
    pub times: bool,
    /// Owning user and group.
    pub ownership: bool,
    /// Permission bits.
    pub permissions: bool,
}

impl PreserveOptions {
    /// Preserve everything.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            times: true,
            ownership: true,
            permissions: true,
        }
    }

    /// Preserve nothing.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            times: false,
            ownership: false,
            permissions: false,
        }
    }
}

impl Default for PreserveOptions {
    fn default() -> Self {
        Self::all()
    }
}

/// Copy timestamps, then owner and group, then permission bits from
/// `source` onto `destination`.
///
/// Ownership is a no-op on platforms without POSIX owners. An unprivileged
/// `chown` that is refused with `PermissionDenied` is logged and skipped.
///
/// # Errors
///
/// * If the source metadata cannot be read
/// * If setting timestamps or permissions fails
/// * If changing ownership fails for a reason other than missing privilege
pub fn copy_stat(
    source: &Path,
    destination: &Path,
    preserve: &PreserveOptions,
) -> Result<(), CopyError> {
    let metadata = fs::metadata(source).map_err(|e| CopyError::MetadataError {
        path: source.to_path_buf(),
        io_error: e,
    })?;

    if preserve.times {
        copy_times(&metadata, destination)?;
    }

    if preserve.ownership {
        copy_owner(&metadata, destination)?;
    }

    if preserve.permissions {
        fs::set_permissions(destination, metadata.permissions()).map_err(|e| {
            CopyError::SetPermissionsError {
                path: destination.to_path_buf(),
                io_error: e,
            }
        })?;
    }

    log::trace!(
        "Copied metadata {} -> {}",
        source.display(),
        destination.display()
    );

    Ok(())
}

/// Apply the access and modification times recorded in `metadata` to
/// `destination`.
///
/// # Errors
///
/// * If the timestamps cannot be set
pub fn copy_times(metadata: &Metadata, destination: &Path) -> Result<(), CopyError> {
    let atime = FileTime::from_last_access_time(metadata);
    let mtime = FileTime::from_last_modification_time(metadata);

    filetime::set_file_times(destination, atime, mtime).map_err(|e| CopyError::SetTimesError {
        path: destination.to_path_buf(),
        io_error: e,
    })
}

#[cfg(unix)]
fn copy_owner(metadata: &Metadata, destination: &Path) -> Result<(), CopyError> {
    use std::io::ErrorKind;
    use std::os::unix::fs::{MetadataExt, chown};

    let (uid, gid) = (metadata.uid(), metadata.gid());

    match chown(destination, Some(uid), Some(gid)) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            log::warn!(
                "Not permitted to set owner of {} to {uid}:{gid}, keeping current owner",
                destination.display()
            );
            Ok(())
        }
        Err(e) => Err(CopyError::ChownError {
            path: destination.to_path_buf(),
            uid,
            gid,
            io_error: e,
        }),
    }
}

#[cfg(not(unix))]
#[allow(clippy::unnecessary_wraps)]
fn copy_owner(_metadata: &Metadata, destination: &Path) -> Result<(), CopyError> {
    log::trace!("No ownership model, skipping owner for {}", destination.display());
    Ok(())
}
