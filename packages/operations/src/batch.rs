//! Source resolution, validation and batch execution.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use copier_copy::CopyEvent;
use path_clean::PathClean;

use crate::error::OperationError;
use crate::job::{JobOptions, JobSummary, run_copy_job};

/// Totals for a whole batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Number of sources copied.
    pub sources: usize,
    /// Sum of every job's counts.
    pub totals: JobSummary,
}

/// Make each path absolute against `cwd` and normalize it lexically.
#[must_use]
pub fn resolve_sources<P: AsRef<Path>>(paths: &[P], cwd: &Path) -> Vec<PathBuf> {
    paths
        .iter()
        .map(|path| {
            let path = path.as_ref();
            if path.is_absolute() {
                path.clean()
            } else {
                cwd.join(path).clean()
            }
        })
        .collect()
}

/// Read source paths from a manifest, one per line.
///
/// Lines are trimmed and blank lines ignored. Relative entries are resolved
/// against `cwd`.
///
/// # Errors
///
/// * If the manifest does not exist
/// * If the manifest is a directory or special file
/// * If the manifest cannot be read
pub fn read_manifest(path: &Path, cwd: &Path) -> Result<Vec<PathBuf>, OperationError> {
    log::debug!("Reading manifest {}", path.display());

    let metadata = fs::metadata(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            OperationError::ManifestNotFound(path.to_path_buf())
        } else {
            OperationError::ManifestReadError {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    if !metadata.is_file() {
        return Err(OperationError::NotARegularFile(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).map_err(|e| OperationError::ManifestReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let entries: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    log::debug!("Manifest lists {} sources", entries.len());

    Ok(resolve_sources(&entries, cwd))
}

/// Check that every source exists.
///
/// All missing paths are collected so they can be reported together.
///
/// # Errors
///
/// * [`OperationError::SourcesNotFound`] listing every missing path
pub fn validate_sources(sources: &[PathBuf]) -> Result<(), OperationError> {
    let missing: Vec<PathBuf> = sources
        .iter()
        .filter(|source| !source.exists())
        .cloned()
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        for path in &missing {
            log::debug!("Missing source: {}", path.display());
        }
        Err(OperationError::SourcesNotFound { paths: missing })
    }
}

/// Check that the destination is an existing directory.
///
/// # Errors
///
/// * [`OperationError::DestinationNotDirectory`] otherwise
pub fn validate_destination(destination: &Path) -> Result<(), OperationError> {
    if destination.is_dir() {
        Ok(())
    } else {
        Err(OperationError::DestinationNotDirectory(
            destination.to_path_buf(),
        ))
    }
}

/// Copy every source into `destination_root`, one fresh job per source.
///
/// Validation happens up front: if the destination is not a directory or any
/// source is missing, nothing is copied.
///
/// # Errors
///
/// * If validation fails
/// * If any job fails
pub fn run_batch<F>(
    sources: &[PathBuf],
    destination_root: &Path,
    options: &JobOptions,
    on_event: &F,
) -> Result<BatchSummary, OperationError>
where
    F: Fn(&CopyEvent<'_>) + Sync,
{
    validate_destination(destination_root)?;
    validate_sources(sources)?;

    let mut summary = BatchSummary::default();
    for source in sources {
        summary.totals += run_copy_job(source, destination_root, options, on_event)?;
        summary.sources += 1;
    }

    log::debug!("Batch finished: {summary:?}");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn no_events(_: &CopyEvent<'_>) {}

    #[test]
    fn test_resolve_sources() {
        let cwd = Path::new("/work/dir");
        let resolved = resolve_sources(&["a.txt", "../b/", "/abs/./c"], cwd);

        assert_eq!(
            resolved,
            vec![
                PathBuf::from("/work/dir/a.txt"),
                PathBuf::from("/work/b"),
                PathBuf::from("/abs/c"),
            ]
        );
    }

    #[test]
    fn test_read_manifest() {
        let dir = TempDir::new().unwrap();
        let manifest = dir.path().join("list.txt");
        fs::write(&manifest, "  one.txt \n\n/abs/two\n   \nsub/three\n").unwrap();

        let sources = read_manifest(&manifest, dir.path()).unwrap();

        assert_eq!(
            sources,
            vec![
                dir.path().join("one.txt"),
                PathBuf::from("/abs/two"),
                dir.path().join("sub/three"),
            ]
        );
    }

    #[test]
    fn test_read_manifest_missing() {
        let dir = TempDir::new().unwrap();
        let manifest = dir.path().join("missing.txt");

        assert!(matches!(
            read_manifest(&manifest, dir.path()),
            Err(OperationError::ManifestNotFound(_))
        ));
    }

    #[test]
    fn test_read_manifest_directory() {
        let dir = TempDir::new().unwrap();

        assert!(matches!(
            read_manifest(dir.path(), dir.path()),
            Err(OperationError::NotARegularFile(_))
        ));
    }

    #[test]
    fn test_scenario_c_missing_source_copies_nothing() {
        let dir = TempDir::new().unwrap();
        let present = dir.path().join("present");
        fs::create_dir(&present).unwrap();
        fs::write(present.join("a.txt"), "a").unwrap();
        let missing_a = dir.path().join("missing-a");
        let missing_b = dir.path().join("missing-b");
        let dst = dir.path().join("dst");
        fs::create_dir(&dst).unwrap();

        let sources = vec![present, missing_a.clone(), missing_b.clone()];
        let result = run_batch(&sources, &dst, &JobOptions::default(), &no_events);

        match result {
            Err(OperationError::SourcesNotFound { paths }) => {
                assert_eq!(paths, vec![missing_a, missing_b]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(fs::read_dir(&dst).unwrap().count(), 0);
    }

    #[test]
    fn test_destination_must_be_directory() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("file");
        fs::write(&file, "x").unwrap();

        assert!(matches!(
            run_batch(&[file.clone()], &file, &JobOptions::default(), &no_events),
            Err(OperationError::DestinationNotDirectory(_))
        ));
    }

    #[test]
    fn test_run_batch_copies_each_source() {
        let dir = TempDir::new().unwrap();
        let tree = dir.path().join("tree");
        fs::create_dir_all(tree.join("nested")).unwrap();
        fs::write(tree.join("nested/x.txt"), "x").unwrap();
        let single = dir.path().join("single.txt");
        fs::write(&single, "single").unwrap();
        let dst = dir.path().join("dst");
        fs::create_dir(&dst).unwrap();

        let summary = run_batch(
            &[tree, single],
            &dst,
            &JobOptions::default(),
            &no_events,
        )
        .unwrap();

        assert_eq!(summary.sources, 2);
        assert_eq!(summary.totals.files_copied, 2);
        assert_eq!(summary.totals.dirs_created, 2);
        assert_eq!(fs::read_to_string(dst.join("tree/nested/x.txt")).unwrap(), "x");
        assert_eq!(fs::read_to_string(dst.join("single.txt")).unwrap(), "single");
    }
}
