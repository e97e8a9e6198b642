//! The traversal and copy engine for a single source path.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::collections::{BTreeSet, VecDeque};
use std::fs;
use std::io::ErrorKind;
use std::ops::AddAssign;
use std::path::{Path, PathBuf};

use copier_config::{Config, FailurePolicy};
use copier_copy::{CopyEvent, PreserveOptions, TransferOptions, copy_files, copy_stat};

use crate::error::OperationError;
use crate::mapping::{DestinationMapper, SourceKind};

/// Options that apply to every file and directory of a job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JobOptions {
    /// Metadata groups to carry over.
    pub preserve: PreserveOptions,
    /// Per-file transfer settings.
    pub transfer: TransferOptions,
    /// Behavior when one file's transfer fails.
    pub failure_policy: FailurePolicy,
}

impl From<&Config> for JobOptions {
    fn from(config: &Config) -> Self {
        Self {
            preserve: PreserveOptions {
                times: config.preserve.times,
                ownership: config.preserve.ownership,
                permissions: config.preserve.permissions,
            },
            transfer: TransferOptions {
                poll_interval: config.progress.poll_interval(),
            },
            failure_policy: config.on_error,
        }
    }
}

/// Counts for one finished job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JobSummary {
    /// Directories newly created at the destination.
    pub dirs_created: u64,
    /// Files copied with their metadata.
    pub files_copied: u64,
    /// Files whose transfer failed (only under [`FailurePolicy::Continue`]).
    pub files_failed: u64,
    /// Scan entries that were neither files nor directories.
    pub entries_skipped: u64,
}

impl AddAssign for JobSummary {
    fn add_assign(&mut self, other: Self) {
        self.dirs_created += other.dirs_created;
        self.files_copied += other.files_copied;
        self.files_failed += other.files_failed;
        self.entries_skipped += other.entries_skipped;
    }
}

/// One copy of one source path into a destination directory.
///
/// A job runs in three phases: [`check_type`](Self::check_type) discovers
/// what to copy, [`make_dirs`](Self::make_dirs) recreates the directory tree,
/// and [`copier`](Self::copier) drains the file queue.
#[derive(Debug)]
pub struct CopyJob {
    source_root: PathBuf,
    destination_root: PathBuf,
    options: JobOptions,
    mapper: Option<DestinationMapper>,
    pending_files: VecDeque<PathBuf>,
    discovered_dirs: BTreeSet<PathBuf>,
    created_dirs: Vec<(PathBuf, PathBuf)>,
    summary: JobSummary,
}

impl CopyJob {
    /// Create a job copying `source_root` into `destination_root`.
    #[must_use]
    pub fn new(source_root: &Path, destination_root: &Path, options: JobOptions) -> Self {
        Self {
            source_root: source_root.to_path_buf(),
            destination_root: destination_root.to_path_buf(),
            options,
            mapper: None,
            pending_files: VecDeque::new(),
            discovered_dirs: BTreeSet::new(),
            created_dirs: Vec::new(),
            summary: JobSummary::default(),
        }
    }

    /// Files still waiting to be copied, in discovery order.
    #[must_use]
    pub const fn pending_files(&self) -> &VecDeque<PathBuf> {
        &self.pending_files
    }

    /// Directories found under the source root, sorted.
    #[must_use]
    pub const fn discovered_dirs(&self) -> &BTreeSet<PathBuf> {
        &self.discovered_dirs
    }

    /// Counts accumulated so far.
    #[must_use]
    pub const fn summary(&self) -> JobSummary {
        self.summary
    }

    /// Classify the source root and discover everything beneath it.
    ///
    /// A file becomes the only pending file. A directory is recorded and
    /// scanned depth-first; each directory is recorded before its children.
    /// Inside the scan, symlinks and special files are skipped and reported
    /// through `on_event`.
    ///
    /// # Errors
    ///
    /// * If the source root does not exist or cannot be inspected
    /// * If the source root is neither a file nor a directory
    /// * If part of the tree cannot be read
    pub fn check_type<F>(&mut self, on_event: &F) -> Result<SourceKind, OperationError>
    where
        F: Fn(&CopyEvent<'_>) + Sync,
    {
        let metadata = fs::metadata(&self.source_root).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                OperationError::SourcesNotFound {
                    paths: vec![self.source_root.clone()],
                }
            } else {
                OperationError::IoError {
                    path: self.source_root.clone(),
                    source: e,
                }
            }
        })?;

        let kind = if metadata.is_file() {
            SourceKind::File
        } else if metadata.is_dir() {
            SourceKind::Directory
        } else {
            return Err(OperationError::NotARegularFile(self.source_root.clone()));
        };

        let mut mapper = DestinationMapper::new(&self.source_root, &self.destination_root, kind)?;

        match kind {
            SourceKind::File => {
                log::debug!("{} is a file", self.source_root.display());
                self.pending_files.push_back(self.source_root.clone());
            }
            SourceKind::Directory => {
                let scan_root = self.scan_root()?;
                self.enum_dir(&scan_root, on_event)?;
                mapper = mapper.with_scan_root(scan_root);
            }
        }

        log::debug!(
            "Discovered {} directories and {} files under {}",
            self.discovered_dirs.len(),
            self.pending_files.len(),
            self.source_root.display()
        );

        self.mapper = Some(mapper);
        Ok(kind)
    }

    /// The scan starts from the resolved target when the root is a symlink,
    /// since entries below it are never followed.
    fn scan_root(&self) -> Result<PathBuf, OperationError> {
        if self.source_root.is_symlink() {
            fs::canonicalize(&self.source_root).map_err(|e| OperationError::IoError {
                path: self.source_root.clone(),
                source: e,
            })
        } else {
            Ok(self.source_root.clone())
        }
    }

    fn enum_dir<F>(&mut self, root: &Path, on_event: &F) -> Result<(), OperationError>
    where
        F: Fn(&CopyEvent<'_>) + Sync,
    {
        self.discovered_dirs.insert(root.to_path_buf());

        for entry in jwalk::WalkDir::new(root)
            .skip_hidden(false)
            .follow_links(false)
            .sort(true)
            .min_depth(1)
        {
            let entry = entry.map_err(|e| OperationError::ScanError {
                path: e.path().map_or_else(|| root.to_path_buf(), Path::to_path_buf),
                message: e.to_string(),
            })?;

            let path = entry.path();
            let file_type = entry.file_type();

            if file_type.is_dir() {
                log::trace!("dir  {}", path.display());
                self.discovered_dirs.insert(path);
            } else if file_type.is_file() {
                log::trace!("file {}", path.display());
                self.pending_files.push_back(path);
            } else {
                let reason = if file_type.is_symlink() {
                    "symbolic link"
                } else {
                    "special file"
                };
                log::warn!("Skipping {reason} {}", path.display());
                on_event(&CopyEvent::Skipped {
                    path: &path,
                    reason,
                });
                self.summary.entries_skipped += 1;
            }
        }

        Ok(())
    }

    /// Recreate every discovered directory at the destination, parents first.
    ///
    /// Times and ownership are copied onto each newly created directory. The
    /// permission bits wait for [`finalize_dirs`](Self::finalize_dirs) so a
    /// read-only source directory can still be filled. A directory that
    /// already exists is left as it is.
    ///
    /// # Errors
    ///
    /// * If the source has not been classified
    /// * If a directory cannot be created for a reason other than existing
    /// * If a non-directory already occupies a destination directory path
    /// * If metadata cannot be copied
    pub fn make_dirs(&mut self) -> Result<(), OperationError> {
        let mapper = self
            .mapper
            .as_ref()
            .ok_or_else(|| OperationError::NotClassified(self.source_root.clone()))?;

        let preserve = PreserveOptions {
            permissions: false,
            ..self.options.preserve
        };

        for dir in &self.discovered_dirs {
            let destination = mapper.map(dir)?;

            match fs::create_dir(&destination) {
                Ok(()) => {
                    log::debug!("Created directory {}", destination.display());
                    copy_stat(dir, &destination, &preserve)?;
                    self.created_dirs.push((dir.clone(), destination));
                    self.summary.dirs_created += 1;
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists && destination.is_dir() => {
                    log::debug!("Directory already exists: {}", destination.display());
                }
                Err(e) => {
                    return Err(OperationError::CreateDirError {
                        path: destination,
                        source: e,
                    });
                }
            }
        }

        Ok(())
    }

    /// Drain the file queue, copying bytes and then metadata for each file.
    ///
    /// Under [`FailurePolicy::Abort`] the first file whose transfer or
    /// metadata copy fails ends the drain and is returned; the remaining files
    /// stay queued. Under [`FailurePolicy::Continue`] it is counted and the
    /// next file is copied.
    ///
    /// # Errors
    ///
    /// * If the source has not been classified
    /// * If a file fails under [`FailurePolicy::Abort`]
    pub fn copier<F>(&mut self, on_event: &F) -> Result<(), OperationError>
    where
        F: Fn(&CopyEvent<'_>) + Sync,
    {
        let mapper = self
            .mapper
            .clone()
            .ok_or_else(|| OperationError::NotClassified(self.source_root.clone()))?;

        while let Some(file) = self.pending_files.pop_front() {
            let destination = mapper.map(&file)?;

            let outcome = copy_files(&file, &destination, &self.options.transfer, on_event)
                .and_then(|_| copy_stat(&file, &destination, &self.options.preserve));

            match outcome {
                Ok(()) => self.summary.files_copied += 1,
                Err(e) => self.settle_failure(&file, e.into())?,
            }
        }

        Ok(())
    }

    /// Apply the failure policy to one failed file.
    fn settle_failure(
        &mut self,
        file: &Path,
        error: OperationError,
    ) -> Result<(), OperationError> {
        match self.options.failure_policy {
            FailurePolicy::Abort => Err(error),
            FailurePolicy::Continue => {
                log::warn!("Continuing after failed copy of {}: {error}", file.display());
                self.summary.files_failed += 1;
                Ok(())
            }
        }
    }

    /// Apply source timestamps and permission bits to the directories this
    /// job created.
    ///
    /// Copying files into a directory bumps its modification time, and a
    /// read-only mode would have refused those files, so this runs after the
    /// drain, deepest directories first.
    ///
    /// # Errors
    ///
    /// * If source metadata cannot be read
    /// * If timestamps or permissions cannot be set
    pub fn finalize_dirs(&self) -> Result<(), OperationError> {
        let preserve = PreserveOptions {
            ownership: false,
            ..self.options.preserve
        };

        for (source, destination) in self.created_dirs.iter().rev() {
            copy_stat(source, destination, &preserve)?;
        }

        Ok(())
    }

    /// Run every phase of the job.
    ///
    /// # Errors
    ///
    /// * Any error from [`check_type`](Self::check_type),
    ///   [`make_dirs`](Self::make_dirs), [`copier`](Self::copier) or
    ///   [`finalize_dirs`](Self::finalize_dirs)
    pub fn run<F>(mut self, on_event: &F) -> Result<JobSummary, OperationError>
    where
        F: Fn(&CopyEvent<'_>) + Sync,
    {
        let kind = self.check_type(on_event)?;
        log::info!(
            "Copying {} ({kind:?}) into {}",
            self.source_root.display(),
            self.destination_root.display()
        );

        self.make_dirs()?;
        self.copier(on_event)?;
        self.finalize_dirs()?;

        Ok(self.summary)
    }
}

/// Copy one source path into an existing destination directory.
///
/// # Arguments
///
/// * `source` - Absolute path of the file or directory to copy
/// * `destination_root` - Absolute path of an existing directory
/// * `options` - Job options
/// * `on_event` - Callback for per-file notices and progress
///
/// # Errors
///
/// * If the source cannot be classified or scanned
/// * If a directory cannot be created
/// * If a transfer fails under [`FailurePolicy::Abort`]
pub fn run_copy_job<F>(
    source: &Path,
    destination_root: &Path,
    options: &JobOptions,
    on_event: &F,
) -> Result<JobSummary, OperationError>
where
    F: Fn(&CopyEvent<'_>) + Sync,
{
    CopyJob::new(source, destination_root, *options).run(on_event)
}
