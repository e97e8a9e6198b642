//! CLI argument definitions.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use clap::{ArgGroup, Parser};
use copier_config::FailurePolicy;

/// CLI arguments for copier.
#[derive(Debug, Parser)]
#[command(
    name = "copier",
    about = "Copy files or directories with live progress, preserving timestamps, ownership and permissions",
    version,
    group(ArgGroup::new("input").required(true).args(["paths", "manifest"]))
)]
pub struct Args {
    /// Paths of the files or directories to copy.
    #[arg(short = 'c', long = "copy", num_args = 1.., value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Text file listing the paths to copy, one per line.
    #[arg(short = 't', long = "manifest", value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Destination folder (prompted for when omitted).
    #[arg(short = 'd', long = "dest", value_name = "DIR")]
    pub destination: Option<PathBuf>,

    /// Config file to use instead of the default location.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Keep copying the remaining files when one file fails.
    #[arg(long = "continue-on-error")]
    pub continue_on_error: bool,

    /// Disable the progress line (useful for CI environments).
    #[arg(long = "no-progress")]
    pub no_progress: bool,

    /// Enable verbose output.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Args {
    /// Failure policy forced by flags, or `None` to use the config value.
    #[must_use]
    pub const fn failure_policy_override(&self) -> Option<FailurePolicy> {
        if self.continue_on_error {
            Some(FailurePolicy::Continue)
        } else {
            None
        }
    }

    /// Determine if we should show the progress line.
    #[must_use]
    pub const fn should_show_progress(&self) -> bool {
        !self.no_progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_copy_paths() {
        let args = Args::try_parse_from(["copier", "-c", "a.txt", "dir/", "-d", "/tmp"]).unwrap();

        assert_eq!(args.paths, vec![PathBuf::from("a.txt"), PathBuf::from("dir/")]);
        assert_eq!(args.destination, Some(PathBuf::from("/tmp")));
        assert!(args.manifest.is_none());
        assert!(args.should_show_progress());
        assert_eq!(args.failure_policy_override(), None);
    }

    #[test]
    fn test_parse_manifest() {
        let args =
            Args::try_parse_from(["copier", "-t", "list.txt", "--continue-on-error", "--no-progress"])
                .unwrap();

        assert_eq!(args.manifest, Some(PathBuf::from("list.txt")));
        assert!(args.paths.is_empty());
        assert!(!args.should_show_progress());
        assert_eq!(args.failure_policy_override(), Some(FailurePolicy::Continue));
    }

    #[test]
    fn test_requires_an_input_mode() {
        assert!(Args::try_parse_from(["copier", "-d", "/tmp"]).is_err());
    }

    #[test]
    fn test_input_modes_conflict() {
        assert!(Args::try_parse_from(["copier", "-c", "a", "-t", "list.txt"]).is_err());
    }
}
