//! copier CLI entry point.
//!
//! Copies files and directory trees into a destination folder with a live
//! progress line, preserving timestamps, ownership and permissions.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod args;
mod interactive;
mod output;
mod progress;

use std::env;
use std::path::{Path, PathBuf};

use clap::Parser;
use path_clean::PathClean;

use args::Args;
use copier_config::load_config;
use copier_operations::{
    CopyEvent, JobOptions, read_manifest, resolve_sources, run_batch, validate_destination,
    validate_sources,
};
use progress::ProgressManager;

fn main() {
    let args = Args::parse();

    // Set up logging
    if args.verbose {
        // SAFETY: We're setting this before any other threads are spawned
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    pretty_env_logger::init();

    if let Err(e) = run(&args) {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Main application logic.
fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let cwd = env::current_dir()?;

    let loaded = load_config(args.config.as_deref())?;
    match &loaded.config_path {
        Some(path) => log::debug!("Using config {}", path.display()),
        None => log::debug!("No config file found, using defaults"),
    }

    let mut options = JobOptions::from(&loaded.config);
    if let Some(policy) = args.failure_policy_override() {
        options.failure_policy = policy;
    }

    let sources = match &args.manifest {
        Some(manifest) => read_manifest(&absolute(manifest, &cwd), &cwd)?,
        None => resolve_sources(&args.paths, &cwd),
    };
    validate_sources(&sources)?;

    let destination = match &args.destination {
        Some(path) => path.clone(),
        None => interactive::prompt_destination()?,
    };
    let destination = absolute(&destination, &cwd);
    validate_destination(&destination)?;

    let show_progress = args.should_show_progress()
        && loaded.config.progress.enabled
        && console::user_attended_stderr();
    let progress = ProgressManager::new(show_progress);
    log::debug!(
        "Copying {} source(s) into {} (progress: {})",
        sources.len(),
        destination.display(),
        progress.is_enabled()
    );

    let on_event = |event: &CopyEvent<'_>| match event {
        CopyEvent::Started {
            source,
            destination,
        } => {
            output::print_copying(source, destination);
            progress.start_file();
        }
        CopyEvent::Progress(sample) => progress.update(sample),
        CopyEvent::Finished { .. } => {
            progress.finish_file();
            output::print_done();
        }
        CopyEvent::Failed { source, error, .. } => {
            progress.finish_file();
            output::print_failed(source, error);
        }
        CopyEvent::Skipped { path, reason } => output::print_skipped(path, reason),
    };

    let summary = run_batch(&sources, &destination, &options, &on_event)?;
    output::print_summary(&summary);

    if summary.totals.files_failed > 0 {
        return Err(format!("{} file(s) could not be copied", summary.totals.files_failed).into());
    }

    Ok(())
}

fn absolute(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.clean()
    } else {
        cwd.join(path).clean()
    }
}
