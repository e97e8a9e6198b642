//! Progress tracking and the background reporter for chunked transfers.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread::{self, Scope, ScopedJoinHandle};
use std::time::Duration;

/// Default delay between two reporter polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Progress information for a single file transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyProgress {
    /// Total number of chunks in the source file.
    pub chunks_total: u64,
    /// Number of chunks handed off so far.
    pub chunks_read: u64,
}

impl CopyProgress {
    /// Create a new progress report.
    #[must_use]
    pub const fn new(chunks_total: u64, chunks_read: u64) -> Self {
        Self {
            chunks_total,
            chunks_read,
        }
    }

    /// Whether every chunk has been handed off.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.chunks_read == self.chunks_total
    }

    /// Progress as a percentage rounded to one decimal place.
    ///
    /// An empty transfer (zero chunks) is reported as complete.
    #[must_use]
    pub fn percentage(&self) -> f64 {
        if self.chunks_total == 0 {
            return 100.0;
        }
        let ratio = self.chunks_read as f64 / self.chunks_total as f64;
        (ratio * 1000.0).round() / 10.0
    }
}

/// Chunk counters shared between the reader and the reporter.
///
/// Only the reading side writes; the reporter only loads.
#[derive(Debug, Default)]
pub struct ProgressTracker {
    chunks_total: AtomicU64,
    chunks_read: AtomicU64,
}

impl ProgressTracker {
    /// Create a new progress tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the total number of chunks.
    pub fn set_total(&self, total: u64) {
        self.chunks_total.store(total, Ordering::SeqCst);
    }

    /// Increment the read count by 1.
    pub fn increment_read(&self) {
        self.chunks_read.fetch_add(1, Ordering::SeqCst);
    }

    /// Get the current total.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.chunks_total.load(Ordering::SeqCst)
    }

    /// Get the current read count.
    #[must_use]
    pub fn read(&self) -> u64 {
        self.chunks_read.load(Ordering::SeqCst)
    }

    /// Get a progress snapshot.
    #[must_use]
    pub fn snapshot(&self) -> CopyProgress {
        CopyProgress::new(self.total(), self.read())
    }
}

/// Stop signal for one transfer's reporter.
///
/// A fresh flag is created for every transfer so one file's failure can never
/// leak into the next file's reporter.
#[derive(Debug, Default)]
pub struct StopFlag(AtomicBool);

impl StopFlag {
    /// Create a lowered flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the reporter to exit at its next poll.
    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether the flag has been raised.
    #[must_use]
    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Start the progress reporter on a scoped thread.
///
/// The reporter polls `tracker` every `poll_interval` and hands a snapshot to
/// `on_progress` until the counts match or `stop` is raised. The handle yields
/// the number of snapshots that were rendered.
pub fn spawn_reporter<'scope, 'env, F>(
    scope: &'scope Scope<'scope, 'env>,
    tracker: &'env ProgressTracker,
    stop: &'env StopFlag,
    poll_interval: Duration,
    on_progress: &'env F,
) -> ScopedJoinHandle<'scope, u64>
where
    F: Fn(&CopyProgress) + Sync,
{
    scope.spawn(move || {
        let mut rendered = 0;
        loop {
            if stop.is_raised() {
                log::trace!("Reporter stopped after {rendered} updates");
                break;
            }

            let progress = tracker.snapshot();
            if progress.is_complete() {
                log::trace!("Reporter saw completion after {rendered} updates");
                break;
            }

            on_progress(&progress);
            rendered += 1;

            thread::sleep(poll_interval);
        }
        rendered
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_percentage_rounds_to_one_decimal() {
        assert!((CopyProgress::new(3, 1).percentage() - 33.3).abs() < f64::EPSILON);
        assert!((CopyProgress::new(3, 2).percentage() - 66.7).abs() < f64::EPSILON);
        assert!((CopyProgress::new(2, 1).percentage() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_percentage_of_empty_transfer() {
        let progress = CopyProgress::new(0, 0);
        assert!(progress.is_complete());
        assert!((progress.percentage() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reporter_exits_immediately_for_zero_chunks() {
        let tracker = ProgressTracker::new();
        let stop = StopFlag::new();
        let on_progress = |_: &CopyProgress| panic!("empty transfer must not render");

        let rendered = thread::scope(|scope| {
            spawn_reporter(scope, &tracker, &stop, DEFAULT_POLL_INTERVAL, &on_progress)
                .join()
                .unwrap()
        });

        assert_eq!(rendered, 0);
    }

    #[test]
    fn test_reporter_exits_when_counts_match() {
        let tracker = ProgressTracker::new();
        tracker.set_total(2);
        let stop = StopFlag::new();
        let on_progress = |p: &CopyProgress| assert!(p.chunks_read < p.chunks_total);

        thread::scope(|scope| {
            let handle = spawn_reporter(
                scope,
                &tracker,
                &stop,
                Duration::from_millis(1),
                &on_progress,
            );
            tracker.increment_read();
            tracker.increment_read();
            let rendered = handle.join().unwrap();
            assert!(!stop.is_raised());
            assert!(rendered <= 2_000);
        });
    }

    #[test]
    fn test_reporter_stops_within_one_poll_interval() {
        let tracker = ProgressTracker::new();
        tracker.set_total(10);
        let stop = StopFlag::new();
        let interval = Duration::from_millis(20);
        let on_progress = |_: &CopyProgress| {};

        thread::scope(|scope| {
            let handle = spawn_reporter(scope, &tracker, &stop, interval, &on_progress);
            thread::sleep(interval * 3);

            let raised_at = Instant::now();
            stop.raise();
            let rendered = handle.join().unwrap();

            assert!(rendered >= 1);
            assert!(raised_at.elapsed() < interval * 5);
        });
        assert_eq!(tracker.read(), 0);
    }
}
