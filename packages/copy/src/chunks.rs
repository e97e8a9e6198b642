//! Fixed-size chunked reading.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::io::{self, Read};

use crate::progress::ProgressTracker;

/// Size of one chunk in bytes (50 KiB).
pub const CHUNK_SIZE: usize = 51_200;

/// Number of chunks needed to hold `size` bytes.
#[must_use]
pub const fn chunk_count(size: u64, chunk_size: usize) -> u64 {
    size.div_ceil(chunk_size as u64)
}

/// Reader that splits a byte stream into fixed-size chunks.
///
/// Chunk counts are published to a [`ProgressTracker`] so a reporter on
/// another thread can follow along.
#[derive(Debug)]
pub struct ChunkedReader<'t, R> {
    reader: R,
    size: u64,
    chunk_size: usize,
    tracker: &'t ProgressTracker,
}

impl<'t, R: Read> ChunkedReader<'t, R> {
    /// Wrap `reader`, whose total length is `size` bytes.
    #[must_use]
    pub const fn new(reader: R, size: u64, tracker: &'t ProgressTracker) -> Self {
        Self::with_chunk_size(reader, size, CHUNK_SIZE, tracker)
    }

    /// Wrap `reader` using a custom chunk size.
    ///
    /// # Panics
    ///
    /// * If `chunk_size` is zero
    #[must_use]
    pub const fn with_chunk_size(
        reader: R,
        size: u64,
        chunk_size: usize,
        tracker: &'t ProgressTracker,
    ) -> Self {
        assert!(chunk_size > 0, "chunk size must be non-zero");
        Self {
            reader,
            size,
            chunk_size,
            tracker,
        }
    }

    /// Compute the total number of chunks and publish it to the tracker.
    ///
    /// Must run before reading starts.
    pub fn number_chunks(&self) -> u64 {
        let total = chunk_count(self.size, self.chunk_size);
        self.tracker.set_total(total);
        log::trace!("{} bytes -> {total} chunks", self.size);
        total
    }

    /// Lazy sequence of chunks read from the underlying reader.
    ///
    /// The read count for a chunk is bumped only once the caller comes back
    /// for the next item, i.e. after the previous chunk has been fully
    /// consumed.
    pub fn read_chunks(&mut self) -> Chunks<'_, 't, R> {
        Chunks {
            inner: self,
            handed_off: false,
            done: false,
        }
    }
}

/// Iterator returned by [`ChunkedReader::read_chunks`].
#[derive(Debug)]
pub struct Chunks<'a, 't, R> {
    inner: &'a mut ChunkedReader<'t, R>,
    handed_off: bool,
    done: bool,
}

impl<R: Read> Chunks<'_, '_, R> {
    fn fill(&mut self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.inner.chunk_size);
        (&mut self.inner.reader)
            .take(self.inner.chunk_size as u64)
            .read_to_end(&mut buf)?;
        Ok(buf)
    }
}

impl<R: Read> Iterator for Chunks<'_, '_, R> {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.handed_off {
            self.inner.tracker.increment_read();
            self.handed_off = false;
        }

        if self.done {
            return None;
        }

        match self.fill() {
            Ok(chunk) if chunk.is_empty() => {
                self.done = true;
                None
            }
            Ok(chunk) => {
                self.handed_off = true;
                Some(Ok(chunk))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: Read> std::iter::FusedIterator for Chunks<'_, '_, R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_chunk_count() {
        assert_eq!(chunk_count(0, CHUNK_SIZE), 0);
        assert_eq!(chunk_count(1, CHUNK_SIZE), 1);
        assert_eq!(chunk_count(51_200, CHUNK_SIZE), 1);
        assert_eq!(chunk_count(51_201, CHUNK_SIZE), 2);
        assert_eq!(chunk_count(60_000, CHUNK_SIZE), 2);
    }

    #[test]
    fn test_number_chunks_publishes_total() {
        let tracker = ProgressTracker::new();
        let reader = ChunkedReader::new(Cursor::new(vec![0_u8; 60_000]), 60_000, &tracker);

        assert_eq!(reader.number_chunks(), 2);
        assert_eq!(tracker.total(), 2);
        assert_eq!(tracker.read(), 0);
    }

    #[test]
    fn test_read_chunks_splits_at_chunk_size() {
        let tracker = ProgressTracker::new();
        let mut reader = ChunkedReader::new(Cursor::new(vec![7_u8; 60_000]), 60_000, &tracker);
        reader.number_chunks();

        let sizes: Vec<usize> = reader
            .read_chunks()
            .map(|chunk| chunk.unwrap().len())
            .collect();

        assert_eq!(sizes, vec![51_200, 8_800]);
        assert_eq!(tracker.read(), tracker.total());
    }

    #[test]
    fn test_read_count_lags_until_next_pull() {
        let tracker = ProgressTracker::new();
        let mut reader = ChunkedReader::with_chunk_size(Cursor::new(b"abcdef".to_vec()), 6, 4, &tracker);
        assert_eq!(reader.number_chunks(), 2);

        let mut chunks = reader.read_chunks();

        assert_eq!(chunks.next().unwrap().unwrap(), b"abcd");
        assert_eq!(tracker.read(), 0);

        assert_eq!(chunks.next().unwrap().unwrap(), b"ef");
        assert_eq!(tracker.read(), 1);

        assert!(chunks.next().is_none());
        assert_eq!(tracker.read(), 2);

        assert!(chunks.next().is_none());
        assert_eq!(tracker.read(), 2);
    }

    #[test]
    fn test_empty_source_yields_nothing() {
        let tracker = ProgressTracker::new();
        let mut reader = ChunkedReader::new(Cursor::new(Vec::new()), 0, &tracker);

        assert_eq!(reader.number_chunks(), 0);
        assert_eq!(reader.read_chunks().count(), 0);
        assert_eq!(tracker.read(), 0);
    }

    #[test]
    fn test_read_error_ends_sequence() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::other("device gone"))
            }
        }

        let tracker = ProgressTracker::new();
        let mut reader = ChunkedReader::new(Broken, 10, &tracker);
        let mut chunks = reader.read_chunks();

        assert!(chunks.next().unwrap().is_err());
        assert!(chunks.next().is_none());
        assert_eq!(tracker.read(), 0);
    }
}
