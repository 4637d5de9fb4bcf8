// Copyright (c) 2025 Pueo Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Pull interface over a source of movie records.

use std::collections::VecDeque;

use super::Movie;
use crate::error::IngestError;

/// Result type for reader operations.
pub type ReaderResult<T> = Result<T, IngestError>;

/// A source of [`Movie`] records that may be backed by a resource such as a
/// file.
///
/// The reader must be opened before iterating and is closed once the
/// consumer is done, whatever the outcome.
#[cfg_attr(test, mockall::automock)]
pub trait MovieReader: Send {
    /// Prepares the reader for use.
    ///
    /// # Errors
    ///
    /// [`IngestError::Open`] if the backing resource is unavailable.
    fn open(&mut self) -> ReaderResult<()>;

    /// Returns whether another element is available.
    ///
    /// May be called repeatedly without consuming anything.
    ///
    /// # Errors
    ///
    /// [`IngestError::NotOpen`] before `open`, [`IngestError::Read`] if the
    /// resource fails.
    fn has_next(&mut self) -> ReaderResult<bool>;

    /// Returns the next element.
    ///
    /// # Errors
    ///
    /// [`IngestError::Malformed`] if the element does not parse; the reader
    /// stays usable and the following element can still be read.
    fn next(&mut self) -> ReaderResult<Movie>;

    /// Releases the backing resource. Calling it more than once is harmless.
    fn close(&mut self);
}

/// A [`MovieReader`] over records already held in memory.
#[derive(Debug, Default)]
pub struct MemoryMovieReader {
    pending: VecDeque<Movie>,
    open: bool,
}

impl MemoryMovieReader {
    /// Creates a reader yielding `movies` in order.
    pub fn new<I: IntoIterator<Item = Movie>>(movies: I) -> Self {
        Self {
            pending: movies.into_iter().collect(),
            open: false,
        }
    }
}

impl MovieReader for MemoryMovieReader {
    fn open(&mut self) -> ReaderResult<()> {
        self.open = true;
        Ok(())
    }

    fn has_next(&mut self) -> ReaderResult<bool> {
        if !self.open {
            return Err(IngestError::NotOpen);
        }
        Ok(!self.pending.is_empty())
    }

    fn next(&mut self) -> ReaderResult<Movie> {
        if !self.open {
            return Err(IngestError::NotOpen);
        }
        self.pending.pop_front().ok_or(IngestError::Exhausted)
    }

    fn close(&mut self) {
        self.open = false;
        self.pending.clear();
    }
}
