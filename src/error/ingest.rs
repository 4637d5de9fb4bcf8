// Copyright (c) 2025 Pueo Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Ingestion error module.
//!
//! This module defines error types that may occur while reading movie
//! records from a source and feeding them into the index.

use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Reasons a single catalog line fails to parse into a movie.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseMovieError {
    /// The line does not hold exactly year, country code and title.
    #[error("expected 3 tab-separated fields, found {0}")]
    FieldCount(usize),

    /// The release year is not an integer.
    #[error("release year is not an integer: {0}")]
    Year(#[from] ParseIntError),

    /// The title field is empty.
    #[error("title is empty")]
    EmptyTitle,
}

/// Errors that can occur while ingesting a movie source.
///
/// I/O failures are shared behind an `Arc` so a failed batch can be both
/// reported and returned to the waiting caller.
#[derive(Error, Debug, Clone)]
pub enum IngestError {
    /// The backing resource could not be opened.
    #[error("Failed to open movie source {path:?}: {source}")]
    Open {
        /// Location of the resource
        path: PathBuf,
        /// The underlying I/O error
        source: Arc<io::Error>,
    },

    /// The backing resource failed while being read.
    #[error("Failed to read movie source: {0}")]
    Read(#[source] Arc<io::Error>),

    /// The reader was used before `open` was called.
    #[error("Movie reader not open")]
    NotOpen,

    /// A single element could not be parsed. Iteration may continue.
    #[error("Malformed line {line}: {reason} ({content:?})")]
    Malformed {
        /// One-based line number within the source
        line: usize,
        /// The raw line
        content: String,
        /// Why the line was rejected
        #[source]
        reason: ParseMovieError,
    },

    /// `next` was called after the source was exhausted.
    #[error("Movie reader exhausted")]
    Exhausted,

    /// The ingestion task ended without delivering a result.
    #[error("Ingestion batch {0} ended without reporting a result")]
    Abandoned(u64),
}

impl From<io::Error> for IngestError {
    fn from(error: io::Error) -> Self {
        Self::Read(Arc::new(error))
    }
}

impl IngestError {
    /// Returns whether this error only affects a single element.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }
}
