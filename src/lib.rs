// Copyright (c) 2025 Pueo Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Pueo Library
//!
//! An in-memory type-ahead index over a catalog of movie titles. Sources are
//! ingested concurrently on a bounded worker pool while queries run against
//! the partially built index.
//!
//! # Architecture
//!
//! - [`data_structures`]: the concurrent ternary search tree that maps title
//!   words to the movies containing them
//! - [`catalog`]: the [`Movie`](catalog::Movie) record and the readers that
//!   stream records from files or memory
//! - [`index`]: the [`MovieIndex`](index::MovieIndex) service with its
//!   ingestion pool and query path
//! - [`command`]: the line-oriented directive loop used by the binary
//! - [`config`] and [`error`]: layered configuration and the error framework
//!
//! # Example
//!
//! ```
//! use pueo_lib::catalog::{MemoryMovieReader, Movie};
//! use pueo_lib::index::MovieIndex;
//!
//! let index = MovieIndex::new()?;
//! index
//!     .index(MemoryMovieReader::new(vec![Movie::new("Iron Man", "US", 2008)]))
//!     .wait()?;
//!
//! let results = index.query("iron", 10);
//! assert_eq!(results[0].title(), "Iron Man");
//! # Ok::<(), pueo_lib::error::PueoError>(())
//! ```

pub mod catalog;
pub mod command;
pub mod config;
pub mod data_structures;
pub mod error;
pub mod index;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

/// Version information for Pueo.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
