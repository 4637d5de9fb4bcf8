// Copyright (c) 2025 Pueo Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Movie index service.
//!
//! [`MovieIndex`] owns a [`KoaTernaryTree`] keyed by lower-cased title words
//! and a bounded pool of ingestion workers. Ingestion is asynchronous: each
//! call to [`MovieIndex::index`] runs one batch on the pool and hands back an
//! [`IndexHandle`]. Queries run on the caller's thread against whatever has
//! been inserted so far.
//!
//! The pool is the blocking pool of a dedicated single-threaded `tokio`
//! runtime, so a `MovieIndex` must not be dropped from inside an
//! asynchronous context.

mod handle;
pub mod tokenize;

use std::cmp;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use hashbrown::HashSet;
use tokio::runtime::{Builder, Runtime};
use tokio::sync::oneshot;
use tracing::{debug, info, info_span, warn};

use crate::catalog::{Movie, MovieReader};
use crate::config::{IndexConfig, Validate};
use crate::data_structures::koa_ternary_tree::KoaTernaryTree;
use crate::error::{report_error, ErrorContext, IngestError, PueoResult};

pub use handle::{BatchId, IndexHandle, IngestReport, IngestResult};

/// Thread name given to ingestion workers.
pub const WORKER_THREAD_NAME: &str = "pueo-ingest";

/// Concurrent type-ahead index over movie titles.
pub struct MovieIndex {
    tree: Arc<KoaTernaryTree<Movie>>,
    runtime: Runtime,
    worker_threads: usize,
    last_batch: AtomicU64,
}

impl MovieIndex {
    /// Creates an index with the default worker pool size.
    pub fn new() -> PueoResult<Self> {
        Self::with_config(&IndexConfig::default())
    }

    /// Creates an index whose pool runs at most `config.worker_threads`
    /// batches at once. Further batches queue.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the worker pool
    /// cannot be created.
    pub fn with_config(config: &IndexConfig) -> PueoResult<Self> {
        config.validate()?;

        let runtime = Builder::new_current_thread()
            .max_blocking_threads(config.worker_threads)
            .thread_name(WORKER_THREAD_NAME)
            .build()?;

        info!(worker_threads = config.worker_threads, "Movie index ready");

        Ok(Self {
            tree: Arc::new(KoaTernaryTree::new()),
            runtime,
            worker_threads: config.worker_threads,
            last_batch: AtomicU64::new(0),
        })
    }

    /// Maximum number of batches ingested concurrently.
    pub fn worker_threads(&self) -> usize {
        self.worker_threads
    }

    /// Number of tree nodes installed so far.
    pub fn node_count(&self) -> usize {
        self.tree.node_count()
    }

    /// Returns whether no title word has been indexed yet.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Submits `reader` for ingestion and returns without waiting.
    ///
    /// The batch opens the reader, indexes every title word of every record
    /// it yields and closes it again, whatever the outcome. Malformed
    /// elements are logged and skipped. A failure to open or read the source
    /// aborts this batch only; it is reported through the global error
    /// reporter and delivered through the returned handle.
    ///
    /// Records become visible to queries as they are inserted, so queries
    /// issued before the handle resolves may see part of the batch.
    pub fn index<R>(&self, reader: R) -> IndexHandle
    where
        R: MovieReader + 'static,
    {
        let batch = self.last_batch.fetch_add(1, Ordering::Relaxed) + 1;
        let (sender, receiver) = oneshot::channel();
        let tree = Arc::clone(&self.tree);

        debug!(batch, "Submitting ingestion batch");

        self.runtime.spawn_blocking(move || {
            let _span = info_span!("ingest", batch).entered();
            info!("Ingestion batch started");
            let result = ingest(&tree, reader, batch);

            match &result {
                Ok(report) => info!(
                    records = report.records,
                    words = report.words,
                    malformed = report.malformed,
                    "Ingestion batch complete"
                ),
                Err(error) => report_error(batch_failure(batch, error)),
            }

            // Nobody may be waiting on a fire-and-forget batch.
            let _ = sender.send(result);
        });

        IndexHandle::new(batch, receiver)
    }

    /// Returns the movies matching every word of `query`, sorted by title.
    ///
    /// The query is lower-cased and split on single spaces. A movie matches
    /// when each query word is a prefix of at least one of its title words.
    /// At most `limit` movies are returned, the first `limit` in title order.
    /// An empty query, or one made only of spaces, matches nothing.
    pub fn query(&self, query: &str, limit: usize) -> Vec<Arc<Movie>> {
        if limit == 0 {
            return Vec::new();
        }

        let mut results: Vec<Arc<Movie>> = self.matches(query).into_iter().collect();
        let total = results.len();

        if results.len() > limit {
            results.select_nth_unstable_by(limit, by_title);
            results.truncate(limit);
        }
        results.sort_unstable_by(by_title);

        debug!(query, limit, total, returned = results.len(), "Query served");
        results
    }

    /// Returns every movie matching all words of `query`, unordered and
    /// without a limit.
    pub fn matches(&self, query: &str) -> HashSet<Arc<Movie>> {
        let mut per_word: Vec<HashSet<Arc<Movie>>> = tokenize::words(query)
            .map(|word| self.tree.prefix_matches(&word))
            .collect();
        per_word.sort_unstable_by_key(HashSet::len);

        let mut sets = per_word.into_iter();
        let Some(mut hits) = sets.next() else {
            return HashSet::new();
        };

        for set in sets {
            if hits.is_empty() {
                break;
            }
            hits.retain(|movie| set.contains(movie));
        }

        hits
    }

    /// Stops the worker pool without waiting for queued or running batches.
    ///
    /// Handles of batches that never ran resolve to
    /// [`IngestError::Abandoned`](crate::error::IngestError::Abandoned).
    pub fn shutdown(self) {
        info!("Shutting down movie index");
        self.runtime.shutdown_background();
    }
}

impl std::fmt::Debug for MovieIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MovieIndex")
            .field("tree", &self.tree)
            .field("worker_threads", &self.worker_threads)
            .field("last_batch", &self.last_batch.load(Ordering::Relaxed))
            .finish()
    }
}

/// Error report for a batch that aborted with `error`.
fn batch_failure(batch: BatchId, error: &IngestError) -> ErrorContext {
    ErrorContext::new(error.clone(), "index")
        .with_details(format!("ingestion batch {batch} aborted"))
        .with_span_trace()
}

/// Title order with year and country as tie-breakers.
fn by_title(a: &Arc<Movie>, b: &Arc<Movie>) -> cmp::Ordering {
    a.title()
        .cmp(b.title())
        .then_with(|| a.release_year().cmp(&b.release_year()))
        .then_with(|| a.country_code().cmp(b.country_code()))
}

/// Runs one batch and closes the reader afterwards.
fn ingest<R: MovieReader>(
    tree: &KoaTernaryTree<Movie>,
    mut reader: R,
    batch: BatchId,
) -> IngestResult {
    let result = drain(tree, &mut reader, batch);
    reader.close();
    result
}

fn drain<R: MovieReader>(
    tree: &KoaTernaryTree<Movie>,
    reader: &mut R,
    batch: BatchId,
) -> IngestResult {
    reader.open()?;

    let mut report = IngestReport {
        batch,
        ..IngestReport::default()
    };

    while reader.has_next()? {
        match reader.next() {
            Ok(movie) => {
                report.words += insert_movie(tree, movie);
                report.records += 1;
            }
            Err(error) if error.is_malformed() => {
                warn!(%error, "Skipping malformed element");
                report.malformed += 1;
            }
            Err(error) => return Err(error),
        }
    }

    Ok(report)
}

/// Inserts every title word of `movie`, returning how many were inserted.
fn insert_movie(tree: &KoaTernaryTree<Movie>, movie: Movie) -> usize {
    let movie = Arc::new(movie);
    let mut inserted = 0;

    for word in tokenize::words(movie.title()) {
        tree.insert(&word, Arc::clone(&movie));
        inserted += 1;
    }

    inserted
}
