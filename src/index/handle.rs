// Copyright (c) 2025 Pueo Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Completion handle for an ingestion batch.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use crate::error::IngestError;

/// Identifier assigned to each ingestion batch, starting at 1.
pub type BatchId = u64;

/// Outcome of one ingestion batch.
pub type IngestResult = Result<IngestReport, IngestError>;

/// Summary of a completed ingestion batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IngestReport {
    /// The batch this report belongs to
    pub batch: BatchId,

    /// Records read and indexed
    pub records: usize,

    /// Title words inserted into the tree
    pub words: usize,

    /// Elements skipped because they did not parse
    pub malformed: usize,
}

/// Handle to an ingestion batch running on the worker pool.
///
/// Dropping the handle does not cancel the batch. Waiting on it is the only
/// way to know that the batch's records are visible to queries.
#[derive(Debug)]
pub struct IndexHandle {
    batch: BatchId,
    receiver: oneshot::Receiver<IngestResult>,
}

impl IndexHandle {
    pub(super) fn new(batch: BatchId, receiver: oneshot::Receiver<IngestResult>) -> Self {
        Self { batch, receiver }
    }

    /// The batch this handle tracks.
    pub fn batch(&self) -> BatchId {
        self.batch
    }

    /// Blocks the current thread until the batch finishes.
    ///
    /// # Returns
    ///
    /// * `Ok(IngestReport)` - The batch ran to the end of its reader.
    /// * `Err(IngestError)` - The batch failed, or [`IngestError::Abandoned`]
    ///   if the worker went away without reporting.
    ///
    /// # Panics
    ///
    /// Panics when called from within an asynchronous execution context;
    /// `.await` the handle there instead.
    pub fn wait(self) -> IngestResult {
        let batch = self.batch;
        self.receiver
            .blocking_recv()
            .unwrap_or_else(|_| Err(IngestError::Abandoned(batch)))
    }
}

impl Future for IndexHandle {
    type Output = IngestResult;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let batch = self.batch;
        Pin::new(&mut self.receiver)
            .poll(cx)
            .map(|received| received.unwrap_or_else(|_| Err(IngestError::Abandoned(batch))))
    }
}
