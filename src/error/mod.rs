// Copyright (c) 2025 Pueo Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Error module for Pueo.
//!
//! This module provides the error framework for the whole crate: one error
//! enum per concern, a top-level [`PueoError`] that wraps them, and a
//! process-wide [`ErrorReporter`] used where failures are logged rather than
//! returned (for example a failed ingestion batch running on a worker).

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;
use tracing_error::{SpanTrace, SpanTraceStatus};

pub mod command;
pub mod config;
pub mod ingest;

pub use command::CommandError;
pub use config::ConfigError;
pub use ingest::{IngestError, ParseMovieError};

/// Result type alias used throughout Pueo.
pub type PueoResult<T> = Result<T, PueoError>;

/// Core error enum for Pueo.
#[derive(Error, Debug)]
pub enum PueoError {
    /// Errors occurring during configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Errors occurring while ingesting a movie source.
    #[error("Ingestion error: {0}")]
    Ingest(#[from] IngestError),

    /// Errors raised by the directive loop.
    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    /// IO errors that may occur during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Custom error with message for cases where specific error types are not defined.
    #[error("{0}")]
    Custom(String),
}

/// Error reporting structure to provide context and debugging information.
#[derive(Debug)]
pub struct ErrorContext {
    /// The original error that occurred.
    pub error: PueoError,

    /// The component where the error occurred.
    pub component: String,

    /// Additional context information to help with debugging.
    pub details: Option<String>,

    /// Span trace information if available.
    pub trace: Option<String>,
}

impl ErrorContext {
    /// Creates a new error context with the given error and component.
    ///
    /// # Arguments
    ///
    /// * `error` - The error that occurred
    /// * `component` - The component where the error occurred
    pub fn new<E: Into<PueoError>, S: Into<String>>(error: E, component: S) -> Self {
        Self {
            error: error.into(),
            component: component.into(),
            details: None,
            trace: None,
        }
    }

    /// Adds detail information to the error context.
    ///
    /// # Arguments
    ///
    /// * `details` - Additional context information to help with debugging
    pub fn with_details<S: Into<String>>(mut self, details: S) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Adds trace information to the error context.
    ///
    /// # Arguments
    ///
    /// * `trace` - Trace as a string
    pub fn with_trace<S: Into<String>>(mut self, trace: S) -> Self {
        self.trace = Some(trace.into());
        self
    }

    /// Captures the current tracing span stack as the trace.
    ///
    /// The trace is only populated when an `ErrorLayer` is installed in the
    /// active subscriber.
    pub fn with_span_trace(self) -> Self {
        let trace = SpanTrace::capture();
        if trace.status() == SpanTraceStatus::CAPTURED {
            self.with_trace(trace.to_string())
        } else {
            self
        }
    }
}

impl Display for ErrorContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error in {}: {}", self.component, self.error)?;
        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }
        Ok(())
    }
}

/// Error reporter trait for reporting errors to various sinks.
pub trait ErrorReporter: Send + Sync + std::fmt::Debug {
    /// Report an error with context.
    ///
    /// # Arguments
    ///
    /// * `context` - The error context to report
    fn report(&self, context: ErrorContext);
}

/// A simple error reporter implementation that logs errors using the tracing framework.
#[derive(Default, Debug)]
pub struct TracingErrorReporter;

impl ErrorReporter for TracingErrorReporter {
    fn report(&self, context: ErrorContext) {
        tracing::error!(
            error = %context.error,
            component = %context.component,
            details = context.details.as_deref().unwrap_or("None"),
            trace = context.trace.as_deref().unwrap_or("None"),
            "Error reported"
        );
    }
}

/// Process-wide reporter, `None` until one is installed.
static ERROR_REPORTER: RwLock<Option<Arc<dyn ErrorReporter>>> = parking_lot::const_rwlock(None);

/// Set the global error reporter.
///
/// # Arguments
///
/// * `reporter` - The error reporter to use
pub fn set_error_reporter(reporter: Arc<dyn ErrorReporter>) {
    *ERROR_REPORTER.write() = Some(reporter);
}

/// Report an error through the global reporter.
///
/// Falls back to [`TracingErrorReporter`] when no reporter has been set.
///
/// # Arguments
///
/// * `context` - The error context to report
pub fn report_error(context: ErrorContext) {
    let reporter = ERROR_REPORTER.read().clone();
    match reporter {
        Some(reporter) => reporter.report(context),
        None => TracingErrorReporter.report(context),
    }
}
