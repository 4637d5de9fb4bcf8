// Copyright (c) 2025 Pueo Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Tests for the error module.
//!
//! This module contains tests for error handling and error types.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::error::{
    report_error, set_error_reporter, CommandError, ErrorContext, ErrorReporter, IngestError,
    ParseMovieError, PueoError, TracingErrorReporter,
};

/// Test that error context can be created and displayed properly.
#[test]
fn test_error_context_display() {
    let error = PueoError::Custom("test error".to_string());
    let context = ErrorContext::new(error, "test_component").with_details("additional details");

    let display_string = format!("{context}");
    assert!(display_string.contains("test error"));
    assert!(display_string.contains("test_component"));
    assert!(display_string.contains("additional details"));
}

/// Test that nested errors work correctly.
#[test]
fn test_nested_errors() {
    let ingest_error = IngestError::Open {
        path: PathBuf::from("movies.txt"),
        source: Arc::new(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found",
        )),
    };
    let pueo_error = PueoError::from(ingest_error);

    let error_string = format!("{pueo_error}");
    assert!(error_string.contains("movies.txt"));
    assert!(error_string.contains("file not found"));

    let malformed = IngestError::Malformed {
        line: 4,
        content: "19x9\tUS\tThe Matrix".to_string(),
        reason: "19x9".parse::<i32>().map_err(ParseMovieError::from).unwrap_err(),
    };
    assert!(malformed.is_malformed());
    assert!(format!("{malformed}").contains("line 4"));
    assert!(std::error::Error::source(&malformed).is_some());

    let command_error: PueoError = CommandError::InvalidDirective("search".to_string()).into();
    assert!(matches!(command_error, PueoError::Command(_)));
}

/// Test that a span trace is only attached when one was captured.
#[test]
fn test_span_trace_without_error_layer() {
    let context = ErrorContext::new(IngestError::NotOpen, "test_component").with_span_trace();
    assert!(context.trace.is_none());

    let context = context.with_trace("explicit");
    assert_eq!(context.trace.as_deref(), Some("explicit"));
}

/// Mock error reporter for testing.
///
/// Counts only reports from one component, since other tests may report
/// through the global reporter concurrently.
#[derive(Debug)]
struct MockErrorReporter {
    component: &'static str,
    reported_count: AtomicUsize,
}

impl MockErrorReporter {
    fn new(component: &'static str) -> Self {
        Self {
            component,
            reported_count: AtomicUsize::new(0),
        }
    }

    fn reported_count(&self) -> usize {
        self.reported_count.load(Ordering::SeqCst)
    }
}

impl ErrorReporter for MockErrorReporter {
    fn report(&self, context: ErrorContext) {
        if context.component == self.component {
            self.reported_count.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Test that the global error reporter works correctly.
///
/// Note: This test modifies global state.
#[test]
fn test_global_error_reporter() {
    let reporter = Arc::new(MockErrorReporter::new("error_tests"));
    set_error_reporter(reporter.clone());

    report_error(ErrorContext::new(
        PueoError::Custom("test error".to_string()),
        "error_tests",
    ));
    report_error(ErrorContext::new(IngestError::Exhausted, "error_tests"));

    assert_eq!(reporter.reported_count(), 2);

    set_error_reporter(Arc::new(TracingErrorReporter));
}

/// Test that the default tracing error reporter can be created.
#[test]
fn test_tracing_error_reporter() {
    let reporter = TracingErrorReporter;
    let error = PueoError::Custom("test error".to_string());
    let context = ErrorContext::new(error, "test_component");

    // Just make sure this doesn't panic
    reporter.report(context);
}
