//! Tests for the error module.
//!
//! This module contains tests for error handling and error types.

use crate::data_structures::lanai_trie::{LanaiTrie, LanaiTrieError};
use crate::error::config::ConfigError;
use crate::error::{ErrorContext, ErrorReporter, LpmError, LpmResult, TracingErrorReporter};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Test that error context can be created and displayed properly.
#[test]
fn test_error_context_display() {
    let error = LpmError::Custom("test error".to_string());
    let context = ErrorContext::new(error, "test_component").with_details("additional details");

    let display_string = format!("{context}");
    assert!(display_string.contains("test error"));
    assert!(display_string.contains("test_component"));
    assert!(display_string.contains("additional details"));
}

/// Test that trie and configuration errors convert into the crate error.
#[test]
fn test_error_conversions() {
    fn build(chunk_size: usize) -> LpmResult<LanaiTrie> {
        Ok(LanaiTrie::new(chunk_size)?)
    }

    let err = build(0).unwrap_err();
    assert!(matches!(
        err,
        LpmError::Trie(LanaiTrieError::InvalidConfiguration(_))
    ));
    assert!(err.to_string().starts_with("Trie error: Invalid trie configuration"));

    let err: LpmError = ConfigError::ValidationError("bad".to_string()).into();
    assert_eq!(
        err.to_string(),
        "Configuration error: Configuration validation error: bad"
    );
}

/// Test that nested IO errors keep their message.
#[test]
fn test_nested_errors() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let lpm_error = LpmError::Io(io_error);
    assert!(format!("{lpm_error}").contains("file not found"));
}

/// Mock error reporter for testing.
#[derive(Debug, Default)]
struct MockErrorReporter {
    reported_count: AtomicUsize,
}

impl ErrorReporter for MockErrorReporter {
    fn report(&self, _context: ErrorContext) {
        self.reported_count.fetch_add(1, Ordering::SeqCst);
    }
}

/// Test that reporters are usable through the trait object.
#[test]
fn test_reporter_trait_object() {
    let reporter = MockErrorReporter::default();
    let dyn_reporter: &dyn ErrorReporter = &reporter;
    dyn_reporter.report(ErrorContext::new(LpmError::Runtime("boom".to_string()), "workload"));
    assert_eq!(reporter.reported_count.load(Ordering::SeqCst), 1);
}

/// Test that the default tracing error reporter can be used.
#[test]
fn test_tracing_error_reporter() {
    let reporter = TracingErrorReporter;
    let context = ErrorContext::new(LpmError::Custom("test error".to_string()), "test_component");

    // Just make sure this doesn't panic
    reporter.report(context);
}
