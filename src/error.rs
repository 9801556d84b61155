//! Unified error types for span-diff.
//!
//! The diff algorithm itself never fails: running out of time is reported
//! through [`DiffResult::incomplete`](crate::diff::DiffResult::incomplete).
//! Errors only come from configuration, file loading and report output.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for span-diff operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SpanDiffError {
    /// Errors while setting up or finishing a diff computation
    #[error("Diff computation failed: {context}")]
    Diff {
        context: String,
        #[source]
        source: DiffErrorKind,
    },

    /// Errors during report generation
    #[error("Report generation failed: {context}")]
    Report {
        context: String,
        #[source]
        source: ReportErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific diff error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DiffErrorKind {
    #[error("Invalid time budget: {0} seconds (must be finite and positive)")]
    InvalidTimeBudget(f64),

    #[error("Invalid recursion depth: {0} (must be at least 1)")]
    InvalidDepth(usize),

    #[error("Invalid span: start {start} is past end {end}")]
    InvalidSpan { start: usize, end: usize },
}

/// Specific report error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReportErrorKind {
    #[error("JSON serialization failed: {0}")]
    JsonSerializationError(String),

    #[error("Span {start}..{end} is out of bounds for input of length {len}")]
    SpanOutOfBounds { start: usize, end: usize, len: usize },
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for span-diff operations
pub type Result<T> = std::result::Result<T, SpanDiffError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl SpanDiffError {
    /// Create a diff error with context
    pub fn diff(context: impl Into<String>, source: DiffErrorKind) -> Self {
        Self::Diff {
            context: context.into(),
            source,
        }
    }

    /// Create a diff error for an unusable time budget
    pub fn invalid_time_budget(secs: f64) -> Self {
        Self::diff("engine settings", DiffErrorKind::InvalidTimeBudget(secs))
    }

    /// Create a report error
    pub fn report(context: impl Into<String>, source: ReportErrorKind) -> Self {
        Self::Report {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for SpanDiffError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for SpanDiffError {
    fn from(err: serde_json::Error) -> Self {
        Self::report(
            "JSON serialization",
            ReportErrorKind::JsonSerializationError(err.to_string()),
        )
    }
}

impl From<serde_yaml_ng::Error> for SpanDiffError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        Self::config(err.to_string())
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings chain as "outer: inner", so the final message shows the
/// path through the code.
///
/// # Example
///
/// ```
/// use span_diff::error::{ErrorContext, Result};
///
/// fn read_old(path: &str) -> Result<String> {
///     std::fs::read_to_string(path).with_context(|| format!("reading {path}"))
/// }
///
/// assert!(read_old("/definitely/not/here.txt").is_err());
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, only evaluated on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<SpanDiffError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: SpanDiffError, new_ctx: &str) -> SpanDiffError {
    match err {
        SpanDiffError::Diff {
            context: existing,
            source,
        } => SpanDiffError::Diff {
            context: chain_context(new_ctx, &existing),
            source,
        },
        SpanDiffError::Report {
            context: existing,
            source,
        } => SpanDiffError::Report {
            context: chain_context(new_ctx, &existing),
            source,
        },
        SpanDiffError::Io {
            path,
            message,
            source,
        } => SpanDiffError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        SpanDiffError::Config(msg) => SpanDiffError::Config(chain_context(new_ctx, &msg)),
        SpanDiffError::Validation(msg) => SpanDiffError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to an error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;

    /// Convert None to an error with context from a closure.
    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| SpanDiffError::Validation(context.into()))
    }

    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.ok_or_else(|| SpanDiffError::Validation(f().into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SpanDiffError::invalid_time_budget(-1.0);
        let display = err.to_string();
        assert!(
            display.contains("Diff computation failed"),
            "Error message should mention the diff: {}",
            display
        );

        let err = SpanDiffError::report(
            "annotating old text",
            ReportErrorKind::SpanOutOfBounds {
                start: 4,
                end: 9,
                len: 6,
            },
        );
        assert!(err.to_string().contains("annotating old text"));
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(
            source.as_deref(),
            Some("Span 4..9 is out of bounds for input of length 6")
        );
    }

    #[test]
    fn test_error_chain() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = SpanDiffError::io("/path/to/old.txt", io_err);

        assert!(err.to_string().contains("/path/to/old.txt"));
    }

    #[test]
    fn test_context_chaining_multiple_levels() {
        fn inner() -> Result<()> {
            Err(SpanDiffError::diff(
                "base",
                DiffErrorKind::InvalidDepth(0),
            ))
        }

        fn middle() -> Result<()> {
            inner().context("middle layer")
        }

        fn outer() -> Result<()> {
            middle().context("outer layer")
        }

        match outer() {
            Err(SpanDiffError::Diff { context, .. }) => {
                assert_eq!(context, "outer layer: middle layer: base");
            }
            _ => panic!("Expected Diff error"),
        }
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;

        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called, "Closure should not be called for Ok result");

        let err_result: Result<i32> = Err(SpanDiffError::validation("error"));
        let _ = err_result.with_context(|| {
            called = true;
            "should be called"
        });
        assert!(called, "Closure should be called for Err result");
    }

    #[test]
    fn test_io_context_goes_into_message() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        match result.context("reading new text") {
            Err(SpanDiffError::Io { path, message, .. }) => {
                assert!(path.is_none());
                assert_eq!(message, "reading new text: denied");
            }
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_yaml_error_converts_to_config() {
        let parsed: std::result::Result<Vec<u32>, _> = serde_yaml_ng::from_str("{ not: [a list");
        let err: SpanDiffError = parsed.unwrap_err().into();
        assert!(matches!(err, SpanDiffError::Config(_)));
    }

    #[test]
    fn test_option_context() {
        let some_value: Option<i32> = Some(42);
        assert_eq!(some_value.context_none("missing value").unwrap(), 42);

        let none_value: Option<i32> = None;
        match none_value.with_context_none(|| "missing value") {
            Err(SpanDiffError::Validation(msg)) => assert_eq!(msg, "missing value"),
            _ => panic!("Expected Validation error"),
        }
    }

    #[test]
    fn test_chain_context_helper() {
        assert_eq!(chain_context("new", ""), "new");
        assert_eq!(chain_context("new", "existing"), "new: existing");
    }
}
