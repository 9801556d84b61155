//! Report generation for diff results.
//!
//! This module provides multiple output formats for span diff results:
//! - JSON: Structured data for programmatic integration
//! - Summary: Compact shell-friendly overview
//! - Annotated: Both texts with changed spans marked inline
//! - Spans: One machine-readable line per span

mod annotated;
mod json;
mod spans;
mod summary;
pub mod text;
mod types;

pub use annotated::AnnotatedReporter;
pub use json::JsonReporter;
pub use spans::SpansReporter;
pub use summary::SummaryReporter;
pub use text::{IndexedText, Side, TextPair};
pub use types::{ReportConfig, ReportFormat, ReportMetadata};

use crate::diff::DiffResult;
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),

    #[error(transparent)]
    Span(#[from] crate::error::SpanDiffError),
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report from a diff result and the texts it was computed on
    fn generate(
        &self,
        result: &DiffResult,
        texts: &TextPair<'_>,
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    /// Write report to a writer
    fn write_report(
        &self,
        result: &DiffResult,
        texts: &TextPair<'_>,
        config: &ReportConfig,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let report = self.generate(result, texts, config)?;
        writer.write_all(report.as_bytes())?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator for the given format
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    create_reporter_with_options(format, true)
}

/// Create a report generator with color control
///
/// `Auto` is expected to be resolved by the caller; it falls back to the
/// summary here.
#[must_use]
pub fn create_reporter_with_options(
    format: ReportFormat,
    use_color: bool,
) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Auto | ReportFormat::Summary => {
            if use_color {
                Box::new(SummaryReporter::new())
            } else {
                Box::new(SummaryReporter::new().no_color())
            }
        }
        ReportFormat::Annotated => {
            if use_color {
                Box::new(AnnotatedReporter::new())
            } else {
                Box::new(AnnotatedReporter::new().no_color())
            }
        }
        ReportFormat::Json => Box::new(JsonReporter::new()),
        ReportFormat::Spans => Box::new(SpansReporter::new()),
    }
}
