//! Line-per-span report for scripts.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator, Side, TextPair};
use crate::diff::DiffResult;
use std::fmt::Write as _;

/// Emits `<side> <start> <end>` for every changed span, old side first.
///
/// An incomplete diff ends with an `incomplete <reason>` line.
pub struct SpansReporter;

impl SpansReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for SpansReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SpansReporter {
    fn generate(
        &self,
        result: &DiffResult,
        texts: &TextPair<'_>,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut out = String::new();
        for side in [Side::Old, Side::New] {
            let text = texts.side(side);
            for span in side.spans(result) {
                // reject spans that do not fit the text they claim to cover
                text.slice(*span)?;
                writeln!(out, "{} {} {}", side, span.start, span.end)?;
            }
        }
        if let Some(reason) = result.incomplete {
            let tag = serde_json::to_value(reason)
                .ok()
                .and_then(|v| v.as_str().map(str::to_string))
                .unwrap_or_else(|| reason.to_string());
            writeln!(out, "incomplete {tag}")?;
        }
        Ok(out)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Spans
    }
}
