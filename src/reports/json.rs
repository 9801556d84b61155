//! JSON report generator.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator, Side, TextPair};
use crate::diff::{DiffResult, DiffStats, IncompleteReason};
use chrono::Utc;
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Include the text covered by each span
    include_text: bool,
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self {
            include_text: true,
            pretty: true,
        }
    }

    /// Only report span positions, not their text
    #[must_use]
    pub const fn without_text(mut self) -> Self {
        self.include_text = false;
        self
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Build the report as a JSON value, for callers that combine several.
    pub fn report_value(
        &self,
        result: &DiffResult,
        texts: &TextPair<'_>,
        config: &ReportConfig,
    ) -> Result<serde_json::Value, ReportError> {
        let report = self.build(result, texts, config)?;
        serde_json::to_value(&report).map_err(|e| ReportError::SerializationError(e.to_string()))
    }

    fn build<'a>(
        &self,
        result: &DiffResult,
        texts: &TextPair<'a>,
        config: &ReportConfig,
    ) -> Result<JsonDiffReport<'a>, ReportError> {
        Ok(JsonDiffReport {
            metadata: JsonReportMetadata {
                tool: ToolInfo {
                    name: "span-diff".to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                },
                generated_at: config
                    .metadata
                    .generated_at
                    .clone()
                    .unwrap_or_else(|| Utc::now().to_rfc3339()),
                old: InputInfo {
                    file_path: config.metadata.old_path.clone(),
                    length: texts.old.char_len(),
                },
                new: InputInfo {
                    file_path: config.metadata.new_path.clone(),
                    length: texts.new.char_len(),
                },
            },
            summary: JsonSummary {
                has_changes: result.has_changes(),
                complete: result.is_complete(),
                old_spans: result.old.len(),
                new_spans: result.new.len(),
                old_changed: result.old_changed_len(),
                new_changed: result.new_changed_len(),
            },
            incomplete: result.incomplete,
            old: self.spans(result, texts, Side::Old)?,
            new: self.spans(result, texts, Side::New)?,
            stats: result.stats,
        })
    }

    fn spans<'a>(
        &self,
        result: &DiffResult,
        texts: &TextPair<'a>,
        side: Side,
    ) -> Result<Vec<JsonSpan<'a>>, ReportError> {
        let text = texts.side(side);
        side.spans(result)
            .iter()
            .map(|span| -> Result<JsonSpan<'a>, ReportError> {
                let covered = text.slice(*span)?;
                Ok(JsonSpan {
                    start: span.start,
                    end: span.end,
                    text: self.include_text.then_some(covered),
                })
            })
            .collect()
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate(
        &self,
        result: &DiffResult,
        texts: &TextPair<'_>,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let report = self.build(result, texts, config)?;
        let json = if self.pretty {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string(&report)
        };
        json.map_err(|e| ReportError::SerializationError(e.to_string()))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

// JSON structures

#[derive(Serialize)]
struct JsonDiffReport<'a> {
    metadata: JsonReportMetadata,
    summary: JsonSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    incomplete: Option<IncompleteReason>,
    old: Vec<JsonSpan<'a>>,
    new: Vec<JsonSpan<'a>>,
    stats: DiffStats,
}

#[derive(Serialize)]
struct JsonReportMetadata {
    tool: ToolInfo,
    generated_at: String,
    old: InputInfo,
    new: InputInfo,
}

#[derive(Serialize)]
struct ToolInfo {
    name: String,
    version: String,
}

#[derive(Serialize)]
struct InputInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    file_path: Option<String>,
    length: usize,
}

#[derive(Serialize)]
struct JsonSummary {
    has_changes: bool,
    complete: bool,
    old_spans: usize,
    new_spans: usize,
    old_changed: usize,
    new_changed: usize,
}

#[derive(Serialize)]
struct JsonSpan<'a> {
    start: usize,
    end: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
}
