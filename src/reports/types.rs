//! Report type definitions.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Auto-detect: annotated text if TTY, summary otherwise
    #[default]
    Auto,
    /// Structured JSON output
    Json,
    /// Brief summary output
    Summary,
    /// Both inputs with their changed spans marked inline
    #[value(alias = "inline")]
    Annotated,
    /// One line per span, for scripts
    Spans,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Auto => write!(f, "auto"),
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Summary => write!(f, "summary"),
            ReportFormat::Annotated => write!(f, "annotated"),
            ReportFormat::Spans => write!(f, "spans"),
        }
    }
}

/// Configuration for report generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Title for the report
    pub title: Option<String>,
    /// Characters of changed text shown per span (0 hides the text)
    pub context_chars: usize,
    /// Additional metadata to include
    pub metadata: ReportMetadata,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: None,
            context_chars: 40,
            metadata: ReportMetadata::default(),
        }
    }
}

impl ReportConfig {
    /// Config naming the two compared files
    pub fn for_paths(old: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            metadata: ReportMetadata {
                old_path: Some(old.into()),
                new_path: Some(new.into()),
                ..ReportMetadata::new()
            },
            ..Self::default()
        }
    }

    /// Display name of the old input
    pub fn old_name(&self) -> &str {
        self.metadata.old_path.as_deref().unwrap_or("old")
    }

    /// Display name of the new input
    pub fn new_name(&self) -> &str {
        self.metadata.new_path.as_deref().unwrap_or("new")
    }
}

/// Metadata included in reports
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Old file path
    pub old_path: Option<String>,
    /// New file path
    pub new_path: Option<String>,
    /// Tool version
    pub tool_version: String,
    /// Generation timestamp
    pub generated_at: Option<String>,
}

impl ReportMetadata {
    pub fn new() -> Self {
        Self {
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            ..Default::default()
        }
    }
}
