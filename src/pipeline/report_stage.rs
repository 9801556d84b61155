//! Report output stage.

use super::{LoadedText, OutputTarget, auto_detect_format, should_use_color, write_output};
use crate::config::{DiffConfig, OutputConfig};
use crate::diff::DiffResult;
use crate::reports::{ReportConfig, ReportMetadata, TextPair, create_reporter_with_options};
use anyhow::Result;

/// Report settings for one compared pair
pub fn report_config_for(output: &OutputConfig, old: &LoadedText, new: &LoadedText) -> ReportConfig {
    ReportConfig {
        title: None,
        context_chars: output.context_chars,
        metadata: ReportMetadata {
            old_path: Some(old.display_name()),
            new_path: Some(new.display_name()),
            ..ReportMetadata::new()
        },
    }
}

/// Output a diff report to the configured destination.
///
/// Handles format auto-detection and writing to file or stdout.
pub fn output_report(
    config: &DiffConfig,
    result: &DiffResult,
    old: &LoadedText,
    new: &LoadedText,
) -> Result<()> {
    let output_target = OutputTarget::from_option(config.output.file.clone());
    let effective_output = auto_detect_format(config.output.format, &output_target);

    let use_color = should_use_color(config.output.no_color) && output_target.is_terminal();
    let reporter = create_reporter_with_options(effective_output, use_color);
    let texts = TextPair::new(&old.content, &new.content);
    let report = reporter.generate(result, &texts, &report_config_for(&config.output, old, new))?;

    write_output(&report, &output_target, config.behavior.quiet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DiffConfigBuilder;
    use crate::diff::DiffEngine;
    use crate::reports::ReportFormat;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_output_report_to_file() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("report.json");
        let config = DiffConfigBuilder::new()
            .old_path(PathBuf::from("old.txt"))
            .new_path(PathBuf::from("new.txt"))
            .output_format(ReportFormat::Json)
            .output_file(Some(out.clone()))
            .quiet(true)
            .build()
            .unwrap();
        let old = LoadedText::new("old.txt", "abc");
        let new = LoadedText::new("new.txt", "abXc");
        let result = DiffEngine::new().diff_str(&old.content, &new.content);

        output_report(&config, &result, &old, &new).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(written["metadata"]["new"]["file_path"], "new.txt");
        assert_eq!(written["new"][0]["text"], "X");
    }

    #[test]
    fn test_report_config_for_uses_context_chars() {
        let output = OutputConfig {
            context_chars: 5,
            ..OutputConfig::default()
        };
        let config = report_config_for(
            &output,
            &LoadedText::new("a", ""),
            &LoadedText::new("b", ""),
        );
        assert_eq!(config.context_chars, 5);
        assert_eq!(config.old_name(), "a");
    }
}
