//! Pipeline and CLI integration tests.
//!
//! These tests exercise the full load → diff → report pipeline,
//! error handling paths, and CLI command handlers with real fixture files.

use span_diff::config::{DiffConfigBuilder, load_config_file};
use span_diff::pipeline::{
    LoadedText, OutputTarget, compute_diff, exit_codes, load_text, output_report, write_output,
};
use span_diff::reports::ReportFormat;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ============================================================================
// Test Fixtures
// ============================================================================

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

fn fixture_config(format: ReportFormat, out: Option<PathBuf>) -> span_diff::DiffConfig {
    DiffConfigBuilder::new()
        .old_path(fixture_path("old.txt"))
        .new_path(fixture_path("new.txt"))
        .output_format(format)
        .output_file(out)
        .quiet(true)
        .build()
        .expect("config should build")
}

// ============================================================================
// Pipeline Load Stage Tests
// ============================================================================

mod load_stage {
    use super::*;

    #[test]
    fn load_fixture() {
        let loaded = load_text(&fixture_path("old.txt"), true).expect("load should succeed");
        assert!(loaded.content.starts_with("The quick brown fox"));
        assert_eq!(loaded.char_len(), loaded.content.len());
    }

    #[test]
    fn load_counts_chars_not_bytes() {
        let loaded = load_text(&fixture_path("unicode_old.txt"), true).expect("load should succeed");
        assert!(loaded.char_len() < loaded.content.len());
    }

    #[test]
    fn load_missing_file_mentions_path() {
        let err = load_text(&fixture_path("does-not-exist.txt"), true).unwrap_err();
        assert!(format!("{err:#}").contains("does-not-exist.txt"));
    }
}

// ============================================================================
// Pipeline Diff Stage Tests
// ============================================================================

mod diff_stage {
    use super::*;

    #[test]
    fn compute_diff_fixtures() {
        let config = fixture_config(ReportFormat::Json, None);
        let old = load_text(&config.paths.old, true).unwrap();
        let new = load_text(&config.paths.new, true).unwrap();

        let result = compute_diff(&config, &old, &new).expect("diff should succeed");

        assert!(result.is_complete());
        assert!(result.has_changes());
        // "fox" -> "cat" plus the punctuation and the added line, not whole texts
        assert!(result.old_changed_len() < old.char_len() / 4);
        assert!(result.new_changed_len() >= "A new closing line.".len());
    }

    #[test]
    fn compute_diff_identical_texts() {
        let config = fixture_config(ReportFormat::Json, None);
        let old = load_text(&config.paths.old, true).unwrap();

        let result = compute_diff(&config, &old, &old.clone()).unwrap();

        assert!(!result.has_changes());
        assert!(result.is_complete());
    }

    #[test]
    fn compute_diff_rejects_invalid_engine_settings() {
        let config = DiffConfigBuilder::new()
            .old_path(fixture_path("old.txt"))
            .new_path(fixture_path("new.txt"))
            .max_time_secs(-1.0)
            .build()
            .unwrap();
        let text = LoadedText::new("x", "abc");

        assert!(compute_diff(&config, &text, &text).is_err());
    }
}

// ============================================================================
// Report Stage Tests
// ============================================================================

mod report_stage {
    use super::*;

    fn run_to_file(format: ReportFormat) -> String {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("report");
        let config = fixture_config(format, Some(out.clone()));
        let old = load_text(&config.paths.old, true).unwrap();
        let new = load_text(&config.paths.new, true).unwrap();
        let result = compute_diff(&config, &old, &new).unwrap();

        output_report(&config, &result, &old, &new).expect("report should be written");
        std::fs::read_to_string(out).unwrap()
    }

    #[test]
    fn output_report_json_to_file() {
        let content = run_to_file(ReportFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();

        assert_eq!(value["metadata"]["tool"]["name"], "span-diff");
        assert_eq!(value["summary"]["complete"], true);
        let new_text: String = value["new"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|span| span["text"].as_str())
            .collect();
        assert!(new_text.contains("closing line"));
    }

    #[test]
    fn output_report_summary_to_file() {
        let content = run_to_file(ReportFormat::Summary);
        assert!(content.contains("Span Diff Summary"));
        assert!(content.contains("old.txt"));
        assert!(!content.contains("\x1b["), "files never get color codes");
    }

    #[test]
    fn output_report_annotated_to_file() {
        let content = run_to_file(ReportFormat::Annotated);
        assert!(content.contains("[-"));
        assert!(content.contains("{+"));
    }

    #[test]
    fn output_report_spans_to_file() {
        let content = run_to_file(ReportFormat::Spans);
        for line in content.lines() {
            let fields: Vec<_> = line.split(' ').collect();
            assert_eq!(fields.len(), 3, "unexpected line {line:?}");
            assert!(fields[0] == "old" || fields[0] == "new");
            let start: usize = fields[1].parse().unwrap();
            let end: usize = fields[2].parse().unwrap();
            assert!(start < end);
        }
    }

    #[test]
    fn output_report_auto_to_file_is_summary() {
        let content = run_to_file(ReportFormat::Auto);
        assert!(content.contains("Span Diff Summary"));
    }

    #[test]
    fn write_output_to_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("plain.txt");
        write_output("payload", &OutputTarget::File(path.clone()), true).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "payload\n");
    }
}

// ============================================================================
// Configuration Files
// ============================================================================

mod config_file {
    use super::*;

    #[test]
    fn load_fixture_config() {
        let config = load_config_file(&fixture_path("config.yaml")).expect("config should parse");

        assert!((config.engine.max_time_secs - 1.5).abs() < f64::EPSILON);
        assert_eq!(config.engine.max_depth, Some(64));
        assert_eq!(config.output.format, ReportFormat::Spans);
        assert_eq!(config.output.context_chars, 12);
        assert!(config.behavior.fail_on_change);
        assert!(!config.behavior.quiet);
    }
}

// ============================================================================
// CLI Handlers
// ============================================================================

mod end_to_end {
    use super::*;
    use span_diff::cli::{MultiDiffConfig, run_diff, run_diff_multi};
    use span_diff::config::{BehaviorConfig, EngineSettings, OutputConfig};

    #[test]
    fn run_diff_exit_codes() {
        let tmp = TempDir::new().unwrap();
        let out = Some(tmp.path().join("out.txt"));

        let config = fixture_config(ReportFormat::Spans, out.clone());
        assert_eq!(run_diff(config).unwrap(), exit_codes::SUCCESS);

        let mut config = fixture_config(ReportFormat::Spans, out);
        config.behavior.fail_on_change = true;
        assert_eq!(run_diff(config).unwrap(), exit_codes::CHANGES_DETECTED);
    }

    #[test]
    fn run_diff_missing_input_is_error() {
        let config = DiffConfigBuilder::new()
            .old_path(fixture_path("missing.txt"))
            .new_path(fixture_path("new.txt"))
            .quiet(true)
            .build()
            .unwrap();
        assert!(run_diff(config).is_err());
    }

    #[test]
    fn run_diff_multi_over_fixtures() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("multi.json");
        let config = MultiDiffConfig {
            baseline: fixture_path("old.txt"),
            targets: vec![fixture_path("old.txt"), fixture_path("new.txt")],
            engine: EngineSettings::default(),
            output: OutputConfig {
                format: ReportFormat::Json,
                file: Some(out.clone()),
                ..OutputConfig::default()
            },
            behavior: BehaviorConfig {
                quiet: true,
                ..BehaviorConfig::default()
            },
        };

        assert_eq!(run_diff_multi(config).unwrap(), exit_codes::SUCCESS);

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(value[0]["report"]["summary"]["has_changes"], false);
        assert_eq!(value[1]["report"]["summary"]["has_changes"], true);
    }
}
