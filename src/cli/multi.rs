//! Multi-text command handler.
//!
//! Implements the `diff-multi` subcommand (one baseline against N targets).

use super::diff::determine_exit_code;
use crate::config::{MultiDiffConfig, Validatable};
use crate::diff::DiffResult;
use crate::pipeline::{
    LoadedText, OutputTarget, auto_detect_format, build_engine, exit_codes, load_text,
    report_config_for, should_use_color, write_output,
};
use crate::reports::{JsonReporter, ReportFormat, TextPair, create_reporter_with_options};
use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Run the diff-multi command (1:N comparison), returning the worst exit code.
///
/// Each target is diffed on its own rayon task with its own time budget.
#[allow(clippy::needless_pass_by_value)]
pub fn run_diff_multi(config: MultiDiffConfig) -> Result<i32> {
    if config.targets.is_empty() {
        bail!("diff-multi requires at least one target");
    }
    config.ensure_valid().context("Invalid configuration")?;

    let quiet = config.behavior.quiet;
    let baseline = load_text(&config.baseline, quiet)?;
    let targets = load_multiple_texts(&config.targets, quiet)?;
    let engine = build_engine(&config.engine)?;

    if !quiet {
        tracing::info!(
            "Comparing baseline ({} characters) against {} targets",
            baseline.char_len(),
            targets.len()
        );
    }

    let results: Vec<DiffResult> = targets
        .par_iter()
        .map(|target| engine.diff_str(&baseline.content, &target.content))
        .collect();

    let incomplete = results.iter().filter(|r| !r.is_complete()).count();
    if !quiet {
        tracing::info!(
            "Multi-diff complete: {} comparisons, {} with changes, {} incomplete",
            results.len(),
            results.iter().filter(|r| r.has_changes()).count(),
            incomplete
        );
    }

    let output_target = OutputTarget::from_option(config.output.file.clone());
    let report = render_multi_report(&config, &baseline, &targets, &results, &output_target)?;
    write_output(&report, &output_target, quiet)?;

    Ok(results
        .iter()
        .map(|result| determine_exit_code(&config.behavior, result))
        .max()
        .unwrap_or(exit_codes::SUCCESS))
}

/// Read every target, failing on the first unreadable one
fn load_multiple_texts(paths: &[PathBuf], quiet: bool) -> Result<Vec<LoadedText>> {
    paths
        .iter()
        .map(|path| {
            load_text(path, quiet)
                .with_context(|| format!("Failed to load target: {}", path.display()))
        })
        .collect()
}

/// Get a short display name from a path
fn get_text_name(path: &Path) -> String {
    path.file_stem()
        .map_or_else(|| "unknown".to_string(), |s| s.to_string_lossy().to_string())
}

/// JSON output is one array entry per target; text formats are concatenated
/// under a header per target.
fn render_multi_report(
    config: &MultiDiffConfig,
    baseline: &LoadedText,
    targets: &[LoadedText],
    results: &[DiffResult],
    output_target: &OutputTarget,
) -> Result<String> {
    let format = auto_detect_format(config.output.format, output_target);

    if format == ReportFormat::Json {
        let reporter = JsonReporter::new();
        let mut entries = Vec::with_capacity(targets.len());
        for (target, result) in targets.iter().zip(results) {
            let texts = TextPair::new(&baseline.content, &target.content);
            let report_config = report_config_for(&config.output, baseline, target);
            entries.push(serde_json::json!({
                "target": get_text_name(&target.path),
                "report": reporter.report_value(result, &texts, &report_config)?,
            }));
        }
        return serde_json::to_string_pretty(&entries).map_err(Into::into);
    }

    let use_color = should_use_color(config.output.no_color) && output_target.is_terminal();
    let reporter = create_reporter_with_options(format, use_color);
    let mut sections = Vec::with_capacity(targets.len());
    for (target, result) in targets.iter().zip(results) {
        let texts = TextPair::new(&baseline.content, &target.content);
        let report_config = report_config_for(&config.output, baseline, target);
        let body = reporter.generate(result, &texts, &report_config)?;
        sections.push(format!("== {} ==\n{}", get_text_name(&target.path), body));
    }
    Ok(sections.join("\n\n"))
}
