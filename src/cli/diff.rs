//! Diff command handler.
//!
//! Implements the `diff` subcommand for comparing two text files.

use crate::config::{BehaviorConfig, DiffConfig};
use crate::diff::DiffResult;
use crate::pipeline::{compute_diff, exit_codes, load_text, output_report};
use anyhow::Result;

/// Run the diff command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
#[allow(clippy::needless_pass_by_value)]
pub fn run_diff(config: DiffConfig) -> Result<i32> {
    let quiet = config.behavior.quiet;

    let old = load_text(&config.paths.old, quiet)?;
    let new = load_text(&config.paths.new, quiet)?;

    let result = compute_diff(&config, &old, &new)?;
    let exit_code = determine_exit_code(&config.behavior, &result);

    output_report(&config, &result, &old, &new)?;

    Ok(exit_code)
}

/// Determine the appropriate exit code based on diff results and config flags.
///
/// An incomplete diff outranks detected changes, since its spans may
/// over-report them.
pub(crate) fn determine_exit_code(behavior: &BehaviorConfig, result: &DiffResult) -> i32 {
    if behavior.fail_on_incomplete && !result.is_complete() {
        return exit_codes::INCOMPLETE;
    }
    if behavior.fail_on_change && result.has_changes() {
        return exit_codes::CHANGES_DETECTED;
    }
    exit_codes::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DiffConfigBuilder;
    use crate::diff::{IncompleteReason, Span};
    use crate::reports::ReportFormat;
    use tempfile::TempDir;

    fn changed() -> DiffResult {
        DiffResult {
            old: vec![Span::new(0, 1)],
            new: vec![Span::new(0, 1)],
            ..DiffResult::default()
        }
    }

    #[test]
    fn test_exit_code_defaults_to_success() {
        let behavior = BehaviorConfig::default();
        assert_eq!(determine_exit_code(&behavior, &changed()), exit_codes::SUCCESS);
    }

    #[test]
    fn test_exit_code_fail_on_change() {
        let behavior = BehaviorConfig {
            fail_on_change: true,
            ..BehaviorConfig::default()
        };
        assert_eq!(
            determine_exit_code(&behavior, &changed()),
            exit_codes::CHANGES_DETECTED
        );
        assert_eq!(
            determine_exit_code(&behavior, &DiffResult::default()),
            exit_codes::SUCCESS
        );
    }

    #[test]
    fn test_exit_code_incomplete_outranks_changes() {
        let behavior = BehaviorConfig {
            fail_on_change: true,
            fail_on_incomplete: true,
            quiet: false,
        };
        let result = DiffResult {
            incomplete: Some(IncompleteReason::DeadlineExceeded),
            ..changed()
        };
        assert_eq!(determine_exit_code(&behavior, &result), exit_codes::INCOMPLETE);
    }

    #[test]
    fn test_run_diff_end_to_end() {
        let tmp = TempDir::new().unwrap();
        let old = tmp.path().join("old.txt");
        let new = tmp.path().join("new.txt");
        let out = tmp.path().join("out.txt");
        std::fs::write(&old, "kitten").unwrap();
        std::fs::write(&new, "sitting").unwrap();

        let config = DiffConfigBuilder::new()
            .old_path(old)
            .new_path(new)
            .output_format(ReportFormat::Spans)
            .output_file(Some(out.clone()))
            .fail_on_change(true)
            .quiet(true)
            .build()
            .unwrap();

        assert_eq!(run_diff(config).unwrap(), exit_codes::CHANGES_DETECTED);
        let report = std::fs::read_to_string(out).unwrap();
        assert!(report.starts_with("old 0 1\n"));
    }
}
