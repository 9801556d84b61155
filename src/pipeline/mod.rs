//! Pipeline orchestration for span-diff operations.
//!
//! Shared load → diff → report logic, so the CLI command handlers stay thin.

mod diff_stage;
mod load;
mod output;
mod report_stage;

pub use diff_stage::{build_engine, compute_diff};
pub use load::{LoadedText, load_text};
pub use output::{OutputTarget, auto_detect_format, should_use_color, write_output};
pub use report_stage::{output_report, report_config_for};

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success - no changes detected (or --fail-on-change not set)
    pub const SUCCESS: i32 = 0;
    /// Changes were detected
    pub const CHANGES_DETECTED: i32 = 1;
    /// The diff ran out of time or depth and may over-report changes
    pub const INCOMPLETE: i32 = 2;
    /// An error occurred
    pub const ERROR: i32 = 3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_values() {
        assert_eq!(exit_codes::SUCCESS, 0);
        assert_eq!(exit_codes::CHANGES_DETECTED, 1);
        assert_eq!(exit_codes::INCOMPLETE, 2);
        assert_eq!(exit_codes::ERROR, 3);
    }
}
