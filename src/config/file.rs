//! Finding and reading `.span-diff.yaml`.

use super::types::{AppConfig, ConfigOverrides, EngineSettings, EscalationSettings, OutputConfig};
use crate::error::{ErrorContext, Result, SpanDiffError};
use std::path::{Path, PathBuf};

/// File names recognized in every searched directory, most preferred first.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".span-diff.yaml",
    ".span-diff.yml",
    "span-diff.yaml",
    "span-diff.yml",
];

/// Locate the config file to use.
///
/// An explicit path wins when it exists. Otherwise the working directory,
/// the enclosing git checkout, `~/.config/span-diff/` and the home directory
/// are searched in that order.
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path.filter(|p| p.exists()) {
        return Some(path.to_path_buf());
    }

    let cwd = std::env::current_dir().ok();
    let search_dirs = [
        cwd.clone(),
        cwd.as_deref().and_then(enclosing_repo_root),
        dirs::config_dir().map(|dir| dir.join("span-diff")),
        dirs::home_dir(),
    ];
    search_dirs
        .into_iter()
        .flatten()
        .find_map(|dir| find_config_in_dir(&dir))
}

fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

fn enclosing_repo_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

/// Read and parse one config file.
pub fn load_config_file(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|err| SpanDiffError::io(path, err))?;
    serde_yaml_ng::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

/// Load the discovered config file, falling back to defaults.
///
/// A file that fails to parse is logged and ignored; the second element
/// tells which file, if any, was actually used.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    let Some(path) = discover_config_file(explicit_path) else {
        return (AppConfig::default(), None);
    };
    match load_config_file(&path) {
        Ok(config) => (config, Some(path)),
        Err(err) => {
            tracing::warn!("Ignoring config file: {err}");
            (AppConfig::default(), None)
        }
    }
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Only values that differ from the defaults override, so CLI arguments
    /// that were never given leave file settings alone.
    pub fn merge(&mut self, other: &Self) {
        let engine_defaults = EngineSettings::default();
        let escalation_defaults = EscalationSettings::default();

        // Engine settings
        if other.engine.max_time_secs != engine_defaults.max_time_secs {
            self.engine.max_time_secs = other.engine.max_time_secs;
        }
        if other.engine.max_depth.is_some() {
            self.engine.max_depth = other.engine.max_depth;
        }
        if !other.engine.escalation.enabled {
            self.engine.escalation.enabled = false;
        }
        if other.engine.escalation.max_length_ratio != escalation_defaults.max_length_ratio {
            self.engine.escalation.max_length_ratio = other.engine.escalation.max_length_ratio;
        }
        if other.engine.escalation.min_group_density != escalation_defaults.min_group_density {
            self.engine.escalation.min_group_density = other.engine.escalation.min_group_density;
        }
        if other.engine.escalation.min_shorter_len != escalation_defaults.min_shorter_len {
            self.engine.escalation.min_shorter_len = other.engine.escalation.min_shorter_len;
        }

        // Output config - only override if explicitly set
        if other.output.format != crate::reports::ReportFormat::Auto {
            self.output.format = other.output.format;
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
        if other.output.no_color {
            self.output.no_color = true;
        }
        if other.output.context_chars != OutputConfig::default().context_chars {
            self.output.context_chars = other.output.context_chars;
        }

        // Behavior config (booleans - if set to true, override)
        if other.behavior.fail_on_change {
            self.behavior.fail_on_change = true;
        }
        if other.behavior.fail_on_incomplete {
            self.behavior.fail_on_incomplete = true;
        }
        if other.behavior.quiet {
            self.behavior.quiet = true;
        }
    }

    /// Apply command-line flags on top of the file and preset layers.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(secs) = overrides.max_time_secs {
            self.engine.max_time_secs = secs;
        }
        if let Some(depth) = overrides.max_depth {
            self.engine.max_depth = Some(depth);
        }
        if overrides.no_escalation {
            self.engine.escalation.enabled = false;
        }
        if let Some(format) = overrides.format {
            self.output.format = format;
        }
        if let Some(file) = &overrides.output_file {
            self.output.file = Some(file.clone());
        }
        if let Some(chars) = overrides.context_chars {
            self.output.context_chars = chars;
        }
        self.output.no_color |= overrides.no_color;
        self.behavior.fail_on_change |= overrides.fail_on_change;
        self.behavior.fail_on_incomplete |= overrides.fail_on_incomplete;
        self.behavior.quiet |= overrides.quiet;
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# span-diff Configuration File
# =============================
#
# Place it at:
#   - .span-diff.yaml in your project root
#   - ~/.config/span-diff/span-diff.yaml for global config
#
# CLI arguments always override file settings.

# Diff engine
engine:
  # Wall-clock budget for one diff, in seconds. When it runs out the
  # result is marked incomplete and may over-report changes.
  max_time_secs: 3.0
  # Recursion depth after which remaining differences are reported as-is.
  # Unlimited when omitted; the time budget still bounds the work.
  # max_depth: 512
  # Retry the outermost alignment with word-chunk alignment when the
  # direct alignment finds only a small or fragmented common run
  escalation:
    enabled: true
    max_length_ratio: 10.0
    min_group_density: 20.0
    # Inputs at most this long are never escalated
    min_shorter_len: 500

# Output configuration
output:
  # Format: auto, json, summary, annotated, spans
  format: auto
  # Output file path (omit for stdout)
  # file: report.json
  # Disable colored output
  no_color: false
  # Characters of changed text shown per span (0 hides the text)
  context_chars: 40

# Behavior flags
behavior:
  # Exit with code 1 if any changes are detected
  fail_on_change: false
  # Exit with code 2 if the diff ran out of time or depth
  fail_on_incomplete: false
  # Suppress non-essential output
  quiet: false
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================
