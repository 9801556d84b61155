//! Configuration types for span-diff operations.
//!
//! Provides structured configuration for the engine, report output and the
//! `diff` / `diff-multi` commands.

use crate::diff::{DEFAULT_MAX_TIME, EngineConfig, EscalationPolicy};
use crate::error::{DiffErrorKind, OptionContext, SpanDiffError};
use crate::reports::ReportFormat;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// CLI arguments override values loaded from a config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Diff engine tunables (time budget, depth, escalation)
    pub engine: EngineSettings,
    /// Output configuration (format, file, colors)
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the time budget in seconds.
    pub const fn max_time_secs(mut self, secs: f64) -> Self {
        self.config.engine.max_time_secs = secs;
        self
    }

    /// Cap the recursion depth.
    pub const fn max_depth(mut self, depth: usize) -> Self {
        self.config.engine.max_depth = Some(depth);
        self
    }

    /// Enable or disable chunked-alignment escalation.
    pub const fn escalation(mut self, enabled: bool) -> Self {
        self.config.engine.escalation.enabled = enabled;
        self
    }

    /// Set the output format.
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Disable colored output.
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    /// Enable fail-on-change mode.
    pub const fn fail_on_change(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_change = fail;
        self
    }

    /// Enable fail-on-incomplete mode.
    pub const fn fail_on_incomplete(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_incomplete = fail;
        self
    }

    /// Enable quiet mode.
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet = quiet;
        self
    }

    /// Build the `AppConfig`.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

/// Settings given explicitly on the command line.
///
/// `None` and `false` keep whatever the config file or preset chose; a set
/// value always wins, even one equal to the built-in default.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub max_time_secs: Option<f64>,
    pub max_depth: Option<usize>,
    pub no_escalation: bool,
    pub format: Option<ReportFormat>,
    pub output_file: Option<PathBuf>,
    pub no_color: bool,
    pub context_chars: Option<usize>,
    pub fail_on_change: bool,
    pub fail_on_incomplete: bool,
    pub quiet: bool,
}

// ============================================================================
// Engine Settings
// ============================================================================

/// Serializable form of the engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct EngineSettings {
    /// Wall-clock budget for one diff, in seconds
    #[schemars(range(min = 0.0))]
    pub max_time_secs: f64,
    /// Recursion depth after which remainders are reported as-is (unlimited when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
    /// Outermost-level chunked alignment retry
    pub escalation: EscalationSettings,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self::from(EngineConfig::default())
    }
}

impl From<EngineConfig> for EngineSettings {
    fn from(config: EngineConfig) -> Self {
        Self {
            max_time_secs: config.max_time.as_secs_f64(),
            max_depth: config.max_depth,
            escalation: EscalationSettings::from(config.escalation),
        }
    }
}

impl EngineSettings {
    /// Convert to an [`EngineConfig`], rejecting unusable values.
    pub fn to_engine_config(&self) -> crate::error::Result<EngineConfig> {
        if !self.max_time_secs.is_finite() || self.max_time_secs <= 0.0 {
            return Err(SpanDiffError::invalid_time_budget(self.max_time_secs));
        }
        if self.max_depth == Some(0) {
            return Err(SpanDiffError::diff(
                "engine settings",
                DiffErrorKind::InvalidDepth(0),
            ));
        }
        let max_time =
            Duration::try_from_secs_f64(self.max_time_secs).unwrap_or(DEFAULT_MAX_TIME);
        Ok(EngineConfig {
            max_time,
            max_depth: self.max_depth,
            escalation: self.escalation.to_policy(),
        })
    }
}

/// When to retry the outermost alignment with the chunked strategy.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct EscalationSettings {
    /// Allow the chunked retry at all
    pub enabled: bool,
    /// Retry when shorter length / common run length exceeds this
    pub max_length_ratio: f64,
    /// Retry when profile length / group count falls below this
    pub min_group_density: f64,
    /// Never retry when the shorter input is at most this long
    pub min_shorter_len: usize,
}

impl Default for EscalationSettings {
    fn default() -> Self {
        Self::from(EscalationPolicy::default())
    }
}

impl From<EscalationPolicy> for EscalationSettings {
    fn from(policy: EscalationPolicy) -> Self {
        Self {
            enabled: policy.enabled,
            max_length_ratio: policy.max_length_ratio,
            min_group_density: policy.min_group_density,
            min_shorter_len: policy.min_shorter_len,
        }
    }
}

impl EscalationSettings {
    #[must_use]
    pub const fn to_policy(&self) -> EscalationPolicy {
        EscalationPolicy {
            enabled: self.enabled,
            max_length_ratio: self.max_length_ratio,
            min_group_density: self.min_group_density,
            min_shorter_len: self.min_shorter_len,
        }
    }
}

// ============================================================================
// Command-specific Configuration Types
// ============================================================================

/// Configuration for diff operations
#[derive(Debug, Clone)]
pub struct DiffConfig {
    /// Paths to compare
    pub paths: DiffPaths,
    /// Engine settings
    pub engine: EngineSettings,
    /// Output configuration
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

/// Paths for diff operation
#[derive(Debug, Clone)]
pub struct DiffPaths {
    /// Path to the old text
    pub old: PathBuf,
    /// Path to the new text
    pub new: PathBuf,
}

/// Configuration for multi-diff operations
#[derive(Debug, Clone)]
pub struct MultiDiffConfig {
    /// Path to the baseline text
    pub baseline: PathBuf,
    /// Paths to the texts compared against the baseline
    pub targets: Vec<PathBuf>,
    /// Engine settings, applied to every pair
    pub engine: EngineSettings,
    /// Output configuration
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

// ============================================================================
// Sub-configuration Types
// ============================================================================

/// Output-related configuration
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
    /// Characters of changed text shown per span in text reports (0 hides the text)
    pub context_chars: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::Auto,
            file: None,
            no_color: false,
            context_chars: 40,
        }
    }
}

/// Behavior flags for diff operations
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Exit with code 1 if any changes are detected
    pub fail_on_change: bool,
    /// Exit with code 2 if the diff could not finish in time
    pub fail_on_incomplete: bool,
    /// Suppress non-essential output
    pub quiet: bool,
}

// ============================================================================
// Builder for DiffConfig
// ============================================================================

/// Builder for `DiffConfig`
#[derive(Debug, Default)]
pub struct DiffConfigBuilder {
    old: Option<PathBuf>,
    new: Option<PathBuf>,
    engine: EngineSettings,
    output: OutputConfig,
    behavior: BehaviorConfig,
}

impl DiffConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the settings of a loaded application config.
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            engine: config.engine.clone(),
            output: config.output.clone(),
            behavior: config.behavior.clone(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn old_path(mut self, path: PathBuf) -> Self {
        self.old = Some(path);
        self
    }

    #[must_use]
    pub fn new_path(mut self, path: PathBuf) -> Self {
        self.new = Some(path);
        self
    }

    #[must_use]
    pub const fn max_time_secs(mut self, secs: f64) -> Self {
        self.engine.max_time_secs = secs;
        self
    }

    #[must_use]
    pub const fn max_depth(mut self, depth: usize) -> Self {
        self.engine.max_depth = Some(depth);
        self
    }

    #[must_use]
    pub const fn escalation(mut self, enabled: bool) -> Self {
        self.engine.escalation.enabled = enabled;
        self
    }

    #[must_use]
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.output.format = format;
        self
    }

    #[must_use]
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.output.file = file;
        self
    }

    #[must_use]
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.output.no_color = no_color;
        self
    }

    #[must_use]
    pub const fn context_chars(mut self, chars: usize) -> Self {
        self.output.context_chars = chars;
        self
    }

    #[must_use]
    pub const fn fail_on_change(mut self, fail: bool) -> Self {
        self.behavior.fail_on_change = fail;
        self
    }

    #[must_use]
    pub const fn fail_on_incomplete(mut self, fail: bool) -> Self {
        self.behavior.fail_on_incomplete = fail;
        self
    }

    #[must_use]
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.behavior.quiet = quiet;
        self
    }

    pub fn build(self) -> anyhow::Result<DiffConfig> {
        let old = self.old.context_none("old path is required")?;
        let new = self.new.context_none("new path is required")?;

        Ok(DiffConfig {
            paths: DiffPaths { old, new },
            engine: self.engine,
            output: self.output,
            behavior: self.behavior,
        })
    }
}
