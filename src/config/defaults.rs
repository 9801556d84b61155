//! Default configurations and presets for span-diff.
//!
//! Provides named presets for common use cases.

use super::types::{AppConfig, BehaviorConfig, EngineSettings, OutputConfig};
use crate::diff::{EngineConfig, EscalationPolicy};

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets for common use cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Default balanced settings suitable for most cases
    Default,
    /// Short budget for as-you-type highlighting
    Fast,
    /// Long budget and eager escalation for batch comparisons
    Thorough,
    /// Direct alignment only, no chunked escalation
    Exact,
}

impl ConfigPreset {
    /// Get the preset name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Fast => "fast",
            Self::Thorough => "thorough",
            Self::Exact => "exact",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" | "balanced" => Some(Self::Default),
            "fast" | "interactive" => Some(Self::Fast),
            "thorough" | "batch" => Some(Self::Thorough),
            "exact" | "direct" => Some(Self::Exact),
            _ => None,
        }
    }

    /// Get a description of this preset.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Default => "Balanced settings suitable for most comparisons",
            Self::Fast => "250ms budget for interactive highlighting, may report approximate spans",
            Self::Thorough => "30s budget with eager escalation",
            Self::Exact => "Direct alignment only, never falls back to chunked alignment",
        }
    }

    /// Get all available presets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Default, Self::Fast, Self::Thorough, Self::Exact]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Preset Implementations
// ============================================================================

impl AppConfig {
    /// Create an `AppConfig` from a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default => Self::default(),
            ConfigPreset::Fast => Self::fast_preset(),
            ConfigPreset::Thorough => Self::thorough_preset(),
            ConfigPreset::Exact => Self::exact_preset(),
        }
    }

    /// Interactive preset.
    ///
    /// - 250ms budget
    /// - Quiet, so only the report is printed
    #[must_use]
    pub fn fast_preset() -> Self {
        Self {
            engine: EngineSettings::from(EngineConfig::fast()),
            output: OutputConfig::default(),
            behavior: BehaviorConfig {
                quiet: true,
                ..BehaviorConfig::default()
            },
        }
    }

    /// Batch preset.
    ///
    /// - 30s budget
    /// - Escalates on shorter inputs
    /// - Fails when the diff still cannot finish
    #[must_use]
    pub fn thorough_preset() -> Self {
        Self {
            engine: EngineSettings::from(EngineConfig::thorough()),
            output: OutputConfig::default(),
            behavior: BehaviorConfig {
                fail_on_incomplete: true,
                ..BehaviorConfig::default()
            },
        }
    }

    /// Direct-alignment-only preset.
    #[must_use]
    pub fn exact_preset() -> Self {
        let engine = EngineConfig {
            escalation: EscalationPolicy::disabled(),
            ..EngineConfig::default()
        };
        Self {
            engine: EngineSettings::from(engine),
            output: OutputConfig::default(),
            behavior: BehaviorConfig::default(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
