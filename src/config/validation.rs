//! Configuration validation for span-diff.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::*;
use crate::error::SpanDiffError;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Fail with every validation message joined into one error.
    fn ensure_valid(&self) -> crate::error::Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            return Ok(());
        }
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        Err(SpanDiffError::validation(messages.join("; ")))
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.engine.validate());
        errors.extend(self.output.validate());
        errors
    }
}

impl Validatable for EngineSettings {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if !self.max_time_secs.is_finite() || self.max_time_secs <= 0.0 {
            errors.push(ConfigError {
                field: "engine.max_time_secs".to_string(),
                message: format!(
                    "Time budget must be a positive number of seconds, got {}",
                    self.max_time_secs
                ),
            });
        }

        if self.max_depth == Some(0) {
            errors.push(ConfigError {
                field: "engine.max_depth".to_string(),
                message: "Recursion depth must be at least 1".to_string(),
            });
        }

        errors.extend(self.escalation.validate());
        errors
    }
}

impl Validatable for EscalationSettings {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let ratios = [
            ("engine.escalation.max_length_ratio", self.max_length_ratio),
            ("engine.escalation.min_group_density", self.min_group_density),
        ];
        for (field, value) in ratios {
            if !value.is_finite() || value <= 0.0 {
                errors.push(ConfigError {
                    field: field.to_string(),
                    message: format!("Ratio must be a positive number, got {}", value),
                });
            }
        }
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(ref file_path) = self.file
            && let Some(parent) = file_path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            errors.push(ConfigError {
                field: "output.file".to_string(),
                message: format!("Parent directory does not exist: {}", parent.display()),
            });
        }

        errors
    }
}

impl Validatable for DiffConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if !self.paths.old.exists() {
            errors.push(ConfigError {
                field: "paths.old".to_string(),
                message: format!("File not found: {}", self.paths.old.display()),
            });
        }
        if !self.paths.new.exists() {
            errors.push(ConfigError {
                field: "paths.new".to_string(),
                message: format!("File not found: {}", self.paths.new.display()),
            });
        }

        errors.extend(self.engine.validate());
        errors.extend(self.output.validate());
        errors
    }
}

impl Validatable for MultiDiffConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if !self.baseline.exists() {
            errors.push(ConfigError {
                field: "baseline".to_string(),
                message: format!("Baseline file not found: {}", self.baseline.display()),
            });
        }

        for (i, target) in self.targets.iter().enumerate() {
            if !target.exists() {
                errors.push(ConfigError {
                    field: format!("targets[{}]", i),
                    message: format!("Target file not found: {}", target.display()),
                });
            }
        }

        if self.targets.is_empty() {
            errors.push(ConfigError {
                field: "targets".to_string(),
                message: "At least one target file is required".to_string(),
            });
        }

        errors.extend(self.engine.validate());
        errors.extend(self.output.validate());
        errors
    }
}

// ============================================================================
// Tests
// ============================================================================
