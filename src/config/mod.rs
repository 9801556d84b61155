//! Configuration module for span-diff.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - Named presets for common use cases
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust
//! use span_diff::config::{AppConfig, ConfigPreset, Validatable};
//!
//! // Use a preset
//! let config = AppConfig::from_preset(ConfigPreset::Fast);
//! assert!(config.is_valid());
//!
//! // Use builder
//! let config = AppConfig::builder()
//!     .max_time_secs(1.5)
//!     .fail_on_incomplete(true)
//!     .build();
//! let engine = config.engine.to_engine_config().unwrap();
//! assert_eq!(engine.max_time.as_millis(), 1500);
//! ```
//!
//! # Configuration File
//!
//! Place a `.span-diff.yaml` file in your project root or `~/.config/span-diff/`:
//!
//! ```yaml
//! engine:
//!   max_time_secs: 0.5
//! behavior:
//!   fail_on_incomplete: true
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::ConfigPreset;
pub use types::{
    AppConfig, AppConfigBuilder, BehaviorConfig, ConfigOverrides, DiffConfig, DiffConfigBuilder, DiffPaths,
    EngineSettings, EscalationSettings, MultiDiffConfig, OutputConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_full_example_config, load_config_file, load_or_default,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// Editors can use it to validate and autocomplete `.span-diff.yaml` files.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}
