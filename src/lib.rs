//! **Approximate, time-bounded character-level diffing.**
//!
//! `span-diff` compares two sequences and reports, for each side, the spans
//! that have no counterpart in the other. It works by repeatedly finding the
//! longest common run it can align, excluding it, and recursing on what is
//! left on either side of it. A single wall-clock budget covers the whole
//! recursion; when it runs out the answer found so far is returned, flagged as
//! incomplete.
//!
//! The library powers both a command-line interface and a Rust API.
//!
//! ## Core Concepts & Modules
//!
//! - **[`diff`]**: Home of the [`DiffEngine`] and the building blocks it is made
//!   of (region sets, alignment strategies, run extraction, the deadline).
//! - **[`config`]**: YAML configuration with presets, discovery and validation.
//! - **[`reports`]**: Generators for annotated, summary, JSON and span-list output.
//! - **[`pipeline`]**: Load → diff → report stages shared by the CLI handlers.
//! - **[`cli`]**: Testable handlers for the `diff` and `diff-multi` subcommands.
//!
//! ## Getting Started
//!
//! ```
//! use span_diff::{DiffEngine, Span};
//!
//! let result = DiffEngine::new().diff_str("kitten", "sitting");
//!
//! assert!(result.is_complete());
//! assert_eq!(result.old, vec![Span::new(0, 1), Span::new(4, 5)]);
//! assert_eq!(result.new, vec![Span::new(0, 1), Span::new(4, 5), Span::new(6, 7)]);
//! ```
//!
//! Any `Eq + Hash` element type works, not just characters:
//!
//! ```
//! use span_diff::DiffEngine;
//! use std::time::Duration;
//!
//! let old = ["fn", "main", "(", ")"];
//! let new = ["fn", "run", "(", ")"];
//! let result = DiffEngine::new()
//!     .with_max_time(Duration::from_millis(100))
//!     .diff(&old, &new);
//!
//! assert_eq!(result.old_changed_len(), 1);
//! assert_eq!(result.new_changed_len(), 1);
//! ```
//!
//! ## Command-Line Interface (CLI)
//!
//! This documentation is for the `span-diff` library crate. The `span-diff`
//! binary wraps it with `diff`, `diff-multi` and configuration subcommands.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // Profile weights and ratios mix usize and f64
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    // Doc completeness: # Errors / # Panics sections are aspirational
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // Config structs legitimately use many bools for toggle flags
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    // Variable names like `old`/`new` or `a_base`/`b_base` are clear in context
    clippy::similar_names
)]

pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod pipeline;
pub mod reports;

// Re-export main types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigOverrides, ConfigPreset};
pub use config::{BehaviorConfig, EngineSettings, OutputConfig};
pub use config::{ConfigError, Validatable};
pub use config::{DiffConfig, MultiDiffConfig};
pub use diff::{
    Deadline, DiffEngine, DiffResult, DiffStats, EngineConfig, EscalationPolicy,
    IncompleteReason, Span, diff_str,
};
pub use error::{ErrorContext, OptionContext, Result, SpanDiffError};
pub use reports::{ReportFormat, ReportGenerator};
