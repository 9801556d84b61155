//! Diff computation stage.
//!
//! Builds the engine from validated settings and runs it on two loaded texts.

use super::LoadedText;
use crate::config::{DiffConfig, EngineSettings, Validatable};
use crate::diff::{DiffEngine, DiffResult};
use anyhow::{Context, Result};

/// Build a diff engine from engine settings, rejecting invalid values.
pub fn build_engine(settings: &EngineSettings) -> Result<DiffEngine> {
    settings
        .ensure_valid()
        .context("Invalid engine settings")?;
    let config = settings.to_engine_config()?;
    Ok(DiffEngine::new().with_config(config))
}

/// Run the diff computation between two texts.
pub fn compute_diff(config: &DiffConfig, old: &LoadedText, new: &LoadedText) -> Result<DiffResult> {
    let quiet = config.behavior.quiet;
    let engine = build_engine(&config.engine)?;

    if !quiet {
        tracing::info!(
            "Computing span diff ({} vs {} characters, budget {:.2}s)...",
            old.char_len(),
            new.char_len(),
            config.engine.max_time_secs
        );
    }

    let result = engine.diff_str(&old.content, &new.content);

    if !quiet {
        tracing::info!(
            "Found {} changed spans in old, {} in new ({} calls, {} ms)",
            result.old.len(),
            result.new.len(),
            result.stats.calls,
            result.stats.elapsed_ms
        );
        if result.stats.escalations > 0 {
            tracing::info!("Chunked alignment was used for the outermost match");
        }
    }

    Ok(result)
}
