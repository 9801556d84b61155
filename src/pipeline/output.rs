//! Where reports go and how they look there.

use crate::reports::ReportFormat;
use anyhow::{Context, Result};
use std::io::{IsTerminal, Write};
use std::path::PathBuf;

/// Destination of a rendered report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    /// `None` means stdout
    pub fn from_option(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Stdout, Self::File)
    }

    /// Only stdout attached to a terminal counts as interactive.
    pub fn is_terminal(&self) -> bool {
        match self {
            Self::Stdout => std::io::stdout().is_terminal(),
            Self::File(_) => false,
        }
    }
}

/// Resolve [`ReportFormat::Auto`] for a destination.
///
/// People looking at a terminal get both texts with inline highlights;
/// pipes and files get the summary. Explicit formats pass through.
pub fn auto_detect_format(format: ReportFormat, target: &OutputTarget) -> ReportFormat {
    if format != ReportFormat::Auto {
        return format;
    }
    if target.is_terminal() {
        ReportFormat::Annotated
    } else {
        ReportFormat::Summary
    }
}

/// Color is on unless `--no-color` was given or `NO_COLOR` is set to
/// anything non-empty.
pub fn should_use_color(no_color_flag: bool) -> bool {
    if no_color_flag {
        return false;
    }
    std::env::var_os("NO_COLOR").is_none_or(|value| value.is_empty())
}

/// Write a report, making sure it ends with exactly one newline.
pub fn write_output(content: &str, target: &OutputTarget, quiet: bool) -> Result<()> {
    let body = content.strip_suffix('\n').unwrap_or(content);
    match target {
        OutputTarget::Stdout => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{body}").context("Failed to write report to stdout")?;
        }
        OutputTarget::File(path) => {
            std::fs::write(path, format!("{body}\n"))
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            if !quiet {
                tracing::info!("Report written to {}", path.display());
            }
        }
    }
    Ok(())
}
