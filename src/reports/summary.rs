//! Summary report generator for shell output.
//!
//! Provides a compact, human-readable summary for terminal usage.

use super::text::preview;
use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator, Side, TextPair};
use crate::diff::DiffResult;

/// Apply ANSI color formatting if colored output is enabled.
pub(super) fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn change_line(&self, result: &DiffResult, side: Side) -> String {
        let spans = side.spans(result).len();
        let chars = match side {
            Side::Old => result.old_changed_len(),
            Side::New => result.new_changed_len(),
        };
        let (sign, color) = match side {
            Side::Old => ("-", "red"),
            Side::New => ("+", "green"),
        };
        format!(
            "  {} {} in {}, {} {}",
            self.color(&format!("{sign}{spans}"), color),
            if spans == 1 { "span" } else { "spans" },
            side,
            chars,
            if chars == 1 { "character" } else { "characters" }
        )
    }

    fn span_lines(
        &self,
        result: &DiffResult,
        texts: &TextPair<'_>,
        side: Side,
        max_chars: usize,
    ) -> Result<Vec<String>, ReportError> {
        let text = texts.side(side);
        let mut lines = Vec::new();
        for span in side.spans(result) {
            let covered = text.slice(*span)?;
            let location = format!("{:>14}", span.to_string());
            if max_chars == 0 {
                lines.push(format!("  {location}"));
            } else {
                lines.push(format!(
                    "  {}  \"{}\"",
                    self.color(&location, "dim"),
                    preview(covered, max_chars)
                ));
            }
        }
        Ok(lines)
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate(
        &self,
        result: &DiffResult,
        texts: &TextPair<'_>,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();

        // Header
        let title = config.title.as_deref().unwrap_or("Span Diff Summary");
        lines.push(self.color(title, "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));

        lines.push(format!(
            "{}  {} → {}",
            self.color("Files:", "cyan"),
            config.old_name(),
            config.new_name()
        ));
        lines.push(format!(
            "{}   {} → {} characters",
            self.color("Size:", "cyan"),
            texts.old.char_len(),
            texts.new.char_len()
        ));

        lines.push(String::new());
        lines.push(self.color("Changes:", "bold"));
        if result.has_changes() {
            lines.push(self.change_line(result, Side::Old));
            lines.push(self.change_line(result, Side::New));
        } else {
            lines.push(format!("  {}", self.color("No changes", "dim")));
        }

        if let Some(reason) = result.incomplete {
            lines.push(String::new());
            lines.push(self.color(
                &format!("Warning: diff incomplete ({reason}); differences shown may be approximate"),
                "yellow",
            ));
        }

        for side in [Side::Old, Side::New] {
            if side.spans(result).is_empty() {
                continue;
            }
            lines.push(String::new());
            let heading = match side {
                Side::Old => "Removed or replaced in old:",
                Side::New => "Added or replaced in new:",
            };
            lines.push(self.color(heading, "bold"));
            lines.extend(self.span_lines(result, texts, side, config.context_chars)?);
        }

        lines.push(String::new());
        lines.push(self.color(
            &format!(
                "{} calls, depth {}, {} escalations, {} ms",
                result.stats.calls,
                result.stats.max_depth,
                result.stats.escalations,
                result.stats.elapsed_ms
            ),
            "dim",
        ));

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}
