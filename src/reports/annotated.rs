//! Annotated text output.
//!
//! Prints both inputs in full with their changed spans marked inline, the way
//! an editor would highlight them.

use super::summary::ansi_color;
use super::{IndexedText, ReportConfig, ReportError, ReportFormat, ReportGenerator, Side, TextPair};
use crate::diff::{DiffResult, Span};

/// Annotated reporter
pub struct AnnotatedReporter {
    /// Use colored output instead of bracket markers
    colored: bool,
}

impl AnnotatedReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Use `[-…-]` / `{+…+}` markers instead of color
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn mark(&self, changed: &str, side: Side) -> String {
        match (side, self.colored) {
            (Side::Old, true) => ansi_color(changed, "red", true),
            (Side::New, true) => ansi_color(changed, "green", true),
            (Side::Old, false) => format!("[-{changed}-]"),
            (Side::New, false) => format!("{{+{changed}+}}"),
        }
    }

    fn annotate(
        &self,
        text: &IndexedText<'_>,
        spans: &[Span],
        side: Side,
    ) -> Result<String, ReportError> {
        let mut out = String::with_capacity(text.as_str().len());
        let mut cursor = 0;
        for span in spans {
            out.push_str(text.slice(Span::new(cursor, span.start))?);
            out.push_str(&self.mark(text.slice(*span)?, side));
            cursor = span.end;
        }
        out.push_str(text.slice(Span::new(cursor, text.char_len()))?);
        Ok(out)
    }
}

impl Default for AnnotatedReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for AnnotatedReporter {
    fn generate(
        &self,
        result: &DiffResult,
        texts: &TextPair<'_>,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();

        lines.push(ansi_color(&format!("--- {}", config.old_name()), "bold", self.colored));
        lines.push(self.annotate(&texts.old, &result.old, Side::Old)?);
        lines.push(ansi_color(&format!("+++ {}", config.new_name()), "bold", self.colored));
        lines.push(self.annotate(&texts.new, &result.new, Side::New)?);

        if let Some(reason) = result.incomplete {
            lines.push(ansi_color(
                &format!("Warning: diff incomplete ({reason}); differences shown may be approximate"),
                "yellow",
                self.colored,
            ));
        }

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Annotated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::DiffEngine;

    #[test]
    fn test_annotated_markers() {
        let texts = TextPair::new("kitten", "sitting");
        let result = DiffEngine::new().diff_str("kitten", "sitting");
        let out = AnnotatedReporter::new()
            .no_color()
            .generate(&result, &texts, &ReportConfig::default())
            .unwrap();

        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "--- old");
        assert_eq!(lines[1], "[-k-]itt[-e-]n");
        assert_eq!(lines[2], "+++ new");
        assert_eq!(lines[3], "{+s+}itt{+i+}n{+g+}");
    }

    #[test]
    fn test_annotated_colored() {
        let texts = TextPair::new("abc", "abXc");
        let result = DiffEngine::new().diff_str("abc", "abXc");
        let out = AnnotatedReporter::new()
            .generate(&result, &texts, &ReportConfig::default())
            .unwrap();
        assert!(out.contains("ab\x1b[32mX\x1b[0mc"));
    }

    #[test]
    fn test_annotated_multibyte() {
        let texts = TextPair::new("naïve café", "naive café");
        let result = DiffEngine::new().diff_str("naïve café", "naive café");
        let out = AnnotatedReporter::new()
            .no_color()
            .generate(&result, &texts, &ReportConfig::default())
            .unwrap();
        assert!(out.contains("na[-ï-]ve café"));
        assert!(out.contains("na{+i+}ve café"));
    }
}
