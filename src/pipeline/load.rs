//! Input loading.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// A text file read into memory
#[derive(Debug, Clone)]
pub struct LoadedText {
    /// Where the text came from
    pub path: PathBuf,
    /// File content
    pub content: String,
}

impl LoadedText {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Length in chars, the unit diff spans are counted in
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    /// Path as shown in reports
    #[must_use]
    pub fn display_name(&self) -> String {
        self.path.to_string_lossy().to_string()
    }
}

/// Read a UTF-8 text file with context for error messages
pub fn load_text(path: &Path, quiet: bool) -> Result<LoadedText> {
    if !quiet {
        tracing::info!("Reading {:?}", path);
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read text file: {}", path.display()))?;
    let loaded = LoadedText::new(path, content);

    if !quiet {
        tracing::info!("Read {} characters", loaded.char_len());
    }

    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_text() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("old.txt");
        std::fs::write(&path, "héllo").unwrap();

        let loaded = load_text(&path, true).unwrap();
        assert_eq!(loaded.content, "héllo");
        assert_eq!(loaded.char_len(), 5);
        assert_eq!(loaded.path, path);
    }

    #[test]
    fn test_load_text_missing_file() {
        let err = load_text(Path::new("/nonexistent/old.txt"), true).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/old.txt"));
    }

    #[test]
    fn test_load_text_rejects_invalid_utf8() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("binary.bin");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        assert!(load_text(&path, true).is_err());
    }
}
