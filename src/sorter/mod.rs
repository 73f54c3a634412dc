//! Post-hoc keyword sorting of written segment files.
//!
//! Copies (never moves) each clip into the first keyword directory whose
//! keyword appears in the lowercased filename. Files matching no keyword
//! are left in place. First match wins; keyword order matters.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{Error, Result};

/// Classifies filenames against an ordered keyword list.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    keywords: Vec<String>,
}

impl KeywordClassifier {
    /// Create a classifier; keywords are matched case-insensitively.
    #[must_use]
    pub fn new(keywords: Vec<String>) -> Self {
        Self {
            keywords: keywords.into_iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    /// The first keyword contained in `filename`, or none.
    #[must_use]
    pub fn classify(&self, filename: &str) -> Option<&str> {
        let lower = filename.to_lowercase();
        self.keywords
            .iter()
            .find(|keyword| lower.contains(keyword.as_str()))
            .map(String::as_str)
    }
}

/// Result counts from one organize run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OrganizeSummary {
    /// Files copied into a keyword directory.
    pub copied: usize,
    /// Files matching no keyword, left unsorted.
    pub unmatched: usize,
    /// Files whose copy failed.
    pub failed: usize,
}

/// Copy clips from `source_dir` into keyword subdirectories of `base_dir`.
///
/// Copy failures are logged and counted rather than aborting the run; each
/// file is independent.
///
/// # Errors
///
/// Returns an error if `source_dir` does not exist or cannot be listed.
pub fn organize_clips(
    source_dir: &Path,
    base_dir: &Path,
    classifier: &KeywordClassifier,
) -> Result<OrganizeSummary> {
    if !source_dir.is_dir() {
        return Err(Error::SourceDirNotFound {
            path: source_dir.to_path_buf(),
        });
    }

    let mut summary = OrganizeSummary::default();

    for entry in fs::read_dir(source_dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
            summary.unmatched += 1;
            continue;
        };

        let Some(keyword) = classifier.classify(filename) else {
            summary.unmatched += 1;
            continue;
        };

        let target_dir = base_dir.join(keyword);
        let target = target_dir.join(filename);
        let result = fs::create_dir_all(&target_dir)
            .and_then(|()| fs::copy(&path, &target).map(|_| ()));

        match result {
            Ok(()) => summary.copied += 1,
            Err(e) => {
                warn!("failed to copy '{}' to '{}': {e}", path.display(), target.display());
                summary.failed += 1;
            }
        }
    }

    info!(
        copied = summary.copied,
        unmatched = summary.unmatched,
        failed = summary.failed,
        "organize complete"
    );

    Ok(summary)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn classifier() -> KeywordClassifier {
        KeywordClassifier::new(vec![
            "dance".to_string(),
            "quest".to_string(),
            "ball".to_string(),
        ])
    }

    #[test]
    fn test_classify_first_match_wins() {
        let c = KeywordClassifier::new(vec!["dance".to_string(), "sword".to_string()]);
        assert_eq!(c.classify("01_sword_dance.wav"), Some("dance"));
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(classifier().classify("03_Quest_Start.wav"), Some("quest"));
    }

    #[test]
    fn test_classify_no_match() {
        assert_eq!(classifier().classify("05_idle.wav"), None);
    }

    #[test]
    fn test_organize_copies_into_keyword_directories() {
        let source = TempDir::new().unwrap();
        let base = TempDir::new().unwrap();
        std::fs::write(source.path().join("01_sword_dance.wav"), b"x").unwrap();
        std::fs::write(source.path().join("02_idle.wav"), b"y").unwrap();

        let summary = organize_clips(source.path(), base.path(), &classifier()).unwrap();
        assert_eq!(summary.copied, 1);
        assert_eq!(summary.unmatched, 1);
        assert_eq!(summary.failed, 0);

        // Copied, not moved.
        assert!(base.path().join("dance/01_sword_dance.wav").exists());
        assert!(source.path().join("01_sword_dance.wav").exists());
        assert!(source.path().join("02_idle.wav").exists());
    }

    #[test]
    fn test_organize_missing_source_is_an_error() {
        let base = TempDir::new().unwrap();
        let result = organize_clips(Path::new("/nonexistent/clips"), base.path(), &classifier());
        assert!(matches!(result, Err(Error::SourceDirNotFound { .. })));
    }
}
