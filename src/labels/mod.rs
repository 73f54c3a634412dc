//! Action label sources.
//!
//! The engine never depends on where labels come from; anything that can
//! produce an ordered list of action names works. Two sources are provided:
//! a plain-text list (one label per line) and a script-log extractor that
//! pulls quoted labels from lines containing a marker phrase.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// An ordered source of action labels, one per expected segment.
pub trait LabelSource {
    /// Produce the labels in segment order.
    fn labels(&self) -> Result<Vec<String>>;
}

/// Plain-text label list: one label per line, blank lines ignored.
#[derive(Debug, Clone)]
pub struct LabelFile {
    path: PathBuf,
}

impl LabelFile {
    /// Create a source reading from the given file.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl LabelSource for LabelFile {
    fn labels(&self) -> Result<Vec<String>> {
        let file = File::open(&self.path).map_err(|e| Error::LabelRead {
            path: self.path.clone(),
            source: e,
        })?;

        let reader = BufReader::new(file);
        let mut labels = Vec::new();
        for line in reader.lines() {
            let line = line.map_err(|e| Error::LabelRead {
                path: self.path.clone(),
                source: e,
            })?;
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                labels.push(trimmed.to_string());
            }
        }
        Ok(labels)
    }
}

/// Extracts labels from a script-like log file.
///
/// Each line containing the marker phrase contributes one label: the text
/// between the phrase and the line's last double quote. Lines without a
/// closing quote are skipped.
#[derive(Debug, Clone)]
pub struct ScriptLogExtractor {
    path: PathBuf,
    marker: String,
}

impl ScriptLogExtractor {
    /// Create an extractor for the given script file and marker phrase.
    #[must_use]
    pub fn new(path: PathBuf, marker: String) -> Self {
        Self { path, marker }
    }
}

impl LabelSource for ScriptLogExtractor {
    fn labels(&self) -> Result<Vec<String>> {
        let file = File::open(&self.path).map_err(|e| Error::LabelRead {
            path: self.path.clone(),
            source: e,
        })?;

        let reader = BufReader::new(file);
        let mut labels = Vec::new();
        for line in reader.lines() {
            let line = line.map_err(|e| Error::LabelRead {
                path: self.path.clone(),
                source: e,
            })?;
            if let Some(label) = extract_label(&line, &self.marker) {
                labels.push(label);
            }
        }
        Ok(labels)
    }
}

/// Pull the quoted label following `marker` out of one line.
#[must_use]
pub fn extract_label(line: &str, marker: &str) -> Option<String> {
    let start = line.find(marker)? + marker.len();
    let rest = &line[start..];
    let end = rest.rfind('"')?;
    if end == 0 {
        return None;
    }
    Some(rest[..end].to_string())
}

/// Persist labels as a newline-delimited plain-text list.
pub fn write_label_list(labels: &[String], path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    for label in labels {
        writeln!(file, "{label}")?;
    }
    Ok(())
}
