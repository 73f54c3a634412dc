//! Segment WAV file writing.
//!
//! Materializes resolved intervals as labeled WAV files. Filenames embed a
//! zero-padded ordinal and the sanitized label, so the output directory
//! sorts lexicographically into playback order.

use std::fs;
use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavSpec, WavWriter as HoundWriter};
use serde::{Deserialize, Serialize};

use crate::constants::output;
use crate::engine::Interval;
use crate::error::{Error, Result};

/// How to reconcile the label count against the segment count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LabelPolicy {
    /// Fail before writing anything if fewer labels than segments.
    Strict,
    /// Name unlabeled segments with a synthesized placeholder.
    #[default]
    Permissive,
}

/// Outcome of writing one batch of segments.
///
/// Each segment write is independent, so one failure does not abort the
/// batch; callers get the full picture of what succeeded.
#[derive(Debug, Default)]
pub struct WriteReport {
    /// Paths written, in segment order.
    pub written: Vec<PathBuf>,
    /// Segments that failed, with their errors.
    pub failed: Vec<FailedSegment>,
}

/// One segment that could not be written.
#[derive(Debug)]
pub struct FailedSegment {
    /// Positional index of the segment.
    pub index: usize,
    /// The write error.
    pub error: Error,
}

/// Writes segment slices to labeled WAV files.
#[derive(Debug, Clone)]
pub struct SegmentWriter {
    output_dir: PathBuf,
}

impl SegmentWriter {
    /// Create a writer targeting the given output directory.
    #[must_use]
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    /// Check the label count against the segment count for the policy.
    ///
    /// Must run before any file is created so that strict-mode failure
    /// leaves the output directory untouched.
    pub fn check_labels(policy: LabelPolicy, segments: usize, labels: usize) -> Result<()> {
        if policy == LabelPolicy::Strict && labels < segments {
            return Err(Error::InsufficientLabels { segments, labels });
        }
        Ok(())
    }

    /// Resolve the label for the segment at `index`.
    #[must_use]
    pub fn resolve_label(labels: &[String], index: usize) -> String {
        labels.get(index).map_or_else(
            || format!("{}_{index:02}", output::PLACEHOLDER_PREFIX),
            |label| sanitize_label(label),
        )
    }

    /// Write one segment slice as `<ordinal>_<label>.wav` (1-based ordinal).
    ///
    /// # Errors
    ///
    /// Returns an error if the output directory cannot be created or the
    /// file cannot be written.
    pub fn write_segment(
        &self,
        samples: &[i16],
        sample_rate: u32,
        index: usize,
        label: &str,
    ) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir).map_err(|e| Error::OutputDirCreate {
            path: self.output_dir.clone(),
            source: e,
        })?;

        let filename = format!("{:02}_{label}.wav", index + 1);
        let path = self.output_dir.join(filename);
        write_wav_file(&path, samples, sample_rate)?;
        Ok(path)
    }

    /// Write all segments, collecting per-file outcomes.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientLabels` in strict mode before any file is
    /// written. Individual write failures are reported in the
    /// [`WriteReport`] instead of aborting the batch.
    pub fn write_segments(
        &self,
        samples: &[i16],
        sample_rate: u32,
        intervals: &[Interval],
        labels: &[String],
        policy: LabelPolicy,
    ) -> Result<WriteReport> {
        Self::check_labels(policy, intervals.len(), labels.len())?;

        let mut report = WriteReport::default();
        for (index, interval) in intervals.iter().enumerate() {
            let label = Self::resolve_label(labels, index);
            let slice = &samples[interval.start..interval.end];
            match self.write_segment(slice, sample_rate, index, &label) {
                Ok(path) => report.written.push(path),
                Err(error) => report.failed.push(FailedSegment { index, error }),
            }
        }
        Ok(report)
    }
}

/// Sanitize a label for use as a filename.
///
/// Whitespace becomes underscores; characters invalid in filenames across
/// platforms become underscores; ".." is neutralized to prevent path
/// traversal.
#[must_use]
pub fn sanitize_label(label: &str) -> String {
    let sanitized: String = label
        .chars()
        .map(|c| match c {
            c if c.is_whitespace() => '_',
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect();

    sanitized.replace("..", "__")
}

/// Write raw 16-bit samples to a mono WAV file.
fn write_wav_file(path: &Path, samples: &[i16], sample_rate: u32) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = HoundWriter::create(path, spec).map_err(|e| Error::WavWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    for &sample in samples {
        writer.write_sample(sample).map_err(|e| Error::WavWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    writer.finalize().map_err(|e| Error::WavWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
