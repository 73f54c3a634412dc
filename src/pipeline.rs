//! Per-recording split pipeline.
//!
//! Strictly sequential: the recording is loaded whole, scanned for markers,
//! resolved into intervals, and only then written out. The resolver needs
//! the complete marker list to allocate the trailing segment, so no stage
//! overlaps another.

use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::audio::read_recording;
use crate::config::Config;
use crate::engine::{
    BoundaryResolver, RefinePolicy, ResolveParams, ScanParams, ToneParams, scan, window_samples,
};
use crate::error::Result;
use crate::output::{FailedSegment, LabelPolicy, SegmentWriter, WriteReport};

/// Fully resolved options for one split run.
#[derive(Debug, Clone, Copy)]
pub struct SplitOptions {
    /// Required input sample rate in Hz.
    pub expected_sample_rate: u32,
    /// Marker scan parameters.
    pub scan: ScanParams,
    /// Boundary refinement policy.
    pub policy: RefinePolicy,
    /// Boundary refinement parameters.
    pub resolve: ResolveParams,
    /// Label reconciliation policy.
    pub label_policy: LabelPolicy,
    /// Whether to draw a progress bar while writing.
    pub progress: bool,
}

impl SplitOptions {
    /// Build options from configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            expected_sample_rate: config.input.sample_rate,
            scan: ScanParams {
                tone_duration: config.tone.tone_duration,
                step_duration: config.tone.step_duration,
                tone: ToneParams {
                    freq_target: config.tone.freq_target,
                    tolerance: config.tone.tolerance,
                    dominance_ratio: config.tone.dominance_ratio,
                    min_band_energy: config.tone.min_band_energy,
                },
            },
            policy: config.segment.policy,
            resolve: ResolveParams {
                min_segment_duration: config.segment.min_duration,
                pad_duration: config.segment.pad,
                rms_threshold: config.segment.rms_threshold,
            },
            label_policy: config.output.label_policy,
            progress: true,
        }
    }
}

/// Result of splitting one recording.
#[derive(Debug)]
pub struct SplitOutcome {
    /// Number of tone markers detected.
    pub markers: usize,
    /// Number of segments resolved.
    pub segments: usize,
    /// Per-file write outcomes.
    pub report: WriteReport,
}

/// Split one recording into labeled segment files.
///
/// # Errors
///
/// Returns an error if the recording violates the input preconditions or,
/// in strict label mode, if fewer labels than segments are supplied (in
/// which case no file is written). Individual segment write failures are
/// collected in the outcome's report instead.
pub fn split_file(
    input: &Path,
    output_dir: &Path,
    labels: &[String],
    opts: &SplitOptions,
) -> Result<SplitOutcome> {
    let recording = read_recording(input, opts.expected_sample_rate)?;
    info!(
        "Loaded {} ({:.1}s at {} Hz)",
        input.display(),
        recording.duration_secs(),
        recording.sample_rate
    );

    let markers = scan(&recording.samples, recording.sample_rate, &opts.scan);
    info!("Detected {} tone marker(s)", markers.len());

    let resolver = BoundaryResolver::new(opts.policy, opts.resolve);
    let window = window_samples(&opts.scan, recording.sample_rate);
    let intervals = resolver.resolve(&markers, &recording.samples, recording.sample_rate, window);

    // Strict mode must fail before anything touches the filesystem.
    SegmentWriter::check_labels(opts.label_policy, intervals.len(), labels.len())?;

    let writer = SegmentWriter::new(output_dir.to_path_buf());

    #[allow(clippy::cast_possible_truncation)]
    let pb = if opts.progress {
        let pb = ProgressBar::new(intervals.len() as u64);
        // Template is hardcoded and known to be valid
        #[allow(clippy::expect_used)]
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} segments ({msg})")
                .expect("valid progress template")
                .progress_chars("#>-"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut report = WriteReport::default();
    for (index, interval) in intervals.iter().enumerate() {
        let label = SegmentWriter::resolve_label(labels, index);
        pb.set_message(label.clone());

        let slice = &recording.samples[interval.start..interval.end];
        match writer.write_segment(slice, recording.sample_rate, index, &label) {
            Ok(path) => {
                pb.println(format!(
                    "  {label}: {} samples -> {}",
                    interval.len(),
                    path.file_name().unwrap_or_default().to_string_lossy()
                ));
                report.written.push(path);
            }
            Err(error) => {
                warn!("Failed to write segment {index}: {error}");
                report.failed.push(FailedSegment { index, error });
            }
        }
        pb.inc(1);
    }
    pb.finish_with_message("done");

    Ok(SplitOutcome {
        markers: markers.len(),
        segments: intervals.len(),
        report,
    })
}
