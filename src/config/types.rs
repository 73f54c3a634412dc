//! Configuration type definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{input, segment, tone};
use crate::engine::RefinePolicy;
use crate::output::LabelPolicy;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input recording preconditions.
    pub input: InputConfig,

    /// Tone detection settings.
    pub tone: ToneConfig,

    /// Segment boundary refinement settings.
    pub segment: SegmentConfig,

    /// Output settings.
    pub output: OutputConfig,
}

/// Input recording preconditions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Required sample rate in Hz.
    pub sample_rate: u32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            sample_rate: input::SAMPLE_RATE,
        }
    }
}

/// Tone detection settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ToneConfig {
    /// Target tone frequency in Hz.
    pub freq_target: f64,

    /// Frequency tolerance around the target in Hz.
    pub tolerance: f64,

    /// Minimum band-to-total magnitude ratio for a tone hit.
    pub dominance_ratio: f64,

    /// Minimum absolute band magnitude (raw 16-bit amplitude units).
    pub min_band_energy: f64,

    /// Scan window length in seconds; also the expected tone duration.
    pub tone_duration: f64,

    /// Scan stride in seconds.
    pub step_duration: f64,
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            freq_target: tone::DEFAULT_FREQ_TARGET,
            tolerance: tone::DEFAULT_TOLERANCE,
            dominance_ratio: tone::DEFAULT_DOMINANCE_RATIO,
            min_band_energy: tone::DEFAULT_MIN_BAND_ENERGY,
            tone_duration: tone::DEFAULT_TONE_DURATION,
            step_duration: tone::DEFAULT_STEP_DURATION,
        }
    }
}

/// Segment boundary refinement settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentConfig {
    /// Refinement policy.
    pub policy: RefinePolicy,

    /// Minimum segment duration in seconds (padded policy).
    pub min_duration: f64,

    /// Silence guard band in seconds (padded policy).
    pub pad: f64,

    /// Silence RMS threshold (raw 16-bit amplitude units).
    pub rms_threshold: f64,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            policy: RefinePolicy::default(),
            min_duration: segment::DEFAULT_MIN_DURATION,
            pad: segment::DEFAULT_PAD_DURATION,
            rms_threshold: segment::DEFAULT_RMS_THRESHOLD,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for written segment files.
    pub dir: PathBuf,

    /// Label reconciliation policy.
    pub label_policy: LabelPolicy,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(crate::constants::output::DEFAULT_DIR),
            label_policy: LabelPolicy::default(),
        }
    }
}
