//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "tonesplit";

/// Input recording preconditions.
pub mod input {
    /// Expected sample rate of the input recording in Hz.
    pub const SAMPLE_RATE: u32 = 96_000;

    /// Expected channel count of the input recording.
    pub const CHANNELS: u16 = 1;

    /// Expected bit depth of the input recording.
    pub const BITS_PER_SAMPLE: u16 = 16;
}

/// Calibration tone detection defaults.
pub mod tone {
    /// Target tone frequency in Hz.
    pub const DEFAULT_FREQ_TARGET: f64 = 60.0;

    /// Frequency tolerance around the target in Hz.
    pub const DEFAULT_TOLERANCE: f64 = 5.0;

    /// Minimum fraction of total spectral magnitude that must fall inside
    /// the target band for a window to count as tone.
    ///
    /// Observed calibration values range from 0.1 to 0.25 depending on
    /// recording conditions; 0.1 is the most permissive and is the default.
    pub const DEFAULT_DOMINANCE_RATIO: f64 = 0.1;

    /// Minimum absolute band magnitude, in raw 16-bit amplitude units.
    /// Rejects near-silent windows whose spectrum happens to be tone-shaped.
    pub const DEFAULT_MIN_BAND_ENERGY: f64 = 1e4;

    /// Expected duration of one calibration tone burst in seconds.
    /// Also the scan window length.
    pub const DEFAULT_TONE_DURATION: f64 = 0.5;

    /// Scan stride in seconds. Smaller than the window, so windows overlap.
    pub const DEFAULT_STEP_DURATION: f64 = 0.1;
}

/// Segment boundary refinement defaults.
pub mod segment {
    /// Minimum segment duration in seconds (padded policy only).
    pub const DEFAULT_MIN_DURATION: f64 = 1.0;

    /// Guard band grown into adjacent silence on each side of a segment,
    /// in seconds (padded policy only).
    pub const DEFAULT_PAD_DURATION: f64 = 0.25;

    /// RMS threshold below which a region counts as silence, in raw
    /// 16-bit amplitude units (~1% of full scale).
    pub const DEFAULT_RMS_THRESHOLD: f64 = 300.0;
}

/// Output defaults.
pub mod output {
    /// Default directory for written segment files.
    pub const DEFAULT_DIR: &str = "segments";

    /// Placeholder label prefix used in permissive mode when fewer labels
    /// than segments are available.
    pub const PLACEHOLDER_PREFIX: &str = "part";
}

/// Label extraction defaults.
pub mod labels {
    /// Marker phrase that precedes a quoted action label in a script log.
    pub const DEFAULT_MARKER_PHRASE: &str = "Now playing - ";

    /// Default filename for an extracted label list.
    pub const DEFAULT_LIST_FILE: &str = "labels.txt";
}
