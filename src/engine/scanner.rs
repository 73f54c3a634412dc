//! Marker scanning across the full recording.
//!
//! Slides a fixed-length window across the samples at a fixed stride,
//! classifying each position, then collapses runs of adjacent hits into
//! single tone-onset markers.

use tracing::debug;

use super::tone::{ToneClassifier, ToneParams};
use crate::constants::tone;

/// Tunable parameters for the marker scan.
#[derive(Debug, Clone, Copy)]
pub struct ScanParams {
    /// Scan window length in seconds; also the expected tone duration.
    pub tone_duration: f64,
    /// Scan stride in seconds.
    pub step_duration: f64,
    /// Tone classification parameters.
    pub tone: ToneParams,
}

impl Default for ScanParams {
    fn default() -> Self {
        Self {
            tone_duration: tone::DEFAULT_TONE_DURATION,
            step_duration: tone::DEFAULT_STEP_DURATION,
            tone: ToneParams::default(),
        }
    }
}

/// Number of samples in the scan window for a given sample rate.
#[must_use]
pub fn window_samples(params: &ScanParams, sample_rate: u32) -> usize {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        (params.tone_duration * f64::from(sample_rate)) as usize
    }
}

/// Scan `samples` for calibration-tone onsets.
///
/// Returns deduplicated marker offsets in strictly increasing order. A run
/// of raw hits closer together than one window length arises from the same
/// physical tone and collapses to its first member; tones separated by less
/// than one window of non-tone audio are therefore not separably detected.
///
/// A recording shorter than one window produces no markers.
#[must_use]
pub fn scan(samples: &[i16], sample_rate: u32, params: &ScanParams) -> Vec<usize> {
    let window = window_samples(params, sample_rate);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let step = (params.step_duration * f64::from(sample_rate)) as usize;

    if window == 0 || step == 0 || samples.len() <= window {
        return Vec::new();
    }

    let classifier = ToneClassifier::new(window, sample_rate, params.tone);

    let mut raw_hits = Vec::new();
    let mut pos = 0;
    while pos < samples.len() - window {
        if classifier.is_target_tone(&samples[pos..pos + window]) {
            raw_hits.push(pos);
        }
        pos += step;
    }

    // Collapse each contiguous run of hits to its first member. Runs chain
    // through the previous raw hit, so a run may span more than one window.
    let mut markers: Vec<usize> = Vec::new();
    let mut prev_hit: Option<usize> = None;
    for hit in raw_hits {
        match prev_hit {
            Some(last) if hit - last < window => {}
            _ => markers.push(hit),
        }
        prev_hit = Some(hit);
    }

    debug!(
        markers = markers.len(),
        window_samples = window,
        step_samples = step,
        "marker scan complete"
    );

    markers
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: u32 = 8_000;

    fn params() -> ScanParams {
        ScanParams::default()
    }

    /// Broadband noise floor with 0.5 s 60 Hz bursts at the given start
    /// times. The noise keeps slightly-overlapping windows below the
    /// dominance threshold, as program audio does in real recordings.
    fn recording_with_bursts(total_secs: f64, burst_starts: &[f64]) -> Vec<i16> {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let len = (total_secs * f64::from(SAMPLE_RATE)) as usize;
        let mut state: u32 = 0x1234_5678;
        let mut samples: Vec<i16> = (0..len)
            .map(|_| {
                state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                #[allow(clippy::cast_possible_truncation)]
                {
                    ((f64::from(state >> 8) / f64::from(1u32 << 24) - 0.5) * 3_000.0) as i16
                }
            })
            .collect();
        for &start in burst_starts {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let offset = (start * f64::from(SAMPLE_RATE)) as usize;
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let burst_len = (0.5 * f64::from(SAMPLE_RATE)) as usize;
            for i in 0..burst_len {
                if offset + i >= samples.len() {
                    break;
                }
                let t = i as f64 / f64::from(SAMPLE_RATE);
                #[allow(clippy::cast_possible_truncation)]
                {
                    samples[offset + i] =
                        (10_000.0 * (2.0 * std::f64::consts::PI * 60.0 * t).sin()) as i16;
                }
            }
        }
        samples
    }

    #[test]
    fn test_scan_finds_one_marker_per_burst() {
        let samples = recording_with_bursts(10.0, &[3.0, 7.0]);
        let markers = scan(&samples, SAMPLE_RATE, &params());
        assert_eq!(markers.len(), 2);
        // Onsets land at or shortly before the burst starts.
        assert!(markers[0] <= 3 * SAMPLE_RATE as usize);
        assert!(markers[1] <= 7 * SAMPLE_RATE as usize);
        assert!(markers[0] < markers[1]);
    }

    #[test]
    fn test_scan_is_idempotent() {
        let samples = recording_with_bursts(10.0, &[3.0, 7.0]);
        let first = scan(&samples, SAMPLE_RATE, &params());
        let second = scan(&samples, SAMPLE_RATE, &params());
        assert_eq!(first, second);
    }

    #[test]
    fn test_bursts_closer_than_window_collapse_to_one_marker() {
        // Two 0.5 s bursts separated by 0.05 s: the scan hits across both
        // form one chained run, so the pair is not separably detected.
        let samples = recording_with_bursts(6.0, &[2.0, 2.55]);
        let markers = scan(&samples, SAMPLE_RATE, &params());
        assert_eq!(markers.len(), 1);
    }

    #[test]
    fn test_markers_never_closer_than_one_window() {
        let samples = recording_with_bursts(20.0, &[2.0, 6.0, 11.0, 16.5]);
        let markers = scan(&samples, SAMPLE_RATE, &params());
        let window = window_samples(&params(), SAMPLE_RATE);
        assert!(markers.windows(2).all(|pair| pair[1] - pair[0] >= window));
    }

    #[test]
    fn test_recording_shorter_than_window_yields_no_markers() {
        let samples = recording_with_bursts(0.3, &[0.0]);
        let markers = scan(&samples, SAMPLE_RATE, &params());
        assert!(markers.is_empty());
    }

    #[test]
    fn test_pure_silence_yields_no_markers() {
        let samples = vec![0i16; 5 * SAMPLE_RATE as usize];
        let markers = scan(&samples, SAMPLE_RATE, &params());
        assert!(markers.is_empty());
    }

    #[test]
    fn test_markers_are_strictly_increasing() {
        let samples = recording_with_bursts(20.0, &[2.0, 6.0, 11.0, 16.5]);
        let markers = scan(&samples, SAMPLE_RATE, &params());
        assert_eq!(markers.len(), 4);
        assert!(markers.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
