//! Silence classification by root-mean-square amplitude.
//!
//! Used only to decide whether segment padding may extend into a
//! neighboring region: extension is safe only if that region is silence.

/// Root-mean-square amplitude of a window of raw 16-bit samples.
///
/// Accumulates in f64 to avoid integer overflow. An empty window has an
/// RMS of zero.
#[must_use]
pub fn rms(window: &[i16]) -> f64 {
    if window.is_empty() {
        return 0.0;
    }

    let sum_squares: f64 = window
        .iter()
        .map(|&s| {
            let v = f64::from(s);
            v * v
        })
        .sum();

    #[allow(clippy::cast_precision_loss)]
    (sum_squares / window.len() as f64).sqrt()
}

/// Whether `window` carries signal above the silence threshold.
#[must_use]
pub fn has_significant_energy(window: &[i16], rms_threshold: f64) -> bool {
    rms(window) > rms_threshold
}
