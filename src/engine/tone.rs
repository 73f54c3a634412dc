//! Spectral calibration-tone classification.
//!
//! A window is tone-dominated when the fraction of spectral magnitude
//! concentrated in the target band exceeds the dominance ratio. The band
//! energy must also clear an absolute floor so that near-silent windows
//! with a tone-shaped spectrum do not trigger.

use std::sync::Arc;

use num_complex::Complex;
use rustfft::{Fft, FftPlanner};

use crate::constants::tone;

/// Tunable parameters for tone classification.
#[derive(Debug, Clone, Copy)]
pub struct ToneParams {
    /// Target tone frequency in Hz.
    pub freq_target: f64,
    /// Frequency tolerance around the target in Hz.
    pub tolerance: f64,
    /// Minimum band-to-total magnitude ratio for a tone hit.
    pub dominance_ratio: f64,
    /// Minimum absolute band magnitude, raw 16-bit amplitude units.
    pub min_band_energy: f64,
}

impl Default for ToneParams {
    fn default() -> Self {
        Self {
            freq_target: tone::DEFAULT_FREQ_TARGET,
            tolerance: tone::DEFAULT_TOLERANCE,
            dominance_ratio: tone::DEFAULT_DOMINANCE_RATIO,
            min_band_energy: tone::DEFAULT_MIN_BAND_ENERGY,
        }
    }
}

/// Classifies fixed-length windows as tone or non-tone.
///
/// The FFT plan is created once for the window length, so a classifier is
/// cheap to call per scan position.
pub struct ToneClassifier {
    params: ToneParams,
    sample_rate: u32,
    window_len: usize,
    fft: Arc<dyn Fft<f64>>,
}

impl ToneClassifier {
    /// Create a classifier for windows of `window_len` samples.
    #[must_use]
    pub fn new(window_len: usize, sample_rate: u32, params: ToneParams) -> Self {
        let fft = FftPlanner::new().plan_fft_forward(window_len);
        Self {
            params,
            sample_rate,
            window_len,
            fft,
        }
    }

    /// Decide whether `window` is dominated by energy in the target band.
    ///
    /// A window with zero total spectral energy is never a tone. Windows
    /// shorter than the planned length are rejected rather than zero-padded;
    /// the scanner only produces full windows.
    #[must_use]
    pub fn is_target_tone(&self, window: &[i16]) -> bool {
        if window.len() != self.window_len || self.window_len == 0 {
            return false;
        }

        // Hann taper to reduce spectral leakage, then forward transform.
        let n = self.window_len;
        #[allow(clippy::cast_precision_loss)]
        let mut buffer: Vec<Complex<f64>> = window
            .iter()
            .enumerate()
            .map(|(i, &s)| {
                let hann = 0.5
                    * (1.0
                        - (2.0 * std::f64::consts::PI * i as f64 / (n as f64 - 1.0)).cos());
                Complex::new(f64::from(s) * hann, 0.0)
            })
            .collect();
        self.fft.process(&mut buffer);

        // The input is real, so only the first half of the spectrum carries
        // independent information.
        let mut total_energy = 0.0;
        let mut band_energy = 0.0;
        let low = self.params.freq_target - self.params.tolerance;
        let high = self.params.freq_target + self.params.tolerance;

        for (i, value) in buffer.iter().take(n / 2 + 1).enumerate() {
            let magnitude = value.norm();
            total_energy += magnitude;

            #[allow(clippy::cast_precision_loss)]
            let freq = i as f64 * f64::from(self.sample_rate) / n as f64;
            if freq >= low && freq <= high {
                band_energy += magnitude;
            }
        }

        if total_energy <= 0.0 {
            return false;
        }

        band_energy / total_energy > self.params.dominance_ratio
            && band_energy > self.params.min_band_energy
    }
}

impl std::fmt::Debug for ToneClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToneClassifier")
            .field("params", &self.params)
            .field("sample_rate", &self.sample_rate)
            .field("window_len", &self.window_len)
            .finish_non_exhaustive()
    }
}
