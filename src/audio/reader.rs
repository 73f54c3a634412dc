//! Fixed-format recording ingestion.
//!
//! The input is a complete, seekable mono PCM WAV at a fixed sample rate.
//! Anything else is a fatal precondition violation, not a recoverable
//! error: no partial output is ever produced from a malformed recording.

use std::path::Path;

use hound::SampleFormat;
use tracing::debug;

use crate::constants::input;
use crate::error::{Error, Result};

/// A complete recording held in memory for one run.
#[derive(Debug, Clone)]
pub struct Recording {
    /// Raw signed 16-bit samples.
    pub samples: Vec<i16>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl Recording {
    /// Duration of the recording in seconds.
    #[must_use]
    pub fn duration_secs(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        {
            self.samples.len() as f64 / f64::from(self.sample_rate)
        }
    }
}

/// Read a recording, enforcing the fixed input format.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded, or if it is
/// not mono, 16-bit integer PCM at `expected_rate` Hz.
pub fn read_recording(path: &Path, expected_rate: u32) -> Result<Recording> {
    let mut reader = hound::WavReader::open(path).map_err(|e| Error::AudioOpen {
        path: path.to_path_buf(),
        source: e,
    })?;

    let spec = reader.spec();
    if spec.channels != input::CHANNELS {
        return Err(Error::UnexpectedChannels {
            path: path.to_path_buf(),
            channels: spec.channels,
        });
    }
    if spec.sample_rate != expected_rate {
        return Err(Error::UnexpectedSampleRate {
            path: path.to_path_buf(),
            expected: expected_rate,
            actual: spec.sample_rate,
        });
    }
    if spec.bits_per_sample != input::BITS_PER_SAMPLE || spec.sample_format != SampleFormat::Int {
        return Err(Error::UnsupportedSampleFormat {
            path: path.to_path_buf(),
        });
    }

    let samples = reader
        .samples::<i16>()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::AudioRead {
            path: path.to_path_buf(),
            source: e,
        })?;

    debug!(
        samples = samples.len(),
        sample_rate = spec.sample_rate,
        "recording loaded"
    );

    Ok(Recording {
        samples,
        sample_rate: spec.sample_rate,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use hound::{WavSpec, WavWriter};
    use tempfile::TempDir;

    fn write_wav(path: &Path, sample_rate: u32, channels: u16, samples: &[i16]) {
        let spec = WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(path, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_read_valid_recording() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("in.wav");
        write_wav(&path, 96_000, 1, &[0, 100, -100, 32_000]);

        let recording = read_recording(&path, 96_000).unwrap();
        assert_eq!(recording.sample_rate, 96_000);
        assert_eq!(recording.samples, vec![0, 100, -100, 32_000]);
    }

    #[test]
    fn test_wrong_sample_rate_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("in.wav");
        write_wav(&path, 44_100, 1, &[0; 16]);

        let result = read_recording(&path, 96_000);
        assert!(matches!(
            result,
            Err(Error::UnexpectedSampleRate {
                expected: 96_000,
                actual: 44_100,
                ..
            })
        ));
    }

    #[test]
    fn test_multichannel_input_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("in.wav");
        write_wav(&path, 96_000, 2, &[0; 16]);

        let result = read_recording(&path, 96_000);
        assert!(matches!(
            result,
            Err(Error::UnexpectedChannels { channels: 2, .. })
        ));
    }

    #[test]
    fn test_missing_file_is_an_open_error() {
        let result = read_recording(Path::new("/nonexistent/in.wav"), 96_000);
        assert!(matches!(result, Err(Error::AudioOpen { .. })));
    }
}
