//! Configuration validation.

use crate::config::Config;
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_input(config)?;
    validate_tone(config)?;
    validate_segment(config)?;
    Ok(())
}

fn validate_input(config: &Config) -> Result<()> {
    if config.input.sample_rate == 0 {
        return Err(Error::ConfigValidation {
            message: "input.sample_rate must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_tone(config: &Config) -> Result<()> {
    let tone = &config.tone;

    if tone.freq_target <= 0.0 {
        return Err(Error::ConfigValidation {
            message: format!("tone.freq_target must be positive, got {}", tone.freq_target),
        });
    }

    if tone.tolerance < 0.0 {
        return Err(Error::ConfigValidation {
            message: format!("tone.tolerance must be non-negative, got {}", tone.tolerance),
        });
    }

    if !(tone.dominance_ratio > 0.0 && tone.dominance_ratio < 1.0) {
        return Err(Error::ConfigValidation {
            message: format!(
                "tone.dominance_ratio must be between 0 and 1 exclusive, got {}",
                tone.dominance_ratio
            ),
        });
    }

    if tone.min_band_energy < 0.0 {
        return Err(Error::ConfigValidation {
            message: format!(
                "tone.min_band_energy must be non-negative, got {}",
                tone.min_band_energy
            ),
        });
    }

    if tone.tone_duration <= 0.0 || tone.step_duration <= 0.0 {
        return Err(Error::ConfigValidation {
            message: "tone.tone_duration and tone.step_duration must be positive".to_string(),
        });
    }

    // A stride longer than the window would skip audio entirely.
    if tone.step_duration > tone.tone_duration {
        return Err(Error::ConfigValidation {
            message: format!(
                "tone.step_duration ({}) must not exceed tone.tone_duration ({})",
                tone.step_duration, tone.tone_duration
            ),
        });
    }

    Ok(())
}

fn validate_segment(config: &Config) -> Result<()> {
    let segment = &config.segment;

    if segment.min_duration < 0.0 {
        return Err(Error::ConfigValidation {
            message: format!(
                "segment.min_duration must be non-negative, got {}",
                segment.min_duration
            ),
        });
    }

    if segment.pad < 0.0 {
        return Err(Error::ConfigValidation {
            message: format!("segment.pad must be non-negative, got {}", segment.pad),
        });
    }

    if segment.rms_threshold < 0.0 {
        return Err(Error::ConfigValidation {
            message: format!(
                "segment.rms_threshold must be non-negative, got {}",
                segment.rms_threshold
            ),
        });
    }

    Ok(())
}
