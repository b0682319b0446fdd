//! Configuration types for the SSTV encoder and decoder.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Default sample rate used throughout the codec unless overridden.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Encoder-side tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// Output sample rate in Hz.
    pub sample_rate: u32,

    /// Emit the VOX preamble ahead of the VIS header.
    pub emit_vox: bool,

    /// Emit the undocumented four-tone footer after the final scan line.
    pub emit_footer: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            emit_vox: true,
            emit_footer: true,
        }
    }
}

impl EncoderConfig {
    /// Reject sample rates that would make `pitch * 2*pi/sample_rate`
    /// meaningless (zero) or degenerate (absurdly low).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_rate == 0 {
            return Err(ConfigError::InvalidSampleRate { rate: self.sample_rate });
        }
        Ok(())
    }
}

/// Decoder-side tunables.
///
/// `fudge_samples` compensates for the group delay of the I/Q half-band
/// filter; it is specified at 8 kHz (35 samples, per the reference
/// implementation) and scaled to the configured sample rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecoderConfig {
    pub sample_rate: u32,

    /// VIS/VOX tone tolerance, in Hz, either side of the nominal frequency.
    pub tone_tolerance_hz: f32,

    /// Filter group-delay compensation, specified at 8 kHz.
    pub fudge_samples_at_8khz: u32,

    /// Right-shift applied by the frequency-tracker's exponential smoother.
    pub smoothing_shift: u32,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            tone_tolerance_hz: 15.0,
            fudge_samples_at_8khz: 35,
            smoothing_shift: 3,
        }
    }
}

impl DecoderConfig {
    /// Filter group-delay compensation scaled to `self.sample_rate`.
    pub fn fudge_samples(&self) -> usize {
        ((self.fudge_samples_at_8khz as f64) * (self.sample_rate as f64) / 8_000.0).round()
            as usize
    }

    /// Reject a sample rate that can't be used to derive a tone-tracking
    /// window (`ms_samples` would floor to zero for every stage).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_rate == 0 {
            return Err(ConfigError::InvalidSampleRate { rate: self.sample_rate });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fudge_scales_with_sample_rate() {
        let mut cfg = DecoderConfig {
            sample_rate: 8_000,
            ..Default::default()
        };
        assert_eq!(cfg.fudge_samples(), 35);
        cfg.sample_rate = 16_000;
        assert_eq!(cfg.fudge_samples(), 70);
    }

    #[test]
    fn zero_sample_rate_is_rejected() {
        let enc = EncoderConfig { sample_rate: 0, ..Default::default() };
        assert!(enc.validate().is_err());

        let dec = DecoderConfig { sample_rate: 0, ..Default::default() };
        assert!(dec.validate().is_err());

        assert!(EncoderConfig::default().validate().is_ok());
        assert!(DecoderConfig::default().validate().is_ok());
    }
}
