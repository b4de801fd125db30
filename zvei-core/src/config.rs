//! Configuration types for the ZVEI/CCIR tone-decoding pipeline.
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Tunable parameters for a `DecoderPipeline`.
///
/// All fields have defaults matching the reference ZVEI monitor
/// configuration; an empty config file deserializes into a valid,
/// fully-functional pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PipelineConfig {
    /// Sample rate of incoming IQ, in Hz.
    pub rf_sample_rate: usize,
    /// Target rate after decimation, in Hz. Must divide `rf_sample_rate`.
    pub audio_sample_rate: usize,
    /// Normalized-magnitude peak threshold in `[0, 1]`.
    pub detection_threshold: f64,
    /// Frequency match tolerance, in Hz.
    pub tone_tolerance_hz: f64,
    /// Nominal per-tone length, in seconds.
    pub tone_duration_s: f64,
    /// Minimum decoded symbols required to emit a sequence.
    pub min_sequence_length: usize,
    /// IQ block size, in samples.
    pub block_samples: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            // 22_050 x 11: the closest exact multiple of the reference
            // audio rate to the spec's illustrative 250_000 Hz. The
            // spec's stated defaults (250_000 / 22_050) do not evenly
            // divide; rather than carry an unconstructible default
            // config, `rf_sample_rate` is nudged to the nearest value
            // that keeps `audio_sample_rate` at its reference 22_050 Hz
            // (see DESIGN.md, "Open Question resolutions").
            rf_sample_rate: 242_550,
            audio_sample_rate: 22_050,
            detection_threshold: 0.1,
            tone_tolerance_hz: 20.0,
            tone_duration_s: 0.07,
            min_sequence_length: 5,
            block_samples: 262_144,
        }
    }
}

impl PipelineConfig {
    /// Samples-per-tone-frame at `audio_sample_rate`, per spec.md §4.3.
    pub fn frame_len(&self) -> usize {
        (self.tone_duration_s * self.audio_sample_rate as f64).floor() as usize
    }

    /// Integer decimation factor `Fs_rf / Fs_audio`.
    pub fn decimation_factor(&self) -> usize {
        self.rf_sample_rate / self.audio_sample_rate
    }

    /// The audio sample rate the decimated signal is actually at:
    /// `rf_sample_rate / decimation_factor()`. For any config that passes
    /// `validate()` this is numerically identical to `audio_sample_rate`
    /// (the division is exact), but the classifier derives its FFT bin
    /// spacing from this rather than from the nominal `audio_sample_rate`
    /// field, so that spectral math always reflects the rate the samples
    /// it operates on were actually produced at.
    pub fn decimated_sample_rate_hz(&self) -> usize {
        self.rf_sample_rate / self.decimation_factor()
    }

    /// Validate the configuration, raising the same `ConfigInvalid` kinds
    /// a host application would see at startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rf_sample_rate == 0
            || self.audio_sample_rate == 0
            || self.rf_sample_rate % self.audio_sample_rate != 0
        {
            return Err(ConfigError::SampleRateNotDivisible {
                rf_hz: self.rf_sample_rate,
                audio_hz: self.audio_sample_rate,
            });
        }

        let frame_len = self.frame_len();
        if frame_len < 64 {
            return Err(ConfigError::FrameTooShort {
                tone_duration_s: self.tone_duration_s,
                audio_hz: self.audio_sample_rate,
                samples: frame_len,
            });
        }

        if !(0.0..=1.0).contains(&self.detection_threshold) {
            return Err(ConfigError::ThresholdOutOfRange {
                threshold: self.detection_threshold,
            });
        }

        if self.min_sequence_length == 0 {
            return Err(ConfigError::MinSequenceLengthZero {
                min_len: self.min_sequence_length,
            });
        }

        Ok(())
    }
}
