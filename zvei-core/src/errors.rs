//! ZVEI pipeline error types with granular categories

use thiserror::Error;

/// Top-level error type for all pipeline operations
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("upstream IQ source error: {0}")]
    Upstream(#[from] UpstreamError),
}

/// Configuration errors, raised at pipeline construction and fatal to it.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("audio_sample_rate {audio_hz} Hz does not evenly divide rf_sample_rate {rf_hz} Hz")]
    SampleRateNotDivisible { rf_hz: usize, audio_hz: usize },

    #[error("tone_duration_s {tone_duration_s} at {audio_hz} Hz yields {samples} samples per frame, fewer than the minimum of 64")]
    FrameTooShort {
        tone_duration_s: f64,
        audio_hz: usize,
        samples: usize,
    },

    #[error("detection_threshold {threshold} is outside the valid range [0, 1]")]
    ThresholdOutOfRange { threshold: f64 },

    #[error("min_sequence_length must be at least 1, got {min_len}")]
    MinSequenceLengthZero { min_len: usize },
}

/// IQ source failures. These propagate to the pipeline's caller; the
/// pipeline does not retry.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("IQ source failed to initialize: {reason}")]
    InitFailed { reason: String },

    #[error("IQ source read failed: {reason}")]
    ReadFailed { reason: String },
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;
