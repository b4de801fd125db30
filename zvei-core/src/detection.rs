//! The pipeline's externally visible output unit.

use chrono::{DateTime, Utc};

/// A completed, validated ZVEI code, along with when it was observed.
///
/// `signal_strength_db` is an RMS-power estimate (dB relative to full
/// scale) of the audio frame that produced the sequence's final tone; it
/// is a best-effort diagnostic, not part of the decoding contract itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub code: String,
    pub timestamp: DateTime<Utc>,
    pub signal_strength_db: Option<f64>,
}

impl Detection {
    pub fn new(code: String, timestamp: DateTime<Utc>, signal_strength_db: Option<f64>) -> Self {
        Self {
            code,
            timestamp,
            signal_strength_db,
        }
    }
}

/// RMS power of `frame` in dB relative to full scale (1.0 peak amplitude).
/// Returns `None` for an empty frame or a frame with zero RMS power.
pub fn signal_strength_db(frame: &[f64]) -> Option<f64> {
    if frame.is_empty() {
        return None;
    }
    let mean_sq = frame.iter().map(|&x| x * x).sum::<f64>() / frame.len() as f64;
    if mean_sq <= 0.0 {
        return None;
    }
    Some(10.0 * mean_sq.log10())
}
