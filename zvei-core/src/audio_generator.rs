//! Synthetic signal generators used by tests and demo IQ sources.

use num_complex::Complex64;
use std::f64::consts::{PI, TAU};

use crate::tone_table::ZveiSymbol;

/// Generate a constant frequency sine tone, band-limited below Nyquist.
pub fn generate_tone(freq_hz: f64, num_samples: usize, sample_rate: usize) -> Vec<f32> {
    let nyquist = sample_rate as f64 / 2.0;
    let freq = if freq_hz >= nyquist * 0.95 {
        nyquist * 0.95
    } else {
        freq_hz
    };

    let omega = TAU * freq / sample_rate as f64;
    (0..num_samples)
        .map(|i| (omega * i as f64).sin() as f32)
        .collect()
}

/// Apply a fade-in and fade-out envelope to prevent clicks.
pub fn apply_fade_envelope(samples: &mut [f32], fade_samples: usize) {
    let fade_len = fade_samples.min(samples.len() / 2);
    let total_samples = samples.len();

    for (i, sample) in samples.iter_mut().enumerate().take(fade_len) {
        let fade = i as f32 / fade_len as f32;
        let envelope = (fade * std::f32::consts::PI / 2.0).sin();
        *sample *= envelope;
    }

    let start_idx = total_samples.saturating_sub(fade_len);
    for (i, sample) in samples.iter_mut().enumerate().skip(start_idx) {
        let fade = (total_samples - i) as f32 / fade_len as f32;
        let envelope = (fade * std::f32::consts::PI / 2.0).sin();
        *sample *= envelope;
    }
}

/// Parameters for synthesizing a ZVEI tone sequence directly as IQ samples.
#[derive(Debug, Clone, Copy)]
pub struct ToneSequenceConfig {
    pub rf_sample_rate: usize,
    pub tone_duration_s: f64,
    pub inter_tone_silence_s: f64,
}

/// Frequency-modulate a sequence of ZVEI symbols directly into complex
/// baseband IQ samples at `rf_sample_rate`.
///
/// Builds an instantaneous-frequency track that equals each symbol's
/// table frequency for `tone_duration_s`, separated by silence (0 Hz)
/// gaps, then integrates it into a phase-continuous complex exponential.
/// Demodulating the result with [`crate::signal_processing::demodulate_fm`]
/// recovers the same frequency track, which is exactly the property the
/// tone classifier depends on.
pub fn synthesize_zvei_tone_sequence(
    symbols: &[ZveiSymbol],
    config: &ToneSequenceConfig,
) -> Vec<Complex64> {
    let tone_samples = (config.tone_duration_s * config.rf_sample_rate as f64).round() as usize;
    let silence_samples =
        (config.inter_tone_silence_s * config.rf_sample_rate as f64).round() as usize;

    let mut freq_track = Vec::with_capacity(symbols.len() * (tone_samples + silence_samples));
    for &symbol in symbols {
        freq_track.extend(std::iter::repeat(symbol.frequency_hz()).take(tone_samples));
        freq_track.extend(std::iter::repeat(0.0).take(silence_samples));
    }

    let mut phase = 0.0;
    let mut iq = Vec::with_capacity(freq_track.len());
    for freq_hz in freq_track {
        iq.push(Complex64::new(phase.cos(), phase.sin()));
        phase += TAU * freq_hz / config.rf_sample_rate as f64;
        if phase > PI {
            phase -= TAU;
        } else if phase < -PI {
            phase += TAU;
        }
    }
    iq
}
