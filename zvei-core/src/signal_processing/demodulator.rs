//! FM discriminator and anti-alias low-pass filtering.

use biquad::{Biquad, Coefficients, DirectForm2Transposed, Q_BUTTERWORTH_F64, ToHertz, Type};
use num_complex::Complex64;
use std::f64::consts::{PI, TAU};

/// Low-pass cutoff applied after discrimination, per spec.md §4.1: content
/// above the highest ZVEI tone (2800 Hz) plus margin is discarded.
const LOWPASS_CUTOFF_HZ: f64 = 3000.0;

/// Q factors of the two cascaded biquad sections that make up a 4th-order
/// Butterworth low-pass. `Q_BUTTERWORTH_F64` is the standard 2nd-order
/// Butterworth Q (≈0.707); a 4th-order filter factors into two 2nd-order
/// sections with the complementary pole-pair Qs below.
const BUTTERWORTH_4TH_ORDER_Q: [f64; 2] = [0.541_196_1, 1.306_562_9];

/// Recover instantaneous frequency (Hz) directly from the complex IQ
/// stream and apply a zero-phase 4th-order Butterworth low-pass.
///
/// Per spec.md §9 Open Question 1: phase is computed as `atan2(Im, Re)` on
/// the IQ samples themselves, not by re-deriving an analytic signal from
/// a real part that was never produced. An input of fewer than two samples
/// yields an empty output; this is not an error (spec.md §4.1 Failure).
pub fn demodulate_fm(iq: &[Complex64], rf_sample_rate: usize) -> Vec<f64> {
    if iq.len() < 2 {
        return Vec::new();
    }

    let phases: Vec<f64> = iq.iter().map(|s| s.im.atan2(s.re)).collect();

    let scale = rf_sample_rate as f64 / TAU;
    let mut freq_hz = Vec::with_capacity(phases.len() - 1);
    for window in phases.windows(2) {
        let mut diff = window[1] - window[0];
        while diff > PI {
            diff -= TAU;
        }
        while diff < -PI {
            diff += TAU;
        }
        freq_hz.push(diff * scale);
    }

    lowpass_filtfilt(&freq_hz, rf_sample_rate as f64)
}

/// Build the two cascaded biquad sections implementing a 4th-order
/// Butterworth low-pass at `LOWPASS_CUTOFF_HZ`.
fn build_butterworth_sections(sample_rate_hz: f64) -> [DirectForm2Transposed<f64>; 2] {
    let fs = sample_rate_hz.hz();
    let f0 = LOWPASS_CUTOFF_HZ.hz();
    BUTTERWORTH_4TH_ORDER_Q.map(|q| {
        let coeffs = Coefficients::<f64>::from_params(Type::LowPass, fs, f0, q)
            .unwrap_or_else(|_| Coefficients::<f64>::from_params(Type::LowPass, fs, f0, Q_BUTTERWORTH_F64).unwrap());
        DirectForm2Transposed::<f64>::new(coeffs)
    })
}

fn run_cascade(sections: &mut [DirectForm2Transposed<f64>; 2], samples: &[f64]) -> Vec<f64> {
    samples
        .iter()
        .map(|&x| {
            let s0 = sections[0].run(x);
            sections[1].run(s0)
        })
        .collect()
}

/// Zero-phase (forward-backward) application of the Butterworth low-pass,
/// per spec.md §4.1: "A 4th-order Butterworth applied with zero-phase
/// forward-backward filtering is the reference."
fn lowpass_filtfilt(samples: &[f64], sample_rate_hz: f64) -> Vec<f64> {
    if samples.is_empty() {
        return Vec::new();
    }

    let mut forward_sections = build_butterworth_sections(sample_rate_hz);
    let forward = run_cascade(&mut forward_sections, samples);

    let mut reversed = forward;
    reversed.reverse();

    let mut backward_sections = build_butterworth_sections(sample_rate_hz);
    let mut backward = run_cascade(&mut backward_sections, &reversed);
    backward.reverse();
    backward
}
