//! Integer decimation from the RF-rate audio signal to the audio rate.

/// Select every `factor`-th sample. Anti-alias protection is provided by
/// the demodulator's low-pass (spec.md §4.2), whose cutoff sits below the
/// decimated Nyquist for any `factor` the reference configuration uses.
pub fn decimate(samples: &[f64], factor: usize) -> Vec<f64> {
    if factor == 0 {
        return Vec::new();
    }
    samples.iter().step_by(factor).copied().collect()
}
