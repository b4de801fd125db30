//! Interleaved-sample/complex conversion helpers, used when an IQ source
//! hands off raw interleaved float samples (e.g. from a capture file).

use num_complex::Complex64;

pub fn complex_from_interleaved(data: &[f64]) -> Vec<Complex64> {
    data.chunks(2)
        .map(|chunk| Complex64::new(chunk[0], chunk[1]))
        .collect()
}

pub fn interleaved_from_complex(data: &[Complex64]) -> Vec<f64> {
    data.iter().flat_map(|c| [c.re, c.im]).collect()
}
