//! Per-frame tone classification via windowed FFT peak picking.

use rustfft::{num_complex::Complex32, FftPlanner};

use crate::tone_table::ZveiSymbol;

/// Classify one audio frame against the ZVEI tone table.
///
/// Implements spec.md §4.3 exactly: Hamming window, real FFT magnitudes,
/// normalize by the maximum (emitting `None` if it is zero), find local
/// maxima above `threshold`, take the largest, and match it to the tone
/// table within `tolerance_hz`.
pub fn classify_frame(
    frame: &[f64],
    sample_rate_hz: usize,
    threshold: f64,
    tolerance_hz: f64,
) -> Option<ZveiSymbol> {
    if frame.is_empty() {
        return None;
    }

    let windowed = hamming_window(frame);

    let mut buffer: Vec<Complex32> = windowed
        .iter()
        .map(|&x| Complex32::new(x as f32, 0.0))
        .collect();

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(buffer.len());
    fft.process(&mut buffer);

    let half = buffer.len() / 2;
    let magnitudes: Vec<f32> = buffer[..=half].iter().map(|c| c.norm()).collect();

    let max_mag = magnitudes.iter().copied().fold(0.0f32, f32::max);
    if max_mag <= 0.0 {
        return None;
    }

    let normalized: Vec<f32> = magnitudes.iter().map(|&m| m / max_mag).collect();

    let bin_hz = sample_rate_hz as f64 / frame.len() as f64;

    let peak_bin = local_maxima(&normalized, threshold as f32)
        .into_iter()
        .max_by(|&a, &b| normalized[a].partial_cmp(&normalized[b]).unwrap())?;

    let peak_freq = peak_bin as f64 * bin_hz;

    ZveiSymbol::nearest_within(peak_freq, tolerance_hz)
}

/// Indices of local maxima in `spectrum` exceeding `threshold`.
fn local_maxima(spectrum: &[f32], threshold: f32) -> Vec<usize> {
    let n = spectrum.len();
    (0..n)
        .filter(|&i| {
            if spectrum[i] <= threshold {
                return false;
            }
            let left_ok = i == 0 || spectrum[i] >= spectrum[i - 1];
            let right_ok = i == n - 1 || spectrum[i] >= spectrum[i + 1];
            left_ok && right_ok
        })
        .collect()
}

fn hamming_window(frame: &[f64]) -> Vec<f64> {
    let n = frame.len();
    if n == 1 {
        return frame.to_vec();
    }
    frame
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            let w = 0.54 - 0.46 * (std::f64::consts::TAU * i as f64 / (n as f64 - 1.0)).cos();
            x * w
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::TAU;

    const SAMPLE_RATE: usize = 22_050;
    const FRAME_LEN: usize = 1543;

    fn pure_tone(freq_hz: f64, n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| (TAU * freq_hz * i as f64 / SAMPLE_RATE as f64).sin())
            .collect()
    }

    #[test]
    fn empty_frame_yields_no_tone() {
        assert_eq!(classify_frame(&[], SAMPLE_RATE, 0.1, 20.0), None);
    }

    #[test]
    fn silence_yields_no_tone() {
        let frame = vec![0.0; FRAME_LEN];
        assert_eq!(classify_frame(&frame, SAMPLE_RATE, 0.1, 20.0), None);
    }

    #[test]
    fn every_table_tone_is_recognized() {
        for symbol in ZveiSymbol::ALL {
            let frame = pure_tone(symbol.frequency_hz(), FRAME_LEN);
            let detected = classify_frame(&frame, SAMPLE_RATE, 0.1, 20.0);
            assert_eq!(detected, Some(symbol), "failed for {symbol}");
        }
    }

    #[test]
    fn tone_outside_tolerance_rejected() {
        // 35 Hz off the nearest table entry (1060 Hz "1"), per spec.md §8
        // scenario 4.
        let frame = pure_tone(1060.0 + 35.0, FRAME_LEN);
        assert_eq!(classify_frame(&frame, SAMPLE_RATE, 0.1, 20.0), None);
    }

    #[test]
    fn broadband_noise_below_threshold_rejected() {
        // Flat-ish pseudo-noise has no single peak prominent enough to
        // clear a strict threshold.
        let noise: Vec<f64> = (0..FRAME_LEN)
            .map(|i| ((i.wrapping_mul(2654435761)) % 1000) as f64 / 1000.0 - 0.5)
            .collect();
        let result = classify_frame(&noise, SAMPLE_RATE, 0.9, 20.0);
        assert_eq!(result, None);
    }
}
