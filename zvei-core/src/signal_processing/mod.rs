//! Core DSP stages of the ZVEI decoding pipeline:
//! - FM discrimination and anti-alias low-pass filtering
//! - Decimation to the audio rate
//! - Windowed-FFT tone classification
//!
//! These functions are designed to be reusable, testable, and suitable for
//! real-time operation.

pub mod classifier;
pub mod decimator;
pub mod demodulator;

pub use classifier::classify_frame;
pub use decimator::decimate;
pub use demodulator::demodulate_fm;
