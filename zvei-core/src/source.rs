//! The upstream IQ source contract (spec.md §6).

use num_complex::Complex64;

use crate::errors::UpstreamError;

/// Any producer that delivers a continuous stream of complex baseband IQ
/// samples at a configured rate satisfies this contract. Concrete
/// implementations (a synthetic generator, a recorded-capture file
/// reader, a live SDR device) are external collaborators and live outside
/// this crate.
pub trait IqSource {
    /// Prepare the source to deliver samples. Called once before the
    /// first `read_block`.
    fn init(&mut self) -> Result<(), UpstreamError>;

    /// Deliver the next block of up to `n` complex samples. Returns
    /// `Ok(None)` to signal a clean end-of-stream. A read failure is a
    /// terminal condition; the pipeline does not retry.
    fn read_block(&mut self, n: usize) -> Result<Option<Vec<Complex64>>, UpstreamError>;
}
