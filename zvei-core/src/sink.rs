//! The downstream detection sink contract (spec.md §6).

use crate::detection::Detection;

/// Invoked once per emitted code. Expected to be non-blocking relative to
/// real-time pacing; the core applies no buffering of its own. The
/// persistence sink's internals (JSON/CSV/text, console rendering) are
/// external collaborators and live outside this crate.
pub trait DetectionSink {
    fn on_detection(&mut self, detection: &Detection);
}
