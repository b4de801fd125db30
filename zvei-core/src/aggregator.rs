//! Temporal aggregation of per-window tone hits into validated ZVEI codes.

use rayon::prelude::*;

use crate::config::PipelineConfig;
use crate::detection::signal_strength_db;
use crate::signal_processing::classify_frame;
use crate::tone_table::ZveiSymbol;

/// One classified tone, local to a single audio frame (spec.md §3).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneHit {
    pub symbol: ZveiSymbol,
    pub t: f64,
}

/// Result of a completed scan-and-validate pass: the emitted code string
/// plus the signal strength of the window that produced its final tone.
pub struct AggregatedSequence {
    pub code: String,
    pub signal_strength_db: Option<f64>,
}

/// Holds the aggregator's cross-block state: the last successfully
/// emitted sequence, used for full-sequence dedup (spec.md §3, §4.4).
#[derive(Debug, Clone, Default)]
pub struct SequenceAggregator {
    last_emitted: String,
}

impl SequenceAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return to the `IDLE` state, re-arming emission. A supplementary
    /// operation for session boundaries; the scan-and-validate logic
    /// itself is unaffected by this reset (spec.md's aggregator has no
    /// within-a-run reset).
    pub fn reset(&mut self) {
        self.last_emitted.clear();
    }

    pub fn last_emitted(&self) -> &str {
        &self.last_emitted
    }

    /// Run the full scan → raw-hit dedup → clean → validity-gate →
    /// inter-block-dedup pipeline over one decimated audio frame.
    pub fn process(
        &mut self,
        audio: &[f64],
        config: &PipelineConfig,
    ) -> Option<AggregatedSequence> {
        let frame_len = config.frame_len();
        if frame_len == 0 || audio.len() < frame_len {
            return None;
        }
        let hop = (frame_len / 2).max(1);

        let raw_hits = scan(
            audio,
            frame_len,
            hop,
            config.decimated_sample_rate_hz(),
            config.detection_threshold,
            config.tone_tolerance_hz,
        );

        let deduped = dedup_adjacent(&raw_hits);
        let cleaned = clean(&deduped);

        if cleaned.len() < config.min_sequence_length {
            return None;
        }

        let code: String = cleaned.iter().map(|h| h.symbol.as_char()).collect();
        if code == self.last_emitted {
            return None;
        }

        self.last_emitted = code.clone();

        let last_hit = cleaned.last().expect("cleaned is non-empty");
        let window_start = (last_hit.t * config.decimated_sample_rate_hz() as f64).round() as usize;
        let strength = audio
            .get(window_start..(window_start + frame_len).min(audio.len()))
            .and_then(signal_strength_db);

        Some(AggregatedSequence {
            code,
            signal_strength_db: strength,
        })
    }
}

/// Slide a window of `frame_len` samples across `audio` with step `hop`,
/// classifying every position. Positions are scanned in parallel (spec.md
/// §5 explicitly permits this) but the result preserves scan order, since
/// tone hits must reach the aggregator in strictly increasing offset.
fn scan(
    audio: &[f64],
    frame_len: usize,
    hop: usize,
    sample_rate_hz: usize,
    threshold: f64,
    tolerance_hz: f64,
) -> Vec<ToneHit> {
    if audio.len() < frame_len {
        return Vec::new();
    }
    let last_start = audio.len() - frame_len;
    let positions: Vec<usize> = (0..last_start).step_by(hop).collect();

    positions
        .par_iter()
        .filter_map(|&i| {
            let window = &audio[i..i + frame_len];
            classify_frame(window, sample_rate_hz, threshold, tolerance_hz).map(|symbol| ToneHit {
                symbol,
                t: i as f64 / sample_rate_hz as f64,
            })
        })
        .collect()
}

/// Step 2 of spec.md §4.4: collapse the duplicate hits a 50%-overlap scan
/// produces while a tone is sustained.
fn dedup_adjacent(hits: &[ToneHit]) -> Vec<ToneHit> {
    let mut out: Vec<ToneHit> = Vec::new();
    for &hit in hits {
        let keep = match out.last() {
            None => true,
            Some(prev) => prev.symbol != hit.symbol || hit.t - prev.t > 0.1,
        };
        if keep {
            out.push(hit);
        }
    }
    out
}

/// Step 3 of spec.md §4.4: drop the second of any two consecutive hits
/// within 0.05s of each other, removing residual flicker near tone
/// boundaries.
fn clean(hits: &[ToneHit]) -> Vec<ToneHit> {
    let mut cleaned: Vec<ToneHit> = Vec::new();
    let mut i = 0;
    while i < hits.len() {
        let hit = hits[i];
        if i + 1 < hits.len() && hits[i + 1].t - hit.t < 0.05 {
            i += 1;
            continue;
        }
        cleaned.push(hit);
        i += 1;
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(symbol: ZveiSymbol, t: f64) -> ToneHit {
        ToneHit { symbol, t }
    }

    #[test]
    fn dedup_adjacent_collapses_sustained_tone() {
        let hits = vec![
            hit(ZveiSymbol::One, 0.0),
            hit(ZveiSymbol::One, 0.035),
            hit(ZveiSymbol::One, 0.07),
            hit(ZveiSymbol::Two, 0.105),
        ];
        let deduped = dedup_adjacent(&hits);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].symbol, ZveiSymbol::One);
        assert_eq!(deduped[1].symbol, ZveiSymbol::Two);
    }

    #[test]
    fn dedup_adjacent_keeps_repeats_after_gap() {
        let hits = vec![hit(ZveiSymbol::One, 0.0), hit(ZveiSymbol::One, 0.2)];
        let deduped = dedup_adjacent(&hits);
        assert_eq!(deduped.len(), 2);
    }

    #[test]
    fn clean_drops_close_flicker() {
        let hits = vec![
            hit(ZveiSymbol::One, 0.0),
            hit(ZveiSymbol::Two, 0.03),
            hit(ZveiSymbol::Three, 0.2),
        ];
        let cleaned = clean(&hits);
        assert_eq!(cleaned.len(), 2);
        assert_eq!(cleaned[0].symbol, ZveiSymbol::One);
        assert_eq!(cleaned[1].symbol, ZveiSymbol::Three);
    }

    #[test]
    fn sub_minimum_sequence_discarded() {
        let mut agg = SequenceAggregator::new();
        let config = PipelineConfig::default();
        // Too short to reach min_sequence_length after framing.
        let audio = vec![0.0; config.frame_len()];
        assert!(agg.process(&audio, &config).is_none());
    }

    #[test]
    fn reset_clears_last_emitted() {
        let mut agg = SequenceAggregator::new();
        agg.last_emitted = "12345".to_string();
        agg.reset();
        assert_eq!(agg.last_emitted(), "");
    }
}
