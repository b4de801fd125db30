//! Orchestrates the demodulate → decimate → classify → aggregate chain
//! into a single `process(iq_block)` operation (spec.md §4.5).

use chrono::Utc;
use num_complex::Complex64;

use crate::aggregator::SequenceAggregator;
use crate::config::PipelineConfig;
use crate::detection::Detection;
use crate::errors::PipelineError;
use crate::logging::{LogConfig, SignalLogger};
use crate::signal_processing::{decimate, demodulate_fm};

/// Owns the aggregator's cross-block state and the pipeline's
/// configuration. A `DecoderPipeline` exclusively owns one aggregator;
/// concurrent calls to `process` on the same instance are not supported
/// (spec.md §5).
pub struct DecoderPipeline {
    config: PipelineConfig,
    aggregator: SequenceAggregator,
    logger: SignalLogger,
    samples_processed: u64,
}

impl DecoderPipeline {
    /// Construct a pipeline, validating `config` per spec.md §7's
    /// `ConfigInvalid` taxonomy. Fatal: returns before any state is built.
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        Self::with_log_config(config, LogConfig::default())
    }

    pub fn with_log_config(
        config: PipelineConfig,
        log_config: LogConfig,
    ) -> Result<Self, PipelineError> {
        config.validate()?;
        Ok(Self {
            config,
            aggregator: SequenceAggregator::new(),
            logger: SignalLogger::new(log_config),
            samples_processed: 0,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn logger(&self) -> &SignalLogger {
        &self.logger
    }

    /// Total IQ samples processed across the pipeline's lifetime, for
    /// observability.
    pub fn samples_processed(&self) -> u64 {
        self.samples_processed
    }

    /// Return the aggregator to `IDLE`, re-arming emission for a new
    /// monitoring session without discarding the pipeline's configuration.
    pub fn reset(&mut self) {
        self.aggregator.reset();
        self.logger.info("AGGREGATE", "aggregator reset to IDLE");
    }

    /// Consume one IQ block and emit zero or one `Detection`.
    ///
    /// Composes §4.1→§4.2→§4.3→§4.4. Numeric degeneracies within a block
    /// (empty input, all-zero frames) are absorbed locally and surfaced
    /// as "no emission", never as an `Err` (spec.md §7).
    pub fn process(&mut self, iq_block: &[Complex64]) -> Option<Detection> {
        self.samples_processed += iq_block.len() as u64;
        self.logger.debug(
            "DEMOD",
            format!("demodulating block of {} IQ samples", iq_block.len()),
        );

        let audio_rf = demodulate_fm(iq_block, self.config.rf_sample_rate);
        if audio_rf.is_empty() {
            return None;
        }

        let audio = decimate(&audio_rf, self.config.decimation_factor());
        self.logger.trace(
            "DECIMATE",
            format!("decimated to {} audio samples", audio.len()),
        );

        let aggregated = self.aggregator.process(&audio, &self.config)?;
        self.logger.info(
            "AGGREGATE",
            format!("emitted code {}", aggregated.code),
        );

        Some(Detection::new(
            aggregated.code,
            Utc::now(),
            aggregated.signal_strength_db,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio_generator::{synthesize_zvei_tone_sequence, ToneSequenceConfig};
    use crate::tone_table::ZveiSymbol;

    fn test_config() -> PipelineConfig {
        PipelineConfig::default()
    }

    #[test]
    fn rejects_invalid_config_at_construction() {
        let mut config = PipelineConfig::default();
        config.audio_sample_rate = 22_000; // does not divide the default rf_sample_rate
        assert!(DecoderPipeline::new(config).is_err());
    }

    #[test]
    fn pure_five_tone_sequence_emits_once() {
        let config = test_config();
        let mut pipeline = DecoderPipeline::new(config.clone()).unwrap();

        let symbols = [
            ZveiSymbol::One,
            ZveiSymbol::Two,
            ZveiSymbol::Three,
            ZveiSymbol::Four,
            ZveiSymbol::Five,
        ];
        let iq = synthesize_zvei_tone_sequence(
            &symbols,
            &ToneSequenceConfig {
                rf_sample_rate: config.rf_sample_rate,
                tone_duration_s: config.tone_duration_s,
                inter_tone_silence_s: 0.01,
            },
        );

        let detection = pipeline.process(&iq);
        assert_eq!(detection.map(|d| d.code), Some("12345".to_string()));
    }

    #[test]
    fn repeat_suppression_on_replayed_block() {
        let config = test_config();
        let mut pipeline = DecoderPipeline::new(config.clone()).unwrap();
        let symbols = [
            ZveiSymbol::One,
            ZveiSymbol::Two,
            ZveiSymbol::Three,
            ZveiSymbol::Four,
            ZveiSymbol::Five,
        ];
        let iq = synthesize_zvei_tone_sequence(
            &symbols,
            &ToneSequenceConfig {
                rf_sample_rate: config.rf_sample_rate,
                tone_duration_s: config.tone_duration_s,
                inter_tone_silence_s: 0.01,
            },
        );

        let first = pipeline.process(&iq);
        assert!(first.is_some());
        let second = pipeline.process(&iq);
        assert!(second.is_none());
    }

    #[test]
    fn empty_block_emits_nothing() {
        let mut pipeline = DecoderPipeline::new(test_config()).unwrap();
        assert!(pipeline.process(&[]).is_none());
    }

    #[test]
    fn reset_rearms_emission_for_same_sequence() {
        let config = test_config();
        let mut pipeline = DecoderPipeline::new(config.clone()).unwrap();
        let symbols = [
            ZveiSymbol::One,
            ZveiSymbol::Two,
            ZveiSymbol::Three,
            ZveiSymbol::Four,
            ZveiSymbol::Five,
        ];
        let iq = synthesize_zvei_tone_sequence(
            &symbols,
            &ToneSequenceConfig {
                rf_sample_rate: config.rf_sample_rate,
                tone_duration_s: config.tone_duration_s,
                inter_tone_silence_s: 0.01,
            },
        );

        assert!(pipeline.process(&iq).is_some());
        pipeline.reset();
        assert!(pipeline.process(&iq).is_some());
    }
}
