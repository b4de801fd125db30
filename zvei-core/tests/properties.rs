//! Property-based tests over randomized tone sequences and replay.

use proptest::prelude::*;

use zvei_core::audio_generator::{synthesize_zvei_tone_sequence, ToneSequenceConfig};
use zvei_core::config::PipelineConfig;
use zvei_core::pipeline::DecoderPipeline;
use zvei_core::tone_table::ZveiSymbol;

fn symbol_strategy() -> impl Strategy<Value = ZveiSymbol> {
    prop_oneof![
        Just(ZveiSymbol::One),
        Just(ZveiSymbol::Two),
        Just(ZveiSymbol::Three),
        Just(ZveiSymbol::Four),
        Just(ZveiSymbol::Five),
        Just(ZveiSymbol::Six),
        Just(ZveiSymbol::Seven),
        Just(ZveiSymbol::Eight),
        Just(ZveiSymbol::Nine),
        Just(ZveiSymbol::A),
        Just(ZveiSymbol::B),
        Just(ZveiSymbol::C),
        Just(ZveiSymbol::D),
        Just(ZveiSymbol::E),
        Just(ZveiSymbol::F),
        Just(ZveiSymbol::Zero),
    ]
}

proptest! {
    /// Alphabet closure: any emitted code is built only from the ZVEI
    /// alphabet, for arbitrary 5-symbol sequences.
    #[test]
    fn alphabet_closure_over_random_sequences(symbols in prop::collection::vec(symbol_strategy(), 5..8)) {
        let config = PipelineConfig::default();
        let mut pipeline = DecoderPipeline::new(config.clone()).unwrap();
        let seq_config = ToneSequenceConfig {
            rf_sample_rate: config.rf_sample_rate,
            tone_duration_s: config.tone_duration_s,
            inter_tone_silence_s: 0.01,
        };
        let iq = synthesize_zvei_tone_sequence(&symbols, &seq_config);
        if let Some(detection) = pipeline.process(&iq) {
            prop_assert!(detection.code.chars().all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
            prop_assert!(!detection.code.is_empty());
        }
    }

    /// Idempotent replay: processing the identical block twice on the same
    /// pipeline instance never emits on the second call.
    #[test]
    fn idempotent_replay_over_random_sequences(symbols in prop::collection::vec(symbol_strategy(), 5..8)) {
        let config = PipelineConfig::default();
        let mut pipeline = DecoderPipeline::new(config.clone()).unwrap();
        let seq_config = ToneSequenceConfig {
            rf_sample_rate: config.rf_sample_rate,
            tone_duration_s: config.tone_duration_s,
            inter_tone_silence_s: 0.01,
        };
        let iq = synthesize_zvei_tone_sequence(&symbols, &seq_config);

        let first = pipeline.process(&iq);
        let second = pipeline.process(&iq);
        if first.is_some() {
            prop_assert!(second.is_none());
        }
    }
}
