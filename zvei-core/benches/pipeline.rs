//! Throughput benchmark against the real-time budget of spec.md §5
//! (~1.05 s per 256 K-sample block).

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use zvei_core::audio_generator::{synthesize_zvei_tone_sequence, ToneSequenceConfig};
use zvei_core::config::PipelineConfig;
use zvei_core::pipeline::DecoderPipeline;
use zvei_core::tone_table::ZveiSymbol;

fn full_block(c: &mut Criterion) {
    let config = PipelineConfig::default();
    let seq_config = ToneSequenceConfig {
        rf_sample_rate: config.rf_sample_rate,
        tone_duration_s: config.tone_duration_s,
        inter_tone_silence_s: 0.01,
    };
    let symbols = [
        ZveiSymbol::One,
        ZveiSymbol::Two,
        ZveiSymbol::Three,
        ZveiSymbol::Four,
        ZveiSymbol::Five,
    ];
    let mut iq = synthesize_zvei_tone_sequence(&symbols, &seq_config);
    iq.resize(config.block_samples, num_complex::Complex64::new(0.0, 0.0));

    c.bench_function("process_256k_block", |b| {
        b.iter(|| {
            let mut pipeline = DecoderPipeline::new(config.clone()).unwrap();
            black_box(pipeline.process(black_box(&iq)));
        });
    });
}

criterion_group!(benches, full_block);
criterion_main!(benches);
