//! ZVEI/CCIR sequential-tone paging decoder core.
//!
//! This crate is the signal-processing and tone-decoding pipeline only:
//! FM demodulation of a complex IQ stream, decimation to audio rate,
//! per-segment tone classification against the fixed ZVEI tone table, and
//! temporal aggregation into validated code strings. It has no I/O side
//! effects beyond the [`IqSource`] and [`DetectionSink`] traits it
//! defines; device drivers, config loading, persistence, and CLI concerns
//! live in a host application.

pub mod aggregator;
pub mod audio_generator;
pub mod channel;
pub mod config;
pub mod detection;
pub mod errors;
pub mod logging;
pub mod pipeline;
pub mod signal_processing;
pub mod sink;
pub mod source;
pub mod tone_table;
pub mod utils;

pub use aggregator::SequenceAggregator;
pub use config::PipelineConfig;
pub use detection::Detection;
pub use errors::{ConfigError, PipelineError, UpstreamError};
pub use pipeline::DecoderPipeline;
pub use sink::DetectionSink;
pub use source::IqSource;
pub use tone_table::ZveiSymbol;
