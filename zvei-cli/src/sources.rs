//! `IqSource` implementations: a synthetic tone-sequence generator for
//! demos and smoke tests, and a reader for stereo WAV IQ capture files.

use std::path::PathBuf;

use color_eyre::eyre::{eyre, Result};
use hound::WavReader;
use num_complex::Complex64;

use zvei_core::audio_generator::{synthesize_zvei_tone_sequence, ToneSequenceConfig};
use zvei_core::{IqSource, PipelineConfig, UpstreamError, ZveiSymbol};

/// Parse a code string like `"12345"` or `"A0F"` into its ZVEI symbols.
pub fn parse_sequence(code: &str) -> Result<Vec<ZveiSymbol>> {
    code.chars()
        .map(|c| {
            ZveiSymbol::ALL
                .iter()
                .copied()
                .find(|s| s.as_char() == c.to_ascii_uppercase())
                .ok_or_else(|| eyre!("'{c}' is not a valid ZVEI symbol"))
        })
        .collect()
}

/// Generates a fixed ZVEI tone sequence as IQ samples, optionally looping
/// with a reset in between so the aggregator re-arms for the next pass.
pub struct SyntheticIqSource {
    symbols: Vec<ZveiSymbol>,
    seq_config: ToneSequenceConfig,
    repeat: bool,
    cursor: usize,
    buffer: Vec<Complex64>,
}

impl SyntheticIqSource {
    pub fn new(symbols: Vec<ZveiSymbol>, repeat: bool, pipeline_config: &PipelineConfig) -> Self {
        let seq_config = ToneSequenceConfig {
            rf_sample_rate: pipeline_config.rf_sample_rate,
            tone_duration_s: pipeline_config.tone_duration_s,
            inter_tone_silence_s: 0.01,
        };
        Self {
            symbols,
            seq_config,
            repeat,
            cursor: 0,
            buffer: Vec::new(),
        }
    }
}

impl IqSource for SyntheticIqSource {
    fn init(&mut self) -> Result<(), UpstreamError> {
        self.buffer = synthesize_zvei_tone_sequence(&self.symbols, &self.seq_config);
        if self.buffer.is_empty() {
            return Err(UpstreamError::InitFailed {
                reason: "synthetic sequence produced zero samples".to_string(),
            });
        }
        Ok(())
    }

    fn read_block(&mut self, n: usize) -> Result<Option<Vec<Complex64>>, UpstreamError> {
        if self.cursor >= self.buffer.len() {
            if !self.repeat {
                return Ok(None);
            }
            self.cursor = 0;
        }

        let end = (self.cursor + n).min(self.buffer.len());
        let block = self.buffer[self.cursor..end].to_vec();
        self.cursor = end;
        Ok(Some(block))
    }
}

/// Reads IQ samples from a stereo WAV file (left channel = I, right = Q),
/// the interchange format used for recorded SDR captures.
pub struct CaptureFileSource {
    path: PathBuf,
    reader: Option<WavReader<std::io::BufReader<std::fs::File>>>,
}

impl CaptureFileSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path, reader: None }
    }
}

impl IqSource for CaptureFileSource {
    fn init(&mut self) -> Result<(), UpstreamError> {
        let reader = WavReader::open(&self.path).map_err(|e| UpstreamError::InitFailed {
            reason: format!("failed to open capture file {}: {e}", self.path.display()),
        })?;
        if reader.spec().channels != 2 {
            return Err(UpstreamError::InitFailed {
                reason: format!(
                    "capture file {} must be stereo (I/Q), found {} channel(s)",
                    self.path.display(),
                    reader.spec().channels
                ),
            });
        }
        self.reader = Some(reader);
        Ok(())
    }

    fn read_block(&mut self, n: usize) -> Result<Option<Vec<Complex64>>, UpstreamError> {
        let reader = self.reader.as_mut().ok_or_else(|| UpstreamError::ReadFailed {
            reason: "read_block called before init".to_string(),
        })?;

        let mut samples = Vec::with_capacity(n);
        let mut iter = reader.samples::<f32>();
        for _ in 0..n {
            let i = match iter.next() {
                Some(Ok(v)) => v,
                Some(Err(e)) => {
                    return Err(UpstreamError::ReadFailed {
                        reason: format!("capture read error: {e}"),
                    })
                }
                None => break,
            };
            let q = match iter.next() {
                Some(Ok(v)) => v,
                Some(Err(e)) => {
                    return Err(UpstreamError::ReadFailed {
                        reason: format!("capture read error: {e}"),
                    })
                }
                None => break,
            };
            samples.push(Complex64::new(i as f64, q as f64));
        }

        if samples.is_empty() {
            return Ok(None);
        }
        Ok(Some(samples))
    }
}
