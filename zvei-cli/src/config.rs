//! CLI-specific configuration structures for TOML-based configuration.

use color_eyre::eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use zvei_core::config::PipelineConfig;

/// Complete CLI configuration bundle. Defaults match the core pipeline's
/// own defaults, so an empty config file is a valid, fully-functional
/// configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Core decoder parameters.
    pub pipeline: PipelineConfig,

    /// SDR metadata. The core pipeline never reads this; it exists for
    /// display and for the capture-file/synthetic source implementations.
    pub sdr: SdrConfig,

    /// Which IQ source to run against.
    pub source: SourceConfig,

    /// Where completed detections are written.
    pub sinks: SinkConfig,

    /// Structured logging configuration.
    pub logging: LoggingConfig,

    /// Seconds between periodic console status updates.
    #[serde(default = "default_display_interval")]
    pub display_interval_secs: f64,
}

fn default_display_interval() -> f64 {
    5.0
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            pipeline: PipelineConfig::default(),
            sdr: SdrConfig::default(),
            source: SourceConfig::default(),
            sinks: SinkConfig::default(),
            logging: LoggingConfig::default(),
            display_interval_secs: default_display_interval(),
        }
    }
}

/// SDR front-end metadata, carried for display purposes only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SdrConfig {
    pub center_freq_hz: f64,
    pub gain: String,
}

impl Default for SdrConfig {
    fn default() -> Self {
        Self {
            center_freq_hz: 0.0,
            gain: "auto".to_string(),
        }
    }
}

/// Which `IqSource` implementation to construct.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceConfig {
    /// Generate a synthetic ZVEI tone sequence, for demos and smoke tests.
    Synthetic { sequence: String, repeat: bool },
    /// Read IQ from a stereo WAV capture file (left channel = I, right = Q).
    CaptureFile { path: PathBuf },
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::Synthetic {
            sequence: "12345".to_string(),
            repeat: false,
        }
    }
}

/// Which `DetectionSink` implementations to attach, and where they write.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SinkConfig {
    pub json: Option<PathBuf>,
    pub csv: Option<PathBuf>,
    pub text: Option<PathBuf>,
    #[serde(default = "default_true")]
    pub console: bool,
}

fn default_true() -> bool {
    true
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            json: None,
            csv: None,
            text: None,
            console: true,
        }
    }
}

/// Logging output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub target: LogTarget,
    pub file_path: Option<PathBuf>,
    pub format: LogFormat,
    pub level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            target: LogTarget::Stderr,
            file_path: None,
            format: LogFormat::Pretty,
            level: LogLevel::Info,
        }
    }
}

impl LoggingConfig {
    /// Convert CLI logging config to the core's in-memory logging config.
    pub fn to_core_log_config(&self) -> zvei_core::logging::LogConfig {
        use zvei_core::logging::{LogConfig as CoreLogConfig, LogLevel as CoreLogLevel};

        let level = match self.level {
            LogLevel::Debug => CoreLogLevel::Debug,
            LogLevel::Info => CoreLogLevel::Info,
            LogLevel::Warn => CoreLogLevel::Warn,
            LogLevel::Error => CoreLogLevel::Error,
        };

        CoreLogConfig {
            level,
            ..CoreLogConfig::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogTarget {
    Stdout,
    Stderr,
    File,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Logfmt,
    Pretty,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl CliConfig {
    /// Load configuration from a TOML file. Any field the file omits falls
    /// back to its default, so a partial or empty file is valid.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;
        let config: CliConfig =
            toml::from_str(&content).wrap_err("Failed to parse TOML configuration")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config.pipeline, PipelineConfig::default());
        assert!(config.sinks.console);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let toml_src = r#"
            [pipeline]
            detection_threshold = 0.2
        "#;
        let config: CliConfig = toml::from_str(toml_src).unwrap();
        assert_eq!(config.pipeline.detection_threshold, 0.2);
        assert_eq!(
            config.pipeline.min_sequence_length,
            PipelineConfig::default().min_sequence_length
        );
    }

    #[test]
    fn source_kind_tag_selects_variant() {
        let toml_src = r#"
            [source]
            kind = "capture_file"
            path = "capture.wav"
        "#;
        let config: CliConfig = toml::from_str(toml_src).unwrap();
        match config.source {
            SourceConfig::CaptureFile { path } => assert_eq!(path, PathBuf::from("capture.wav")),
            _ => panic!("expected CaptureFile variant"),
        }
    }
}
