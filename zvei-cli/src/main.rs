mod config;
mod logging;
mod sinks;
mod sources;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use config::{CliConfig, SourceConfig};
use logging::{DetectionEvent, LogEvent, StatisticsEvent, StructuredLogger};
use sinks::{ConsoleSink, CsvSink, DetectionStats, JsonSink, TextSink};
use sources::{parse_sequence, CaptureFileSource, SyntheticIqSource};
use zvei_core::{DecoderPipeline, Detection, DetectionSink, IqSource};

#[derive(Parser, Debug)]
#[command(author, version, about = "ZVEI/CCIR tone monitor", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose diagnostic output
    #[arg(short, long)]
    verbose: bool,

    /// Override the center frequency display, in MHz
    #[arg(short = 'f', long)]
    frequency_mhz: Option<f64>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Cli::parse();

    let mut config = if let Some(path) = &args.config {
        CliConfig::from_file(path)
            .wrap_err_with(|| format!("failed to load config from {}", path.display()))?
    } else {
        CliConfig::default()
    };

    if let Some(freq_mhz) = args.frequency_mhz {
        config.sdr.center_freq_hz = freq_mhz * 1e6;
    }

    let mut logger = StructuredLogger::new(config.logging.clone())?;
    let pipeline_config = config.pipeline.clone();

    let mut pipeline = DecoderPipeline::with_log_config(
        pipeline_config.clone(),
        config.logging.to_core_log_config(),
    )
    .wrap_err("invalid pipeline configuration")?;

    let mut source: Box<dyn IqSource> = match &config.source {
        SourceConfig::Synthetic { sequence, repeat } => {
            let symbols = parse_sequence(sequence)?;
            Box::new(SyntheticIqSource::new(symbols, *repeat, &pipeline_config))
        }
        SourceConfig::CaptureFile { path } => Box::new(CaptureFileSource::new(path.clone())),
    };

    let mut sinks: Vec<Box<dyn DetectionSink>> = Vec::new();
    if config.sinks.console {
        sinks.push(Box::new(ConsoleSink));
    }
    if let Some(path) = &config.sinks.json {
        sinks.push(Box::new(JsonSink::new(path.clone())?));
    }
    if let Some(path) = &config.sinks.csv {
        sinks.push(Box::new(CsvSink::new(path.clone())?));
    }
    if let Some(path) = &config.sinks.text {
        sinks.push(Box::new(TextSink::new(path)?));
    }
    let mut stats = DetectionStats::default();

    print_banner(&config);

    source
        .init()
        .wrap_err("failed to initialize IQ source")?;

    let mut last_display = std::time::Instant::now();
    let display_interval = std::time::Duration::from_secs_f64(config.display_interval_secs);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );

    loop {
        match source.read_block(pipeline_config.block_samples) {
            Ok(Some(block)) => {
                if let Some(detection) = pipeline.process(&block) {
                    dispatch(&detection, &mut sinks, &mut stats, &mut logger)?;
                }
            }
            Ok(None) => break,
            Err(e) => {
                logger.log(LogEvent::Error {
                    message: "IQ source read failed".to_string(),
                    details: Some(e.to_string()),
                })?;
                break;
            }
        }

        spinner.tick();
        spinner.set_message(format!(
            "{} samples, {} detections",
            pipeline.samples_processed(),
            stats.total_detections()
        ));

        if last_display.elapsed() >= display_interval {
            log_status(&mut logger, &pipeline, &stats)?;
            last_display = std::time::Instant::now();
        }

        if args.verbose {
            logger.log(LogEvent::Info {
                message: format!(
                    "samples processed: {}",
                    pipeline.samples_processed()
                ),
            })?;
        }
    }

    spinner.finish_and_clear();
    log_final_statistics(&mut logger, &pipeline, &stats)?;

    Ok(())
}

fn print_banner(config: &CliConfig) {
    println!("{}", "=".repeat(60));
    println!("ZVEI/CCIR Tone Monitor");
    println!("{}", "=".repeat(60));
    println!(
        "Center frequency: {:.3} MHz",
        config.sdr.center_freq_hz / 1e6
    );
    println!(
        "RF sample rate: {} kHz",
        config.pipeline.rf_sample_rate / 1000
    );
    println!("Gain: {}", config.sdr.gain);
    println!("{}", "=".repeat(60));
}

fn dispatch(
    detection: &Detection,
    sinks: &mut [Box<dyn DetectionSink>],
    stats: &mut DetectionStats,
    logger: &mut StructuredLogger,
) -> Result<()> {
    for sink in sinks.iter_mut() {
        sink.on_detection(detection);
    }
    stats.record(detection);
    logger.log(LogEvent::Detection(DetectionEvent {
        timestamp: detection.timestamp,
        code: detection.code.clone(),
        signal_strength_db: detection.signal_strength_db,
    }))
}

fn log_status(
    logger: &mut StructuredLogger,
    pipeline: &DecoderPipeline,
    stats: &DetectionStats,
) -> Result<()> {
    logger.log(LogEvent::Statistics(StatisticsEvent {
        timestamp: chrono::Utc::now(),
        duration_secs: logger.elapsed(),
        samples_processed: pipeline.samples_processed(),
        total_detections: stats.total_detections(),
        unique_codes: stats.unique_codes(),
        most_common: stats.most_common(),
    }))
}

fn log_final_statistics(
    logger: &mut StructuredLogger,
    pipeline: &DecoderPipeline,
    stats: &DetectionStats,
) -> Result<()> {
    println!("\n{}", "=".repeat(60));
    println!("Session Summary");
    println!("{}", "=".repeat(60));
    println!("Total detections: {}", stats.total_detections());
    println!("Unique codes detected: {}", stats.unique_codes());
    if let Some(code) = stats.most_common() {
        println!("Most common code: {}", code);
    }
    println!("{}", "=".repeat(60));

    log_status(logger, pipeline, stats)
}
