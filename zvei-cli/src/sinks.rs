//! `DetectionSink` implementations: JSON, CSV, and plain-text log files,
//! plus a console sink that prints a detection banner as it happens.

use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use color_eyre::eyre::{Context, Result};
use serde::Serialize;

use zvei_core::{Detection, DetectionSink};

/// Appends each detection to a JSON array file, rewriting the whole file
/// on every call so the array stays well-formed if the process is killed
/// mid-session.
pub struct JsonSink {
    path: PathBuf,
    records: Vec<JsonRecord>,
}

#[derive(Debug, Clone, Serialize)]
struct JsonRecord {
    timestamp: String,
    code: String,
    signal_strength_db: Option<f64>,
}

impl JsonSink {
    pub fn new(path: PathBuf) -> Result<Self> {
        let records = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .wrap_err_with(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&content).unwrap_or_default()
        } else {
            Vec::new()
        };
        Ok(Self { path, records })
    }

    fn flush(&self) -> Result<()> {
        let file = File::create(&self.path)
            .wrap_err_with(|| format!("failed to create {}", self.path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &self.records)?;
        Ok(())
    }
}

impl DetectionSink for JsonSink {
    fn on_detection(&mut self, detection: &Detection) {
        self.records.push(JsonRecord {
            timestamp: detection.timestamp.to_rfc3339(),
            code: detection.code.clone(),
            signal_strength_db: detection.signal_strength_db,
        });
        if let Err(e) = self.flush() {
            eprintln!("failed to write JSON detection log: {e}");
        }
    }
}

/// Appends each detection as a row to a CSV file, writing a header row on
/// first creation.
pub struct CsvSink {
    writer: csv::Writer<File>,
}

impl CsvSink {
    pub fn new(path: PathBuf) -> Result<Self> {
        let needs_header = !path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .wrap_err_with(|| format!("failed to open {}", path.display()))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if needs_header {
            writer.write_record([
                "timestamp",
                "date_time",
                "zvei_code",
                "frequency_mhz",
                "signal_strength",
            ])?;
            writer.flush()?;
        }
        Ok(Self { writer })
    }
}

impl DetectionSink for CsvSink {
    fn on_detection(&mut self, detection: &Detection) {
        let result = self.writer.write_record([
            detection.timestamp.timestamp().to_string(),
            detection.timestamp.format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
            detection.code.clone(),
            String::new(),
            detection
                .signal_strength_db
                .map(|s| format!("{:.1}", s))
                .unwrap_or_default(),
        ]);
        if result.is_ok() {
            let _ = self.writer.flush();
        } else if let Err(e) = result {
            eprintln!("failed to write CSV detection log: {e}");
        }
    }
}

/// Appends each detection as a human-readable line to a plain-text file.
pub struct TextSink {
    writer: BufWriter<File>,
}

impl TextSink {
    pub fn new(path: &Path) -> Result<Self> {
        let is_new = !path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .wrap_err_with(|| format!("failed to open {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        if is_new {
            writeln!(writer, "ZVEI/CCIR Signal Detection Log")?;
            writeln!(writer, "Started: {}", chrono::Utc::now().format("%Y-%m-%d %H:%M:%S"))?;
            writeln!(writer, "{}", "=".repeat(50))?;
            writer.flush()?;
        }
        Ok(Self { writer })
    }
}

impl DetectionSink for TextSink {
    fn on_detection(&mut self, detection: &Detection) {
        let line = match detection.signal_strength_db {
            Some(db) => format!(
                "[{}] ZVEI: {} (Signal: {:.1}dB)",
                detection.timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
                detection.code,
                db
            ),
            None => format!(
                "[{}] ZVEI: {}",
                detection.timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
                detection.code
            ),
        };
        if let Err(e) = writeln!(self.writer, "{}", line).and_then(|_| self.writer.flush()) {
            eprintln!("failed to write text detection log: {e}");
        }
    }
}

/// Prints a detection banner to the console as each code is decoded.
pub struct ConsoleSink;

impl DetectionSink for ConsoleSink {
    fn on_detection(&mut self, detection: &Detection) {
        println!("\n{}", "=".repeat(50));
        println!("ZVEI DETECTED: {}", detection.code);
        println!("Time: {}", detection.timestamp.format("%H:%M:%S%.3f"));
        println!("{}\n", "=".repeat(50));
    }
}

/// Running totals kept alongside the sinks for `display_status` and the
/// end-of-session summary; not itself a sink.
#[derive(Debug, Default)]
pub struct DetectionStats {
    total_detections: usize,
    code_counts: HashMap<String, usize>,
}

impl DetectionStats {
    pub fn record(&mut self, detection: &Detection) {
        self.total_detections += 1;
        *self.code_counts.entry(detection.code.clone()).or_insert(0) += 1;
    }

    pub fn total_detections(&self) -> usize {
        self.total_detections
    }

    pub fn unique_codes(&self) -> usize {
        self.code_counts.len()
    }

    pub fn most_common(&self) -> Option<String> {
        self.code_counts
            .iter()
            .max_by_key(|(_, count)| **count)
            .map(|(code, _)| code.clone())
    }
}
