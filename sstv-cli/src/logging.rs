//! Structured logging for CLI encode/decode runs.

use crate::config::{LogFormat, LogTarget, LoggingConfig};
use chrono::{DateTime, Utc};
use color_eyre::eyre::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufWriter, Write};

/// Structured log event types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogEvent {
    /// An encode run completed.
    Encode(EncodeEvent),

    /// A decode run completed.
    Decode(DecodeEvent),

    Info { message: String },
    Warn { message: String },
    Error { message: String, details: Option<String> },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodeEvent {
    pub timestamp: DateTime<Utc>,
    pub mode: String,
    pub sample_rate: u32,
    pub samples_written: usize,
    pub duration_secs: f64,
    pub output_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodeEvent {
    pub timestamp: DateTime<Utc>,
    pub mode: String,
    pub width: u16,
    pub height: u16,
    pub output_path: String,
}

/// Logger that writes formatted [`LogEvent`]s to stdout, stderr, or a file.
pub struct StructuredLogger {
    config: LoggingConfig,
    writer: Box<dyn Write + Send>,
    start_time: DateTime<Utc>,
}

impl StructuredLogger {
    pub fn new(config: LoggingConfig) -> Result<Self> {
        let writer: Box<dyn Write + Send> = match &config.target {
            LogTarget::Stdout => Box::new(io::stdout()),
            LogTarget::Stderr => Box::new(io::stderr()),
            LogTarget::File => {
                let path = config
                    .file_path
                    .as_ref()
                    .ok_or_else(|| color_eyre::eyre::eyre!("File path required for file logging"))?;
                Box::new(BufWriter::new(File::create(path)?))
            }
        };

        Ok(Self { config, writer, start_time: Utc::now() })
    }

    pub fn log(&mut self, event: LogEvent) -> Result<()> {
        let output = match self.config.format {
            LogFormat::Json => self.format_json(&event)?,
            LogFormat::Logfmt => self.format_logfmt(&event),
            LogFormat::Pretty => self.format_pretty(&event),
        };

        writeln!(self.writer, "{}", output)?;
        self.writer.flush()?;
        Ok(())
    }

    fn format_json(&self, event: &LogEvent) -> Result<String> {
        Ok(serde_json::to_string(event)?)
    }

    fn format_logfmt(&self, event: &LogEvent) -> String {
        let ts = Utc::now().to_rfc3339();
        match event {
            LogEvent::Encode(e) => format!(
                "ts=\"{}\" type=encode mode=\"{}\" sample_rate={} samples={} duration_secs={:.2} out=\"{}\"",
                ts, e.mode, e.sample_rate, e.samples_written, e.duration_secs, e.output_path
            ),
            LogEvent::Decode(d) => format!(
                "ts=\"{}\" type=decode mode=\"{}\" width={} height={} out=\"{}\"",
                ts, d.mode, d.width, d.height, d.output_path
            ),
            LogEvent::Info { message } => format!("ts=\"{}\" level=info msg=\"{}\"", ts, message),
            LogEvent::Warn { message } => format!("ts=\"{}\" level=warn msg=\"{}\"", ts, message),
            LogEvent::Error { message, details } => match details {
                Some(d) => format!("ts=\"{}\" level=error msg=\"{}\" details=\"{}\"", ts, message, d),
                None => format!("ts=\"{}\" level=error msg=\"{}\"", ts, message),
            },
        }
    }

    fn format_pretty(&self, event: &LogEvent) -> String {
        let ts = Utc::now().format("%Y-%m-%d %H:%M:%S%.3f");
        match event {
            LogEvent::Encode(e) => format!(
                "[{}] ENCODE: mode={} sample_rate={}Hz samples={} ({:.2}s) -> {}",
                ts, e.mode, e.sample_rate, e.samples_written, e.duration_secs, e.output_path
            ),
            LogEvent::Decode(d) => {
                format!("[{}] DECODE: mode={} {}x{} -> {}", ts, d.mode, d.width, d.height, d.output_path)
            }
            LogEvent::Info { message } => format!("[{}] INFO: {}", ts, message),
            LogEvent::Warn { message } => format!("[{}] WARN: {}", ts, message),
            LogEvent::Error { message, details } => match details {
                Some(d) => format!("[{}] ERROR: {} | {}", ts, message, d),
                None => format!("[{}] ERROR: {}", ts, message),
            },
        }
    }

    pub fn elapsed(&self) -> f64 {
        (Utc::now() - self.start_time).num_milliseconds() as f64 / 1000.0
    }
}
