//! Output formatting for CLI commands.
//!
//! Only `bitflip` prints a summary; the other tools write raw bytes to
//! stdout and nothing else.

use crate::error::Error;
use crate::flip::FlipReport;
use serde::Serialize;
use std::fmt::Write;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Parses format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Formats a bitflip summary.
#[must_use]
pub fn format_flip_report(report: &FlipReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_flip_report_text(report),
        OutputFormat::Json => {
            let mut output = format_json(report);
            output.push('\n');
            output
        }
    }
}

fn format_flip_report_text(report: &FlipReport) -> String {
    let mut output = String::new();
    let _ = write!(
        output,
        "Copied {} ({}) to {}",
        report.source,
        format_size(report.bytes_copied),
        report.destination
    );
    match report.flipped {
        Some(pos) => {
            let _ = write!(
                output,
                ", flipped bit {} (byte {}, bit {})",
                pos.index(),
                pos.byte,
                pos.bit
            );
        }
        None if report.bytes_copied == 0 => output.push_str(", no bit flipped (empty source)"),
        None => output.push_str(", no bit flipped"),
    }
    output.push('\n');
    output
}

/// Formats an error for stderr.
#[must_use]
pub fn format_error(error: &Error) -> String {
    error.to_string()
}

/// Formats a value as JSON.
fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Formats a byte size as human-readable.
#[allow(clippy::cast_precision_loss)]
fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.1} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}
