//! JSON output formatter for machine-readable results.
//!
//! Emits exactly one document per run: the pack result or the error.
//! Stage announcements and warnings are folded into the result instead of
//! printed as they happen.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use sdkpack_core::PackReport;
use sdkpack_core::PackStage;
use serde::Serialize;
use std::io::Write;
use std::io::{self};

pub struct JsonFormatter;

#[derive(Debug, Serialize)]
struct PackOutput {
    archive_path: String,
    timestamp: String,
    files_staged: usize,
    directories_staged: usize,
    files_archived: usize,
    paths_excluded: usize,
    bytes_written: u64,
    bytes_compressed: u64,
    compression_ratio: f64,
    compression_percentage: f64,
    missing_includes: Vec<String>,
    warnings: Vec<String>,
    duration_ms: u128,
}

impl From<&PackReport> for PackOutput {
    fn from(report: &PackReport) -> Self {
        Self {
            archive_path: report.archive_path.display().to_string(),
            timestamp: report.timestamp.clone(),
            files_staged: report.files_staged,
            directories_staged: report.directories_staged,
            files_archived: report.files_archived,
            paths_excluded: report.paths_excluded,
            bytes_written: report.bytes_written,
            bytes_compressed: report.bytes_compressed,
            compression_ratio: report.compression_ratio(),
            compression_percentage: report.compression_percentage(),
            missing_includes: report
                .missing_includes
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            warnings: report.warnings.clone(),
            duration_ms: report.duration.as_millis(),
        }
    }
}

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_stage(&self, _stage: PackStage) {}

    fn format_pack_result(&self, report: &PackReport) -> Result<()> {
        let output = JsonOutput::success("pack", PackOutput::from(report));
        Self::output(&output)
    }

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::error("pack", format!("{error:#}"));
        let _ = Self::output(&output);
    }

    fn format_warning(&self, _message: &str) {}
}
