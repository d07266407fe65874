// src/export/report.rs

use crate::core::report::{WeeklyReport, report_file_name};
use crate::errors::{AppError, AppResult};
use crate::models::DateRange;
use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Serialization used for the weekly report file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Json,
    Yaml,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Yaml => "yaml",
        }
    }
}

/// Write `report` into `dir` (created when missing) and return the file path.
/// A report generated twice on the same day overwrites the earlier one.
pub fn write_report(
    report: &WeeklyReport,
    dir: &Path,
    range: &DateRange,
    generated_on: NaiveDate,
    format: ReportFormat,
) -> AppResult<PathBuf> {
    fs::create_dir_all(dir)?;

    let path = dir.join(report_file_name(range, generated_on, format.extension()));

    let body = match format {
        ReportFormat::Json => serde_json::to_string_pretty(report)
            .map_err(|e| AppError::Export(format!("report serialization error: {e}")))?,
        ReportFormat::Yaml => serde_yaml::to_string(report)
            .map_err(|e| AppError::Export(format!("report serialization error: {e}")))?,
    };

    fs::write(&path, body)?;
    tracing::info!(path = %path.display(), "weekly report written");
    Ok(path)
}
