// src/export/logic.rs

use crate::core::store::EntryStore;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::EntryExport;
use crate::export::pdf_export::export_pdf;
use crate::export::xlsx::export_xlsx;
use crate::export::ExportFormat;
use crate::models::DateRange;
use crate::ui::messages::warning;
use chrono::{Local, TimeZone};
use std::io;
use std::path::Path;

/// High-level export of the entry set.
pub struct ExportLogic;

impl ExportLogic {
    /// Export entries, oldest first.
    ///
    /// - `file`: absolute path of the output file
    /// - `range`: `None`, `"all"` or a range expression (`YYYY`, `YYYY-MM`,
    ///   `YYYY-MM-DD`, or two of the same joined by `:`)
    ///
    /// Returns the number of exported entries.
    pub fn export(
        store: &EntryStore,
        format: ExportFormat,
        file: &str,
        range: Option<&str>,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::from(io::Error::other(format!(
                "Output file path must be absolute: {file}"
            ))));
        }

        let bounds = match range {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(DateRange::parse_expr(r)?),
        };

        let rows = load_rows(store, bounds.as_ref(), &Local)?;

        if rows.is_empty() {
            warning("⚠️  No entries found for selected range.");
            return Ok(0);
        }

        ensure_writable(path, force)?;

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
            ExportFormat::Xlsx => export_xlsx(&rows, path)?,
            ExportFormat::Pdf => export_pdf(&rows, path, &pdf_title(bounds.as_ref()))?,
        }

        tracing::info!(count = rows.len(), format = format.as_str(), path = %path.display(), "export done");
        Ok(rows.len())
    }
}

fn pdf_title(range: Option<&DateRange>) -> String {
    match range {
        None => "Work log".to_string(),
        Some(r) if r.start == r.end => format!("Work log for {}", r.start),
        Some(r) => format!("Work log from {} to {}", r.start, r.end),
    }
}

/// Rows inside `bounds` (all when `None`), sorted by timestamp.
fn load_rows<Tz: TimeZone>(
    store: &EntryStore,
    bounds: Option<&DateRange>,
    tz: &Tz,
) -> AppResult<Vec<EntryExport>>
where
    Tz::Offset: std::fmt::Display,
{
    let mut entries = store.list_all()?;
    if let Some(range) = bounds {
        entries.retain(|e| e.timestamp_in(tz).is_some_and(|dt| range.contains(&dt)));
    }
    entries.sort_by_key(|e| e.timestamp_utc());

    Ok(entries
        .iter()
        .map(|e| EntryExport::from_entry(e, tz))
        .collect())
}
