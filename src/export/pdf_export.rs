// src/export/pdf_export.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::{entries_to_table, get_headers};
use crate::export::pdf::PdfManager;
use crate::export::{EntryExport, notify_export_success};
use crate::ui::messages::info;
use std::path::Path;

pub(crate) fn export_pdf(entries: &[EntryExport], path: &Path, title: &str) -> AppResult<()> {
    info(format!("Exporting to PDF: {}", path.display()));

    // the raw timestamp column adds nothing on paper
    let headers: Vec<&str> = get_headers()
        .into_iter()
        .filter(|h| *h != "timestamp")
        .collect();
    let rows: Vec<Vec<String>> = entries_to_table(entries)
        .into_iter()
        .map(|mut r| {
            r.truncate(headers.len());
            r
        })
        .collect();

    let total: f64 = entries.iter().map(|e| e.duration).sum();
    let subtitle = format!("{} entries, {:.2} hours", entries.len(), total);

    let mut pdf = PdfManager::new();
    pdf.write_table(title, &subtitle, &headers, &rows);

    pdf.save(path)
        .map_err(|e| AppError::Export(format!("PDF export error: {e}")))?;

    notify_export_success("PDF", path);
    Ok(())
}
