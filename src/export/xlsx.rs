// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::excel_date::{date_serial, time_serial};
use crate::export::model::{entry_to_row, get_headers};
use crate::export::{EntryExport, notify_export_success};
use crate::ui::messages::info;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// Widest a text column may grow before it is capped.
const MAX_COL_WIDTH: usize = 60;

/// How a column is written to the sheet.
#[derive(Clone, Copy)]
enum CellKind {
    Integer,
    Hours,
    Date,
    Time,
    Text,
}

fn cell_kind(header: &str) -> CellKind {
    match header {
        "id" => CellKind::Integer,
        "duration" => CellKind::Hours,
        "date" => CellKind::Date,
        "time" => CellKind::Time,
        _ => CellKind::Text,
    }
}

/// XLSX with a styled header, banded rows and fitted column widths.
pub(crate) fn export_xlsx(entries: &[EntryExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Entries").map_err(to_app_error)?;

    let headers = get_headers();
    let kinds: Vec<CellKind> = headers.iter().map(|h| cell_kind(h)).collect();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, *header, &header_format)
            .map_err(to_app_error)?;
    }
    worksheet.set_freeze_panes(1, 0).map_err(to_app_error)?;

    let mut col_widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(*h)).collect();

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    for (row_index, entry) in entries.iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band = if row_index % 2 == 0 { band1 } else { band2 };

        for (col, value) in entry_to_row(entry).iter().enumerate() {
            write_cell(worksheet, row, col as u16, value, kinds[col], band)?;
            col_widths[col] = col_widths[col].max(UnicodeWidthStr::width(value.as_str()));
        }
    }

    // total hours under the duration column
    if let Some(dur_col) = headers.iter().position(|h| *h == "duration")
        && !entries.is_empty()
    {
        let total_row = entries.len() as u32 + 1;
        let bold = Format::new().set_bold().set_num_format("0.00");
        let total: f64 = entries.iter().map(|e| e.duration).sum();

        if dur_col > 0 {
            worksheet
                .write_with_format(total_row, dur_col as u16 - 1, "Total", &Format::new().set_bold())
                .map_err(to_app_error)?;
        }
        worksheet
            .write_with_format(total_row, dur_col as u16, total, &bold)
            .map_err(to_app_error)?;
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, (*w).min(MAX_COL_WIDTH) as f64 + 2.0)
            .map_err(to_app_error)?;
    }

    workbook.save(path).map_err(to_app_error)?;

    notify_export_success("XLSX", path);
    Ok(())
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    s: &str,
    kind: CellKind,
    bg: Color,
) -> AppResult<()> {
    let base = Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    let numeric = match kind {
        CellKind::Integer => s.parse::<f64>().ok().map(|n| (n, "0")),
        CellKind::Hours => s.parse::<f64>().ok().map(|n| (n, "0.00")),
        CellKind::Date => date_serial(s).map(|n| (n, "yyyy-mm-dd")),
        CellKind::Time => time_serial(s).map(|n| (n, "hh:mm")),
        CellKind::Text => None,
    };

    match numeric {
        Some((value, num_format)) => {
            let fmt = base.set_num_format(num_format).set_align(FormatAlign::Right);
            worksheet
                .write_with_format(row, col, value, &fmt)
                .map_err(to_app_error)?;
        }
        None => {
            worksheet
                .write_with_format(row, col, s, &base)
                .map_err(to_app_error)?;
        }
    }

    Ok(())
}

fn to_app_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(format!("XLSX: {e}"))
}
