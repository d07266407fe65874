// src/export/json_csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::{EntryExport, notify_export_success};
use crate::ui::messages::info;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

pub(crate) fn export_json(entries: &[EntryExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = serde_json::to_string_pretty(entries)
        .map_err(|e| AppError::Export(format!("JSON serialization error: {e}")))?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", path);
    Ok(())
}

/// CSV with a header row taken from the field names.
pub(crate) fn export_csv(entries: &[EntryExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::Writer::from_path(path)
        .map_err(|e| AppError::Export(format!("CSV open error: {e}")))?;

    for item in entries {
        wtr.serialize(item)
            .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
    }

    wtr.flush().map_err(|e: io::Error| AppError::Export(format!("CSV flush error: {e}")))?;

    notify_export_success("CSV", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn row() -> EntryExport {
        EntryExport {
            id: 1,
            date: "2025-01-06".into(),
            time: "09:00".into(),
            task: "Write, review".into(),
            requestor: "Ana".into(),
            duration: 1.5,
            tags: "doc, review".into(),
            timestamp: "2025-01-06T09:00:00.000Z".into(),
        }
    }

    #[test]
    fn csv_quotes_commas_and_writes_header() {
        let path = env::temp_dir().join("rworklog_unit_export.csv");
        export_csv(&[row()], &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some("id,date,time,task,requestor,duration,tags,timestamp")
        );
        assert!(lines.next().unwrap().contains("\"Write, review\""));
    }

    #[test]
    fn json_is_an_array_of_rows() {
        let path = env::temp_dir().join("rworklog_unit_export.json");
        export_json(&[row()], &path).unwrap();

        let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(v[0]["requestor"], "Ana");
        assert_eq!(v[0]["duration"], 1.5);
    }
}
