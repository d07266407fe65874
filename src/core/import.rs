//! Import of the legacy JSON document (`{"entries": [...]}`) written by the
//! desktop version of the log.
//!
//! Ids, literal tag strings and timestamps are stored verbatim so the data
//! stays byte-for-byte what it was.

use crate::core::store::EntryStore;
use crate::db::queries::insert_raw_entry;
use crate::errors::{AppError, AppResult};
use crate::models::entry::parse_timestamp;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Key under which the legacy store kept its collection.
pub const LEGACY_COLLECTION: &str = "entries";

#[derive(Debug, Deserialize)]
struct LegacyDocument {
    #[serde(default)]
    entries: Vec<LegacyEntry>,
}

#[derive(Debug, Deserialize)]
struct LegacyEntry {
    id: i64,
    #[serde(default)]
    task: String,
    #[serde(default)]
    requestor: String,
    #[serde(default)]
    duration: LegacyDuration,
    #[serde(default)]
    tags: Option<String>,
    #[serde(default)]
    timestamp: String,
}

/// The form stored numbers, but hand-edited files may hold strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LegacyDuration {
    Number(f64),
    Text(String),
    Missing(()),
}

impl Default for LegacyDuration {
    fn default() -> Self {
        LegacyDuration::Missing(())
    }
}

impl LegacyDuration {
    fn hours(&self) -> Option<f64> {
        let h = match self {
            LegacyDuration::Number(n) => *n,
            LegacyDuration::Text(s) => s.trim().parse().ok()?,
            LegacyDuration::Missing(()) => 0.0,
        };
        (h.is_finite() && h >= 0.0).then_some(h)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportOutcome {
    pub imported: usize,
    pub skipped_existing: usize,
    pub invalid: usize,
}

pub struct ImportLogic;

impl ImportLogic {
    pub fn import_file(store: &mut EntryStore, path: &Path) -> AppResult<ImportOutcome> {
        let content = fs::read_to_string(path)?;
        Self::import_str(store, &content)
    }

    /// Import every valid entry of the document in one transaction.
    pub fn import_str(store: &mut EntryStore, content: &str) -> AppResult<ImportOutcome> {
        let doc: LegacyDocument = serde_json::from_str(content)
            .map_err(|e| AppError::InvalidImport(format!("{LEGACY_COLLECTION}: {e}")))?;

        store.pool_mut().with_tx(|tx| -> AppResult<ImportOutcome> {
            let mut outcome = ImportOutcome::default();

            for e in &doc.entries {
                let Some(hours) = e.duration.hours() else {
                    tracing::warn!(id = e.id, "skipping entry with invalid duration");
                    outcome.invalid += 1;
                    continue;
                };

                if e.task.trim().is_empty()
                    || e.requestor.trim().is_empty()
                    || parse_timestamp(&e.timestamp).is_none()
                {
                    tracing::warn!(id = e.id, "skipping incomplete entry");
                    outcome.invalid += 1;
                    continue;
                }

                let raw_tags = e.tags.as_deref().unwrap_or_default();
                if insert_raw_entry(tx, e.id, &e.task, &e.requestor, hours, raw_tags, &e.timestamp)? {
                    outcome.imported += 1;
                } else {
                    outcome.skipped_existing += 1;
                }
            }

            Ok(outcome)
        })
    }
}
