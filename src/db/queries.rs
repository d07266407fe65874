//! Persistence adapter for the `entries` collection.
//!
//! This is the only place where tags are joined into / split from their
//! comma-separated storage form.

use crate::errors::AppResult;
use crate::models::{Tags, WorkEntry};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const SELECT_ENTRY: &str = "SELECT id, task, requestor, duration, tags, timestamp FROM entries";

pub fn map_row(row: &Row) -> Result<WorkEntry> {
    let tags: Option<String> = row.get("tags")?;

    Ok(WorkEntry {
        id: row.get("id")?,
        task: row.get("task")?,
        requestor: row.get("requestor")?,
        duration: row.get("duration")?,
        tags: Tags::parse(tags.as_deref().unwrap_or_default()),
        timestamp: row.get("timestamp")?,
    })
}

pub fn load_all_entries(conn: &Connection) -> AppResult<Vec<WorkEntry>> {
    let mut stmt = conn.prepare_cached(&format!("{SELECT_ENTRY} ORDER BY id ASC"))?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_entry(conn: &Connection, id: i64) -> AppResult<Option<WorkEntry>> {
    let mut stmt = conn.prepare_cached(&format!("{SELECT_ENTRY} WHERE id = ?1"))?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

/// Insert a new row and return the id assigned by SQLite.
pub fn insert_entry(
    conn: &Connection,
    task: &str,
    requestor: &str,
    duration: f64,
    tags: &Tags,
    timestamp: &str,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO entries (task, requestor, duration, tags, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![task, requestor, duration, tags.join(), timestamp],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Insert a row verbatim, keeping its id and literal tag string.
/// Returns false when the id is already taken.
pub fn insert_raw_entry(
    conn: &Connection,
    id: i64,
    task: &str,
    requestor: &str,
    duration: f64,
    raw_tags: &str,
    timestamp: &str,
) -> AppResult<bool> {
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO entries (id, task, requestor, duration, tags, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![id, task, requestor, duration, raw_tags, timestamp],
    )?;
    Ok(inserted == 1)
}

/// Overwrite every mutable field of an entry. Returns false if the id is unknown.
pub fn update_entry(conn: &Connection, entry: &WorkEntry) -> AppResult<bool> {
    let changed = conn.execute(
        "UPDATE entries
            SET task = ?2, requestor = ?3, duration = ?4, tags = ?5
          WHERE id = ?1",
        params![
            entry.id,
            entry.task,
            entry.requestor,
            entry.duration,
            entry.tags.join()
        ],
    )?;
    Ok(changed == 1)
}

pub fn delete_entry(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM entries WHERE id = ?1", [id])?)
}

pub fn update_requestor(conn: &Connection, old: &str, new: &str) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE entries SET requestor = ?2 WHERE requestor = ?1",
        params![old, new],
    )?)
}

pub fn update_tags(conn: &Connection, id: i64, tags: &Tags) -> AppResult<()> {
    conn.execute(
        "UPDATE entries SET tags = ?2 WHERE id = ?1",
        params![id, tags.join()],
    )?;
    Ok(())
}

/// `(id, parsed tags)` for every entry.
pub fn load_all_tags(conn: &Connection) -> AppResult<Vec<(i64, Tags)>> {
    let mut stmt = conn.prepare_cached("SELECT id, tags FROM entries ORDER BY id ASC")?;
    let rows = stmt.query_map([], |row| {
        let raw: Option<String> = row.get(1)?;
        Ok((row.get(0)?, Tags::parse(raw.as_deref().unwrap_or_default())))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
