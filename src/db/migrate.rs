use crate::ui::messages::{success, warning};
use rusqlite::{Connection, Error, OptionalExtension, Result};

/// Versioned schema changes, applied in order once each.
/// A migration counts as applied when a `migration_applied` row with its
/// version exists in the `log` table.
const MIGRATIONS: &[(&str, &str, &str)] = &[
    (
        "20250210_0002_entries_indexes",
        "Added timestamp and requestor indexes to entries",
        r#"
        CREATE INDEX IF NOT EXISTS idx_entries_timestamp ON entries(timestamp);
        CREATE INDEX IF NOT EXISTS idx_entries_requestor ON entries(requestor);
        "#,
    ),
    (
        "20250415_0003_log_operation_index",
        "Added operation index to log",
        r#"
        CREATE INDEX IF NOT EXISTS idx_log_operation ON log(operation, target);
        "#,
    ),
];

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Create the `entries` collection.
fn create_entries_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS entries (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            task       TEXT NOT NULL,
            requestor  TEXT NOT NULL,
            duration   REAL NOT NULL DEFAULT 0 CHECK(duration >= 0),
            tags       TEXT NOT NULL DEFAULT '',
            timestamp  TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Versions not yet recorded in the `log` table.
pub fn pending_migrations(conn: &Connection) -> Result<Vec<&'static str>> {
    if !table_exists(conn, "log")? {
        return Ok(MIGRATIONS.iter().map(|(v, _, _)| *v).collect());
    }

    let mut out = Vec::new();
    for (version, _, _) in MIGRATIONS {
        if !is_applied(conn, version)? {
            out.push(*version);
        }
    }
    Ok(out)
}

fn apply_migration(conn: &Connection, version: &str, description: &str, sql: &str) -> Result<()> {
    conn.execute_batch(&format!("BEGIN;\n{sql}\nCOMMIT;"))
        .map_err(|e| {
            let _ = conn.execute_batch("ROLLBACK;");
            Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some(format!("Migration {version} failed: {e}")),
            )
        })?;

    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, description],
    )?;

    tracing::debug!(version, "migration applied");
    Ok(())
}

fn backup_before_migration(db_path: &str) -> Result<()> {
    use chrono::Local;
    use std::fs::{self, File};
    use std::io::Write;
    use zip::CompressionMethod;
    use zip::ZipWriter;
    use zip::write::FileOptions;

    let to_sql_err = |what: &str, e: &dyn std::fmt::Display| {
        Error::ToSqlConversionFailure(Box::new(std::io::Error::other(format!(
            "Backup failed ({what}): {e}"
        ))))
    };

    let backup_name = format!(
        "{}-backup_db_pre_migration.zip",
        Local::now().format("%Y%m%d_%H%M%S")
    );

    let Some(parent) = std::path::Path::new(db_path).parent() else {
        warning("Could not determine DB directory, backup skipped.");
        return Ok(());
    };
    let backup_path = parent.join(&backup_name);

    let file = File::create(&backup_path).map_err(|e| to_sql_err("create", &e))?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("database.sqlite", options)
        .map_err(|e| to_sql_err("start_file", &e))?;

    let db_content = fs::read(db_path).map_err(|e| to_sql_err("read", &e))?;
    zip.write_all(&db_content)
        .map_err(|e| to_sql_err("write_all", &e))?;
    zip.finish().map_err(|e| to_sql_err("finish", &e))?;

    success(format!("📦 Backup created: {}", backup_path.display()));
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db(). Safe to call on every open.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Existing data + pending versions → safety backup first
    let entries_exists = table_exists(conn, "entries")?;
    let pending = pending_migrations(conn)?;

    if entries_exists && !pending.is_empty() {
        let has_rows: bool = conn
            .query_row("SELECT EXISTS(SELECT 1 FROM entries)", [], |row| row.get(0))?;

        let db_path: String = conn
            .query_row("PRAGMA database_list;", [], |row| row.get::<_, String>(2))
            .unwrap_or_default();

        if has_rows && !db_path.is_empty() {
            warning("Pending schema changes detected, creating safety backup first...");
            backup_before_migration(&db_path)?;
        }
    }

    // 3) Base collection
    if !entries_exists {
        create_entries_table(conn)?;
        tracing::debug!("created entries table");
    }

    // 4) Versioned changes
    for (version, description, sql) in MIGRATIONS {
        if pending.contains(version) {
            apply_migration(conn, version, description, sql)?;
            if entries_exists {
                success(format!("Migration applied: {version} → {description}"));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        run_pending_migrations(&conn).unwrap();

        assert!(table_exists(&conn, "entries").unwrap());
        assert!(pending_migrations(&conn).unwrap().is_empty());

        let applied: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(applied, MIGRATIONS.len() as i64);
    }
}
