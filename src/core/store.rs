//! Record store: the durable collection of work entries.
//!
//! Every mutating call runs in a single SQLite transaction, so a failed
//! write leaves the stored collection exactly as it was.

use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::entry::format_timestamp;
use crate::models::{FieldKind, NewEntry, WorkEntry};
use chrono::{DateTime, Utc};
use rusqlite::Connection;

pub struct EntryStore {
    pool: DbPool,
}

impl EntryStore {
    /// Open (and bootstrap, if needed) the store at `path`.
    pub fn open(path: &str) -> AppResult<Self> {
        Self::from_pool(DbPool::new(path)?)
    }

    pub fn from_pool(pool: DbPool) -> AppResult<Self> {
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    pub fn conn(&self) -> &Connection {
        &self.pool.conn
    }

    pub fn pool_mut(&mut self) -> &mut DbPool {
        &mut self.pool
    }

    /// Store a new entry stamped with the current time.
    pub fn create(&mut self, new: NewEntry) -> AppResult<WorkEntry> {
        self.create_at(new, Utc::now())
    }

    /// Store a new entry stamped with `now`.
    pub fn create_at(&mut self, new: NewEntry, now: DateTime<Utc>) -> AppResult<WorkEntry> {
        new.validate()?;
        let timestamp = format_timestamp(&now);

        let id = self.pool.with_tx(|tx| {
            queries::insert_entry(
                tx,
                &new.task,
                &new.requestor,
                new.duration,
                &new.tags,
                &timestamp,
            )
        })?;

        tracing::debug!(id, "entry created");

        Ok(WorkEntry {
            id,
            task: new.task,
            requestor: new.requestor,
            duration: new.duration,
            tags: new.tags,
            timestamp,
        })
    }

    /// All entries in insertion order.
    pub fn list_all(&self) -> AppResult<Vec<WorkEntry>> {
        queries::load_all_entries(&self.pool.conn)
    }

    pub fn get(&self, id: i64) -> AppResult<Option<WorkEntry>> {
        queries::load_entry(&self.pool.conn, id)
    }

    /// Overwrite task, requestor, duration and tags of an existing entry.
    /// The stored timestamp is kept whatever `entry.timestamp` says.
    pub fn update(&mut self, entry: WorkEntry) -> AppResult<WorkEntry> {
        entry.validate()?;

        let updated = self.pool.with_tx(|tx| -> AppResult<WorkEntry> {
            let existing = queries::load_entry(tx, entry.id)?.ok_or(AppError::NotFound(entry.id))?;

            let updated = WorkEntry {
                timestamp: existing.timestamp,
                ..entry
            };

            if !queries::update_entry(tx, &updated)? {
                return Err(AppError::NotFound(updated.id));
            }
            Ok(updated)
        })?;

        tracing::debug!(id = updated.id, "entry updated");
        Ok(updated)
    }

    /// Remove an entry. Succeeds whether or not the id existed.
    pub fn delete(&mut self, id: i64) -> AppResult<bool> {
        let removed = self.pool.with_tx(|tx| queries::delete_entry(tx, id))?;
        tracing::debug!(id, removed, "entry delete");
        Ok(true)
    }

    /// Replace `old` with `new` in the given field of every entry.
    /// Returns the number of entries that changed.
    pub fn rename_field(&mut self, kind: FieldKind, old: &str, new: &str) -> AppResult<usize> {
        self.rewrite_field(kind, old, new, false)
    }

    /// Fold `source` into `target`. Same rewrite as [`rename_field`](Self::rename_field);
    /// with `dedupe` set, merged tag lists drop the repeated `target` tokens.
    pub fn merge_field(
        &mut self,
        kind: FieldKind,
        source: &str,
        target: &str,
        dedupe: bool,
    ) -> AppResult<usize> {
        self.rewrite_field(kind, source, target, dedupe)
    }

    fn rewrite_field(
        &mut self,
        kind: FieldKind,
        from: &str,
        to: &str,
        dedupe: bool,
    ) -> AppResult<usize> {
        let changed = self.pool.with_tx(|tx| -> AppResult<usize> {
            match kind {
                FieldKind::Requestor => queries::update_requestor(tx, from, to),
                FieldKind::Tag => {
                    let mut changed = 0;
                    for (id, mut tags) in queries::load_all_tags(tx)? {
                        if tags.replace(from, to) {
                            if dedupe {
                                tags.dedup();
                            }
                            queries::update_tags(tx, id, &tags)?;
                            changed += 1;
                        }
                    }
                    Ok(changed)
                }
            }
        })?;

        tracing::debug!(%kind, from, to, changed, "field rewritten");
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aggregate::{sum_by_tag, total_duration};
    use crate::models::Tags;
    use chrono::TimeZone;

    fn store() -> EntryStore {
        EntryStore::from_pool(DbPool::in_memory().unwrap()).unwrap()
    }

    fn scenario(store: &mut EntryStore) -> (WorkEntry, WorkEntry) {
        let a = store.create(NewEntry::new("X", "R1", 3.0, "t1")).unwrap();
        let b = store.create(NewEntry::new("Y", "R1", 2.0, "t1,t2")).unwrap();
        (a, b)
    }

    #[test]
    fn create_then_list_returns_exactly_the_stored_record() {
        let mut s = store();
        let now = Utc.with_ymd_and_hms(2025, 3, 3, 10, 30, 0).unwrap();
        let created = s
            .create_at(NewEntry::new("Write docs", "Alice", 1.5, "docs, writing"), now)
            .unwrap();

        assert_eq!(created.timestamp, "2025-03-03T10:30:00.000Z");
        assert_eq!(created.tags.as_slice(), ["docs", "writing"]);

        let all = s.list_all().unwrap();
        assert_eq!(all, vec![created]);
    }

    #[test]
    fn failed_tag_rewrite_leaves_every_row_untouched() {
        let mut s = store();
        let (a, b) = scenario(&mut s);
        s.conn()
            .execute_batch(&format!(
                "CREATE TRIGGER reject_second BEFORE UPDATE ON entries
                 WHEN NEW.id = {} BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
                b.id
            ))
            .unwrap();

        let err = s.rename_field(FieldKind::Tag, "t1", "t3").unwrap_err();
        assert!(matches!(err, AppError::Persistence(_)));

        let raw_tags = |id: i64| -> String {
            s.conn()
                .query_row("SELECT tags FROM entries WHERE id = ?1", [id], |r| r.get(0))
                .unwrap()
        };
        assert_eq!(raw_tags(a.id), "t1");
        assert_eq!(raw_tags(b.id), "t1, t2");
        assert_eq!(s.list_all().unwrap(), vec![a, b]);
    }

    #[test]
    fn ids_are_monotonic_and_never_reused() {
        let mut s = store();
        let a = s.create(NewEntry::new("A", "R", 1.0, "")).unwrap();
        let b = s.create(NewEntry::new("B", "R", 1.0, "")).unwrap();
        assert!(b.id > a.id);

        s.delete(b.id).unwrap();
        let c = s.create(NewEntry::new("C", "R", 1.0, "")).unwrap();
        assert!(c.id > b.id);
    }

    #[test]
    fn invalid_entries_are_not_written() {
        let mut s = store();
        let err = s.create(NewEntry::new("", "R", 1.0, "")).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(s.list_all().unwrap().is_empty());
    }

    #[test]
    fn update_keeps_timestamp() {
        let mut s = store();
        let created = s.create(NewEntry::new("X", "R1", 3.0, "t1")).unwrap();

        let edited = WorkEntry {
            task: "X2".into(),
            duration: 4.5,
            tags: Tags::parse("t9"),
            timestamp: "1999-01-01T00:00:00.000Z".into(),
            ..created.clone()
        };
        let updated = s.update(edited).unwrap();

        assert_eq!(updated.timestamp, created.timestamp);
        assert_eq!(updated.task, "X2");

        let stored = s.get(created.id).unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[test]
    fn update_of_unknown_id_fails_with_not_found() {
        let mut s = store();
        let created = s.create(NewEntry::new("X", "R1", 3.0, "")).unwrap();
        let ghost = WorkEntry {
            id: created.id + 100,
            ..created
        };
        assert!(matches!(s.update(ghost), Err(AppError::NotFound(_))));
    }

    #[test]
    fn update_validates_before_writing() {
        let mut s = store();
        let created = s.create(NewEntry::new("X", "R1", 3.0, "")).unwrap();
        let bad = WorkEntry {
            duration: -1.0,
            ..created.clone()
        };
        assert!(matches!(s.update(bad), Err(AppError::Validation(_))));
        assert_eq!(s.get(created.id).unwrap().unwrap(), created);
    }

    #[test]
    fn delete_is_idempotent() {
        let mut s = store();
        let (a, b) = scenario(&mut s);

        assert!(s.delete(a.id).unwrap());
        assert!(s.delete(a.id).unwrap());

        let ids: Vec<i64> = s.list_all().unwrap().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![b.id]);
    }

    #[test]
    fn tag_rename_replaces_every_occurrence() {
        let mut s = store();
        scenario(&mut s);

        let changed = s.rename_field(FieldKind::Tag, "t1", "t3").unwrap();
        assert_eq!(changed, 2);

        let sums = sum_by_tag(&s.list_all().unwrap());
        assert!(!sums.contains_key("t1"));
        assert_eq!(sums.get("t3"), Some(&5.0));
        assert_eq!(sums.get("t2"), Some(&2.0));
    }

    #[test]
    fn tag_rewrite_joins_with_comma_space() {
        let mut s = store();
        let (_, b) = scenario(&mut s);
        s.rename_field(FieldKind::Tag, "t2", "t4").unwrap();

        let raw: String = s
            .conn()
            .query_row("SELECT tags FROM entries WHERE id = ?1", [b.id], |r| r.get(0))
            .unwrap();
        assert_eq!(raw, "t1, t4");
    }

    #[test]
    fn requestor_rename_is_exact_match() {
        let mut s = store();
        scenario(&mut s);
        s.create(NewEntry::new("Z", "R10", 1.0, "")).unwrap();

        let changed = s.rename_field(FieldKind::Requestor, "R1", "Bob").unwrap();
        assert_eq!(changed, 2);

        let requestors: Vec<String> = s
            .list_all()
            .unwrap()
            .into_iter()
            .map(|e| e.requestor)
            .collect();
        assert_eq!(requestors, ["Bob", "Bob", "R10"]);
        assert_eq!(total_duration(&s.list_all().unwrap()), 6.0);
    }

    #[test]
    fn merge_keeps_duplicate_tokens_unless_deduped() {
        let mut s = store();
        let (_, b) = scenario(&mut s);

        s.merge_field(FieldKind::Tag, "t2", "t1", false).unwrap();
        assert_eq!(s.get(b.id).unwrap().unwrap().tags.as_slice(), ["t1", "t1"]);

        let mut s = store();
        let (_, b) = scenario(&mut s);
        s.merge_field(FieldKind::Tag, "t2", "t1", true).unwrap();
        assert_eq!(s.get(b.id).unwrap().unwrap().tags.as_slice(), ["t1"]);
    }
}
