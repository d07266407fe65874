use crate::core::store::EntryStore;
use crate::errors::{AppError, AppResult};
use crate::models::FieldKind;

/// Rename or merge tag / requestor values across the whole store.
pub struct TaxonomyEditor;

impl TaxonomyEditor {
    pub fn rename(store: &mut EntryStore, kind: FieldKind, old: &str, new: &str) -> AppResult<usize> {
        let (old, new) = Self::check(kind, old, new)?;
        store.rename_field(kind, old, new)
    }

    pub fn merge(
        store: &mut EntryStore,
        kind: FieldKind,
        source: &str,
        target: &str,
        dedupe: bool,
    ) -> AppResult<usize> {
        let (source, target) = Self::check(kind, source, target)?;
        store.merge_field(kind, source, target, dedupe)
    }

    /// `(from, to)` ready for the store, or `NoOp` when the rewrite would
    /// change nothing. Tag tokens are stored trimmed, so a tag name is trimmed
    /// too; a requestor is matched exactly as stored.
    fn check<'a>(kind: FieldKind, from: &'a str, to: &'a str) -> AppResult<(&'a str, &'a str)> {
        let from = match kind {
            FieldKind::Tag => from.trim(),
            FieldKind::Requestor => from,
        };
        let to = to.trim();

        if from.trim().is_empty() {
            return Err(AppError::NoOp(format!("no {kind} name given")));
        }
        if to.is_empty() {
            return Err(AppError::NoOp(format!("new {kind} name is empty")));
        }
        if from == to {
            return Err(AppError::NoOp(format!("{kind} '{from}' is unchanged")));
        }
        Ok((from, to))
    }
}
