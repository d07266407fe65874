//! `rename` and `merge`: bulk rewrites of a tag or requestor.

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::store::EntryStore;
use crate::core::taxonomy::TaxonomyEditor;
use crate::db::log::ttlog_quiet;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let mut store = EntryStore::open(&cfg.database)?;

    let (op, kind, from, to, outcome) = match cmd {
        Commands::Rename { kind, old, new } => (
            "rename",
            *kind,
            old,
            new,
            TaxonomyEditor::rename(&mut store, *kind, old, new),
        ),
        Commands::Merge {
            kind,
            source,
            target,
            dedupe,
        } => (
            "merge",
            *kind,
            source,
            target,
            TaxonomyEditor::merge(&mut store, *kind, source, target, *dedupe),
        ),
        _ => return Ok(()),
    };

    match outcome {
        Ok(0) => info(format!("No entry uses {kind} '{}'.", from.trim())),
        Ok(n) => {
            ttlog_quiet(
                store.conn(),
                op,
                &format!("{kind} {} -> {}", from.trim(), to.trim()),
                &format!("{n} entries updated"),
            );
            let (verb, prep) = if op == "rename" {
                ("Renamed", "to")
            } else {
                ("Merged", "into")
            };
            success(format!(
                "{verb} {kind} '{}' {prep} '{}': {n} entries updated.",
                from.trim(),
                to.trim()
            ));
        }
        // nothing was written; not a failure
        Err(AppError::NoOp(msg)) => warning(format!("Nothing to do: {msg}")),
        Err(e) => return Err(e),
    }

    Ok(())
}
