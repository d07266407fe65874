use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::store::EntryStore;
use crate::db::log::ttlog_quiet;
use crate::errors::{AppError, AppResult};
use crate::models::{Tags, WorkEntry};
use crate::ui::messages::{info, success};

/// Change the given fields of an entry; the rest is kept.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        id,
        task,
        requestor,
        hours,
        tags,
    } = cmd
    {
        let mut store = EntryStore::open(&cfg.database)?;
        let current = store.get(*id)?.ok_or(AppError::NotFound(*id))?;

        if task.is_none() && requestor.is_none() && hours.is_none() && tags.is_none() {
            info(format!("Nothing to change for entry #{id}."));
            return Ok(());
        }

        let changed = WorkEntry {
            task: task.clone().unwrap_or(current.task),
            requestor: requestor.clone().unwrap_or(current.requestor),
            duration: hours.unwrap_or(current.duration),
            tags: tags.as_deref().map(Tags::parse).unwrap_or(current.tags),
            ..current
        };

        let updated = store.update(changed)?;

        let mut fields = Vec::new();
        if task.is_some() {
            fields.push("task");
        }
        if requestor.is_some() {
            fields.push("requestor");
        }
        if hours.is_some() {
            fields.push("duration");
        }
        if tags.is_some() {
            fields.push("tags");
        }

        ttlog_quiet(
            store.conn(),
            "edit",
            &format!("#{}", updated.id),
            &format!("Updated {}", fields.join(", ")),
        );
        success(format!("Entry #{} updated ({}).", updated.id, fields.join(", ")));
    }

    Ok(())
}
