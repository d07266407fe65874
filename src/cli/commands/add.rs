use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::store::EntryStore;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::models::NewEntry;
use crate::ui::messages::success;
use crate::utils::formatting::fmt_hours;

/// Record a new entry.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        task,
        requestor,
        hours,
        tags,
    } = cmd
    {
        let mut store = EntryStore::open(&cfg.database)?;
        let entry = store.create(NewEntry::new(task, requestor, *hours, tags))?;

        ttlog_quiet(
            store.conn(),
            "add",
            &format!("#{}", entry.id),
            &format!(
                "{} for {} ({} h)",
                entry.task,
                entry.requestor,
                fmt_hours(entry.duration)
            ),
        );

        success(format!(
            "Entry #{} saved: {} for {} ({} h)",
            entry.id,
            entry.task,
            entry.requestor,
            fmt_hours(entry.duration)
        ));
    }

    Ok(())
}
