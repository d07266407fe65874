use crate::cli::commands::ask_confirmation;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::store::EntryStore;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id, yes } = cmd {
        let mut store = EntryStore::open(&cfg.database)?;

        // deleting an unknown id is not an error
        let Some(entry) = store.get(*id)? else {
            info(format!("Entry #{id} does not exist, nothing deleted."));
            return Ok(());
        };

        if !*yes
            && !ask_confirmation(&format!(
                "Delete entry #{} \"{}\" ({})? This action is irreversible.",
                entry.id, entry.task, entry.requestor
            ))
        {
            info("Operation cancelled.");
            return Ok(());
        }

        store.delete(*id)?;
        ttlog_quiet(store.conn(), "del", &format!("#{id}"), &entry.task);
        success(format!("Entry #{id} has been deleted."));
    }

    Ok(())
}
