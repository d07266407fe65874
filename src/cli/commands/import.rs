use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::import::ImportLogic;
use crate::core::store::EntryStore;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import { file } = cmd {
        let path = expand_tilde(file);
        let mut store = EntryStore::open(&cfg.database)?;

        let outcome = ImportLogic::import_file(&mut store, &path)?;

        ttlog_quiet(
            store.conn(),
            "import",
            &path.to_string_lossy(),
            &format!(
                "{} imported, {} already present, {} invalid",
                outcome.imported, outcome.skipped_existing, outcome.invalid
            ),
        );

        success(format!(
            "Imported {} entries from {}",
            outcome.imported,
            path.display()
        ));
        if outcome.skipped_existing > 0 {
            warning(format!(
                "{} entries were already present and have been skipped.",
                outcome.skipped_existing
            ));
        }
        if outcome.invalid > 0 {
            warning(format!("{} invalid entries have been skipped.", outcome.invalid));
        }
    }
    Ok(())
}
