use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::store::EntryStore;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        force,
    } = cmd
    {
        let store = EntryStore::open(&cfg.database)?;
        let count = ExportLogic::export(&store, *format, file, range.as_deref(), *force)?;

        if count > 0 {
            ttlog_quiet(
                store.conn(),
                "export",
                format.as_str(),
                &format!("{count} entries to {file}"),
            );
        }
    }
    Ok(())
}
