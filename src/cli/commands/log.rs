use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::core::store::EntryStore;
use crate::errors::AppResult;
use crate::ui::messages::info;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    match cmd {
        Commands::Log { print: true } => {
            let store = EntryStore::open(&cfg.database)?;
            LogLogic::print_log(store.conn())?;
        }
        Commands::Log { print: false } => info("Use --print to show the internal log."),
        _ => {}
    }

    Ok(())
}
