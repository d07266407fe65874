use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup {
        file,
        compress,
        force,
    } = cmd
    {
        let out = BackupLogic::backup(&cfg.database, file, *compress, *force)?;

        let pool = DbPool::new(&cfg.database)?;
        ttlog_quiet(&pool.conn, "backup", &out.to_string_lossy(), "Database backup created");
    }

    Ok(())
}
