use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::ui::messages::success;
use rusqlite::Connection;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite database with its tables and migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    // 1️⃣ config + empty database file
    let db_path = Config::init_all(cli.db.as_deref(), cli.test)?;
    let db = db_path.to_string_lossy().to_string();

    println!("⚙️  Initializing rWorklog…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Database   : {}", db);

    // 2️⃣ tables + migrations
    let conn = Connection::open(&db_path)?;
    init_db(&conn)?;

    // 3️⃣ internal log (non blocking)
    ttlog_quiet(&conn, "init", "Database initialized", &format!("Database initialized at {db}"));

    success(format!("Database initialized at {db}"));
    Ok(())
}
