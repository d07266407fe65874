use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::store::EntryStore;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::ui::view::ViewContext;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Analytics { range } = cmd {
        let period = range.resolve()?;
        let store = EntryStore::open(&cfg.database)?;
        let entries = store.list_all()?;

        header("Analytics", &cfg.separator_char);
        print!("{}", ViewContext::new(&entries, cfg).render_analytics(period.as_ref()));
    }
    Ok(())
}
