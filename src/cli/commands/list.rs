use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::store::EntryStore;
use crate::errors::AppResult;
use crate::ui::view::ViewContext;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { range } = cmd {
        let period = range.resolve()?;
        let store = EntryStore::open(&cfg.database)?;
        let entries = store.list_all()?;

        let view = ViewContext::new(&entries, cfg);
        print!("{}", view.render_entries(period.as_ref()));
    }
    Ok(())
}
