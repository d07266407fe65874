use crate::config::Config;
use crate::core::store::EntryStore;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::ui::view::ViewContext;

/// Tag and requestor usage over the whole log.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let store = EntryStore::open(&cfg.database)?;
    let entries = store.list_all()?;

    header("Management summary", &cfg.separator_char);
    print!("{}", ViewContext::new(&entries, cfg).render_summary());
    Ok(())
}
