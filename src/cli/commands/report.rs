use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::report::build_weekly_report;
use crate::core::store::EntryStore;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::export::write_report;
use crate::models::Preset;
use crate::ui::messages::{info, success};
use crate::utils::date::today;
use crate::utils::formatting::fmt_hours;
use crate::utils::path::expand_tilde;
use chrono::Local;

/// Build the weekly report and write it to the report directory.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report { range, dir, format } = cmd {
        let period = range
            .resolve()?
            .unwrap_or_else(|| Preset::Week.resolve(today()));

        let store = EntryStore::open(&cfg.database)?;
        let entries = store.list_all()?;

        let now = Local::now();
        let report = build_weekly_report(&entries, &period, &Local, &now);

        let out_dir = dir
            .as_deref()
            .map(expand_tilde)
            .unwrap_or_else(|| cfg.report_directory());
        let format = format.unwrap_or(cfg.report_format);

        let path = write_report(&report, &out_dir, &period, now.date_naive(), format)?;

        ttlog_quiet(
            store.conn(),
            "report",
            &period.to_string(),
            &path.to_string_lossy(),
        );

        info(format!(
            "Period {period}: {} entries, {} hours",
            report.summary.total_entries,
            fmt_hours(report.summary.total_hours)
        ));
        success(format!("Weekly report written: {}", path.display()));
    }
    Ok(())
}
