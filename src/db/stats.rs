use crate::db::pool::DbPool;
use crate::models::entry::parse_timestamp;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) TOTALS
    //
    let (count, hours): (i64, f64) = pool.conn.query_row(
        "SELECT COUNT(*), IFNULL(SUM(duration), 0) FROM entries",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;
    println!(
        "{}• Total entries:{} {}{}{}",
        CYAN, RESET, GREEN, count, RESET
    );
    println!("{}• Total hours:{} {:.2}", CYAN, RESET, hours);

    //
    // 3) DATE RANGE
    //
    let first: Option<String> = pool
        .conn
        .query_row(
            "SELECT timestamp FROM entries ORDER BY timestamp ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last: Option<String> = pool
        .conn
        .query_row(
            "SELECT timestamp FROM entries ORDER BY timestamp DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let fmt_day = |ts: &Option<String>| {
        ts.as_deref()
            .and_then(parse_timestamp)
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| format!("{GREY}--{RESET}"))
    };

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt_day(&first));
    println!("    to:   {}", fmt_day(&last));

    //
    // 4) AVERAGE HOURS/DAY
    //
    if let (Some(f), Some(l)) = (
        first.as_deref().and_then(parse_timestamp),
        last.as_deref().and_then(parse_timestamp),
    ) {
        let days = (l.date_naive() - f.date_naive()).num_days().max(1);
        println!(
            "{}• Average hours/day:{} {:.2}",
            CYAN,
            RESET,
            hours / days as f64
        );
    }

    println!();
    Ok(())
}
