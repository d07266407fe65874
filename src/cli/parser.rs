use crate::errors::AppResult;
use crate::export::{ExportFormat, ReportFormat};
use crate::models::{DateRange, FieldKind, Preset};
use crate::utils::date::today;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for rWorklog
/// Personal work log: what was done, for whom, and for how long
#[derive(Parser)]
#[command(
    name = "rworklog",
    version = env!("CARGO_PKG_VERSION"),
    about = "A personal work log CLI: record tasks, requestors and hours, then analyse and report them",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Diagnostic log level on stderr (overrides the configured one)
    #[arg(global = true, long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Period selection shared by list, analytics and report.
#[derive(Args, Debug, Clone, Default)]
pub struct RangeArgs {
    /// First day of the period (YYYY-MM-DD), used with --to
    #[arg(long, value_name = "DATE", requires = "to", conflicts_with_all = ["range", "preset"])]
    pub from: Option<String>,

    /// Last day of the period (YYYY-MM-DD), used with --from
    #[arg(long, value_name = "DATE", requires = "from")]
    pub to: Option<String>,

    /// YYYY, YYYY-MM, YYYY-MM-DD, or two of the same joined by ':'
    #[arg(long, short, value_name = "RANGE", conflicts_with = "preset")]
    pub range: Option<String>,

    /// Shortcut period relative to today
    #[arg(long, value_enum)]
    pub preset: Option<Preset>,
}

impl RangeArgs {
    /// The selected period, or `None` for "everything".
    pub fn resolve(&self) -> AppResult<Option<DateRange>> {
        if let Some(p) = self.preset {
            return Ok(Some(p.resolve(today())));
        }
        if let Some(r) = &self.range {
            return DateRange::parse_expr(r).map(Some);
        }
        DateRange::from_bounds(self.from.as_deref(), self.to.as_deref())
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields with their default values")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal operation log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Record a piece of work
    Add {
        /// What was done
        task: String,

        #[arg(long = "for", value_name = "REQUESTOR", help = "Who asked for it")]
        requestor: String,

        #[arg(
            long,
            value_name = "HOURS",
            allow_negative_numbers = true,
            help = "Time spent, in decimal hours"
        )]
        hours: f64,

        #[arg(long, value_name = "TAGS", default_value = "", help = "Comma-separated tags")]
        tags: String,
    },

    /// List entries, newest first
    List {
        #[command(flatten)]
        range: RangeArgs,
    },

    /// Change fields of an entry (its timestamp is kept)
    Edit {
        id: i64,

        #[arg(long)]
        task: Option<String>,

        #[arg(long = "for", value_name = "REQUESTOR")]
        requestor: Option<String>,

        #[arg(long, allow_negative_numbers = true)]
        hours: Option<f64>,

        #[arg(long, help = "Comma-separated tags; an empty string clears them")]
        tags: Option<String>,
    },

    /// Delete an entry by id
    Del {
        id: i64,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Hours per tag and per requestor
    Analytics {
        #[command(flatten)]
        range: RangeArgs,
    },

    /// How often every tag and requestor is used
    Summary,

    /// Rename a tag or requestor everywhere
    Rename {
        #[arg(value_enum)]
        kind: FieldKind,
        old: String,
        new: String,
    },

    /// Fold one tag or requestor into another
    Merge {
        #[arg(value_enum)]
        kind: FieldKind,
        source: String,
        target: String,

        #[arg(long, help = "Drop tags that appear twice on an entry after merging")]
        dedupe: bool,
    },

    /// Write the weekly report file (default period: this week)
    Report {
        #[command(flatten)]
        range: RangeArgs,

        #[arg(long, value_name = "DIR", help = "Output directory (default: report_dir or Documents)")]
        dir: Option<String>,

        #[arg(long, value_enum)]
        format: Option<ReportFormat>,
    },

    /// Export entries to a file
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Import a legacy JSON document ({"entries": [...]})
    Import {
        #[arg(value_name = "FILE")]
        file: String,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_with_requestor_flag() {
        let cli = Cli::try_parse_from([
            "rworklog", "add", "Fix login", "--for", "Ana", "--hours", "1.5", "--tags", "bug,web",
        ])
        .unwrap();

        match cli.command {
            Commands::Add {
                task,
                requestor,
                hours,
                tags,
            } => {
                assert_eq!(task, "Fix login");
                assert_eq!(requestor, "Ana");
                assert_eq!(hours, 1.5);
                assert_eq!(tags, "bug,web");
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn from_needs_to() {
        assert!(Cli::try_parse_from(["rworklog", "list", "--from", "2025-01-01"]).is_err());
    }

    #[test]
    fn range_and_preset_conflict() {
        assert!(
            Cli::try_parse_from(["rworklog", "analytics", "--range", "2025", "--preset", "week"]).is_err()
        );
    }

    #[test]
    fn range_expression_resolves() {
        let args = RangeArgs {
            range: Some("2025-02".into()),
            ..RangeArgs::default()
        };
        let r = args.resolve().unwrap().unwrap();
        assert_eq!(r.start.to_string(), "2025-02-01");
        assert_eq!(r.end.to_string(), "2025-02-28");
        assert!(RangeArgs::default().resolve().unwrap().is_none());
    }
}
