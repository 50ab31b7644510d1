use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for teamlog
/// Team work reports kept in a shared workbook
#[derive(Parser)]
#[command(
    name = "teamlog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Team activity log: submit work reports to a shared workbook, browse, chart and archive them",
    long_about = None
)]
pub struct Cli {
    /// Override workbook path (useful for tests or a second team)
    #[arg(global = true, long = "workbook")]
    pub workbook: Option<String>,

    /// Override the service credential file
    #[arg(global = true, long = "credentials")]
    pub credentials: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the workbook, its sheets and headers, and grant the credential
    Init,

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Report fields missing from the configuration file")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Editor to use with --edit")]
        editor: Option<String>,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Submit a work report
    Add {
        /// Your name
        #[arg(long = "name", short = 'n')]
        name: String,

        /// Team area (one of the configured areas, case-insensitive)
        #[arg(long = "area", short = 'a')]
        area: String,

        /// What was done
        #[arg(required = true, num_args = 1..)]
        task: Vec<String>,
    },

    /// List reports, newest first
    List {
        /// Only this area ("All" for every area)
        #[arg(long, default_value = "All")]
        area: String,

        /// Only today's reports
        #[arg(long = "today", conflicts_with_all = ["day", "month", "from"])]
        today: bool,

        /// Only reports of this day (YYYY-MM-DD)
        #[arg(long, conflicts_with_all = ["month", "from"])]
        day: Option<String>,

        /// Only reports of this month (M, MM or YYYY-MM)
        #[arg(long, conflicts_with = "from")]
        month: Option<String>,

        /// With a bare month number: match that month in every year
        #[arg(long = "any-year", requires = "month", conflicts_with = "year")]
        any_year: bool,

        /// With a bare month number: the year to use (default: current year)
        #[arg(long, requires = "month")]
        year: Option<i32>,

        /// Start of a date range (YYYY-MM-DD, inclusive)
        #[arg(long, requires = "to")]
        from: Option<String>,

        /// End of a date range (YYYY-MM-DD, inclusive)
        #[arg(long, requires = "from")]
        to: Option<String>,

        /// List the archive instead of the active reports
        #[arg(long)]
        archive: bool,
    },

    /// Show the day's leader, the month's distribution and the goal countdown
    Stats {
        /// Month view ignores the year
        #[arg(long = "any-year")]
        any_year: bool,
    },

    /// Move a report to the archive (admin)
    Archive {
        /// Data row number as shown by `list`
        #[arg(long, conflicts_with = "key", required_unless_present = "key")]
        index: Option<usize>,

        /// Report key (or an unambiguous prefix of at least 4 characters)
        #[arg(long)]
        key: Option<String>,

        /// Admin password (otherwise $TEAMLOG_ADMIN_PASSWORD or a prompt)
        #[arg(long)]
        password: Option<String>,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Delete the most recent row without archiving it (admin)
    Undo {
        #[arg(long)]
        password: Option<String>,

        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Finish archives interrupted between copy and removal (admin)
    Recover {
        #[arg(long)]
        password: Option<String>,
    },

    /// Show or change the goal settings
    Settings {
        /// New goal name
        #[arg(long, requires = "date")]
        goal: Option<String>,

        /// New target date (YYYY-MM-DD)
        #[arg(long, requires = "goal")]
        date: Option<String>,

        #[arg(long)]
        password: Option<String>,
    },

    /// Export reports to a file
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        /// Output file path (absolute path required)
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Only this area
        #[arg(long, default_value = "All")]
        area: String,

        /// Export the archive instead of the active reports
        #[arg(long)]
        archive: bool,

        /// Overwrite an existing file
        #[arg(long, short = 'f')]
        force: bool,
    },
}
