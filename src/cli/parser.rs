use clap::{Parser, Subcommand};

/// Command-line interface definition for bicicletario
#[derive(Parser)]
#[command(
    name = "bicicletario",
    version = env!("CARGO_PKG_VERSION"),
    about = "Bicycle parking manager: log entries and exits, browse them by date, get statistics",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

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

    /// Manage the database (integrity checks, info, vacuum)
    Db {
        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Register a bike entering the parking
    Entry {
        /// Client id
        client: String,

        /// Bike id
        bike: String,

        #[arg(long = "at", help = "Entry timestamp (ISO-8601, default: now)")]
        at: Option<String>,

        #[arg(long = "category", help = "Client category copied into the record")]
        category: Option<String>,

        #[arg(long = "overnight", help = "Flag the stay as overnight")]
        overnight: bool,
    },

    /// Register the exit of a parked bike
    Exit {
        /// Record id (or a unique prefix of it)
        id: String,

        #[arg(long = "at", help = "Exit timestamp (ISO-8601, default: now)")]
        at: Option<String>,
    },

    /// Delete a record
    Del {
        /// Record id (or a unique prefix of it)
        id: String,
    },

    /// List records
    List {
        #[arg(
            long,
            short,
            help = "Filter by year/month/day (YYYY, YYYY-MM, YYYY-MM-DD) or 'all'"
        )]
        period: Option<String>,

        #[arg(long = "open", help = "Show only bikes still parked")]
        open: bool,
    },

    /// Show record counts grouped by year, month and day
    Summary {
        #[arg(long = "json", help = "Print the summary as JSON")]
        json: bool,
    },

    /// Usage statistics
    Stats {
        #[arg(long = "weekly", help = "Entries per day over the last 7 days")]
        weekly: bool,

        #[arg(long = "peak", help = "Entries per hour of the day")]
        peak: bool,

        #[arg(long = "report", help = "Accesses and overnights per category and client")]
        report: bool,

        #[arg(long, short, help = "Restrict to a period (YYYY, YYYY-MM, YYYY-MM-DD)")]
        period: Option<String>,
    },

    /// Import records from a CSV sheet or a legacy JSON document
    Import {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long = "legacy", help = "The file is the old nested JSON format")]
        legacy: bool,
    },

    /// List or edit categories
    Category {
        #[arg(long = "add", value_name = "NAME", help = "Add or update a category")]
        add: Option<String>,

        #[arg(long = "emoji", requires = "add", help = "Emoji for the category")]
        emoji: Option<String>,

        #[arg(long = "remove", value_name = "NAME", help = "Remove a category")]
        remove: Option<String>,
    },
}
