use clap::{Parser, Subcommand, ValueEnum};

/// Command-line interface definition for rTimeclock
/// CLI application to clock employees in and out with SQLite
#[derive(Parser)]
#[command(
    name = "rtimeclock",
    version = env!("CARGO_PKG_VERSION"),
    about = "A time clock CLI: validated clock-in/out and breaks, workday totals with paid breaks, using SQLite",
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

/// Clock action as typed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ClockActionArg {
    In,
    Out,
    BreakStart,
    BreakEnd,
    /// Close the current work interval and open one for another project
    Switch,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view, check, migrate or edit)
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

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Record a clock action (validated against the current state)
    Clock {
        #[arg(value_enum)]
        action: ClockActionArg,

        /// Local date of the event (YYYY-MM-DD, default: today; requires --at)
        #[arg(long = "date", requires = "at")]
        date: Option<String>,

        /// Local time of the event (HH:MM, default: now)
        #[arg(long = "at")]
        at: Option<String>,

        #[arg(long = "employee", short = 'u', help = "Employee id (default from config)")]
        employee: Option<String>,

        #[arg(long = "project", help = "Project code (only with `in` or `switch`)")]
        project: Option<String>,
    },

    /// Show the current clock state and today's totals
    Status {
        #[arg(long = "employee", short = 'u', help = "Employee id (default from config)")]
        employee: Option<String>,
    },

    /// List daily totals
    List {
        #[arg(
            long,
            short,
            help = "YYYY, YYYY-MM, YYYY-MM-DD, a FROM:TO range or 'all' (default: current month)"
        )]
        period: Option<String>,

        #[arg(long = "today", help = "Show only today")]
        now: bool,

        #[arg(long = "employee", short = 'u', help = "Employee id (default from config)")]
        employee: Option<String>,

        #[arg(long = "events", help = "List the clock events of each day")]
        events: bool,

        #[arg(long = "details", help = "Show work/break intervals and project minutes")]
        details: bool,

        #[arg(long = "json", help = "Print the summaries as JSON")]
        json: bool,
    },

    /// Insert automatic breaks for paid slots worked through
    Sweep {
        /// Local date to sweep (YYYY-MM-DD, default: today)
        #[arg(long = "date")]
        date: Option<String>,

        #[arg(long = "employee", short = 'u', help = "Employee id (default from config)")]
        employee: Option<String>,

        #[arg(long = "all-employees", conflicts_with = "employee")]
        all_employees: bool,
    },
}
