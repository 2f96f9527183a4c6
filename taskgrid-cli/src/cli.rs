//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use taskgrid_lib::model::ColumnType;
use taskgrid_lib::navigation::Route;

#[derive(Parser)]
#[command(
    name = "taskgrid",
    version,
    about = "Edit task tables from the command line",
    long_about = "Edit typed task tables from the command line.\n\n\
                  Each page (/, /task1, /task2, /task3) keeps its own table, \
                  saved between runs. Tables can be loaded from the sheet service with `sync`."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Page to work on, by path (`/task1`) or name (`task1`).
    #[arg(long, short = 'r', default_value = "/", global = true)]
    pub route: Route,

    /// Fail on unknown ids, bad indexes and malformed sheets instead of ignoring them.
    #[arg(long, global = true)]
    pub strict: bool,

    /// Directory holding the table database (default: platform data dir).
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Rows to select before running the command (repeatable or comma-separated).
    /// The selection is not saved between runs.
    #[arg(long = "select", short = 's', value_name = "ROW", value_delimiter = ',', global = true)]
    pub select: Vec<String>,

    /// Increase log verbosity (-v for debug, -vv for trace).
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// Replace the table with a sheet from the sheet service.
    Sync(SyncArgs),

    /// Print the table.
    Show,

    /// Add a column at the front of the table.
    AddColumn {
        /// Column name.
        name: String,
        /// Column type.
        #[arg(long = "type", short = 't', default_value = "text")]
        kind: ColumnType,
        /// Option for select columns (repeatable).
        #[arg(long = "option", short = 'o', value_name = "TEXT")]
        options: Vec<String>,
    },

    /// Change a column's name, type or options.
    EditColumn {
        /// Column id.
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long = "type", short = 't')]
        kind: Option<ColumnType>,
        /// Replace the options (repeatable).
        #[arg(long = "option", short = 'o', value_name = "TEXT")]
        options: Vec<String>,
    },

    /// Delete a column and its cells.
    DeleteColumn {
        /// Column id.
        id: String,
    },

    /// Move the column at one position to another (0-based).
    MoveColumn { from: usize, to: usize },

    /// Append an empty row.
    AddRow,

    /// Delete a row.
    DeleteRow {
        /// Row id.
        id: String,
    },

    /// Set one cell. Pass several values for multi-select and file columns;
    /// pass none to clear the cell.
    SetCell {
        /// Row id.
        row: String,
        /// Column id.
        column: String,
        values: Vec<String>,
    },

    /// Toggle rows in the selection and show the result.
    Select {
        /// Row ids.
        #[arg(required = true)]
        rows: Vec<String>,
    },

    /// Select every row, or clear the selection if every row is selected.
    SelectAll,

    /// Delete every selected row (pick them with --select).
    DeleteSelected,

    /// Drag a row (with the selection, if it is selected) onto another row.
    Drag {
        /// Row picked up.
        row: String,
        /// Row dropped on.
        #[arg(long)]
        onto: String,
    },

    /// Clear the table.
    Clear {
        /// Keep the columns and drop only the rows.
        #[arg(long = "rows-only")]
        rows_only: bool,
    },
}

#[derive(clap::Args)]
pub struct SyncArgs {
    /// Project id on the sheet service.
    #[arg(long, default_value_t = 86)]
    pub project: u64,

    /// Schedule id on the sheet service.
    #[arg(long, default_value_t = 158)]
    pub schedule: u64,

    /// Override the sheet service URL.
    #[arg(long = "base-url", value_name = "URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    pub timeout: u64,
}
