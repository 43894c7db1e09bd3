use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shift_engine::CalendarDate;

/// Rotating 4-on/4-off shift calendar with vacation overrides.
#[derive(Parser)]
#[command(
    name = "shiftcal",
    version,
    about = "Rotating 4-on/4-off shift calendar with vacation overrides"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Directory holding the vacation file (overrides the config file).
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Path to a TOML config file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Show a month grid.
    Month(MonthArgs),
    /// Show who is on shift for one day, and any vacation.
    Day(DayArgs),
    /// Manage vacations.
    #[command(subcommand)]
    Vacation(VacationCommand),
}

/// Arguments for the `month` subcommand.
#[derive(clap::Args)]
pub struct MonthArgs {
    /// Year to show (defaults to the current year).
    #[arg(long)]
    pub year: Option<i32>,

    /// Month to show, 1-12 (defaults to the current month).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,

    /// Evaluate as if today were this date (YYYY-MM-DD).
    #[arg(long)]
    pub today: Option<CalendarDate>,
}

/// Arguments for the `day` subcommand.
#[derive(clap::Args)]
pub struct DayArgs {
    /// Date to inspect (YYYY-MM-DD).
    pub date: CalendarDate,

    /// Evaluate as if today were this date (YYYY-MM-DD).
    #[arg(long)]
    pub today: Option<CalendarDate>,
}

/// Vacation management subcommands.
#[derive(Subcommand)]
pub enum VacationCommand {
    /// Add a vacation.
    Add(VacationFields),
    /// Replace the fields of an existing vacation.
    Update {
        /// Vacation id.
        id: String,
        #[command(flatten)]
        fields: VacationFields,
    },
    /// Delete a vacation.
    Delete {
        /// Vacation id.
        id: String,
    },
    /// List all vacations by start date.
    List,
}

/// Editable vacation fields.
#[derive(clap::Args)]
pub struct VacationFields {
    /// Display label.
    #[arg(long)]
    pub label: String,

    /// First day (YYYY-MM-DD).
    #[arg(long)]
    pub start: CalendarDate,

    /// Last day, inclusive (YYYY-MM-DD).
    #[arg(long)]
    pub end: CalendarDate,

    /// Free-form notes.
    #[arg(long)]
    pub notes: Option<String>,
}
