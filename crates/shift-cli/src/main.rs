//! `shiftcal` CLI — view the rotating shift calendar and manage vacations.
//!
//! ## Usage
//!
//! ```sh
//! # Current month
//! shiftcal month
//!
//! # A specific month, evaluated as of a fixed "today"
//! shiftcal month --year 2024 --month 3 --today 2024-03-01
//!
//! # Who is on shift on a given day
//! shiftcal day 2024-03-11
//!
//! # Vacations
//! shiftcal vacation add --label Trip --start 2024-03-10 --end 2024-03-12
//! shiftcal vacation update <id> --label Trip --start 2024-03-10 --end 2024-03-14
//! shiftcal vacation delete <id>
//! shiftcal vacation list --json
//! ```

mod cli;
mod config;
mod logging;
mod render;

use std::process;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use serde::Serialize;
use shift_engine::{CalendarDate, FileStorage, ShiftEngine, VacationDraft, YearMonth};
use tracing::info;

use crate::cli::{Cli, Command, VacationCommand, VacationFields};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = config::load(cli.config.as_deref())?;
    let data_dir = config::resolve_data_dir(cli.data_dir, &config)?;
    info!(data_dir = %data_dir.display(), "opening vacation store");

    let mut engine = ShiftEngine::new(FileStorage::new(data_dir)).with_roster(config.roster);
    let json = cli.json;

    match cli.command {
        Command::Month(args) => {
            let today = args.today.unwrap_or_else(local_today);
            let year = args.year.unwrap_or(today.year());
            let month = args.month.unwrap_or(today.month());
            let ym = YearMonth::new(year, month).with_context(|| {
                format!(
                    "year {year} is outside the supported range {}..={}",
                    YearMonth::min_year(),
                    YearMonth::max_year()
                )
            })?;

            let view = engine.month_grid(ym, today);
            if json {
                print_json(&view)?;
            } else {
                print!("{}", render::month(&view, engine.roster()));
            }
        }
        Command::Day(args) => {
            let today = args.today.unwrap_or_else(local_today);
            let detail = engine.day_detail(args.date, today);
            if json {
                print_json(&detail)?;
            } else {
                print!("{}", render::day(&detail, engine.roster()));
            }
        }
        Command::Vacation(VacationCommand::Add(fields)) => {
            let record = engine
                .create_vacation(draft(fields))
                .context("failed to add vacation")?;
            if json {
                print_json(&record)?;
            } else {
                println!("Added {}", render::vacation_line(&record));
            }
        }
        Command::Vacation(VacationCommand::Update { id, fields }) => {
            let record = engine
                .update_vacation(&id, draft(fields))
                .context("failed to update vacation")?;
            if json {
                print_json(&record)?;
            } else {
                println!("Updated {}", render::vacation_line(&record));
            }
        }
        Command::Vacation(VacationCommand::Delete { id }) => {
            let removed = engine
                .delete_vacation(&id)
                .context("failed to delete vacation")?;
            if json {
                print_json(&serde_json::json!({ "id": id, "deleted": removed }))?;
            } else if removed {
                println!("Deleted {id}");
            } else {
                println!("No vacation with id {id}");
            }
        }
        Command::Vacation(VacationCommand::List) => {
            let vacations = engine.vacations();
            if json {
                print_json(&vacations)?;
            } else {
                print!("{}", render::vacation_list(&vacations));
            }
        }
    }

    Ok(())
}

fn local_today() -> CalendarDate {
    CalendarDate::normalize(&Local::now())
}

fn draft(fields: VacationFields) -> VacationDraft {
    let draft = VacationDraft::new(fields.label, fields.start, fields.end);
    match fields.notes {
        Some(notes) => draft.with_notes(notes),
        None => draft,
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let pretty = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{pretty}");
    Ok(())
}
