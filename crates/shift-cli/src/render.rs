//! Plain-text rendering of engine views.

use std::fmt::Write;

use shift_engine::{DayCell, DayDetail, DisplayState, MonthView, RosterConfig, VacationRecord};

const CELL_WIDTH: usize = 6;

fn marker(cell: &DayCell<'_>) -> char {
    match cell.display() {
        DisplayState::Vacation(_) => 'V',
        DisplayState::Shift(role) if role.is_on() => '+',
        DisplayState::Shift(_) => '-',
    }
}

/// One cell, always `CELL_WIDTH` wide. Outside-month days are parenthesized.
fn cell_text(cell: &DayCell<'_>) -> String {
    let today = if cell.is_today { '*' } else { ' ' };
    let inner = format!("{:>2}{}{}", cell.day_of_month(), marker(cell), today);
    if cell.is_outside_month {
        format!("({inner})")
    } else {
        format!(" {inner} ")
    }
}

pub fn month(view: &MonthView<'_>, roster: &RosterConfig) -> String {
    let mut out = String::new();
    let width = CELL_WIDTH * 7 + 6;

    let _ = writeln!(out, "{:^width$}", view.title);
    let header: Vec<String> = view
        .weekdays
        .iter()
        .map(|d| format!("{:^CELL_WIDTH$}", d))
        .collect();
    let _ = writeln!(out, "{}", header.join(" "));

    for week in view.cells.chunks(7) {
        let row: Vec<String> = week.iter().map(cell_text).collect();
        let _ = writeln!(out, "{}", row.join(" "));
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "+ {} ({})   - {} ({})   V vacation   * today",
        roster.on_name, roster.on_hours, roster.off_name, roster.off_hours
    );

    let mut shown: Vec<&VacationRecord> = Vec::new();
    for vacation in view.cells.iter().filter_map(|c| c.vacation) {
        if !shown.iter().any(|v| v.id == vacation.id) {
            shown.push(vacation);
        }
    }
    for vacation in shown {
        let _ = writeln!(out, "V {}", vacation_line(vacation));
    }

    out
}

pub fn day(detail: &DayDetail<'_>, roster: &RosterConfig) -> String {
    let mut out = format!(
        "{}  {}  {} ({})\n",
        detail.date,
        detail.role.as_str(),
        roster.name_for(detail.role),
        roster.hours_for(detail.role)
    );
    if let Some(vacation) = detail.vacation {
        let _ = writeln!(out, "vacation: {}", vacation_line(vacation));
        if let Some(notes) = vacation.notes() {
            let _ = writeln!(out, "notes: {notes}");
        }
    }
    out
}

pub fn vacation_line(vacation: &VacationRecord) -> String {
    format!(
        "{} {}..{} [{}]",
        vacation.label, vacation.start_date, vacation.end_date, vacation.id
    )
}

pub fn vacation_list(vacations: &[&VacationRecord]) -> String {
    if vacations.is_empty() {
        return "No vacations.\n".to_string();
    }
    let mut out = String::new();
    for vacation in vacations {
        let _ = writeln!(out, "{}", vacation_line(vacation));
    }
    out
}
