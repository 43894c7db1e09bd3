//! Month-grid materialization.
//!
//! A month is always rendered as 6 weeks of 7 days starting on Sunday, with
//! the leading and trailing cells borrowed from the adjacent months.

use serde::Serialize;

use crate::date::{CalendarDate, YearMonth};
use crate::shift::{reference_anchor, shift_role_for, ShiftRole};
use crate::storage::KeyValueStorage;
use crate::vacation::{VacationRecord, VacationStore};

/// Cells in every rendered month (6 rows of 7).
pub const GRID_CELLS: usize = 42;

/// Column headers, Sunday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// What a cell shows once vacations are taken into account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState<'a> {
    Shift(ShiftRole),
    Vacation(&'a VacationRecord),
}

/// One rendered day. Borrowed from the store and rebuilt on every render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell<'a> {
    pub date: CalendarDate,
    /// Rotation role before any vacation override.
    pub role: ShiftRole,
    pub vacation: Option<&'a VacationRecord>,
    pub is_outside_month: bool,
    pub is_today: bool,
}

impl<'a> DayCell<'a> {
    pub fn day_of_month(&self) -> u32 {
        self.date.day()
    }

    pub fn display(&self) -> DisplayState<'a> {
        match self.vacation {
            Some(vacation) => DisplayState::Vacation(vacation),
            None => DisplayState::Shift(self.role),
        }
    }
}

/// Build the 42 cells for `month`, evaluated as of `today`.
///
/// Vacation overrides are resolved for every cell, including the days
/// borrowed from the previous and next months.
pub fn build_month<'a, S: KeyValueStorage>(
    month: YearMonth,
    today: CalendarDate,
    store: &'a VacationStore<S>,
) -> Vec<DayCell<'a>> {
    let first_of_month = month.first_day();
    let start_weekday = i64::from(first_of_month.weekday_index());
    let days_in_month = i64::from(month.days_in_month());

    let dates: Vec<(CalendarDate, bool)> = (0..GRID_CELLS as i64)
        .map(|i| {
            let day_number = i - start_weekday + 1;
            let outside = day_number < 1 || day_number > days_in_month;
            // Offsetting from the 1st lands on the same previous/next-month
            // day as counting back from the previous month's length.
            (first_of_month.add_days(day_number - 1), outside)
        })
        .collect();

    let anchor = reference_anchor(today);
    let overrides = match (dates.first(), dates.last()) {
        (Some(&(first, _)), Some(&(last, _))) => store.vacations_overlapping(first, last),
        _ => Default::default(),
    };

    dates
        .into_iter()
        .map(|(date, is_outside_month)| DayCell {
            date,
            role: shift_role_for(date, anchor),
            vacation: overrides.get(&date).copied(),
            is_outside_month,
            is_today: date == today,
        })
        .collect()
}
