//! The 4-on/4-off rotation between two fixed roles.
//!
//! The phase of the 8-day cycle is fixed by a reference anchor: the day after
//! "today". Offsets 0-3 from the anchor belong to [`ShiftRole::RoleA`] (on
//! shift), offsets 4-7 to [`ShiftRole::RoleB`] (off), repeating in both
//! directions.

use serde::{Deserialize, Serialize};

use crate::date::{days_between, CalendarDate};

/// Length of one full rotation in days.
pub const CYCLE_LENGTH: i64 = 8;

/// Consecutive days RoleA is on at the start of each cycle.
pub const ON_DAYS: i64 = 4;

/// Which of the two roles is on shift for a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShiftRole {
    /// On shift.
    RoleA,
    /// Off shift.
    RoleB,
}

impl ShiftRole {
    pub fn is_on(&self) -> bool {
        matches!(self, ShiftRole::RoleA)
    }

    /// `"on"` or `"off"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftRole::RoleA => "on",
            ShiftRole::RoleB => "off",
        }
    }
}

/// The anchor for evaluations made on `today`: the following day.
pub fn reference_anchor(today: CalendarDate) -> CalendarDate {
    today.add_days(1)
}

/// Position of `date` inside the cycle anchored at `anchor`, always in `0..8`.
pub fn cycle_index(date: CalendarDate, anchor: CalendarDate) -> i64 {
    days_between(anchor, date).rem_euclid(CYCLE_LENGTH)
}

/// Role on shift for `date` given the cycle anchor.
pub fn shift_role_for(date: CalendarDate, anchor: CalendarDate) -> ShiftRole {
    if cycle_index(date, anchor) < ON_DAYS {
        ShiftRole::RoleA
    } else {
        ShiftRole::RoleB
    }
}
