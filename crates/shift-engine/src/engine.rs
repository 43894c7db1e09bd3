//! The facade consumers talk to.
//!
//! [`ShiftEngine`] owns the vacation store and the roster labels. Reads are
//! pure functions of the stored records and the `today` the caller passes in;
//! writes go through the store's validate-mutate-persist cycle.

use serde::Serialize;

use crate::date::{CalendarDate, YearMonth};
use crate::error::{Result, StorageError};
use crate::grid::{build_month, DayCell, WEEKDAY_LABELS};
use crate::roster::RosterConfig;
use crate::shift::{reference_anchor, shift_role_for, ShiftRole};
use crate::storage::KeyValueStorage;
use crate::vacation::{VacationDraft, VacationRecord, VacationStore};

/// A rendered month ready for display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthView<'a> {
    pub month: YearMonth,
    /// e.g. `"January 2024"`.
    pub title: String,
    pub weekdays: [&'static str; 7],
    pub cells: Vec<DayCell<'a>>,
}

/// Everything shown for a single selected day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayDetail<'a> {
    pub date: CalendarDate,
    pub role: ShiftRole,
    pub vacation: Option<&'a VacationRecord>,
}

pub struct ShiftEngine<S: KeyValueStorage> {
    store: VacationStore<S>,
    roster: RosterConfig,
}

impl<S: KeyValueStorage> ShiftEngine<S> {
    /// Open the engine over `storage`, loading any persisted vacations.
    pub fn new(storage: S) -> Self {
        Self::from_store(VacationStore::open(storage))
    }

    /// Open with a custom millisecond clock for vacation timestamps.
    pub fn with_clock(storage: S, clock: fn() -> i64) -> Self {
        Self::from_store(VacationStore::open_with_clock(storage, clock))
    }

    pub fn from_store(store: VacationStore<S>) -> Self {
        Self {
            store,
            roster: RosterConfig::default(),
        }
    }

    pub fn with_roster(mut self, roster: RosterConfig) -> Self {
        self.roster = roster;
        self
    }

    pub fn roster(&self) -> &RosterConfig {
        &self.roster
    }

    /// Set if persisted vacations were unreadable and have been ignored.
    pub fn load_warning(&self) -> Option<&str> {
        self.store.load_warning()
    }

    pub fn store(&self) -> &VacationStore<S> {
        &self.store
    }

    pub fn storage_mut(&mut self) -> &mut S {
        self.store.storage_mut()
    }

    pub fn month_grid(&self, month: YearMonth, today: CalendarDate) -> MonthView<'_> {
        MonthView {
            month,
            title: month.title(),
            weekdays: WEEKDAY_LABELS,
            cells: build_month(month, today, &self.store),
        }
    }

    pub fn day_detail(&self, date: CalendarDate, today: CalendarDate) -> DayDetail<'_> {
        DayDetail {
            date,
            role: shift_role_for(date, reference_anchor(today)),
            vacation: self.store.vacation_for(date),
        }
    }

    pub fn create_vacation(&mut self, draft: VacationDraft) -> Result<VacationRecord> {
        self.store.create(draft)
    }

    pub fn update_vacation(&mut self, id: &str, draft: VacationDraft) -> Result<VacationRecord> {
        self.store.update(id, draft)
    }

    /// `Ok(false)` when no vacation has `id`.
    pub fn delete_vacation(&mut self, id: &str) -> Result<bool> {
        self.store.delete(id)
    }

    pub fn vacation(&self, id: &str) -> Option<&VacationRecord> {
        self.store.get(id)
    }

    /// All vacations ordered by start date.
    pub fn vacations(&self) -> Vec<&VacationRecord> {
        self.store.sorted()
    }

    /// The persisted payload, for hosts that write storage themselves.
    pub fn export_json(&self) -> std::result::Result<String, StorageError> {
        self.store.to_json()
    }
}
