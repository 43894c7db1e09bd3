//! Vacation records, validation, and the persisted record store.
//!
//! Vacations may overlap freely. Where they do, the most recently created
//! record wins; records with equal `created_at` fall back to insertion order,
//! later insertion winning. Every mutation rewrites the whole collection to
//! storage and is rolled back in memory if that write fails.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::date::CalendarDate;
use crate::error::{EngineError, Result, StorageError, ValidationError};
use crate::storage::KeyValueStorage;

/// Well-known key the collection is stored under.
pub const STORAGE_KEY: &str = "shift-calendar.vacations";

/// A user-declared inclusive date range that overrides the shift display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VacationRecord {
    /// Opaque, assigned at creation and never changed.
    pub id: String,
    pub label: String,
    pub start_date: CalendarDate,
    pub end_date: CalendarDate,
    /// Empty when the user left no notes.
    #[serde(default)]
    pub notes: String,
    /// Milliseconds since the Unix epoch, assigned at creation.
    pub created_at: i64,
}

impl VacationRecord {
    /// Whether `date` falls inside `[start_date, end_date]`.
    pub fn contains(&self, date: CalendarDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    pub fn notes(&self) -> Option<&str> {
        (!self.notes.is_empty()).then_some(self.notes.as_str())
    }

    /// Number of days covered, both ends included.
    pub fn span_days(&self) -> i64 {
        self.start_date.days_until(&self.end_date) + 1
    }
}

/// The user-editable fields of a vacation, as submitted by a form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VacationDraft {
    pub label: String,
    pub start_date: Option<CalendarDate>,
    pub end_date: Option<CalendarDate>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl VacationDraft {
    pub fn new(label: impl Into<String>, start: CalendarDate, end: CalendarDate) -> Self {
        Self {
            label: label.into(),
            start_date: Some(start),
            end_date: Some(end),
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Check a vacation's fields, returning the confirmed date range.
///
/// The label is checked first, then presence of both dates, then ordering.
pub fn validate(
    label: &str,
    start: Option<CalendarDate>,
    end: Option<CalendarDate>,
) -> std::result::Result<(CalendarDate, CalendarDate), ValidationError> {
    if label.trim().is_empty() {
        return Err(ValidationError::EmptyLabel);
    }
    let (Some(start), Some(end)) = (start, end) else {
        return Err(ValidationError::MissingDate);
    };
    if start > end {
        return Err(ValidationError::InvertedRange {
            start: start.format(),
            end: end.format(),
        });
    }
    Ok((start, end))
}

/// Records read from storage, plus the reason they were discarded if the
/// stored payload was unusable.
#[derive(Debug, Default)]
pub struct LoadedVacations {
    pub records: Vec<VacationRecord>,
    pub warning: Option<String>,
}

/// Read the persisted collection.
///
/// Never fails: a missing key yields an empty list, and an unreadable or
/// corrupt payload yields an empty list plus a warning.
pub fn load<S: KeyValueStorage + ?Sized>(storage: &S) -> LoadedVacations {
    let raw = match storage.load(STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return LoadedVacations::default(),
        Err(e) => return discarded(format!("could not read stored vacations: {e}")),
    };

    let records: Vec<VacationRecord> = match serde_json::from_str(&raw) {
        Ok(records) => records,
        Err(e) => return discarded(format!("stored vacations are not valid JSON: {e}")),
    };

    for (i, record) in records.iter().enumerate() {
        if let Err(e) = validate(&record.label, Some(record.start_date), Some(record.end_date)) {
            return discarded(format!("stored vacation {} is invalid: {e}", record.id));
        }
        if records[..i].iter().any(|r| r.id == record.id) {
            return discarded(format!("stored vacation id {} is duplicated", record.id));
        }
    }

    debug!(count = records.len(), "loaded vacations");
    LoadedVacations {
        records,
        warning: None,
    }
}

fn discarded(reason: String) -> LoadedVacations {
    warn!(%reason, "discarding stored vacations");
    LoadedVacations {
        records: Vec::new(),
        warning: Some(reason),
    }
}

fn system_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Owns every vacation record and keeps storage in step with memory.
pub struct VacationStore<S: KeyValueStorage> {
    storage: S,
    records: Vec<VacationRecord>,
    clock: fn() -> i64,
    last_created_at: i64,
    load_warning: Option<String>,
}

impl<S: KeyValueStorage> VacationStore<S> {
    /// Load the persisted collection from `storage`.
    pub fn open(storage: S) -> Self {
        Self::open_with_clock(storage, system_millis)
    }

    /// Like [`VacationStore::open`] but with a custom millisecond clock for
    /// `created_at` stamps.
    pub fn open_with_clock(storage: S, clock: fn() -> i64) -> Self {
        let LoadedVacations { records, warning } = load(&storage);
        let last_created_at = records.iter().map(|r| r.created_at).max().unwrap_or(i64::MIN);
        Self {
            storage,
            records,
            clock,
            last_created_at,
            load_warning: warning,
        }
    }

    /// Why the stored collection was discarded at open time, if it was.
    pub fn load_warning(&self) -> Option<&str> {
        self.load_warning.as_deref()
    }

    /// All records in insertion order.
    pub fn records(&self) -> &[VacationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&VacationRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Mutable access to the backend, e.g. to inject failures in tests.
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Records ordered by start date, then creation time.
    pub fn sorted(&self) -> Vec<&VacationRecord> {
        let mut sorted: Vec<&VacationRecord> = self.records.iter().collect();
        sorted.sort_by_key(|r| (r.start_date, r.created_at));
        sorted
    }

    /// Validate and add a new vacation.
    pub fn create(&mut self, draft: VacationDraft) -> Result<VacationRecord> {
        let (start_date, end_date) = validate(&draft.label, draft.start_date, draft.end_date)?;

        let record = VacationRecord {
            id: self.fresh_id(),
            label: draft.label.trim().to_string(),
            start_date,
            end_date,
            notes: draft.notes.unwrap_or_default(),
            created_at: self.next_timestamp(),
        };

        self.records.push(record.clone());
        if let Err(e) = self.persist() {
            self.records.pop();
            warn!(error = %e, "rolled back vacation create");
            return Err(e.into());
        }

        debug!(id = %record.id, start = %record.start_date, end = %record.end_date, "created vacation");
        Ok(record)
    }

    /// Replace the label, dates and notes of the record with `id`.
    ///
    /// The id and creation time are preserved.
    pub fn update(&mut self, id: &str, draft: VacationDraft) -> Result<VacationRecord> {
        let (start_date, end_date) = validate(&draft.label, draft.start_date, draft.end_date)?;
        let index = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| EngineError::NotFound(id.to_string()))?;

        let previous = self.records[index].clone();
        let updated = VacationRecord {
            label: draft.label.trim().to_string(),
            start_date,
            end_date,
            notes: draft.notes.unwrap_or_default(),
            ..previous.clone()
        };

        self.records[index] = updated.clone();
        if let Err(e) = self.persist() {
            self.records[index] = previous;
            warn!(%id, error = %e, "rolled back vacation update");
            return Err(e.into());
        }

        debug!(%id, "updated vacation");
        Ok(updated)
    }

    /// Remove the record with `id`. Returns `false` if there was none.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let Some(index) = self.records.iter().position(|r| r.id == id) else {
            return Ok(false);
        };

        let removed = self.records.remove(index);
        if let Err(e) = self.persist() {
            self.records.insert(index, removed);
            warn!(%id, error = %e, "rolled back vacation delete");
            return Err(e.into());
        }

        debug!(%id, "deleted vacation");
        Ok(true)
    }

    /// The vacation shown on `date`: among records covering it, the most
    /// recently created.
    pub fn vacation_for(&self, date: CalendarDate) -> Option<&VacationRecord> {
        // max_by_key keeps the last maximum, so later insertion wins ties.
        self.records
            .iter()
            .filter(|r| r.contains(date))
            .max_by_key(|r| r.created_at)
    }

    /// [`VacationStore::vacation_for`] for every date in `[start, end]`,
    /// batched. Dates with no vacation are absent from the map.
    pub fn vacations_overlapping(
        &self,
        start: CalendarDate,
        end: CalendarDate,
    ) -> BTreeMap<CalendarDate, &VacationRecord> {
        let mut resolved: BTreeMap<CalendarDate, &VacationRecord> = BTreeMap::new();
        if start > end {
            return resolved;
        }

        for record in self
            .records
            .iter()
            .filter(|r| r.start_date <= end && r.end_date >= start)
        {
            let mut day = record.start_date.max(start);
            let last = record.end_date.min(end);
            loop {
                let entry = resolved.entry(day).or_insert(record);
                if record.created_at >= entry.created_at {
                    *entry = record;
                }
                if day >= last {
                    break;
                }
                day = day.add_days(1);
            }
        }

        resolved
    }

    /// The collection in its persisted JSON layout.
    pub fn to_json(&self) -> std::result::Result<String, StorageError> {
        Ok(serde_json::to_string(&self.records)?)
    }

    fn persist(&mut self) -> std::result::Result<(), StorageError> {
        let json = self.to_json()?;
        self.storage.save(STORAGE_KEY, &json)
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    /// Strictly increasing even if the clock stalls or steps back.
    fn next_timestamp(&mut self) -> i64 {
        let now = (self.clock)();
        let stamp = if now > self.last_created_at {
            now
        } else {
            self.last_created_at.saturating_add(1)
        };
        self.last_created_at = stamp;
        stamp
    }
}
