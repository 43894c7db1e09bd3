//! # shift-engine
//!
//! Deterministic two-person 4-on/4-off shift rotation with vacation overrides.
//!
//! The engine answers two questions for a calendar UI: what does a month look
//! like (42 cells, each with its rotation role and any overriding vacation),
//! and what is going on for a single day. Vacations are stored through a
//! pluggable key-value backend and may overlap; the most recently created one
//! wins.
//!
//! ## Modules
//!
//! - [`date`] — timezone-free calendar dates, day arithmetic, `YYYY-MM-DD`
//! - [`shift`] — the 8-day rotation
//! - [`vacation`] — vacation records, validation, overlap resolution, persistence
//! - [`storage`] — key-value backends (in-memory, file)
//! - [`grid`] — month-grid materialization
//! - [`roster`] — display names for the two roles
//! - [`engine`] — the consumer-facing facade
//! - [`error`] — Error types

pub mod date;
pub mod engine;
pub mod error;
pub mod grid;
pub mod roster;
pub mod shift;
pub mod storage;
pub mod vacation;

pub use date::{days_between, CalendarDate, YearMonth};
pub use engine::{DayDetail, MonthView, ShiftEngine};
pub use error::{EngineError, FormatError, StorageError, ValidationError};
pub use grid::{build_month, DayCell, DisplayState};
pub use roster::RosterConfig;
pub use shift::{reference_anchor, shift_role_for, ShiftRole};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use vacation::{VacationDraft, VacationRecord, VacationStore};
