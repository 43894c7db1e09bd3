//! WASM bindings for shift-engine.
//!
//! Exposes the month grid, day detail, and vacation management to a browser
//! UI via `wasm-bindgen`. All complex values cross the boundary as JSON
//! strings. The engine runs over in-memory storage: the page passes the
//! previously saved payload to the constructor and, after every successful
//! mutation, writes `exportState()` back to `localStorage` itself.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p shift-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir web/pkg/ \
//!   target/wasm32-unknown-unknown/release/shift_engine_wasm.wasm
//! ```

use serde::Serialize;
use shift_engine::vacation::STORAGE_KEY;
use shift_engine::{
    CalendarDate, DayCell, EngineError, MemoryStorage, RosterConfig, ShiftEngine, ShiftRole,
    ValidationError, VacationDraft, VacationRecord, YearMonth,
};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CellDto<'a> {
    date: String,
    day: u32,
    state: &'static str,
    name: &'a str,
    hours: &'a str,
    is_outside_month: bool,
    is_today: bool,
    vacation: Option<&'a VacationRecord>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MonthDto<'a> {
    year: i32,
    month: u32,
    title: String,
    weekdays: [&'static str; 7],
    cells: Vec<CellDto<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DayDto<'a> {
    date: String,
    state: &'static str,
    name: &'a str,
    hours: &'a str,
    vacation: Option<&'a VacationRecord>,
}

/// Error shape handed to JavaScript so the UI can branch on `kind`.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct ErrorDto {
    kind: &'static str,
    reason: Option<&'static str>,
    message: String,
}

impl ErrorDto {
    fn new(kind: &'static str, message: impl ToString) -> Self {
        Self {
            kind,
            reason: None,
            message: message.to_string(),
        }
    }

    fn into_js(self) -> JsValue {
        let json = serde_json::to_string(&self).unwrap_or_else(|_| self.message.clone());
        JsValue::from_str(&json)
    }
}

impl From<EngineError> for ErrorDto {
    fn from(e: EngineError) -> Self {
        let message = e.to_string();
        match e {
            EngineError::Validation(v) => Self {
                kind: "validation",
                reason: Some(match v {
                    ValidationError::EmptyLabel => "emptyLabel",
                    ValidationError::MissingDate => "missingDate",
                    ValidationError::InvertedRange { .. } => "invertedRange",
                }),
                message,
            },
            EngineError::NotFound(_) => Self::new("notFound", message),
            EngineError::Persistence(_) => Self::new("persistence", message),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_date(s: &str) -> Result<CalendarDate, ErrorDto> {
    CalendarDate::parse(s).map_err(|e| ErrorDto::new("format", e))
}

fn parse_draft(json: &str) -> Result<VacationDraft, ErrorDto> {
    serde_json::from_str(json)
        .map_err(|e| ErrorDto::new("format", format!("Invalid vacation JSON: {}", e)))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ErrorDto> {
    serde_json::to_string(value).map_err(|e| ErrorDto::new("serialization", e))
}

fn cell_dto<'a>(cell: &DayCell<'a>, roster: &'a RosterConfig) -> CellDto<'a> {
    CellDto {
        date: cell.date.format(),
        day: cell.day_of_month(),
        state: cell.role.as_str(),
        name: roster.name_for(cell.role),
        hours: roster.hours_for(cell.role),
        is_outside_month: cell.is_outside_month,
        is_today: cell.is_today,
        vacation: cell.vacation,
    }
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Browser-side handle on the shift engine.
#[wasm_bindgen]
pub struct ShiftCalendar {
    engine: ShiftEngine<MemoryStorage>,
}

impl ShiftCalendar {
    fn open(persisted: Option<String>, roster_json: Option<String>) -> Result<Self, ErrorDto> {
        let storage = match persisted {
            Some(payload) => MemoryStorage::with_entry(STORAGE_KEY, payload),
            None => MemoryStorage::new(),
        };
        let roster = match roster_json {
            Some(json) => serde_json::from_str::<RosterConfig>(&json)
                .map_err(|e| ErrorDto::new("format", format!("Invalid roster JSON: {}", e)))?,
            None => RosterConfig::default(),
        };
        Ok(Self {
            engine: ShiftEngine::new(storage).with_roster(roster),
        })
    }

    fn month_json(&self, year: i32, month: u32, today: &str) -> Result<String, ErrorDto> {
        let ym = YearMonth::new(year, month)
            .ok_or_else(|| ErrorDto::new("format", format!("Invalid month: {}-{:02}", year, month)))?;
        let today = parse_date(today)?;
        let view = self.engine.month_grid(ym, today);
        let roster = self.engine.roster();

        to_json(&MonthDto {
            year: ym.year(),
            month: ym.month(),
            title: view.title,
            weekdays: view.weekdays,
            cells: view.cells.iter().map(|c| cell_dto(c, roster)).collect(),
        })
    }

    fn day_json(&self, date: &str, today: &str) -> Result<String, ErrorDto> {
        let detail = self.engine.day_detail(parse_date(date)?, parse_date(today)?);
        let roster = self.engine.roster();
        to_json(&DayDto {
            date: detail.date.format(),
            state: detail.role.as_str(),
            name: roster.name_for(detail.role),
            hours: roster.hours_for(detail.role),
            vacation: detail.vacation,
        })
    }

    fn create_json(&mut self, draft_json: &str) -> Result<String, ErrorDto> {
        let record = self.engine.create_vacation(parse_draft(draft_json)?)?;
        to_json(&record)
    }

    fn update_json(&mut self, id: &str, draft_json: &str) -> Result<String, ErrorDto> {
        let record = self.engine.update_vacation(id, parse_draft(draft_json)?)?;
        to_json(&record)
    }
}

#[wasm_bindgen]
impl ShiftCalendar {
    /// Create a calendar from the payload previously saved by the page.
    ///
    /// `persisted` is the raw string from storage (or `undefined`); a corrupt
    /// payload is ignored and reported through `loadWarning()`. `roster` is an
    /// optional JSON object with `on_name`, `off_name`, `on_hours`, `off_hours`.
    #[wasm_bindgen(constructor)]
    pub fn new(persisted: Option<String>, roster: Option<String>) -> Result<ShiftCalendar, JsValue> {
        Self::open(persisted, roster).map_err(ErrorDto::into_js)
    }

    /// The storage key the page should persist `exportState()` under.
    #[wasm_bindgen(js_name = "storageKey")]
    pub fn storage_key() -> String {
        STORAGE_KEY.to_string()
    }

    #[wasm_bindgen(js_name = "loadWarning")]
    pub fn load_warning(&self) -> Option<String> {
        self.engine.load_warning().map(str::to_string)
    }

    /// Render `year`/`month` (1-12) as seen on `today` (`YYYY-MM-DD`).
    ///
    /// Returns a JSON object with `title`, `weekdays`, and 42 `cells`.
    #[wasm_bindgen(js_name = "monthGrid")]
    pub fn month_grid(&self, year: i32, month: u32, today: &str) -> Result<String, JsValue> {
        self.month_json(year, month, today).map_err(ErrorDto::into_js)
    }

    #[wasm_bindgen(js_name = "dayDetail")]
    pub fn day_detail(&self, date: &str, today: &str) -> Result<String, JsValue> {
        self.day_json(date, today).map_err(ErrorDto::into_js)
    }

    /// `draft` is `{label, startDate, endDate, notes?}`. Returns the new record.
    #[wasm_bindgen(js_name = "createVacation")]
    pub fn create_vacation(&mut self, draft: &str) -> Result<String, JsValue> {
        self.create_json(draft).map_err(ErrorDto::into_js)
    }

    #[wasm_bindgen(js_name = "updateVacation")]
    pub fn update_vacation(&mut self, id: &str, draft: &str) -> Result<String, JsValue> {
        self.update_json(id, draft).map_err(ErrorDto::into_js)
    }

    #[wasm_bindgen(js_name = "deleteVacation")]
    pub fn delete_vacation(&mut self, id: &str) -> Result<bool, JsValue> {
        self.engine
            .delete_vacation(id)
            .map_err(|e| ErrorDto::from(e).into_js())
    }

    #[wasm_bindgen(js_name = "listVacations")]
    pub fn list_vacations(&self) -> Result<String, JsValue> {
        to_json(&self.engine.vacations()).map_err(ErrorDto::into_js)
    }

    /// The full vacation payload to write back to storage.
    #[wasm_bindgen(js_name = "exportState")]
    pub fn export_state(&self) -> Result<String, JsValue> {
        self.engine
            .export_json()
            .map_err(|e| ErrorDto::new("serialization", e).into_js())
    }
}

/// `"on"` or `"off"` for `date` as seen on `today`, without a calendar handle.
#[wasm_bindgen(js_name = "shiftState")]
pub fn shift_state(date: &str, today: &str) -> Result<String, JsValue> {
    let date = parse_date(date).map_err(ErrorDto::into_js)?;
    let today = parse_date(today).map_err(ErrorDto::into_js)?;
    let role: ShiftRole = shift_engine::shift_role_for(date, shift_engine::reference_anchor(today));
    Ok(role.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calendar() -> ShiftCalendar {
        ShiftCalendar::open(None, None).unwrap()
    }

    #[test]
    fn month_json_has_42_labelled_cells() {
        let cal = calendar();
        let json = cal.month_json(2024, 1, "2024-01-01").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["title"], "January 2024");
        let cells = value["cells"].as_array().unwrap();
        assert_eq!(cells.len(), 42);
        assert_eq!(cells[2]["date"], "2024-01-02");
        assert_eq!(cells[2]["state"], "on");
        assert_eq!(cells[2]["name"], "Daniel");
        assert_eq!(cells[2]["hours"], "12h shift");
        assert_eq!(cells[1]["name"], "Michael");
        assert_eq!(cells[1]["isToday"], true);
    }

    #[test]
    fn invalid_month_is_a_format_error() {
        let err = calendar().month_json(2024, 13, "2024-01-01").unwrap_err();
        assert_eq!(err.kind, "format");
    }

    #[test]
    fn unrepresentable_year_is_a_format_error() {
        let cal = calendar();
        let err = cal.month_json(300_000, 1, "2024-01-01").unwrap_err();
        assert_eq!(err.kind, "format");

        let err = cal.month_json(i32::MAX, 12, "2024-01-01").unwrap_err();
        assert_eq!(err.kind, "format");
    }

    #[test]
    fn validation_errors_carry_a_reason() {
        let mut cal = calendar();
        let err = cal
            .create_json(r#"{"label":"X","startDate":"2024-05-10","endDate":"2024-05-05"}"#)
            .unwrap_err();
        assert_eq!(err.kind, "validation");
        assert_eq!(err.reason, Some("invertedRange"));

        let err = cal
            .create_json(r#"{"label":"","startDate":"2024-05-01","endDate":"2024-05-05"}"#)
            .unwrap_err();
        assert_eq!(err.reason, Some("emptyLabel"));
    }

    #[test]
    fn update_of_unknown_id_is_not_found() {
        let mut cal = calendar();
        let err = cal
            .update_json(
                "nope",
                r#"{"label":"X","startDate":"2024-05-01","endDate":"2024-05-05"}"#,
            )
            .unwrap_err();
        assert_eq!(err.kind, "notFound");
    }

    #[test]
    fn exported_state_reopens_with_the_same_vacations() {
        let mut cal = calendar();
        cal.create_json(
            r#"{"label":"Trip","startDate":"2024-03-10","endDate":"2024-03-12","notes":"beach"}"#,
        )
        .unwrap();
        let state = cal.engine.export_json().unwrap();

        let reopened = ShiftCalendar::open(Some(state), None).unwrap();
        assert!(reopened.engine.load_warning().is_none());
        let day: serde_json::Value =
            serde_json::from_str(&reopened.day_json("2024-03-11", "2024-03-01").unwrap()).unwrap();
        assert_eq!(day["vacation"]["label"], "Trip");
        assert_eq!(day["vacation"]["notes"], "beach");
    }

    #[test]
    fn corrupt_state_opens_empty_with_warning() {
        let cal = ShiftCalendar::open(Some("nonsense".to_string()), None).unwrap();
        assert!(cal.engine.load_warning().is_some());
        assert!(cal.engine.vacations().is_empty());
    }

    #[test]
    fn roster_json_overrides_names() {
        let cal = ShiftCalendar::open(None, Some(r#"{"on_name":"Ana"}"#.to_string())).unwrap();
        let day: serde_json::Value =
            serde_json::from_str(&cal.day_json("2024-01-02", "2024-01-01").unwrap()).unwrap();
        assert_eq!(day["name"], "Ana");
        assert_eq!(day["hours"], "12h shift");
    }
}
