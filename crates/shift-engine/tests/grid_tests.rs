//! Tests for month-grid materialization.

use shift_engine::grid::{GRID_CELLS, WEEKDAY_LABELS};
use shift_engine::{
    build_month, CalendarDate, DisplayState, MemoryStorage, ShiftRole, VacationDraft,
    VacationStore, YearMonth,
};

fn date(year: i32, month: u32, day: u32) -> CalendarDate {
    CalendarDate::from_ymd(year, month, day).unwrap()
}

fn month(year: i32, month: u32) -> YearMonth {
    YearMonth::new(year, month).unwrap()
}

fn empty_store() -> VacationStore<MemoryStorage> {
    VacationStore::open(MemoryStorage::new())
}

#[test]
fn every_month_has_42_cells() {
    let store = empty_store();
    let today = date(2024, 1, 1);
    for m in 1..=12 {
        for year in [2023, 2024, 2100] {
            let cells = build_month(month(year, m), today, &store);
            assert_eq!(cells.len(), GRID_CELLS, "{year}-{m}");
        }
    }
}

#[test]
fn cells_are_consecutive_days_starting_on_sunday() {
    let store = empty_store();
    let cells = build_month(month(2024, 3), date(2024, 3, 15), &store);

    assert_eq!(cells[0].date.weekday_index(), 0);
    for pair in cells.windows(2) {
        assert_eq!(pair[0].date.add_days(1), pair[1].date);
    }
}

#[test]
fn outermost_supported_months_have_42_distinct_days() {
    let store = empty_store();
    let last = YearMonth::new(YearMonth::max_year(), 12).unwrap();
    let first = YearMonth::new(YearMonth::min_year(), 1).unwrap();

    for ym in [first, last] {
        let today = ym.last_day();
        let cells = build_month(ym, today, &store);
        assert_eq!(cells.len(), GRID_CELLS, "{ym}");
        for pair in cells.windows(2) {
            assert_eq!(pair[0].date.days_until(&pair[1].date), 1, "{ym}");
        }
        assert_eq!(cells.iter().filter(|c| c.is_today).count(), 1, "{ym}");
    }
}

#[test]
fn leading_cells_come_from_previous_month() {
    let store = empty_store();
    // March 2024 starts on a Friday; February 2024 has 29 days.
    let cells = build_month(month(2024, 3), date(2024, 3, 15), &store);

    assert_eq!(cells[0].date, date(2024, 2, 25));
    assert_eq!(cells[4].date, date(2024, 2, 29));
    assert!(cells[..5].iter().all(|c| c.is_outside_month));

    assert_eq!(cells[5].date, date(2024, 3, 1));
    assert!(!cells[5].is_outside_month);
    assert_eq!(cells[35].date, date(2024, 3, 31));
    assert!(!cells[35].is_outside_month);

    assert_eq!(cells[36].date, date(2024, 4, 1));
    assert_eq!(cells[41].date, date(2024, 4, 6));
    assert!(cells[36..].iter().all(|c| c.is_outside_month));
}

#[test]
fn leading_cells_cross_the_year_boundary() {
    let store = empty_store();
    // January 2024 starts on a Monday.
    let cells = build_month(month(2024, 1), date(2024, 1, 1), &store);

    assert_eq!(cells[0].date, date(2023, 12, 31));
    assert!(cells[0].is_outside_month);
    assert_eq!(cells[1].date, date(2024, 1, 1));
    assert_eq!(cells[41].date, date(2024, 2, 10));
}

#[test]
fn month_starting_on_sunday_has_no_leading_cells() {
    let store = empty_store();
    // February 2026 starts on a Sunday and has 28 days.
    let cells = build_month(month(2026, 2), date(2026, 2, 1), &store);

    assert_eq!(cells[0].date, date(2026, 2, 1));
    assert!(!cells[0].is_outside_month);
    assert_eq!(cells[27].date, date(2026, 2, 28));
    assert_eq!(cells[28].date, date(2026, 3, 1));
    assert_eq!(cells.iter().filter(|c| c.is_outside_month).count(), 14);
}

#[test]
fn december_spills_into_next_year() {
    let store = empty_store();
    let cells = build_month(month(2024, 12), date(2024, 12, 1), &store);

    let last = cells.last().unwrap();
    assert_eq!(last.date.year(), 2025);
    assert_eq!(last.date.month(), 1);
    assert!(last.is_outside_month);
}

#[test]
fn today_is_flagged_once() {
    let store = empty_store();
    let today = date(2024, 3, 15);
    let cells = build_month(month(2024, 3), today, &store);

    let flagged: Vec<_> = cells.iter().filter(|c| c.is_today).collect();
    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0].date, today);
}

#[test]
fn today_in_spillover_is_flagged() {
    let store = empty_store();
    let today = date(2024, 2, 26);
    let cells = build_month(month(2024, 3), today, &store);

    let flagged: Vec<_> = cells.iter().filter(|c| c.is_today).collect();
    assert_eq!(flagged.len(), 1);
    assert!(flagged[0].is_outside_month);
}

#[test]
fn today_far_away_is_not_flagged() {
    let store = empty_store();
    let cells = build_month(month(2024, 3), date(2025, 7, 1), &store);
    assert!(cells.iter().all(|c| !c.is_today));
}

#[test]
fn roles_follow_a_single_anchor() {
    let store = empty_store();
    let cells = build_month(month(2024, 1), date(2024, 1, 1), &store);

    // Dec 31 (offset -2) and Jan 1 (offset -1) are off; Jan 2..5 on; Jan 6..9 off.
    assert_eq!(cells[0].role, ShiftRole::RoleB);
    assert_eq!(cells[1].role, ShiftRole::RoleB);
    assert!(cells[2..6].iter().all(|c| c.role == ShiftRole::RoleA));
    assert!(cells[6..10].iter().all(|c| c.role == ShiftRole::RoleB));
    assert_eq!(cells[10].role, ShiftRole::RoleA);

    let on_days = cells.iter().filter(|c| c.role.is_on()).count();
    // 42 days starting at offset -2 cover 5 full cycles plus 2 off days.
    assert_eq!(on_days, 20);
}

#[test]
fn vacations_override_display_including_spillover() {
    let mut store = VacationStore::open(MemoryStorage::new());
    let trip = store
        .create(VacationDraft::new("Trip", date(2024, 2, 28), date(2024, 3, 2)))
        .unwrap();

    let cells = build_month(month(2024, 3), date(2024, 3, 15), &store);

    // Feb 28 is an outside-month cell but still shows the vacation.
    let feb_28 = &cells[3];
    assert_eq!(feb_28.date, date(2024, 2, 28));
    assert_eq!(feb_28.vacation, Some(&trip));
    assert_eq!(feb_28.display(), DisplayState::Vacation(&trip));

    let covered = cells.iter().filter(|c| c.vacation.is_some()).count();
    assert_eq!(covered, 4);

    let plain = &cells[20];
    assert_eq!(plain.vacation, None);
    assert_eq!(plain.display(), DisplayState::Shift(plain.role));
}

#[test]
fn overlapping_vacations_show_the_newest() {
    let mut store = VacationStore::open(MemoryStorage::new());
    store
        .create(VacationDraft::new("Old", date(2024, 3, 1), date(2024, 3, 31)))
        .unwrap();
    let new = store
        .create(VacationDraft::new("New", date(2024, 3, 10), date(2024, 3, 12)))
        .unwrap();

    let cells = build_month(month(2024, 3), date(2024, 3, 1), &store);
    let march_11 = cells.iter().find(|c| c.date == date(2024, 3, 11)).unwrap();
    assert_eq!(march_11.vacation, Some(&new));

    let march_20 = cells.iter().find(|c| c.date == date(2024, 3, 20)).unwrap();
    assert_eq!(march_20.vacation.unwrap().label, "Old");
}

#[test]
fn weekday_labels_start_on_sunday() {
    assert_eq!(WEEKDAY_LABELS[0], "Sun");
    assert_eq!(WEEKDAY_LABELS[6], "Sat");
}
