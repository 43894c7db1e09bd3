//! Calendar-day arithmetic on timezone-free dates.
//!
//! Every comparison in the engine happens on [`CalendarDate`], a civil
//! (year, month, day) triple with no time-of-day component. Day offsets are
//! computed from the proleptic Gregorian day number, so they never drift
//! across daylight-saving transitions or local UTC offsets.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, Month, NaiveDate, TimeZone};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::FormatError;

/// A calendar date reduced to (year, month, day).
///
/// Ordering and equality are defined on the triple alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Build a date from its parts, or `None` if the day does not exist.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Strip time-of-day from a zoned timestamp, keeping the civil date it
    /// falls on in its own timezone.
    pub fn normalize<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self {
        Self(instant.date_naive())
    }

    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Weekday index with Sunday as 0.
    pub fn weekday_index(&self) -> u32 {
        self.0.weekday().num_days_from_sunday()
    }

    /// The date `n` calendar days later (`n` may be negative).
    ///
    /// Saturates at the bounds of the representable range.
    pub fn add_days(self, n: i64) -> Self {
        match Duration::try_days(n).and_then(|d| self.0.checked_add_signed(d)) {
            Some(date) => Self(date),
            None if n < 0 => Self(NaiveDate::MIN),
            None => Self(NaiveDate::MAX),
        }
    }

    /// Signed number of days from `self` to `other`.
    pub fn days_until(&self, other: &CalendarDate) -> i64 {
        days_between(*self, *other)
    }

    pub fn is_same_day(&self, other: &CalendarDate) -> bool {
        self == other
    }

    /// Canonical zero-padded `YYYY-MM-DD`.
    pub fn format(&self) -> String {
        let year = self.year();
        if year < 0 {
            format!("-{:04}-{:02}-{:02}", -year, self.month(), self.day())
        } else {
            format!("{:04}-{:02}-{:02}", year, self.month(), self.day())
        }
    }

    /// Parse a `YYYY-MM-DD` string. Inverse of [`CalendarDate::format`].
    pub fn parse(input: &str) -> Result<Self, FormatError> {
        let trimmed = input.trim();
        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let segments: Vec<&str> = body.split('-').collect();
        if segments.len() != 3 {
            return Err(FormatError::SegmentCount(input.to_string()));
        }
        if segments
            .iter()
            .any(|s| s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()))
        {
            return Err(FormatError::NonNumeric(input.to_string()));
        }

        let impossible = || FormatError::ImpossibleDate(input.to_string());
        let year: i32 = segments[0].parse().map_err(|_| impossible())?;
        let month: u32 = segments[1].parse().map_err(|_| impossible())?;
        let day: u32 = segments[2].parse().map_err(|_| impossible())?;
        let year = if negative { -year } else { year };

        Self::from_ymd(year, month, day).ok_or_else(impossible)
    }
}

/// Signed day count from `a` to `b`.
///
/// Uses the day number since 0001-01-01 so the result is exact for any pair
/// of representable dates.
pub fn days_between(a: CalendarDate, b: CalendarDate) -> i64 {
    i64::from(b.0.num_days_from_ce()) - i64::from(a.0.num_days_from_ce())
}

/// Number of days in `month` (1-12) of `year`, leap years included.
///
/// Returns 0 for an out-of-range month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return 0;
    };
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match next {
        Some(next) => (next - first).num_days() as u32,
        // December of the last representable year.
        None => 31,
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl FromStr for CalendarDate {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.format())
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// A displayed month: the unit of calendar navigation.
///
/// Only months whose whole six-week grid window is representable can be
/// constructed, so the year is kept one year inside chrono's range on both
/// sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth(CalendarDate);

impl YearMonth {
    /// Earliest year a month can be built for.
    pub fn min_year() -> i32 {
        NaiveDate::MIN.year() + 1
    }

    /// Latest year a month can be built for.
    pub fn max_year() -> i32 {
        NaiveDate::MAX.year() - 1
    }

    /// `None` if `month` is not in 1..=12 or `year` is outside
    /// [`YearMonth::min_year`]..=[`YearMonth::max_year`].
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if !(Self::min_year()..=Self::max_year()).contains(&year) {
            return None;
        }
        CalendarDate::from_ymd(year, month, 1).map(Self)
    }

    /// The month containing `date` (what a "Today" button navigates to).
    pub fn containing(date: CalendarDate) -> Option<Self> {
        Self::new(date.year(), date.month())
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// 1-12.
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Step `months` forward (or backward when negative), rolling the year.
    ///
    /// `None` when the result leaves the supported range.
    pub fn offset(self, months: i32) -> Option<Self> {
        let index = i64::from(self.year()) * 12 + i64::from(self.month()) - 1 + i64::from(months);
        let year = i32::try_from(index.div_euclid(12)).ok()?;
        let month = u32::try_from(index.rem_euclid(12)).ok()? + 1;
        Self::new(year, month)
    }

    pub fn previous(self) -> Option<Self> {
        self.offset(-1)
    }

    pub fn next(self) -> Option<Self> {
        self.offset(1)
    }

    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year(), self.month())
    }

    pub fn first_day(&self) -> CalendarDate {
        self.0
    }

    pub fn last_day(&self) -> CalendarDate {
        self.0.add_days(i64::from(self.days_in_month()) - 1)
    }

    /// Heading such as `"January 2024"`.
    pub fn title(&self) -> String {
        let name = u8::try_from(self.month())
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map(|m| m.name())
            .unwrap_or("?");
        format!("{} {}", name, self.year())
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("YearMonth", 2)?;
        state.serialize_field("year", &self.year())?;
        state.serialize_field("month", &self.month())?;
        state.end()
    }
}
