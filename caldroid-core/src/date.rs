//! Calendar dates, month keys and week-start numbering.
//!
//! Weekdays are numbered 1..=7 starting at Sunday, so a week start of `1`
//! puts Sunday in the first column and `2` puts Monday there.

use std::fmt;

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

use crate::error::{CaldroidError, CaldroidResult};

/// A calendar day without time of day.
pub type CalendarDate = NaiveDate;

/// Date format used for every persisted date string.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Number of a weekday, 1 = Sunday ... 7 = Saturday.
pub fn weekday_number(date: CalendarDate) -> u32 {
    date.weekday().number_from_sunday()
}

// =============================================================================
// MonthKey
// =============================================================================

/// A displayed month, identified by year and month (1..=12).
///
/// Holds the first day of the month internally, so a `MonthKey` always
/// names a month chrono can represent completely.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey(NaiveDate);

impl MonthKey {
    pub fn new(year: i32, month: u32) -> CaldroidResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(CaldroidError::InvalidArgument(format!(
                "month must be within 1..=12, got {month}"
            )));
        }

        NaiveDate::from_ymd_opt(year, month, 1)
            .map(MonthKey)
            .ok_or_else(|| {
                CaldroidError::InvalidArgument(format!("year {year} is out of the supported range"))
            })
    }

    /// The month containing `date`.
    pub fn from_date(date: CalendarDate) -> Self {
        MonthKey(date - Days::new(u64::from(date.day0())))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Number of days in the month, leap years included.
    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    pub fn first_day(&self) -> CalendarDate {
        self.0
    }

    pub fn last_day(&self) -> CalendarDate {
        // Day 28 exists in every month, so the search always finds one.
        (28..=31).rev().find_map(|day| self.0.with_day(day)).unwrap_or(self.0)
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// Shift by `months`, rolling the year over in either direction.
    pub fn offset(&self, months: i32) -> CaldroidResult<Self> {
        let shifted = if months >= 0 {
            self.0.checked_add_months(Months::new(months.unsigned_abs()))
        } else {
            self.0.checked_sub_months(Months::new(months.unsigned_abs()))
        };

        shifted.map(MonthKey).ok_or_else(|| {
            CaldroidError::InvalidArgument(format!(
                "{self} shifted by {months} months is out of the supported range"
            ))
        })
    }

    pub fn succ(&self) -> CaldroidResult<Self> {
        self.offset(1)
    }

    pub fn pred(&self) -> CaldroidResult<Self> {
        self.offset(-1)
    }

    /// Signed number of months from `self` to `other`.
    pub fn months_until(&self, other: MonthKey) -> i32 {
        (other.year() - self.year()) * 12 + (other.month() as i32 - self.month() as i32)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl fmt::Debug for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MonthKey({self})")
    }
}

// =============================================================================
// WeekStart
// =============================================================================

/// First column of the calendar, 1 = Sunday ... 7 = Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekStart(u32);

impl WeekStart {
    pub const SUNDAY: WeekStart = WeekStart(1);
    pub const MONDAY: WeekStart = WeekStart(2);

    /// Accepts 1..=7. Larger values are reduced modulo 7; a reduction to 0
    /// is rejected along with zero and negative input.
    pub fn normalize(start_day_of_week: i32) -> CaldroidResult<Self> {
        let reduced = if start_day_of_week > 7 {
            start_day_of_week % 7
        } else {
            start_day_of_week
        };

        if (1..=7).contains(&reduced) {
            Ok(WeekStart(reduced as u32))
        } else {
            Err(CaldroidError::InvalidArgument(format!(
                "start day of week must be within 1..=7, got {start_day_of_week}"
            )))
        }
    }

    pub fn from_weekday(weekday: Weekday) -> Self {
        WeekStart(weekday.number_from_sunday())
    }

    pub fn number(&self) -> u32 {
        self.0
    }

    pub fn weekday(&self) -> Weekday {
        match self.0 {
            1 => Weekday::Sun,
            2 => Weekday::Mon,
            3 => Weekday::Tue,
            4 => Weekday::Wed,
            5 => Weekday::Thu,
            6 => Weekday::Fri,
            _ => Weekday::Sat,
        }
    }

    /// Number of the last weekday in a row.
    pub fn end_day(&self) -> u32 {
        if self.0 == 1 { 7 } else { self.0 - 1 }
    }
}

impl Default for WeekStart {
    fn default() -> Self {
        WeekStart::SUNDAY
    }
}

// =============================================================================
// Date strings
// =============================================================================

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> CaldroidResult<CalendarDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|_| {
        CaldroidError::Parse(format!("Invalid date format '{}'. Expected YYYY-MM-DD", s))
    })
}

pub fn format_date(date: CalendarDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse every string, failing on the first malformed one.
pub fn parse_dates<S: AsRef<str>>(strings: &[S]) -> CaldroidResult<Vec<CalendarDate>> {
    strings.iter().map(|s| parse_date(s.as_ref())).collect()
}

pub fn format_dates<'a, I>(dates: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a CalendarDate>,
{
    dates.into_iter().map(|d| format_date(*d)).collect()
}
