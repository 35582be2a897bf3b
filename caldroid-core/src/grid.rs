//! Month grid generation.
//!
//! A grid lists every date shown for one month: the days of the month
//! itself plus filler days borrowed from the neighbouring months so that
//! each row is a complete week. Optionally the grid is padded to six rows
//! so that every month occupies the same height.

use std::array;

use chrono::Weekday;

use crate::date::{CalendarDate, MonthKey, WeekStart, weekday_number};
use crate::error::{CaldroidError, CaldroidResult};

pub const DAYS_PER_WEEK: usize = 7;

/// Row count of a padded grid.
pub const SIX_ROWS: usize = 6;

/// Input of [`build_grid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridConfiguration {
    pub month: MonthKey,
    pub week_start: WeekStart,
    pub pad_to_six_rows: bool,
}

impl GridConfiguration {
    /// Validates raw host input. Nothing is clamped.
    pub fn new(
        month: u32,
        year: i32,
        start_day_of_week: i32,
        pad_to_six_rows: bool,
    ) -> CaldroidResult<Self> {
        Ok(GridConfiguration {
            month: MonthKey::new(year, month)?,
            week_start: WeekStart::normalize(start_day_of_week)?,
            pad_to_six_rows,
        })
    }

    pub fn for_month(month: MonthKey, week_start: WeekStart, pad_to_six_rows: bool) -> Self {
        GridConfiguration {
            month,
            week_start,
            pad_to_six_rows,
        }
    }
}

/// The ordered dates of one month view.
///
/// Length is always a multiple of 7 and the first date falls on the
/// configured week start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateGrid {
    month: MonthKey,
    week_start: WeekStart,
    dates: Vec<CalendarDate>,
}

impl DateGrid {
    pub fn month(&self) -> MonthKey {
        self.month
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    pub fn dates(&self) -> &[CalendarDate] {
        &self.dates
    }

    pub fn into_dates(self) -> Vec<CalendarDate> {
        self.dates
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn rows(&self) -> usize {
        self.dates.len() / DAYS_PER_WEEK
    }

    /// One slice of seven dates per row.
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarDate]> {
        self.dates.chunks(DAYS_PER_WEEK)
    }

    pub fn get(&self, index: usize) -> Option<CalendarDate> {
        self.dates.get(index).copied()
    }

    pub fn first(&self) -> Option<CalendarDate> {
        self.dates.first().copied()
    }

    pub fn last(&self) -> Option<CalendarDate> {
        self.dates.last().copied()
    }

    pub fn position(&self, date: CalendarDate) -> Option<usize> {
        self.dates.binary_search(&date).ok()
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        self.position(date).is_some()
    }

    /// True for dates borrowed from the previous or next month.
    pub fn is_filler(&self, date: CalendarDate) -> bool {
        !self.month.contains(date)
    }

    /// Dates of the grid's own month, in order.
    pub fn month_dates(&self) -> impl Iterator<Item = CalendarDate> + '_ {
        self.dates.iter().copied().filter(|d| self.month.contains(*d))
    }
}

/// Build the grid for one month.
pub fn build_grid(config: &GridConfiguration) -> CaldroidResult<DateGrid> {
    let first = config.month.first_day();
    let last = config.month.last_day();
    let start = config.week_start.number();

    let mut dates = Vec::with_capacity(SIX_ROWS * DAYS_PER_WEEK);

    // Leading filler: a first-of-month weekday before the week start
    // belongs to the following week, so count it from there.
    let mut weekday_of_first = weekday_number(first);
    if weekday_of_first < start {
        weekday_of_first += 7;
    }
    let leading = weekday_of_first - start;

    let mut cursor = first;
    let mut leading_days = Vec::with_capacity(leading as usize);
    for _ in 0..leading {
        cursor = step_back(cursor)?;
        leading_days.push(cursor);
    }
    dates.extend(leading_days.into_iter().rev());

    dates.extend(first.iter_days().take(config.month.days_in_month() as usize));

    // Trailing filler up to the last weekday of the row
    let end = config.week_start.end_day();
    let mut cursor = last;
    while weekday_number(cursor) != end {
        cursor = step_forward(cursor)?;
        dates.push(cursor);
    }

    if config.pad_to_six_rows {
        let rows = dates.len() / DAYS_PER_WEEK;
        for _ in rows..SIX_ROWS {
            for _ in 0..DAYS_PER_WEEK {
                cursor = step_forward(cursor)?;
                dates.push(cursor);
            }
        }
    }

    Ok(DateGrid {
        month: config.month,
        week_start: config.week_start,
        dates,
    })
}

/// Column order of the header row.
pub fn weekday_headers(week_start: WeekStart) -> [Weekday; DAYS_PER_WEEK] {
    let mut day = week_start.weekday();
    array::from_fn(|_| {
        let current = day;
        day = day.succ();
        current
    })
}

fn step_back(date: CalendarDate) -> CaldroidResult<CalendarDate> {
    date.pred_opt()
        .ok_or_else(|| CaldroidError::InvalidArgument(format!("no day before {date}")))
}

fn step_forward(date: CalendarDate) -> CaldroidResult<CalendarDate> {
    date.succ_opt()
        .ok_or_else(|| CaldroidError::InvalidArgument(format!("no day after {date}")))
}
