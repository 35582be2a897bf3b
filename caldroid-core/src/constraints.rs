//! Disabled, selected and out-of-range dates.

use std::collections::BTreeSet;

use crate::date::{CalendarDate, MonthKey, parse_date, parse_dates};
use crate::error::{CaldroidError, CaldroidResult};

/// Date constraints applied on top of a grid.
///
/// An empty set or a missing bound means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateConstraints {
    disabled: BTreeSet<CalendarDate>,
    selected: BTreeSet<CalendarDate>,
    min_date: Option<CalendarDate>,
    max_date: Option<CalendarDate>,
}

/// How a single grid cell should be presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellState {
    pub today: bool,
    /// Filler day from the previous or next month.
    pub outside_month: bool,
    pub disabled: bool,
    pub selected: bool,
}

impl CellState {
    pub fn is_enabled(&self) -> bool {
        !self.disabled
    }
}

impl DateConstraints {
    pub fn new() -> Self {
        Self::default()
    }

    // DISABLED DATES:

    pub fn disabled_dates(&self) -> impl Iterator<Item = CalendarDate> + '_ {
        self.disabled.iter().copied()
    }

    pub fn set_disabled_dates<I>(&mut self, dates: I)
    where
        I: IntoIterator<Item = CalendarDate>,
    {
        self.disabled = dates.into_iter().collect();
    }

    /// Replace the disabled dates from `YYYY-MM-DD` strings. Nothing changes
    /// if any string is malformed.
    pub fn set_disabled_from_strings<S: AsRef<str>>(
        &mut self,
        strings: &[S],
    ) -> CaldroidResult<()> {
        let dates = parse_dates(strings)?;
        self.set_disabled_dates(dates);
        Ok(())
    }

    pub fn add_disabled_date(&mut self, date: CalendarDate) {
        self.disabled.insert(date);
    }

    pub fn clear_disabled_dates(&mut self) {
        self.disabled.clear();
    }

    // SELECTION:

    pub fn selected_dates(&self) -> impl Iterator<Item = CalendarDate> + '_ {
        self.selected.iter().copied()
    }

    pub fn set_selected_dates<I>(&mut self, dates: I)
    where
        I: IntoIterator<Item = CalendarDate>,
    {
        self.selected = dates.into_iter().collect();
    }

    /// Replace the selection with every day from `from` to `to` inclusive.
    pub fn select_range(&mut self, from: CalendarDate, to: CalendarDate) -> CaldroidResult<()> {
        if from > to {
            return Err(CaldroidError::InvalidArgument(format!(
                "selection start {from} is after its end {to}"
            )));
        }

        // `to` is never past chrono's last date, so the walk always reaches it.
        self.selected = from.iter_days().take_while(|d| *d <= to).collect();
        Ok(())
    }

    pub fn select_range_from_strings(&mut self, from: &str, to: &str) -> CaldroidResult<()> {
        self.select_range(parse_date(from)?, parse_date(to)?)
    }

    pub fn select_date(&mut self, date: CalendarDate) {
        self.selected.insert(date);
    }

    /// Returns whether the date was selected.
    pub fn deselect_date(&mut self, date: CalendarDate) -> bool {
        self.selected.remove(&date)
    }

    pub fn is_selected(&self, date: CalendarDate) -> bool {
        self.selected.contains(&date)
    }

    pub fn clear_selected_dates(&mut self) {
        self.selected.clear();
    }

    // BOUNDS:

    pub fn min_date(&self) -> Option<CalendarDate> {
        self.min_date
    }

    pub fn max_date(&self) -> Option<CalendarDate> {
        self.max_date
    }

    pub fn set_min_date(&mut self, date: Option<CalendarDate>) {
        self.min_date = date;
    }

    pub fn set_max_date(&mut self, date: Option<CalendarDate>) {
        self.max_date = date;
    }

    pub fn set_min_date_from_string(&mut self, s: Option<&str>) -> CaldroidResult<()> {
        self.min_date = s.map(parse_date).transpose()?;
        Ok(())
    }

    pub fn set_max_date_from_string(&mut self, s: Option<&str>) -> CaldroidResult<()> {
        self.max_date = s.map(parse_date).transpose()?;
        Ok(())
    }

    pub fn is_out_of_range(&self, date: CalendarDate) -> bool {
        self.min_date.is_some_and(|min| date < min) || self.max_date.is_some_and(|max| date > max)
    }

    /// Outside min/max or explicitly disabled.
    pub fn is_disabled(&self, date: CalendarDate) -> bool {
        self.is_out_of_range(date) || self.disabled.contains(&date)
    }

    pub fn cell_state(
        &self,
        date: CalendarDate,
        month: MonthKey,
        today: CalendarDate,
    ) -> CellState {
        CellState {
            today: date == today,
            outside_month: !month.contains(date),
            disabled: self.is_disabled(date),
            selected: self.is_selected(date),
        }
    }
}
