use caldroid_core::{CalendarDate, MonthKey};

/// Receives what happens inside a calendar.
pub trait CalendarListener {
    /// A date the user may pick was clicked.
    fn on_select_date(&mut self, date: CalendarDate);

    fn on_long_click_date(&mut self, _date: CalendarDate) {}

    /// The displayed month changed.
    fn on_change_month(&mut self, _month: MonthKey) {}
}
