//! Widget-level calendar state.

use std::fmt;

use caldroid_core::{
    CaldroidError, CaldroidResult, CalendarDate, CalendarOptions, CellState, DateConstraints,
    DateGrid, MonthKey, PageChange, PagerState, SavedState, WeekStart, weekday_headers,
};
use chrono::{Local, Weekday};
use log::{debug, trace};

use crate::listener::CalendarListener;

/// Owns everything a calendar widget needs besides its views: the pager,
/// the options, the date constraints and the listener.
pub struct CalendarController {
    options: CalendarOptions,
    constraints: DateConstraints,
    pager: PagerState,
    dialog_title: Option<String>,
    listener: Option<Box<dyn CalendarListener>>,
}

impl fmt::Debug for CalendarController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarController")
            .field("options", &self.options)
            .field("constraints", &self.constraints)
            .field("pager", &self.pager)
            .field("dialog_title", &self.dialog_title)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

impl CalendarController {
    /// Show `month`, or the month of `today` if none is given.
    pub fn new(
        options: CalendarOptions,
        month: Option<MonthKey>,
        today: CalendarDate,
    ) -> CaldroidResult<Self> {
        let week_start = options.week_start()?;
        let month = month.unwrap_or_else(|| MonthKey::from_date(today));
        let pager = PagerState::new(month, week_start, options.six_weeks_in_calendar)?;

        debug!("calendar created at {} starting on {:?}", month, week_start.weekday());

        Ok(CalendarController {
            options,
            constraints: DateConstraints::new(),
            pager,
            dialog_title: None,
            listener: None,
        })
    }

    pub fn for_today(options: CalendarOptions) -> CaldroidResult<Self> {
        Self::new(options, None, Local::now().date_naive())
    }

    pub fn from_saved_state(state: &SavedState, today: CalendarDate) -> CaldroidResult<Self> {
        let mut controller = Self::new(state.options(), state.month_key()?, today)?;
        controller.constraints = state.constraints()?;
        controller.dialog_title = state.dialog_title.clone();
        Ok(controller)
    }

    pub fn saved_state(&self) -> SavedState {
        SavedState::capture(
            Some(self.current_month()),
            &self.options,
            &self.constraints,
            self.dialog_title.as_deref(),
        )
    }

    pub fn set_listener(&mut self, listener: Box<dyn CalendarListener>) {
        self.listener = Some(listener);
    }

    pub fn with_listener(mut self, listener: Box<dyn CalendarListener>) -> Self {
        self.set_listener(listener);
        self
    }

    pub fn dialog_title(&self) -> Option<&str> {
        self.dialog_title.as_deref()
    }

    pub fn set_dialog_title(&mut self, title: Option<String>) {
        self.dialog_title = title;
    }

    // MONTH + GRID:

    pub fn current_month(&self) -> MonthKey {
        self.pager.current_month()
    }

    pub fn month(&self) -> u32 {
        self.current_month().month()
    }

    pub fn year(&self) -> i32 {
        self.current_month().year()
    }

    pub fn current_grid(&self) -> &DateGrid {
        self.pager.current_grid()
    }

    pub fn pager(&self) -> &PagerState {
        &self.pager
    }

    pub fn weekday_headers(&self) -> [Weekday; 7] {
        weekday_headers(self.pager.week_start())
    }

    /// Presentation state of every cell in the current grid.
    pub fn cell_states(&self, today: CalendarDate) -> Vec<CellState> {
        let grid = self.current_grid();
        grid.dates()
            .iter()
            .map(|date| self.constraints.cell_state(*date, grid.month(), today))
            .collect()
    }

    // NAVIGATION:

    pub fn on_page_selected(&mut self, virtual_page: i64) -> CaldroidResult<PageChange> {
        let change = self.pager.on_page_selected(virtual_page)?;
        if change.month_changed() {
            self.notify_month_changed();
        }
        Ok(change)
    }

    pub fn next_month(&mut self) -> CaldroidResult<PageChange> {
        self.on_page_selected(self.pager.page_after(1)?)
    }

    pub fn prev_month(&mut self) -> CaldroidResult<PageChange> {
        self.on_page_selected(self.pager.page_after(-1)?)
    }

    /// Swipe to the month of `date`. Nothing happens if it is already shown.
    pub fn move_to_date(&mut self, date: CalendarDate) -> CaldroidResult<Option<PageChange>> {
        let change = self.pager.move_to(MonthKey::from_date(date))?;
        if change.is_some() {
            self.notify_month_changed();
        }
        Ok(change)
    }

    /// Show the month of `date` without a swipe.
    pub fn set_calendar_date(&mut self, date: CalendarDate) -> CaldroidResult<()> {
        self.pager.reseed(MonthKey::from_date(date))?;
        self.notify_month_changed();
        Ok(())
    }

    pub fn refresh(&mut self) -> CaldroidResult<()> {
        self.pager.refresh().map(|_| ())
    }

    // OPTIONS:

    pub fn options(&self) -> &CalendarOptions {
        &self.options
    }

    pub fn set_start_day_of_week(&mut self, start_day_of_week: i32) -> CaldroidResult<()> {
        let week_start = WeekStart::normalize(start_day_of_week)?;
        self.pager.set_grid_settings(week_start, self.options.six_weeks_in_calendar)?;
        self.options.start_day_of_week = week_start.number() as i32;
        Ok(())
    }

    pub fn set_six_weeks_in_calendar(&mut self, six_weeks: bool) -> CaldroidResult<()> {
        self.pager.set_grid_settings(self.pager.week_start(), six_weeks)?;
        self.options.six_weeks_in_calendar = six_weeks;
        Ok(())
    }

    pub fn set_show_navigation_arrows(&mut self, show: bool) {
        self.options.show_navigation_arrows = show;
    }

    pub fn set_enable_swipe(&mut self, enable: bool) {
        self.options.enable_swipe = enable;
    }

    pub fn set_enable_click_on_disabled_dates(&mut self, enable: bool) {
        self.options.enable_click_on_disabled_dates = enable;
    }

    // CONSTRAINTS:

    pub fn constraints(&self) -> &DateConstraints {
        &self.constraints
    }

    /// Change the constraints, then refresh the visible slots.
    pub fn update_constraints<F, R>(&mut self, f: F) -> CaldroidResult<R>
    where
        F: FnOnce(&mut DateConstraints) -> CaldroidResult<R>,
    {
        let result = f(&mut self.constraints)?;
        self.refresh()?;
        Ok(result)
    }

    // CLICKS:

    /// Click on the cell at `index` of the current grid. Returns whether a
    /// listener received the date.
    pub fn click_date(&mut self, index: usize) -> CaldroidResult<bool> {
        let Some(date) = self.clickable_date(index)? else {
            return Ok(false);
        };

        match self.listener.as_mut() {
            Some(listener) => {
                listener.on_select_date(date);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn long_click_date(&mut self, index: usize) -> CaldroidResult<bool> {
        let Some(date) = self.clickable_date(index)? else {
            return Ok(false);
        };

        match self.listener.as_mut() {
            Some(listener) => {
                listener.on_long_click_date(date);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn clickable_date(&self, index: usize) -> CaldroidResult<Option<CalendarDate>> {
        let grid = self.current_grid();
        let date = grid.get(index).ok_or_else(|| {
            CaldroidError::InvalidArgument(format!(
                "cell {index} is outside a grid of {} cells",
                grid.len()
            ))
        })?;

        if !self.options.enable_click_on_disabled_dates && self.constraints.is_disabled(date) {
            trace!("ignoring click on disabled date {date}");
            return Ok(None);
        }

        Ok(Some(date))
    }

    fn notify_month_changed(&mut self) {
        let month = self.current_month();
        if let Some(listener) = self.listener.as_mut() {
            listener.on_change_month(month);
        }
    }
}
