//! String-keyed saved state.
//!
//! The host dumps this bag when its view is torn down and hands it back on
//! recreation. Dates travel as `YYYY-MM-DD` strings and lists keep their
//! order. Empty lists and absent bounds are left out of the dump.

use serde::{Deserialize, Serialize};

use crate::constraints::DateConstraints;
use crate::date::{CalendarDate, MonthKey, format_date, format_dates, parse_date, parse_dates};
use crate::error::{CaldroidError, CaldroidResult};
use crate::options::CalendarOptions;

fn default_start_day_of_week() -> i32 {
    CalendarOptions::default().start_day_of_week
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialog_title: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selected_dates: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disable_dates: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_date: Option<String>,

    #[serde(default = "default_true")]
    pub show_navigation_arrows: bool,

    #[serde(default = "default_true")]
    pub enable_swipe: bool,

    #[serde(default = "default_start_day_of_week")]
    pub start_day_of_week: i32,

    #[serde(default = "default_true")]
    pub six_weeks_in_calendar: bool,

    #[serde(default)]
    pub enable_click_on_disabled_dates: bool,
}

impl Default for SavedState {
    fn default() -> Self {
        SavedState::capture(None, &CalendarOptions::default(), &DateConstraints::default(), None)
    }
}

impl SavedState {
    pub fn capture(
        month: Option<MonthKey>,
        options: &CalendarOptions,
        constraints: &DateConstraints,
        dialog_title: Option<&str>,
    ) -> Self {
        let selected: Vec<CalendarDate> = constraints.selected_dates().collect();
        let disabled: Vec<CalendarDate> = constraints.disabled_dates().collect();

        SavedState {
            month: month.map(|m| m.month()),
            year: month.map(|m| m.year()),
            dialog_title: dialog_title.map(str::to_string),
            selected_dates: format_dates(&selected),
            disable_dates: format_dates(&disabled),
            min_date: constraints.min_date().map(format_date),
            max_date: constraints.max_date().map(format_date),
            show_navigation_arrows: options.show_navigation_arrows,
            enable_swipe: options.enable_swipe,
            start_day_of_week: options.start_day_of_week,
            six_weeks_in_calendar: options.six_weeks_in_calendar,
            enable_click_on_disabled_dates: options.enable_click_on_disabled_dates,
        }
    }

    /// The saved month, or `None` if month or year is missing so that the
    /// caller can fall back to today.
    pub fn month_key(&self) -> CaldroidResult<Option<MonthKey>> {
        match (self.month, self.year) {
            (Some(month), Some(year)) => MonthKey::new(year, month).map(Some),
            _ => Ok(None),
        }
    }

    pub fn options(&self) -> CalendarOptions {
        CalendarOptions {
            start_day_of_week: self.start_day_of_week,
            six_weeks_in_calendar: self.six_weeks_in_calendar,
            show_navigation_arrows: self.show_navigation_arrows,
            enable_swipe: self.enable_swipe,
            enable_click_on_disabled_dates: self.enable_click_on_disabled_dates,
        }
    }

    pub fn selected_dates(&self) -> CaldroidResult<Vec<CalendarDate>> {
        parse_dates(&self.selected_dates)
    }

    pub fn disabled_dates(&self) -> CaldroidResult<Vec<CalendarDate>> {
        parse_dates(&self.disable_dates)
    }

    pub fn min_date(&self) -> CaldroidResult<Option<CalendarDate>> {
        self.min_date.as_deref().map(parse_date).transpose()
    }

    pub fn max_date(&self) -> CaldroidResult<Option<CalendarDate>> {
        self.max_date.as_deref().map(parse_date).transpose()
    }

    pub fn constraints(&self) -> CaldroidResult<DateConstraints> {
        let mut constraints = DateConstraints::new();
        constraints.set_selected_dates(self.selected_dates()?);
        constraints.set_disabled_dates(self.disabled_dates()?);
        constraints.set_min_date(self.min_date()?);
        constraints.set_max_date(self.max_date()?);
        Ok(constraints)
    }

    pub fn to_json(&self) -> CaldroidResult<String> {
        serde_json::to_string(self).map_err(|e| CaldroidError::Serialization(e.to_string()))
    }

    pub fn from_json(json: &str) -> CaldroidResult<Self> {
        serde_json::from_str(json).map_err(|e| CaldroidError::Serialization(e.to_string()))
    }

    pub fn to_toml(&self) -> CaldroidResult<String> {
        toml::to_string_pretty(self).map_err(|e| CaldroidError::Serialization(e.to_string()))
    }

    pub fn from_toml(content: &str) -> CaldroidResult<Self> {
        toml::from_str(content).map_err(|e| CaldroidError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_capture_uses_original_key_names() {
        let mut constraints = DateConstraints::new();
        constraints.add_disabled_date(date(2013, 12, 24));
        constraints.set_min_date(Some(date(2013, 12, 1)));

        let state = SavedState::capture(
            MonthKey::new(2013, 12).ok(),
            &CalendarOptions::default(),
            &constraints,
            None,
        );
        let json: serde_json::Value = serde_json::from_str(&state.to_json().unwrap()).unwrap();

        assert_eq!(json["month"], 12);
        assert_eq!(json["year"], 2013);
        assert_eq!(json["disableDates"], serde_json::json!(["2013-12-24"]));
        assert_eq!(json["minDate"], "2013-12-01");
        assert_eq!(json["startDayOfWeek"], 1);
        assert_eq!(json["sixWeeksInCalendar"], true);
        assert!(json.get("selectedDates").is_none());
        assert!(json.get("maxDate").is_none());
        assert!(json.get("dialogTitle").is_none());
    }

    #[test]
    fn test_missing_keys_take_defaults() {
        let state = SavedState::from_json("{}").unwrap();

        assert_eq!(state.month_key().unwrap(), None);
        assert_eq!(state.options(), CalendarOptions::default());
        assert_eq!(state.constraints().unwrap(), DateConstraints::default());
    }

    #[test]
    fn test_malformed_date_is_a_parse_error() {
        let state = SavedState::from_json(r#"{"selectedDates": ["2024-01-01", "01/02/2024"]}"#)
            .unwrap();
        assert!(matches!(state.selected_dates(), Err(CaldroidError::Parse(_))));
        assert!(matches!(state.constraints(), Err(CaldroidError::Parse(_))));

        let state = SavedState::from_json(r#"{"maxDate": "tomorrow"}"#).unwrap();
        assert!(matches!(state.max_date(), Err(CaldroidError::Parse(_))));
    }

    #[test]
    fn test_invalid_month_is_rejected() {
        let state = SavedState::from_json(r#"{"month": 13, "year": 2024}"#).unwrap();
        assert!(matches!(state.month_key(), Err(CaldroidError::InvalidArgument(_))));
    }

    #[test]
    fn test_toml_dump_restores_constraints() {
        let mut constraints = DateConstraints::new();
        constraints.select_range(date(2024, 2, 28), date(2024, 3, 1)).unwrap();
        constraints.set_max_date(Some(date(2024, 12, 31)));
        let options = CalendarOptions {
            start_day_of_week: 2,
            ..Default::default()
        };

        let state =
            SavedState::capture(MonthKey::new(2024, 2).ok(), &options, &constraints, Some("Pick"));
        let restored = SavedState::from_toml(&state.to_toml().unwrap()).unwrap();

        assert_eq!(restored, state);
        assert_eq!(restored.constraints().unwrap(), constraints);
        assert_eq!(restored.options(), options);
        assert_eq!(restored.dialog_title.as_deref(), Some("Pick"));
    }
}
