//! Calendar behaviour options.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::date::WeekStart;
use crate::error::{CaldroidError, CaldroidResult};

fn default_start_day_of_week() -> i32 {
    WeekStart::SUNDAY.number() as i32
}

fn default_true() -> bool {
    true
}

/// Options stored in ~/.config/caldroid/config.toml
///
/// Every field is optional in the file; missing fields take the defaults
/// of [`CalendarOptions::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarOptions {
    /// First column, 1 = Sunday ... 7 = Saturday.
    #[serde(default = "default_start_day_of_week")]
    pub start_day_of_week: i32,

    /// Always show six rows.
    #[serde(default = "default_true")]
    pub six_weeks_in_calendar: bool,

    #[serde(default = "default_true")]
    pub show_navigation_arrows: bool,

    #[serde(default = "default_true")]
    pub enable_swipe: bool,

    /// Deliver clicks on disabled dates to the listener anyway.
    #[serde(default)]
    pub enable_click_on_disabled_dates: bool,
}

impl Default for CalendarOptions {
    fn default() -> Self {
        CalendarOptions {
            start_day_of_week: default_start_day_of_week(),
            six_weeks_in_calendar: true,
            show_navigation_arrows: true,
            enable_swipe: true,
            enable_click_on_disabled_dates: false,
        }
    }
}

impl CalendarOptions {
    pub fn config_path() -> CaldroidResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CaldroidError::Config("Could not determine config directory".into()))?
            .join("caldroid");

        Ok(config_dir.join("config.toml"))
    }

    pub fn week_start(&self) -> CaldroidResult<WeekStart> {
        WeekStart::normalize(self.start_day_of_week)
    }

    /// Load options from `path`, falling back to defaults if it does not exist.
    pub fn load(path: &Path) -> CaldroidResult<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let options: CalendarOptions =
                toml::from_str(&content).map_err(|e| CaldroidError::Config(e.to_string()))?;
            options.week_start()?;
            Ok(options)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> CaldroidResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| CaldroidError::Config(e.to_string()))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CaldroidResult<()> {
        let contents = "\
# caldroid configuration

# First column of the month grid, 1 = Sunday ... 7 = Saturday:
# start_day_of_week = 1

# Always show six rows, even for months spanning fewer weeks:
# six_weeks_in_calendar = true

# show_navigation_arrows = true
# enable_swipe = true

# Report clicks on disabled dates too:
# enable_click_on_disabled_dates = false
";

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CaldroidError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CaldroidError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let options = CalendarOptions::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(options, CalendarOptions::default());
        assert_eq!(options.week_start().unwrap(), WeekStart::SUNDAY);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");
        let options = CalendarOptions {
            start_day_of_week: 2,
            six_weeks_in_calendar: false,
            enable_click_on_disabled_dates: true,
            ..Default::default()
        };

        options.save(&path).unwrap();

        assert_eq!(CalendarOptions::load(&path).unwrap(), options);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "start_day_of_week = 2\n").unwrap();

        let options = CalendarOptions::load(&path).unwrap();
        assert_eq!(options.week_start().unwrap(), WeekStart::MONDAY);
        assert!(options.six_weeks_in_calendar);
        assert!(!options.enable_click_on_disabled_dates);
    }

    #[test]
    fn test_default_config_template_loads_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("caldroid/config.toml");

        CalendarOptions::create_default_config(&path).unwrap();

        assert_eq!(CalendarOptions::load(&path).unwrap(), CalendarOptions::default());
    }

    #[test]
    fn test_invalid_week_start_is_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "start_day_of_week = 0\n").unwrap();

        assert!(matches!(
            CalendarOptions::load(&path),
            Err(CaldroidError::InvalidArgument(_))
        ));
    }
}
