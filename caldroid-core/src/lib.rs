//! Core types for caldroid.
//!
//! This crate holds the parts of a calendar widget that are plain date math:
//! - `grid` builds the dates shown for one month, filler days included
//! - `pager` maps an infinite pager onto four recycled month slots
//! - `constraints` tracks disabled, selected and out-of-range dates
//! - `saved_state` and `options` are the persisted key-value state and config

pub mod constraints;
pub mod date;
pub mod error;
pub mod grid;
pub mod options;
pub mod pager;
pub mod saved_state;

pub use constraints::{CellState, DateConstraints};
pub use date::{CalendarDate, MonthKey, WeekStart};
pub use error::{CaldroidError, CaldroidResult};
pub use grid::{DateGrid, GridConfiguration, build_grid, weekday_headers};
pub use options::CalendarOptions;
pub use pager::{PageChange, PageDirection, PagerState, Slot, SlotStatus, slot_for};
pub use saved_state::SavedState;
