//! Calendar widget state on top of `caldroid-core`.
//!
//! [`CalendarController`] keeps the month pager, options and date
//! constraints of one calendar and reports clicks and month changes to a
//! [`CalendarListener`]. Drawing the grid is left to the host.

mod controller;
mod listener;

pub use caldroid_core::*;
pub use controller::CalendarController;
pub use listener::CalendarListener;
