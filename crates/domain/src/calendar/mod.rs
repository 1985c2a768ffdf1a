//! Calendar month construction and day bucketing.
//!
//! `(year, month, events, today, zone) → CalendarMonth`, in three steps:
//! [`grid`] lays out the dates, [`assign`] buckets events by local start
//! date, [`month`] assembles days and navigation anchors. Everything here is
//! pure; `today` is always supplied by the caller.
//!
//! [`display`] builds truncated previews on top of a finished month.

pub mod assign;
pub mod display;
pub mod grid;
pub mod month;

pub use assign::{Assignment, assign};
pub use display::{Breakpoint, DayPreview, MonthPreview, VisibleCounts};
pub use grid::{generate_grid, grid_bounds, grid_window};
pub use month::{CalendarDay, CalendarMonth, MonthBuild, PartialDataWarning, build};
