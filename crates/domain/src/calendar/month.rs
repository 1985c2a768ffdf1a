//! Month assembly: grid days, their events, and navigation anchors.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::assign::assign;
use crate::calendar::grid::{first_of_month, generate_grid, next_month, previous_month};
use crate::error::HemaError;
use crate::event::{Event, EventRecord};
use crate::time::DisplayZone;

/// One cell of the month grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub is_today: bool,
    pub is_current_month: bool,
    pub events: Vec<Event>,
}

/// A month laid out as complete Monday-first weeks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarMonth {
    /// First day of the requested month.
    pub date: NaiveDate,
    pub days: Vec<CalendarDay>,
    /// First day of the previous month.
    pub prev_date: NaiveDate,
    /// First day of the next month.
    pub next_date: NaiveDate,
}

impl CalendarMonth {
    /// Look up the cell for `date`, if it is part of the grid.
    #[must_use]
    pub fn day(&self, date: NaiveDate) -> Option<&CalendarDay> {
        self.days.iter().find(|day| day.date == date)
    }

    /// The cell flagged as today, if today is on the grid.
    #[must_use]
    pub fn today(&self) -> Option<&CalendarDay> {
        self.days.iter().find(|day| day.is_today)
    }
}

/// Some events were left out of the month because they could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{skipped} event(s) omitted because their timestamps could not be read")]
pub struct PartialDataWarning {
    pub skipped: usize,
}

/// Result of [`build`]: the month plus any non-fatal diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthBuild {
    pub month: CalendarMonth,
    pub warning: Option<PartialDataWarning>,
}

impl MonthBuild {
    /// Number of events omitted from the month.
    #[must_use]
    pub fn skipped_events(&self) -> usize {
        self.warning.map_or(0, |warning| warning.skipped)
    }
}

/// Build the calendar month for `year`/`month`.
///
/// `events` may contain anything the event source returned; records that
/// cannot be read are omitted and reported through
/// [`MonthBuild::warning`]. `today` is the caller's current date in `zone`.
///
/// # Errors
///
/// Returns [`HemaError::InvalidArgument`] when `month` is outside `1..=12`
/// or `year` is outside the supported calendar range.
pub fn build(
    year: i32,
    month: u32,
    events: &[EventRecord],
    today: NaiveDate,
    zone: DisplayZone,
) -> Result<MonthBuild, HemaError> {
    let anchor = first_of_month(year, month)?;
    let dates = generate_grid(year, month)?;

    let (prev_year, prev) = previous_month(year, month);
    let (next_year, next) = next_month(year, month);
    let prev_date = first_of_month(prev_year, prev)?;
    let next_date = first_of_month(next_year, next)?;

    let mut assignment = assign(&dates, events, zone);
    let skipped = assignment.skipped();

    let days = dates
        .into_iter()
        .map(|date| CalendarDay {
            date,
            is_today: date == today,
            is_current_month: date.year() == year && date.month() == month,
            events: assignment.take(date),
        })
        .collect();

    Ok(MonthBuild {
        month: CalendarMonth {
            date: anchor,
            days,
            prev_date,
            next_date,
        },
        warning: (skipped > 0).then_some(PartialDataWarning { skipped }),
    })
}
