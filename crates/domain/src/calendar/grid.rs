//! Date-grid generation: the Monday-first weeks covering a month.

use chrono::{Datelike, Days, NaiveDate};

use crate::error::{HemaError, ValidationError};
use crate::time::{DisplayZone, Timestamp, local_midnight};

/// The anchor (first day) of `month` in `year`.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidMonth`] for a month outside `1..=12`,
/// and [`ValidationError::YearOutOfRange`] when the date is not representable.
pub fn first_of_month(year: i32, month: u32) -> Result<NaiveDate, HemaError> {
    if !(1..=12).contains(&month) {
        return Err(ValidationError::InvalidMonth(month).into());
    }
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| ValidationError::YearOutOfRange(year).into())
}

/// `(year, month)` of the month before, rolling over into December.
#[must_use]
pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month <= 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// `(year, month)` of the month after, rolling over into January.
#[must_use]
pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month >= 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

/// First and last day of the grid: the Monday on or before the 1st and the
/// Sunday on or after the last day of the month.
///
/// # Errors
///
/// Same as [`first_of_month`]; also fails when the grid would leave the
/// representable calendar range.
pub fn grid_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), HemaError> {
    let first = first_of_month(year, month)?;
    let out_of_range = || ValidationError::YearOutOfRange(year);

    let (next_year, next) = next_month(year, month);
    let last = NaiveDate::from_ymd_opt(next_year, next, 1)
        .and_then(|d| d.pred_opt())
        .ok_or_else(out_of_range)?;

    let leading = u64::from(first.weekday().num_days_from_monday());
    let trailing = u64::from(6 - last.weekday().num_days_from_monday());

    let start = first
        .checked_sub_days(Days::new(leading))
        .ok_or_else(out_of_range)?;
    let end = last
        .checked_add_days(Days::new(trailing))
        .ok_or_else(out_of_range)?;
    Ok((start, end))
}

/// Every date of the grid, in order, one calendar day apart.
///
/// The length is the smallest multiple of 7 that covers the month (28, 35
/// or 42).
///
/// # Errors
///
/// Same as [`grid_bounds`].
pub fn generate_grid(year: i32, month: u32) -> Result<Vec<NaiveDate>, HemaError> {
    let (start, end) = grid_bounds(year, month)?;
    Ok(start.iter_days().take_while(|day| *day <= end).collect())
}

/// Absolute instants `[from, to)` covered by the grid in `zone`.
///
/// `from` is local midnight of the first grid day, `to` local midnight of the
/// day after the last one. Used to ask the event source for exactly the
/// visible range.
///
/// # Errors
///
/// Same as [`grid_bounds`].
pub fn grid_window(
    year: i32,
    month: u32,
    zone: DisplayZone,
) -> Result<(Timestamp, Timestamp), HemaError> {
    let (start, end) = grid_bounds(year, month)?;
    let after = end
        .succ_opt()
        .ok_or(ValidationError::YearOutOfRange(year))?;
    Ok((local_midnight(start, zone), local_midnight(after, zone)))
}
