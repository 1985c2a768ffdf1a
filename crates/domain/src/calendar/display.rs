//! Display previews — per-breakpoint truncation of day buckets.
//!
//! The month itself always carries every event of a day. A preview shows the
//! first few and counts the rest, for "+N more" indicators.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::month::{CalendarDay, CalendarMonth};
use crate::error::ValidationError;
use crate::event::Event;

/// Responsive size class of the consuming view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Xs,
    Sm,
    Md,
}

impl FromStr for Breakpoint {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xs" => Ok(Self::Xs),
            "sm" => Ok(Self::Sm),
            "md" => Ok(Self::Md),
            _ => Err(ValidationError::InvalidBreakpoint(s.to_string())),
        }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Xs => "xs",
            Self::Sm => "sm",
            Self::Md => "md",
        })
    }
}

/// How many events a day cell shows at each breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisibleCounts {
    pub xs: usize,
    pub sm: usize,
    pub md: usize,
}

impl Default for VisibleCounts {
    fn default() -> Self {
        Self { xs: 1, sm: 2, md: 3 }
    }
}

impl VisibleCounts {
    /// Visible events for `breakpoint`.
    #[must_use]
    pub fn for_breakpoint(&self, breakpoint: Breakpoint) -> usize {
        match breakpoint {
            Breakpoint::Xs => self.xs,
            Breakpoint::Sm => self.sm,
            Breakpoint::Md => self.md,
        }
    }

    /// Every breakpoint must show at least one event.
    ///
    /// # Errors
    ///
    /// Returns the name of the first breakpoint configured with zero.
    pub fn validate(&self) -> Result<(), Breakpoint> {
        [Breakpoint::Xs, Breakpoint::Sm, Breakpoint::Md]
            .into_iter()
            .find(|bp| self.for_breakpoint(*bp) == 0)
            .map_or(Ok(()), Err)
    }
}

/// A day cell with its bucket cut down to `limit` events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayPreview<'a> {
    pub date: NaiveDate,
    pub is_today: bool,
    pub is_current_month: bool,
    pub events: &'a [Event],
    /// Events not shown ("+N more").
    pub hidden: usize,
}

impl<'a> DayPreview<'a> {
    #[must_use]
    pub fn of(day: &'a CalendarDay, limit: usize) -> Self {
        let shown = day.events.len().min(limit);
        Self {
            date: day.date,
            is_today: day.is_today,
            is_current_month: day.is_current_month,
            events: &day.events[..shown],
            hidden: day.events.len() - shown,
        }
    }
}

/// A whole month of [`DayPreview`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthPreview<'a> {
    pub date: NaiveDate,
    pub days: Vec<DayPreview<'a>>,
    pub prev_date: NaiveDate,
    pub next_date: NaiveDate,
}

impl<'a> MonthPreview<'a> {
    #[must_use]
    pub fn of(month: &'a CalendarMonth, limit: usize) -> Self {
        Self {
            date: month.date,
            days: month
                .days
                .iter()
                .map(|day| DayPreview::of(day, limit))
                .collect(),
            prev_date: month.prev_date,
            next_date: month.next_date,
        }
    }
}
