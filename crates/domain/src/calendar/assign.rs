//! Event-day assignment: which events start on which grid day.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::event::{Event, EventRecord};
use crate::time::{DisplayZone, local_date};

/// Events bucketed by the local date they start on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    buckets: BTreeMap<NaiveDate, Vec<Event>>,
    skipped: usize,
}

impl Assignment {
    /// The ordered bucket for `date`; empty when the date is not in the grid.
    #[must_use]
    pub fn events_on(&self, date: NaiveDate) -> &[Event] {
        self.buckets.get(&date).map(Vec::as_slice).unwrap_or_default()
    }

    /// Move the bucket for `date` out of the assignment.
    pub fn take(&mut self, date: NaiveDate) -> Vec<Event> {
        self.buckets.remove(&date).unwrap_or_default()
    }

    /// Number of records dropped because they could not be parsed.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

/// Assign each record to the day its start falls on in `zone`.
///
/// Only the start date counts: an event running past midnight is not repeated
/// on the following days. Records starting outside `days` are ignored.
/// Records with unreadable timestamps, or with `start >= end`, are dropped and
/// counted in [`Assignment::skipped`]. Each bucket is ordered by start, then
/// by id.
#[must_use]
pub fn assign(days: &[NaiveDate], records: &[EventRecord], zone: DisplayZone) -> Assignment {
    let mut buckets: BTreeMap<NaiveDate, Vec<Event>> =
        days.iter().map(|day| (*day, Vec::new())).collect();
    let mut skipped = 0;

    for record in records {
        let Ok(event) = record.parse() else {
            skipped += 1;
            continue;
        };
        if let Some(bucket) = buckets.get_mut(&local_date(event.start, zone)) {
            bucket.push(event);
        }
    }

    for bucket in buckets.values_mut() {
        bucket.sort_by_key(|event| (event.start, event.id));
    }

    Assignment { buckets, skipped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::EventId;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(id: i64, start: &str, end: &str) -> EventRecord {
        EventRecord {
            id: EventId::new(id),
            name: format!("session {id}"),
            color: "4CAF50".to_string(),
            start: start.to_string(),
            end: end.to_string(),
            trainer_id: None,
            weekly_id: None,
        }
    }

    fn ids(events: &[Event]) -> Vec<i64> {
        events.iter().map(|event| event.id.get()).collect()
    }

    fn february_days() -> Vec<NaiveDate> {
        date(2024, 2, 14).iter_days().take(3).collect()
    }

    #[test]
    fn should_place_event_on_its_start_day_only() {
        let records = [record(1, "2024-02-15T09:00:00", "2024-02-15T10:00:00")];
        let assignment = assign(&february_days(), &records, chrono_tz::UTC);

        assert_eq!(ids(assignment.events_on(date(2024, 2, 15))), vec![1]);
        assert!(assignment.events_on(date(2024, 2, 16)).is_empty());
        assert_eq!(assignment.skipped(), 0);
    }

    #[test]
    fn should_not_repeat_multi_day_event() {
        let records = [record(1, "2024-02-14T20:00:00", "2024-02-16T08:00:00")];
        let assignment = assign(&february_days(), &records, chrono_tz::UTC);

        assert_eq!(ids(assignment.events_on(date(2024, 2, 14))), vec![1]);
        assert!(assignment.events_on(date(2024, 2, 15)).is_empty());
        assert!(assignment.events_on(date(2024, 2, 16)).is_empty());
    }

    #[test]
    fn should_break_start_ties_by_ascending_id() {
        let records = [
            record(5, "2024-02-15T18:00:00", "2024-02-15T20:00:00"),
            record(3, "2024-02-15T18:00:00", "2024-02-15T19:00:00"),
            record(1, "2024-02-15T07:00:00", "2024-02-15T08:00:00"),
        ];
        let assignment = assign(&february_days(), &records, chrono_tz::UTC);

        assert_eq!(ids(assignment.events_on(date(2024, 2, 15))), vec![1, 3, 5]);
    }

    #[test]
    fn should_bucket_by_display_zone_date() {
        let records = [record(1, "2024-02-14T23:30:00Z", "2024-02-15T01:00:00Z")];

        let utc = assign(&february_days(), &records, chrono_tz::UTC);
        assert_eq!(ids(utc.events_on(date(2024, 2, 14))), vec![1]);

        let moscow = assign(&february_days(), &records, chrono_tz::Europe::Moscow);
        assert!(moscow.events_on(date(2024, 2, 14)).is_empty());
        assert_eq!(ids(moscow.events_on(date(2024, 2, 15))), vec![1]);
    }

    #[test]
    fn should_count_malformed_records_without_failing() {
        let records = [
            record(1, "2024-02-15T09:00:00", "2024-02-15T10:00:00"),
            record(2, "not a date", "2024-02-15T10:00:00"),
            record(3, "2024-02-15T09:00:00", "2024-02-15T08:00:00"),
        ];
        let assignment = assign(&february_days(), &records, chrono_tz::UTC);

        assert_eq!(assignment.skipped(), 2);
        assert_eq!(ids(assignment.events_on(date(2024, 2, 15))), vec![1]);
    }

    #[test]
    fn should_ignore_events_outside_the_days() {
        let records = [record(1, "2024-03-20T09:00:00", "2024-03-20T10:00:00")];
        let assignment = assign(&february_days(), &records, chrono_tz::UTC);

        assert_eq!(assignment.skipped(), 0);
        assert!(assignment.events_on(date(2024, 3, 20)).is_empty());
    }

    #[test]
    fn should_move_bucket_out_on_take() {
        let records = [record(1, "2024-02-15T09:00:00", "2024-02-15T10:00:00")];
        let mut assignment = assign(&february_days(), &records, chrono_tz::UTC);

        assert_eq!(ids(&assignment.take(date(2024, 2, 15))), vec![1]);
        assert!(assignment.take(date(2024, 2, 15)).is_empty());
    }
}
