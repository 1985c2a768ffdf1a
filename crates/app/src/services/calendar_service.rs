//! Calendar service — fetch the visible window and build a month.

use chrono::{Datelike, NaiveDate};
use hema_domain::calendar::{self, MonthBuild, grid_window};
use hema_domain::error::HemaError;
use hema_domain::time::{DisplayZone, local_date};

use crate::ports::{Clock, EventSource};

/// Application service producing [`MonthBuild`]s.
pub struct CalendarService<S, C> {
    source: S,
    clock: C,
    zone: DisplayZone,
}

impl<S: EventSource, C: Clock> CalendarService<S, C> {
    /// Create a new service laying out days in `zone`.
    pub fn new(source: S, clock: C, zone: DisplayZone) -> Self {
        Self {
            source,
            clock,
            zone,
        }
    }

    /// The display zone days are laid out in.
    pub fn zone(&self) -> DisplayZone {
        self.zone
    }

    /// Current date in the display zone.
    pub fn today(&self) -> NaiveDate {
        local_date(self.clock.now(), self.zone)
    }

    /// Build the month `year`/`month`, fetching only the events the grid shows.
    ///
    /// # Errors
    ///
    /// Returns [`HemaError::InvalidArgument`] for an invalid month or year
    /// (before any fetch), or the event source's error.
    pub async fn month(&self, year: i32, month: u32) -> Result<MonthBuild, HemaError> {
        let (from, to) = grid_window(year, month, self.zone)?;
        let records = self.source.list(from, to).await?;
        let built = calendar::build(year, month, &records, self.today(), self.zone)?;

        if let Some(warning) = built.warning {
            tracing::warn!(
                year,
                month,
                skipped = warning.skipped,
                "omitting malformed events from calendar"
            );
        }
        tracing::debug!(
            year,
            month,
            fetched = records.len(),
            days = built.month.days.len(),
            "built calendar month"
        );
        Ok(built)
    }

    /// Build the month containing today.
    ///
    /// # Errors
    ///
    /// Same as [`CalendarService::month`].
    pub async fn current_month(&self) -> Result<MonthBuild, HemaError> {
        let today = self.today();
        self.month(today.year(), today.month()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hema_domain::error::ValidationError;
    use hema_domain::event::{EventRecord, NewEvent};
    use hema_domain::id::EventId;
    use hema_domain::time::{Timestamp, parse_timestamp};
    use std::future::Future;
    use std::sync::Mutex;

    #[derive(Default)]
    struct InMemorySource {
        records: Vec<EventRecord>,
        calls: Mutex<Vec<(Timestamp, Timestamp)>>,
    }

    impl EventSource for InMemorySource {
        fn list(
            &self,
            from: Timestamp,
            to: Timestamp,
        ) -> impl Future<Output = Result<Vec<EventRecord>, HemaError>> + Send {
            self.calls.lock().unwrap().push((from, to));
            let result: Vec<EventRecord> = self
                .records
                .iter()
                .filter(|r| r.start_instant().is_none_or(|s| s >= from && s < to))
                .cloned()
                .collect();
            async { Ok(result) }
        }

        fn get_by_id(
            &self,
            id: EventId,
        ) -> impl Future<Output = Result<Option<EventRecord>, HemaError>> + Send {
            let result = self.records.iter().find(|r| r.id == id).cloned();
            async { Ok(result) }
        }

        fn create(
            &self,
            _event: NewEvent,
        ) -> impl Future<Output = Result<EventRecord, HemaError>> + Send {
            async { Err(HemaError::Source("read-only".into())) }
        }

        fn update(
            &self,
            _id: EventId,
            _event: NewEvent,
        ) -> impl Future<Output = Result<Option<EventRecord>, HemaError>> + Send {
            async { Err(HemaError::Source("read-only".into())) }
        }

        fn delete(&self, _id: EventId) -> impl Future<Output = Result<bool, HemaError>> + Send {
            async { Err(HemaError::Source("read-only".into())) }
        }
    }

    struct FixedClock(Timestamp);

    impl Clock for FixedClock {
        fn now(&self) -> Timestamp {
            self.0
        }
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

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_service(
        records: Vec<EventRecord>,
        now: &str,
        zone: DisplayZone,
    ) -> CalendarService<InMemorySource, FixedClock> {
        let source = InMemorySource {
            records,
            ..InMemorySource::default()
        };
        CalendarService::new(source, FixedClock(parse_timestamp(now).unwrap()), zone)
    }

    #[tokio::test]
    async fn should_build_requested_month_with_today_from_clock() {
        let svc = make_service(vec![], "2024-02-15T12:00:00Z", chrono_tz::UTC);

        let built = svc.month(2024, 2).await.unwrap();
        assert_eq!(built.month.date, date(2024, 2, 1));
        assert_eq!(built.month.today().unwrap().date, date(2024, 2, 15));
    }

    #[tokio::test]
    async fn should_fetch_exactly_the_grid_window() {
        let svc = make_service(vec![], "2024-02-15T12:00:00Z", chrono_tz::UTC);

        svc.month(2024, 2).await.unwrap();

        let calls = svc.source.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, parse_timestamp("2024-01-29T00:00:00Z").unwrap());
        assert_eq!(calls[0].1, parse_timestamp("2024-03-04T00:00:00Z").unwrap());
    }

    #[tokio::test]
    async fn should_reject_invalid_month_without_fetching() {
        let svc = make_service(vec![], "2024-02-15T12:00:00Z", chrono_tz::UTC);

        let result = svc.month(2024, 13).await;
        assert!(matches!(
            result,
            Err(HemaError::InvalidArgument(ValidationError::InvalidMonth(13)))
        ));
        assert!(svc.source.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_report_malformed_events_as_warning() {
        let svc = make_service(
            vec![
                record(1, "2024-02-15T09:00:00", "2024-02-15T10:00:00"),
                record(2, "garbage", "2024-02-15T10:00:00"),
            ],
            "2024-02-15T12:00:00Z",
            chrono_tz::UTC,
        );

        let built = svc.month(2024, 2).await.unwrap();
        assert_eq!(built.skipped_events(), 1);
        assert_eq!(built.month.day(date(2024, 2, 15)).unwrap().events.len(), 1);
    }

    #[tokio::test]
    async fn should_derive_today_in_display_zone() {
        // 22:30 UTC on Feb 29 is already March 1 in Moscow
        let svc = make_service(vec![], "2024-02-29T22:30:00Z", chrono_tz::Europe::Moscow);

        assert_eq!(svc.today(), date(2024, 3, 1));
        let built = svc.current_month().await.unwrap();
        assert_eq!(built.month.date, date(2024, 3, 1));
        assert_eq!(built.month.prev_date, date(2024, 2, 1));
    }

    #[tokio::test]
    async fn should_propagate_source_errors() {
        struct FailingSource;

        impl EventSource for FailingSource {
            async fn list(
                &self,
                _from: Timestamp,
                _to: Timestamp,
            ) -> Result<Vec<EventRecord>, HemaError> {
                Err(HemaError::Source("connection refused".into()))
            }
            async fn get_by_id(&self, _id: EventId) -> Result<Option<EventRecord>, HemaError> {
                Ok(None)
            }
            async fn create(&self, _event: NewEvent) -> Result<EventRecord, HemaError> {
                Err(HemaError::Source("read-only".into()))
            }
            async fn update(
                &self,
                _id: EventId,
                _event: NewEvent,
            ) -> Result<Option<EventRecord>, HemaError> {
                Err(HemaError::Source("read-only".into()))
            }
            async fn delete(&self, _id: EventId) -> Result<bool, HemaError> {
                Err(HemaError::Source("read-only".into()))
            }
        }

        let svc = CalendarService::new(
            FailingSource,
            FixedClock(parse_timestamp("2024-02-15T12:00:00Z").unwrap()),
            chrono_tz::UTC,
        );
        assert!(matches!(
            svc.month(2024, 2).await,
            Err(HemaError::Source(_))
        ));
    }
}
