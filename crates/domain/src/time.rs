//! Time, timestamp and display-zone helpers.
//!
//! Stored timestamps are absolute instants. Text without an offset is
//! interpreted as UTC; day boundaries are decided in a configured
//! [`DisplayZone`].

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc};

use crate::error::ValidationError;

/// UTC timestamp used for event start/end instants.
pub type Timestamp = DateTime<Utc>;

/// IANA timezone in which calendar days are laid out.
pub type DisplayZone = chrono_tz::Tz;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Parse a timestamp as delivered by the event source.
///
/// Accepts RFC 3339 text (the offset is honoured) and naive
/// `YYYY-MM-DDTHH:MM:SS[.fff]` / `YYYY-MM-DD HH:MM:SS[.fff]` text, which is
/// read as UTC.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidTimestamp`] when none of the formats match.
pub fn parse_timestamp(text: &str) -> Result<Timestamp, ValidationError> {
    let trimmed = text.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(with_offset.to_utc());
    }
    trimmed
        .parse::<NaiveDateTime>()
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
        .map_err(|_| ValidationError::InvalidTimestamp(text.to_owned()))
}

/// Parse an IANA timezone name such as `Europe/Moscow`.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidTimezone`] for unknown names.
pub fn parse_zone(name: &str) -> Result<DisplayZone, ValidationError> {
    name.trim()
        .parse::<DisplayZone>()
        .map_err(|_| ValidationError::InvalidTimezone(name.to_owned()))
}

/// Calendar date on which `instant` falls in `zone`.
#[must_use]
pub fn local_date(instant: Timestamp, zone: DisplayZone) -> NaiveDate {
    instant.with_timezone(&zone).date_naive()
}

/// The instant at which `date` begins in `zone`.
#[must_use]
pub fn local_midnight(date: NaiveDate, zone: DisplayZone) -> Timestamp {
    let naive = date.and_time(NaiveTime::MIN);
    if let Some(start) = zone.from_local_datetime(&naive).earliest() {
        return start.with_timezone(&Utc);
    }
    // midnight skipped by a DST jump: the day starts at the first local time
    // that exists after it, which is the transition itself
    (1..=24 * 60)
        .find_map(|minutes| {
            zone.from_local_datetime(&(naive + Duration::minutes(minutes)))
                .earliest()
        })
        .map_or_else(
            || {
                let before = zone
                    .offset_from_utc_datetime(&(naive - Duration::days(1)))
                    .fix();
                (naive - Duration::seconds(i64::from(before.local_minus_utc()))).and_utc()
            },
            |start| start.with_timezone(&Utc),
        )
}

/// Instants `[from, to)` covering `date` in `zone`.
#[must_use]
pub fn day_window(date: NaiveDate, zone: DisplayZone) -> (Timestamp, Timestamp) {
    let to = date
        .succ_opt()
        .map_or(DateTime::<Utc>::MAX_UTC, |next| local_midnight(next, zone));
    (local_midnight(date, zone), to)
}
