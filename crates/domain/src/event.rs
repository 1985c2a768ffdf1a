//! Event — a scheduled training session owned by the remote event store.
//!
//! Two shapes exist:
//! - [`EventRecord`] is the serialization-layer form delivered by the event
//!   source, with timestamps still as text. It tolerates the
//!   `weekly_event_id` spelling of the recurring-series field.
//! - [`Event`] is the parsed, typed value the calendar works with.
//!
//! [`NewEvent`] is the payload of the "create event" flow.

use std::fmt;
use std::str::FromStr;

use chrono::SecondsFormat;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{HemaError, ValidationError};
use crate::id::{EventId, TrainerId, WeeklyEventId};
use crate::time::{Timestamp, parse_timestamp};

/// Color used when none is given or the stored one is unusable.
pub const DEFAULT_COLOR: &str = "4CAF50";

/// Display color: exactly six hex digits, no leading `#`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(String);

impl Color {
    /// The hex digits, e.g. `4CAF50`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse `text`, falling back to [`DEFAULT_COLOR`] when it is malformed.
    #[must_use]
    pub fn parse_or_default(text: &str) -> Self {
        text.parse().unwrap_or_default()
    }
}

impl Default for Color {
    fn default() -> Self {
        Self(DEFAULT_COLOR.to_string())
    }
}

impl FromStr for Color {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == 6 && s.bytes().all(|b| b.is_ascii_hexdigit()) {
            Ok(Self(s.to_string()))
        } else {
            Err(ValidationError::InvalidColor(s.to_string()))
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A parsed event with absolute start/end instants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub color: Color,
    pub start: Timestamp,
    pub end: Timestamp,
    pub trainer_id: Option<TrainerId>,
    pub weekly_id: Option<WeeklyEventId>,
}

impl Event {
    /// Create a builder for constructing an [`Event`].
    #[must_use]
    pub fn builder() -> EventBuilder {
        EventBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HemaError::InvalidArgument`] when `name` is empty or
    /// `start` is not before `end`.
    pub fn validate(&self) -> Result<(), HemaError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.start >= self.end {
            return Err(ValidationError::InvalidTimeRange.into());
        }
        Ok(())
    }

    /// Convert back into the wire shape, timestamps as RFC 3339 UTC.
    #[must_use]
    pub fn to_record(&self) -> EventRecord {
        EventRecord {
            id: self.id,
            name: self.name.clone(),
            color: self.color.to_string(),
            start: self.start.to_rfc3339_opts(SecondsFormat::Secs, true),
            end: self.end.to_rfc3339_opts(SecondsFormat::Secs, true),
            trainer_id: self.trainer_id,
            weekly_id: self.weekly_id,
        }
    }
}

/// Step-by-step builder for [`Event`].
#[derive(Debug, Default)]
pub struct EventBuilder {
    id: Option<EventId>,
    name: Option<String>,
    color: Option<Color>,
    start: Option<Timestamp>,
    end: Option<Timestamp>,
    trainer_id: Option<TrainerId>,
    weekly_id: Option<WeeklyEventId>,
}

impl EventBuilder {
    #[must_use]
    pub fn id(mut self, id: impl Into<EventId>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn start(mut self, start: Timestamp) -> Self {
        self.start = Some(start);
        self
    }

    #[must_use]
    pub fn end(mut self, end: Timestamp) -> Self {
        self.end = Some(end);
        self
    }

    #[must_use]
    pub fn trainer_id(mut self, trainer_id: impl Into<TrainerId>) -> Self {
        self.trainer_id = Some(trainer_id.into());
        self
    }

    #[must_use]
    pub fn weekly_id(mut self, weekly_id: impl Into<WeeklyEventId>) -> Self {
        self.weekly_id = Some(weekly_id.into());
        self
    }

    /// Consume the builder, validate, and return an [`Event`].
    ///
    /// # Errors
    ///
    /// Returns [`HemaError::InvalidArgument`] if the name is missing or
    /// empty, or if start/end are missing or out of order.
    pub fn build(self) -> Result<Event, HemaError> {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return Err(ValidationError::InvalidTimeRange.into());
        };
        let event = Event {
            id: self.id.unwrap_or(EventId::new(0)),
            name: self.name.unwrap_or_default(),
            color: self.color.unwrap_or_default(),
            start,
            end,
            trainer_id: self.trainer_id,
            weekly_id: self.weekly_id,
        };
        event.validate()?;
        Ok(event)
    }
}

/// An event as delivered by the event source, timestamps unparsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: EventId,
    pub name: String,
    #[serde(default = "default_color")]
    pub color: String,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub trainer_id: Option<TrainerId>,
    #[serde(default, alias = "weekly_event_id")]
    pub weekly_id: Option<WeeklyEventId>,
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

/// A record that could not be turned into an [`Event`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("event {id} is malformed")]
pub struct EventParseError {
    pub id: EventId,
    #[source]
    pub reason: ValidationError,
}

impl EventRecord {
    /// Parse the timestamps and check `start < end`.
    ///
    /// A malformed color does not reject the record; it falls back to
    /// [`DEFAULT_COLOR`].
    ///
    /// # Errors
    ///
    /// Returns [`EventParseError`] when either timestamp is unreadable or the
    /// range is empty or inverted.
    pub fn parse(&self) -> Result<Event, EventParseError> {
        let fail = |reason| EventParseError {
            id: self.id,
            reason,
        };
        let start = parse_timestamp(&self.start).map_err(fail)?;
        let end = parse_timestamp(&self.end).map_err(fail)?;
        if start >= end {
            return Err(fail(ValidationError::InvalidTimeRange));
        }
        Ok(Event {
            id: self.id,
            name: self.name.clone(),
            color: Color::parse_or_default(&self.color),
            start,
            end,
            trainer_id: self.trainer_id,
            weekly_id: self.weekly_id,
        })
    }

    /// Start instant, if the text is readable.
    #[must_use]
    pub fn start_instant(&self) -> Option<Timestamp> {
        parse_timestamp(&self.start).ok()
    }
}

/// Payload sent by the "create event" flow. The id is assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEvent {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub start: Timestamp,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub end: Timestamp,
    #[serde(default)]
    pub trainer_id: Option<TrainerId>,
    #[serde(default, alias = "weekly_event_id")]
    pub weekly_id: Option<WeeklyEventId>,
}

impl NewEvent {
    /// Validate and attach the store-assigned `id`.
    ///
    /// # Errors
    ///
    /// Returns [`HemaError::InvalidArgument`] for an empty name, a malformed
    /// color, or `start >= end`.
    pub fn into_event(self, id: EventId) -> Result<Event, HemaError> {
        let mut builder = Event::builder()
            .id(id)
            .name(self.name)
            .start(self.start)
            .end(self.end);
        if let Some(color) = self.color {
            builder = builder.color(color.parse()?);
        }
        if let Some(trainer_id) = self.trainer_id {
            builder = builder.trainer_id(trainer_id);
        }
        if let Some(weekly_id) = self.weekly_id {
            builder = builder.weekly_id(weekly_id);
        }
        builder.build()
    }

    /// Check the payload without consuming it.
    ///
    /// # Errors
    ///
    /// Same conditions as [`NewEvent::into_event`].
    pub fn validate(&self) -> Result<(), HemaError> {
        self.clone().into_event(EventId::new(0)).map(|_| ())
    }
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    parse_timestamp(&text).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(text: &str) -> Timestamp {
        parse_timestamp(text).unwrap()
    }

    fn record(start: &str, end: &str) -> EventRecord {
        EventRecord {
            id: EventId::new(1),
            name: "Longsword".to_string(),
            color: "FF5722".to_string(),
            start: start.to_string(),
            end: end.to_string(),
            trainer_id: Some(TrainerId::new(7)),
            weekly_id: None,
        }
    }

    #[test]
    fn should_accept_six_hex_digit_color() {
        let color: Color = "4caf50".parse().unwrap();
        assert_eq!(color.as_str(), "4caf50");
    }

    #[test]
    fn should_reject_color_with_hash_prefix() {
        let result: Result<Color, _> = "#4CAF50".parse();
        assert_eq!(
            result,
            Err(ValidationError::InvalidColor("#4CAF50".to_string()))
        );
    }

    #[test]
    fn should_fall_back_to_default_color() {
        assert_eq!(Color::parse_or_default("red").as_str(), DEFAULT_COLOR);
    }

    #[test]
    fn should_build_valid_event() {
        let event = Event::builder()
            .id(EventId::new(3))
            .name("Sabre")
            .start(ts("2024-02-15T09:00:00Z"))
            .end(ts("2024-02-15T10:00:00Z"))
            .build()
            .unwrap();
        assert_eq!(event.id, EventId::new(3));
        assert_eq!(event.color.as_str(), DEFAULT_COLOR);
    }

    #[test]
    fn should_reject_event_with_empty_name() {
        let result = Event::builder()
            .start(ts("2024-02-15T09:00:00Z"))
            .end(ts("2024-02-15T10:00:00Z"))
            .build();
        assert!(matches!(
            result,
            Err(HemaError::InvalidArgument(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn should_reject_event_ending_before_it_starts() {
        let result = Event::builder()
            .name("Sabre")
            .start(ts("2024-02-15T10:00:00Z"))
            .end(ts("2024-02-15T09:00:00Z"))
            .build();
        assert!(matches!(
            result,
            Err(HemaError::InvalidArgument(ValidationError::InvalidTimeRange))
        ));
    }

    #[test]
    fn should_parse_record_with_naive_timestamps() {
        let event = record("2024-02-15T09:00:00", "2024-02-15T10:00:00")
            .parse()
            .unwrap();
        assert_eq!(event.start, ts("2024-02-15T09:00:00Z"));
        assert_eq!(event.trainer_id, Some(TrainerId::new(7)));
    }

    #[test]
    fn should_report_record_with_unreadable_start() {
        let err = record("soon", "2024-02-15T10:00:00").parse().unwrap_err();
        assert_eq!(err.id, EventId::new(1));
        assert!(matches!(err.reason, ValidationError::InvalidTimestamp(_)));
    }

    #[test]
    fn should_report_record_with_empty_range() {
        let err = record("2024-02-15T09:00:00", "2024-02-15T09:00:00")
            .parse()
            .unwrap_err();
        assert_eq!(err.reason, ValidationError::InvalidTimeRange);
    }

    #[test]
    fn should_accept_weekly_event_id_alias() {
        let json = r#"{
            "id": 4, "name": "Dagger", "start": "2024-02-15T09:00:00",
            "end": "2024-02-15T10:00:00", "weekly_event_id": 12
        }"#;
        let parsed: EventRecord = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.weekly_id, Some(WeeklyEventId::new(12)));
        assert_eq!(parsed.color, DEFAULT_COLOR);
        assert_eq!(parsed.trainer_id, None);
    }

    #[test]
    fn should_convert_event_back_to_record() {
        let event = record("2024-02-15T09:00:00", "2024-02-15T10:00:00")
            .parse()
            .unwrap();
        let back = event.to_record();
        assert_eq!(back.start, "2024-02-15T09:00:00Z");
        assert_eq!(back.parse().unwrap(), event);
    }

    #[test]
    fn should_deserialize_new_event_with_naive_timestamps() {
        let json = r#"{"name": "Rapier", "start": "2024-03-01T18:00:00", "end": "2024-03-01T20:00:00"}"#;
        let new_event: NewEvent = serde_json::from_str(json).unwrap();
        let event = new_event.into_event(EventId::new(10)).unwrap();
        assert_eq!(event.id, EventId::new(10));
        assert_eq!(event.start, ts("2024-03-01T18:00:00Z"));
    }

    #[test]
    fn should_reject_new_event_with_bad_color() {
        let new_event = NewEvent {
            name: "Rapier".to_string(),
            color: Some("blue".to_string()),
            start: ts("2024-03-01T18:00:00Z"),
            end: ts("2024-03-01T20:00:00Z"),
            trainer_id: None,
            weekly_id: None,
        };
        assert!(matches!(
            new_event.validate(),
            Err(HemaError::InvalidArgument(ValidationError::InvalidColor(_)))
        ));
    }
}
