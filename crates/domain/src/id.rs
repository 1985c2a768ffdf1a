//! Typed identifier newtypes backed by the remote store's integer keys.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw integer key.
            #[must_use]
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Access the raw integer key.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse().map(Self)
            }
        }
    };
}

define_id!(
    /// Unique identifier for an [`Event`](crate::event::Event).
    EventId
);

define_id!(
    /// Identifier of the user acting as trainer for an event.
    TrainerId
);

define_id!(
    /// Identifier of the recurring (weekly) series an event was generated from.
    WeeklyEventId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_order_by_raw_value() {
        assert!(EventId::new(3) < EventId::new(5));
    }

    #[test]
    fn should_roundtrip_through_display_and_from_str() {
        let id = TrainerId::new(17);
        let parsed: TrainerId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn should_serialize_as_plain_integer() {
        let json = serde_json::to_string(&WeeklyEventId::new(9)).unwrap();
        assert_eq!(json, "9");
    }

    #[test]
    fn should_return_error_when_parsing_non_numeric_id() {
        assert!(EventId::from_str("abc").is_err());
    }
}
