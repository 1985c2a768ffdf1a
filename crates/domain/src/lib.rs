//! # hema-domain
//!
//! Pure domain model for the hema training-schedule calendar.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps and
//!   the display timezone
//! - Define **Events** (training sessions) in their wire and parsed shapes
//! - Build **Calendar months**: the date grid, day bucketing of events, and
//!   navigation anchors
//! - Build display **previews** that truncate busy days
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod calendar;
pub mod event;
