//! # hema-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `EventSource` — list events in a time range, get, create
//!   - `Clock` — current instant
//! - Define **driving/inbound** use-case services:
//!   - `CalendarService` — fetch the visible window and build a month
//!   - `EventService` — list, get and create events
//! - Orchestrate domain objects without knowing *how* events are stored
//!
//! ## Dependency rule
//! Depends on `hema-domain` only (plus `tracing` for diagnostics).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
