//! # hema-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **JSON API** for the calendar front-end
//!   (`/api/calendar`, `/api/calendar/{year}/{month}`, `/api/events`, …)
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results, errors and request rejections into JSON
//!   HTTP responses
//!
//! Busy days are returned in full by the month endpoints; the `preview`
//! endpoint truncates them per breakpoint and reports how many were hidden.
//!
//! ## Dependency rule
//! Depends on `hema-app` (for port traits and services) and `hema-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod extract;
pub mod router;
pub mod state;
