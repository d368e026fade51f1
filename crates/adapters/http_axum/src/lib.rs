//! # devicehub-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **JSON API** for the device inventory (`/device`, `/device/{id}`)
//! - Decode path, query, and body input, rejecting malformed requests with `400`
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and errors into status codes and JSON bodies
//!
//! ## Dependency rule
//! Depends on `devicehub-app` (for port traits and services) and `devicehub-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
