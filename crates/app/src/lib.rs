//! # devicehub-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **port trait** that persistence adapters must implement
//!   (`DeviceRepository` — lookups, upsert, and delete for devices)
//! - Define the **driving/inbound** use-cases as `DeviceService`
//!   (add, list with optional brand filter, get, patch, delete)
//! - Orchestrate domain objects without knowing *how* persistence works
//!
//! ## Dependency rule
//! Depends on `devicehub-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
