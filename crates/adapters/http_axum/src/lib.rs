//! # smarthome-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **JSON REST API** for houses, rooms, devices, sensors,
//!   actuators, readings and the catalog
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and errors into HTTP responses
//!
//! ## Dependency rule
//! Depends on `smarthome-app` (for port traits and services) and `smarthome-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod dto;
pub mod error;
pub mod router;
pub mod state;
