//! # smarthome-domain
//!
//! Pure domain model for the smarthome backend.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Houses** (named, located by address and GPS coordinates)
//! - Define **Rooms**, **Devices**, **Sensors** and **Actuators**
//! - Define **Readings** and the **Periods** used to query them
//! - Define the **Catalog** of device, sensor and actuator kinds
//! - Analyse readings: temperature comparison and peak power consumption
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod actuator;
pub mod analysis;
pub mod catalog;
pub mod device;
pub mod house;
pub mod period;
pub mod reading;
pub mod room;
pub mod sensor;
