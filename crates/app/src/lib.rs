//! # smarthome-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `HouseRepository`, `RoomRepository`, `DeviceRepository`: houses and their layout
//!   - `SensorRepository`, `ActuatorRepository`: what devices carry
//!   - `ReadingRepository`: recorded sensor values, queried by period
//!   - `CatalogRepository`: device, sensor and actuator kinds
//!   - `Storage`: a backend bundling all of the above
//! - Define **driving/inbound ports** as use-case structs:
//!   - `HouseService`, `RoomService`, `DeviceService`: registration and lookup
//!   - `SensorService`, `ActuatorService`: attach elements, operate blind rollers
//!   - `ReadingService`: record readings, compare temperatures, find peak consumption
//!   - `CatalogService`: load and browse the catalog
//! - Orchestrate domain objects without knowing *how* persistence or IO works
//!
//! ## Dependency rule
//! Depends on `smarthome-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;

#[cfg(test)]
mod testing;
