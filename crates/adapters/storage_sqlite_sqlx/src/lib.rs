//! # smarthome-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `smarthome-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `smarthome-app` (for port traits) and `smarthome-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod actuator_repo;
mod catalog_repo;
mod device_repo;
mod error;
mod house_repo;
mod pool;
mod reading_repo;
mod room_repo;
mod sensor_repo;
mod storage;

pub use actuator_repo::SqliteActuatorRepository;
pub use catalog_repo::SqliteCatalogRepository;
pub use device_repo::SqliteDeviceRepository;
pub use error::StorageError;
pub use house_repo::SqliteHouseRepository;
pub use pool::{Config, Database};
pub use reading_repo::SqliteReadingRepository;
pub use room_repo::SqliteRoomRepository;
pub use sensor_repo::SqliteSensorRepository;
pub use storage::SqliteStorage;
