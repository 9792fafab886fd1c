//! # carrental-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `carrental-app::ports`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//! - Persist reservation lifecycle changes and car status in one transaction
//!
//! ## Dependency rule
//! Depends on `carrental-app` (for port traits) and `carrental-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod additional_service_repo;
mod car_repo;
mod equipment_repo;
mod error;
mod location_repo;
mod member_repo;
mod pool;
mod reservation_repo;
mod row;

pub use additional_service_repo::SqliteAdditionalServiceRepository;
pub use car_repo::SqliteCarRepository;
pub use equipment_repo::SqliteEquipmentRepository;
pub use error::StorageError;
pub use location_repo::SqliteLocationRepository;
pub use member_repo::SqliteMemberRepository;
pub use pool::{Config, Database};
pub use reservation_repo::SqliteReservationRepository;
