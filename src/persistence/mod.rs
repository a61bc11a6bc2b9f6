//! Persistence layer: `SQLite`-backed repository implementations.

pub mod area_repo;
pub mod db;
pub mod robot_repo;
pub mod schema;
pub mod seed;

/// Re-export the database pool type for convenience.
pub use sqlx::SqlitePool;

pub use area_repo::SqliteAreaRepository;
pub use robot_repo::SqliteRobotRepository;
