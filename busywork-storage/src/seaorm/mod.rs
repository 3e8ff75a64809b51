//! SeaORM implementation of the statistics store
//!
//! This module provides the entity, migrations, repository and connection
//! management for the `statistics` table.

pub mod connection;
pub mod entities;
pub mod migrations;
pub mod repositories;

pub use connection::{DatabaseConnection, DatabaseError};
pub use entities::*;
pub use migrations::Migrator;
pub use repositories::SeaOrmStatisticsStore;

// Re-export common SeaORM types for convenience
pub use sea_orm::{ConnectionTrait, DatabaseConnection as SeaOrmConnection, EntityTrait};
pub use sea_orm_migration::MigratorTrait;
