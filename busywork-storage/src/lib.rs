//! Statistics persistence for Busywork
//!
//! Two [`StatisticsStore`](busywork_interfaces::StatisticsStore) backends are
//! provided: a SeaORM/SQLite store for durable statistics and an in-process
//! store for deployments that do not need a database.

pub mod factory;
pub mod memory;
pub mod seaorm;

pub use factory::connect_store;
pub use memory::InMemoryStatisticsStore;
pub use seaorm::{DatabaseConnection, DatabaseError, Migrator, SeaOrmStatisticsStore};
