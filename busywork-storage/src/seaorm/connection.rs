use busywork_config::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection as SeaConnection, DbErr};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Lifetime given to the single in-memory SQLite connection. Recycling it
/// would open a new, empty database.
pub const IN_MEMORY_CONNECTION_LIFETIME: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// Database connection wrapper
#[derive(Clone)]
pub struct DatabaseConnection {
    connection: SeaConnection,
}

/// Database-related errors
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database error: {0}")]
    DbError(#[from] DbErr),

    #[error("Migration error: {0}")]
    MigrationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Whether a URL names a private in-memory SQLite database
pub fn is_in_memory_sqlite(database_url: &str) -> bool {
    database_url.starts_with("sqlite:") && database_url.contains(":memory:")
}

impl DatabaseConnection {
    /// Create a new database connection with configuration
    pub async fn new(config: DatabaseConfig) -> Result<Self, DatabaseError> {
        info!("Connecting to database: {}", config.url);

        Self::ensure_sqlite_file_exists(&config.url)?;

        let mut opts = ConnectOptions::new(config.url.clone());
        opts.min_connections(1)
            .connect_timeout(config.connection_timeout)
            .acquire_timeout(config.connection_timeout)
            .sqlx_logging(true)
            .sqlx_logging_level(log::LevelFilter::Debug);

        // Every in-memory connection is its own database, so the pool must
        // hold exactly one and never recycle it.
        let max_connections = if is_in_memory_sqlite(&config.url) {
            opts.max_connections(1)
                .idle_timeout(IN_MEMORY_CONNECTION_LIFETIME)
                .max_lifetime(IN_MEMORY_CONNECTION_LIFETIME);
            1
        } else {
            opts.max_connections(config.max_connections)
                .idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(3600));
            config.max_connections
        };

        let connection = Database::connect(opts).await?;

        debug!("Database connection established with {} max connections", max_connections);

        Ok(Self { connection })
    }

    /// Ensure SQLite database file and directory exist for file-based databases
    fn ensure_sqlite_file_exists(database_url: &str) -> Result<(), DatabaseError> {
        if is_in_memory_sqlite(database_url) {
            debug!("Using in-memory SQLite database");
            return Ok(());
        }

        let Some(file_path) = sqlite_file_path(database_url) else {
            debug!("Non-SQLite database detected, skipping file creation logic");
            return Ok(());
        };

        if file_path.is_empty() {
            return Err(DatabaseError::ConfigError(format!(
                "Invalid SQLite URL format: {}",
                database_url
            )));
        }

        let path = Path::new(file_path);

        if let Some(parent_dir) = path.parent() {
            if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
                info!("Creating database directory: {:?}", parent_dir);
                std::fs::create_dir_all(parent_dir).map_err(|e| {
                    DatabaseError::ConfigError(format!(
                        "Failed to create database directory {:?}: {}",
                        parent_dir, e
                    ))
                })?;
            }
        }

        // sqlx refuses to open a missing file unless mode=rwc is given
        if !path.exists() {
            info!("Creating database file: {:?}", path);
            std::fs::File::create(path).map_err(|e| {
                DatabaseError::ConfigError(format!("Failed to create database file {:?}: {}", path, e))
            })?;
        } else {
            debug!("Using existing database file: {:?}", path);
        }

        Ok(())
    }

    /// Get the underlying Sea-ORM connection
    pub fn get_connection(&self) -> &SeaConnection {
        &self.connection
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<(), DatabaseError> {
        use sea_orm_migration::MigratorTrait;

        info!("Running database migrations");

        super::migrations::Migrator::up(&self.connection, None)
            .await
            .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;

        info!("Database migrations completed successfully");
        Ok(())
    }

    /// Check that the database answers
    pub async fn ping(&self) -> Result<(), DatabaseError> {
        self.connection.ping().await?;
        Ok(())
    }
}

/// File path of a file-based SQLite URL, without any query string
fn sqlite_file_path(database_url: &str) -> Option<&str> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    Some(rest.split('?').next().unwrap_or(rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_file_path() {
        assert_eq!(sqlite_file_path("sqlite://data/busywork.db"), Some("data/busywork.db"));
        assert_eq!(sqlite_file_path("sqlite:///var/lib/stats.db"), Some("/var/lib/stats.db"));
        assert_eq!(sqlite_file_path("sqlite:stats.db?mode=rwc"), Some("stats.db"));
        assert_eq!(sqlite_file_path("postgres://localhost/db"), None);
    }

    #[test]
    fn test_in_memory_detection() {
        assert!(is_in_memory_sqlite("sqlite::memory:"));
        assert!(!is_in_memory_sqlite("sqlite://data/busywork.db"));
        assert!(!is_in_memory_sqlite("memory://"));
    }

    #[tokio::test]
    async fn test_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("stats.db");
        let config = DatabaseConfig {
            url: format!("sqlite://{}", db_path.display()),
            max_connections: 2,
            ..Default::default()
        };

        let db = DatabaseConnection::new(config).await.unwrap();
        db.ping().await.unwrap();
        assert!(db_path.exists());
    }

    #[tokio::test]
    async fn test_in_memory_pool_never_recycles_its_connection() {
        let db = DatabaseConnection::new(DatabaseConfig::default()).await.unwrap();
        let options = db.get_connection().get_sqlite_connection_pool().options();

        assert_eq!(options.get_max_connections(), 1);
        assert_eq!(options.get_max_lifetime(), Some(IN_MEMORY_CONNECTION_LIFETIME));
        assert_eq!(options.get_idle_timeout(), Some(IN_MEMORY_CONNECTION_LIFETIME));
    }

    #[tokio::test]
    async fn test_file_pool_uses_configured_limits() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            url: format!("sqlite://{}", dir.path().join("stats.db").display()),
            max_connections: 3,
            ..Default::default()
        };

        let db = DatabaseConnection::new(config).await.unwrap();
        let options = db.get_connection().get_sqlite_connection_pool().options();
        assert_eq!(options.get_max_connections(), 3);
        assert_eq!(options.get_max_lifetime(), Some(Duration::from_secs(3600)));
    }
}
