//! Catalog database access
//!
//! The recommendation service only reads the catalog. Lookups go to the read
//! replica when one is configured; readiness pings every configured endpoint.

pub mod models;
mod repository;

pub use repository::Repository;

use crate::config::DatabaseConfig;
use crate::errors::{AppError, Result};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// Connections to the catalog database
#[derive(Clone)]
pub struct DbPool {
    /// Primary catalog connection
    pub primary: DatabaseConnection,

    /// Replica serving catalog reads
    pub replica: Option<DatabaseConnection>,
}

impl DbPool {
    /// Connect to the catalog, and to its replica when `read_url` is set
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        info!("Connecting to catalog database...");
        let primary = connect(&config.url, config, "primary").await?;

        let replica = match config.read_url.as_deref() {
            Some(read_url) => {
                info!("Connecting to catalog read replica...");
                Some(connect(read_url, config, "replica").await?)
            }
            None => None,
        };

        info!(replica = replica.is_some(), "Catalog connections established");
        Ok(Self { primary, replica })
    }

    /// Connection used for every catalog lookup
    pub fn read(&self) -> &DatabaseConnection {
        self.replica.as_ref().unwrap_or(&self.primary)
    }

    /// Readiness check
    pub async fn ping(&self) -> Result<()> {
        ping(&self.primary, "primary").await?;
        if let Some(replica) = &self.replica {
            ping(replica, "replica").await?;
        }
        Ok(())
    }
}

fn connect_options(url: &str, config: &DatabaseConfig) -> ConnectOptions {
    let mut opts = ConnectOptions::new(url);
    opts.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .sqlx_logging(false);
    opts
}

async fn connect(url: &str, config: &DatabaseConfig, role: &str) -> Result<DatabaseConnection> {
    Database::connect(connect_options(url, config))
        .await
        .map_err(|e| AppError::DatabaseConnection {
            message: format!("Failed to connect to catalog {}: {}", role, e),
        })
}

async fn ping(conn: &DatabaseConnection, role: &str) -> Result<()> {
    conn.execute_unprepared("SELECT 1")
        .await
        .map(|_| ())
        .map_err(|e| AppError::DatabaseConnection {
            message: format!("Catalog {} ping failed: {}", role, e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn test_connect_options_follow_config() {
        let mut config = AppConfig::default().database;
        config.max_connections = 8;
        config.connect_timeout_secs = 4;

        let opts = connect_options("postgres://replica/catalog", &config);
        assert_eq!(opts.get_url(), "postgres://replica/catalog");
        assert_eq!(opts.get_max_connections(), Some(8));
        assert_eq!(opts.get_connect_timeout(), Some(Duration::from_secs(4)));
    }
}
