//! # Database Handle
//!
//! Entry point that bundles configuration, schema bootstrap and
//! repository access.
//!
//! There is no pool behind it: the handle only owns a
//! [`ConnectionFactory`], and every repository call opens and closes its
//! own connection.

use tracing::info;

use crate::config::DbConfig;
use crate::connection::ConnectionFactory;
use crate::error::DbResult;
use crate::repository::product::ProductRepository;
use crate::schema;

/// Main database handle providing repository access.
///
/// ## Usage
/// ```rust,ignore
/// let db = Database::new(DbConfig::from_env()?).await?;
/// let phones = db.products().find_all().await;
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    connections: ConnectionFactory,
}

impl Database {
    /// Creates the database handle.
    ///
    /// ## What This Does
    /// 1. Registers the MySQL and SQLite drivers
    /// 2. Creates the `producto` table when `ensure_schema` is set
    ///
    /// No connection is kept open afterwards.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            drivers = ?config.drivers,
            database = %config.database,
            "Initializing catalog database"
        );

        let ensure = config.ensure_schema;
        let db = Database {
            connections: ConnectionFactory::new(config),
        };

        if ensure {
            db.ensure_schema().await?;
        }

        Ok(db)
    }

    /// Creates the `producto` table if it does not exist.
    pub async fn ensure_schema(&self) -> DbResult<()> {
        schema::ensure_schema(&self.connections).await?;
        info!("Schema ready");
        Ok(())
    }

    /// The configuration in use.
    pub fn config(&self) -> &DbConfig {
        self.connections.config()
    }

    /// Returns the product repository.
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.connections.clone())
    }

    /// Checks if the database answers a trivial query.
    ///
    /// ## Returns
    /// * `true` - Some driver connected and ran `SELECT 1`
    /// * `false` - Database is unavailable
    pub async fn health_check(&self) -> bool {
        let Ok(mut conn) = self.connections.acquire().await else {
            return false;
        };

        let ok = sqlx::query("SELECT 1").execute(&mut *conn).await.is_ok();
        conn.release().await;
        ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sqlite_database_is_healthy() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(DbConfig::sqlite(dir.path().join("health.db")))
            .await
            .unwrap();

        assert!(db.health_check().await);
        assert_eq!(db.products().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unreachable_database_is_unhealthy() {
        let dir = tempfile::tempdir().unwrap();
        let config = DbConfig::sqlite(dir.path().join("gone").join("x.db")).ensure_schema(false);
        let db = Database::new(config).await.unwrap();

        assert!(!db.health_check().await);
    }

    #[tokio::test]
    async fn test_schema_bootstrap_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config = DbConfig::sqlite(dir.path().join("gone").join("x.db"));

        assert!(Database::new(config).await.is_err());
    }
}
