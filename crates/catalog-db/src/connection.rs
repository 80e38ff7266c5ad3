//! # Connection Factory
//!
//! One fresh connection per repository call, no pooling.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Per-Call Connection                                │
//! │                                                                         │
//! │  ProductRepository::get(id)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ConnectionFactory::acquire() ── tries drivers in preference order      │
//! │       │                          first connect per driver creates      │
//! │       │                          the producto table if missing          │
//! │       ▼                                                                 │
//! │  ScopedConnection ── runs exactly one statement                         │
//! │       │                                                                 │
//! │       ├── normal path: release() → graceful close                      │
//! │       └── early return / panic: Drop closes the socket                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use sqlx::{AnyConnection, Connection};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::{DbConfig, Driver};
use crate::error::{DbError, DbResult};
use crate::schema;

/// Opens connections according to a [`DbConfig`].
///
/// Cheap to clone: every clone shares the same configuration and the
/// record of which drivers already had their schema bootstrapped.
#[derive(Debug, Clone)]
pub struct ConnectionFactory {
    config: Arc<DbConfig>,
    bootstrapped: Arc<Mutex<HashSet<Driver>>>,
}

impl ConnectionFactory {
    /// Creates a factory and registers the sqlx drivers for `Any`.
    pub fn new(config: DbConfig) -> Self {
        // Guarded by a Once inside sqlx, safe to call per factory
        sqlx::any::install_default_drivers();

        ConnectionFactory {
            config: Arc::new(config),
            bootstrapped: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// The configuration this factory connects with.
    pub fn config(&self) -> &DbConfig {
        &self.config
    }

    /// Opens a new connection using the first driver that answers.
    ///
    /// ## Returns
    /// * `Ok(ScopedConnection)` - Connected, tagged with the driver used
    /// * `Err(DbError::NoDriverConfigured)` - Empty preference list
    /// * `Err(DbError::ConnectionFailed)` - Every driver failed; carries the
    ///   last driver's error
    pub async fn acquire(&self) -> DbResult<ScopedConnection> {
        let mut last_error = None;

        for &driver in &self.config.drivers {
            let url = driver.connect_url(&self.config);

            let attempt = tokio::time::timeout(
                self.config.connect_timeout,
                AnyConnection::connect(&url),
            )
            .await;

            match attempt {
                Ok(Ok(mut conn)) => {
                    debug!(%driver, "Connection acquired");
                    self.bootstrap(driver, &mut conn).await;
                    return Ok(ScopedConnection { conn, driver });
                }
                Ok(Err(e)) => {
                    warn!(
                        %driver,
                        url = %driver.redacted_url(&self.config),
                        error = %e,
                        "Driver unavailable, trying next"
                    );
                    last_error = Some(format!("{driver}: {e}"));
                }
                Err(_) => {
                    warn!(
                        %driver,
                        timeout_ms = self.config.connect_timeout.as_millis() as u64,
                        "Connection attempt timed out, trying next"
                    );
                    last_error = Some(format!(
                        "{driver}: timed out after {:?}",
                        self.config.connect_timeout
                    ));
                }
            }
        }

        match last_error {
            Some(message) => Err(DbError::ConnectionFailed(message)),
            None => Err(DbError::NoDriverConfigured),
        }
    }

    /// Creates the `producto` table the first time `driver` connects.
    ///
    /// Attempted once per driver per factory. A failure is only logged:
    /// the statement that follows reports the real problem.
    async fn bootstrap(&self, driver: Driver, conn: &mut AnyConnection) {
        let mut bootstrapped = self.bootstrapped.lock().await;
        if !bootstrapped.insert(driver) {
            return;
        }

        match sqlx::query(schema::create_table_sql(driver)).execute(&mut *conn).await {
            Ok(_) => info!(%driver, table = schema::TABLE, "Schema ready"),
            Err(e) => warn!(%driver, error = %e, "Could not create table on first connect"),
        }
    }
}

/// A live connection owned by exactly one repository call.
///
/// Derefs to [`AnyConnection`], so `&mut *conn` is a sqlx executor.
pub struct ScopedConnection {
    conn: AnyConnection,
    driver: Driver,
}

impl ScopedConnection {
    /// The driver that produced this connection.
    pub fn driver(&self) -> Driver {
        self.driver
    }

    /// Closes the connection gracefully.
    ///
    /// A failed close is logged and otherwise ignored: the statement result
    /// has already been read and the socket is gone either way.
    pub async fn release(self) {
        let ScopedConnection { conn, driver } = self;

        if let Err(e) = conn.close().await {
            warn!(%driver, error = %e, "Error while closing connection");
        }
    }
}

impl std::fmt::Debug for ScopedConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedConnection")
            .field("driver", &self.driver)
            .finish_non_exhaustive()
    }
}

impl Deref for ScopedConnection {
    type Target = AnyConnection;

    fn deref(&self) -> &Self::Target {
        &self.conn
    }
}

impl DerefMut for ScopedConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_sqlite_connection_is_tagged() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ConnectionFactory::new(DbConfig::sqlite(dir.path().join("conn.db")));

        let conn = factory.acquire().await.unwrap();
        assert_eq!(conn.driver(), Driver::Sqlite);
        conn.release().await;
    }

    #[tokio::test]
    async fn test_falls_back_to_next_driver() {
        let dir = tempfile::tempdir().unwrap();
        // Nothing listens on port 1, so MySQL is refused immediately
        let config = DbConfig::sqlite(dir.path().join("fallback.db"))
            .host("127.0.0.1")
            .port(1)
            .drivers(vec![Driver::MySql, Driver::Sqlite])
            .connect_timeout(Duration::from_secs(5));

        let conn = ConnectionFactory::new(config).acquire().await.unwrap();
        assert_eq!(conn.driver(), Driver::Sqlite);
        conn.release().await;
    }

    #[tokio::test]
    async fn test_first_connection_per_driver_creates_table() {
        let dir = tempfile::tempdir().unwrap();
        let config = DbConfig::sqlite(dir.path().join("bootstrap.db")).ensure_schema(false);
        let factory = ConnectionFactory::new(config);

        let mut conn = factory.acquire().await.unwrap();
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM producto")
            .fetch_one(&mut *conn)
            .await
            .unwrap();
        conn.release().await;

        assert_eq!(count, 0);
        assert!(factory.bootstrapped.lock().await.contains(&Driver::Sqlite));
    }

    #[tokio::test]
    async fn test_all_drivers_failing() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no-such-dir").join("catalog.db");
        let factory = ConnectionFactory::new(DbConfig::sqlite(missing));

        let err = factory.acquire().await.unwrap_err();
        assert!(matches!(err, DbError::ConnectionFailed(ref msg) if msg.starts_with("sqlite:")));
    }

    #[tokio::test]
    async fn test_empty_driver_list() {
        let factory = ConnectionFactory::new(DbConfig::default().drivers(Vec::new()));

        let err = factory.acquire().await.unwrap_err();
        assert!(matches!(err, DbError::NoDriverConfigured));
    }
}
