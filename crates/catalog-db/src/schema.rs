//! # Schema Bootstrap
//!
//! Creates the `producto` table when it does not exist yet.
//!
//! This is not a migration system: there is exactly one table and one
//! version of it. The connection factory runs the DDL the first time each
//! driver connects; [`ensure_schema`] does it eagerly and reports failure,
//! for startup with `ensure_schema = true` and the seed tool.
//!
//! ## DDL per Driver
//! ```text
//! ┌──────────────────┬──────────────────────────┬──────────────────────────┐
//! │ column           │ MySQL                    │ SQLite                   │
//! ├──────────────────┼──────────────────────────┼──────────────────────────┤
//! │ id               │ INT AUTO_INCREMENT PK    │ INTEGER PK AUTOINCREMENT │
//! │ modelo           │ VARCHAR(100) NOT NULL    │ VARCHAR(100) NOT NULL    │
//! │ precio           │ DECIMAL(10,2) NULL       │ DECIMAL(10,2)            │
//! │ almacenamiento   │ VARCHAR(50) NULL         │ VARCHAR(50)              │
//! │ color            │ VARCHAR(50) NULL         │ VARCHAR(50)              │
//! │ stock            │ INT NOT NULL             │ INTEGER NOT NULL         │
//! └──────────────────┴──────────────────────────┴──────────────────────────┘
//! ```
//!
//! Text columns are VARCHAR on MySQL on purpose: the `Any` driver reads
//! MySQL TEXT columns as blobs.

use tracing::info;

use crate::config::Driver;
use crate::connection::ConnectionFactory;
use crate::error::DbResult;

/// Name of the catalog table.
pub const TABLE: &str = "producto";

const MYSQL_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS producto (
    id             INT           NOT NULL AUTO_INCREMENT PRIMARY KEY,
    modelo         VARCHAR(100)  NOT NULL,
    precio         DECIMAL(10,2) NULL,
    almacenamiento VARCHAR(50)   NULL,
    color          VARCHAR(50)   NULL,
    stock          INT           NOT NULL DEFAULT 0
)
"#;

const SQLITE_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS producto (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    modelo         VARCHAR(100)  NOT NULL,
    precio         DECIMAL(10,2),
    almacenamiento VARCHAR(50),
    color          VARCHAR(50),
    stock          INTEGER       NOT NULL DEFAULT 0
)
"#;

/// Returns the `CREATE TABLE` statement for a driver.
pub fn create_table_sql(driver: Driver) -> &'static str {
    match driver {
        Driver::MySql => MYSQL_DDL,
        Driver::Sqlite => SQLITE_DDL,
    }
}

/// Creates the `producto` table on whichever driver answers first.
///
/// Idempotent: safe to run on every startup.
pub async fn ensure_schema(connections: &ConnectionFactory) -> DbResult<()> {
    let mut conn = connections.acquire().await?;
    let driver = conn.driver();

    info!(%driver, table = TABLE, "Ensuring schema");

    let result = sqlx::query(create_table_sql(driver))
        .execute(&mut *conn)
        .await;
    conn.release().await;
    result?;

    Ok(())
}
