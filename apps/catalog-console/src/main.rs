//! Console entry point: `catalog-console`.
//!
//! Storage comes from the `CATALOG_DB_*` variables.

use std::io;

use catalog_console::{init_tracing, Menu};
use catalog_db::{Database, DbConfig};
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = DbConfig::from_env()?;
    info!(config = ?config, "Configuration loaded");

    let db = Database::new(config).await?;

    let stdin = io::stdin();
    let mut menu = Menu::new(db.products(), stdin.lock(), io::stdout());
    menu.run().await?;

    Ok(())
}
