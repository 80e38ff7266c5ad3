//! # Catalog RPC Server
//!
//! Serves `catalog.v1.ProductCatalog` until Ctrl+C or SIGTERM.

use catalog_db::Database;
use catalog_rpc::proto::product_catalog_server::ProductCatalogServer;
use catalog_rpc::{ProductCatalogService, RpcConfig};
use tonic::transport::Server;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,catalog=debug,sqlx=warn")),
        )
        .with_target(true)
        .init();

    info!("Starting catalog RPC server...");

    let config = RpcConfig::load()?;
    info!(addr = %config.addr, db = ?config.db, "Configuration loaded");

    let db = Database::new(config.db.clone()).await?;
    if !db.health_check().await {
        warn!("No database driver reachable yet, requests will report failures until it is");
    }

    let service = ProductCatalogServer::new(ProductCatalogService::new(db.products()));

    info!(addr = %config.addr, "Starting gRPC server");

    Server::builder()
        .add_service(service)
        .serve_with_shutdown(config.addr, shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
