//! # Catalog RPC
//!
//! gRPC adapter over the phone catalog repository.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         ProductCatalog (catalog.v1)                     │
//! │                                                                         │
//! │  client ───► gRPC (50051) ───► ProductCatalogService ───► Repository    │
//! │                                                                         │
//! │  ListProducts   ──► find_all      EditProduct   ──► update              │
//! │  GetProduct     ──► find_by_id    DeleteProduct ──► delete              │
//! │  AddProduct     ──► insert                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `CATALOG_RPC_ADDR` - Listen address (default: 0.0.0.0:50051)
//! - `CATALOG_DB_*` - Storage settings, see `catalog_db::DbConfig`

pub mod config;
pub mod error;
pub mod messages;
pub mod service;

/// Generated server and client stubs.
pub mod proto {
    include!(concat!(env!("OUT_DIR"), "/catalog.v1.ProductCatalog.rs"));
}

// Re-exports
pub use config::RpcConfig;
pub use error::RpcError;
pub use service::ProductCatalogService;
