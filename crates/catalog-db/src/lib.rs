//! # catalog-db: Database Layer for the Phone Catalog
//!
//! Data access for the single `producto` table.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Phone Catalog Data Flow                            │
//! │                                                                         │
//! │  GetProduct RPC / console option 2                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    catalog-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐   │   │
//! │  │   │ Connection    │    │ Repository    │    │ Schema       │   │   │
//! │  │   │ Factory       │◄───│ (product.rs)  │    │ (bootstrap)  │   │   │
//! │  │   │ mysql→sqlite  │    │               │    │              │   │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  MySQL bd_example.producto  (or SQLite fallback file)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - `DbConfig`, driver preference order, env loading
//! - [`connection`] - Per-call connections with driver fallback
//! - [`database`] - `Database` handle
//! - [`schema`] - `CREATE TABLE IF NOT EXISTS producto`
//! - [`error`] - Database error types
//! - [`repository`] - `ProductRepository`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use catalog_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::from_env()?).await?;
//! let phones = db.products().find_all().await;
//! ```

pub mod config;
pub mod connection;
pub mod database;
pub mod error;
pub mod repository;
pub mod schema;

pub use config::{ConfigError, DbConfig, Driver};
pub use connection::{ConnectionFactory, ScopedConnection};
pub use database::Database;
pub use error::{DbError, DbResult};
pub use repository::product::ProductRepository;
