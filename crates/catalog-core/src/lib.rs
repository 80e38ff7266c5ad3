//! # catalog-core: Domain Types for the Phone Catalog
//!
//! Pure types shared by the database layer and both front-ends.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Phone Catalog Architecture                         │
//! │                                                                         │
//! │  ┌──────────────────────────┐      ┌──────────────────────────┐        │
//! │  │  catalog-rpc (gRPC)      │      │  catalog-console (menu)  │        │
//! │  └────────────┬─────────────┘      └────────────┬─────────────┘        │
//! │               └──────────────┬──────────────────┘                      │
//! │  ┌───────────────────────────▼─────────────────────────────────────┐   │
//! │  │               ★ catalog-core (THIS CRATE) ★                     │   │
//! │  │        Product  •  Money  •  validation  •  errors              │   │
//! │  │        NO I/O • NO DATABASE • NO NETWORK                        │   │
//! │  └───────────────────────────┬─────────────────────────────────────┘   │
//! │  ┌───────────────────────────▼─────────────────────────────────────┐   │
//! │  │                catalog-db (producto table)                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - The `Product` row model
//! - [`money`] - Exact decimal price type
//! - [`error`] - Validation errors
//! - [`validation`] - Parsing of user-supplied field values
//!
//! ## Example Usage
//!
//! ```rust
//! use catalog_core::{Money, Product};
//!
//! let price: Money = "599.99".parse().unwrap();
//! let phone = Product::new("X1", Some(price), Some("128GB"), Some("black"), 10);
//!
//! assert!(!phone.is_persisted());
//! assert_eq!(phone.price.unwrap().to_decimal_string(), "599.99");
//! ```

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

pub use error::ValidationError;
pub use money::Money;
pub use types::*;

/// Identifier of a product that has not been inserted yet.
pub const UNSAVED_ID: i64 = 0;

/// Value returned by sentinel-style inserts when the row was not created.
pub const INSERT_FAILED: i64 = -1;
