//! # Domain Types
//!
//! The `Product` row model.
//!
//! ## Column Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Product (Rust)              producto (SQL)                             │
//! │  ─────────────────────────   ──────────────────────────────────         │
//! │  id: i64                 ──► id              INT PK, generated          │
//! │  model: String           ──► modelo          VARCHAR NOT NULL           │
//! │  price: Option<Money>    ──► precio          DECIMAL(10,2) NULL         │
//! │  storage: Option<String> ──► almacenamiento  VARCHAR NULL               │
//! │  color: Option<String>   ──► color           VARCHAR NULL               │
//! │  stock: i32              ──► stock           INT NOT NULL               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! `id` is 0 until the repository inserts the row and writes the generated
//! key back. After that it is only ever used as the lookup key.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::UNSAVED_ID;

// =============================================================================
// Product
// =============================================================================

/// A phone model in the catalog (one `producto` row).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Generated identifier, `0` while unsaved.
    #[serde(default)]
    pub id: i64,

    /// Model name shown in listings.
    pub model: String,

    /// Unit price. `None` is stored as SQL NULL, never as zero.
    #[serde(default)]
    pub price: Option<Money>,

    /// Storage capacity descriptor, e.g. "128GB".
    #[serde(default)]
    pub storage: Option<String>,

    /// Color name.
    #[serde(default)]
    pub color: Option<String>,

    /// Units in stock.
    pub stock: i32,
}

impl Product {
    /// Creates an unsaved product (identifier unset).
    ///
    /// ## Example
    /// ```rust
    /// use catalog_core::Product;
    ///
    /// let p = Product::new("X1", None, Some("128GB"), None::<String>, 3);
    /// assert_eq!(p.id, 0);
    /// assert!(p.price.is_none());
    /// ```
    pub fn new(
        model: impl Into<String>,
        price: Option<Money>,
        storage: Option<impl Into<String>>,
        color: Option<impl Into<String>>,
        stock: i32,
    ) -> Self {
        Product {
            id: UNSAVED_ID,
            model: model.into(),
            price,
            storage: storage.map(Into::into),
            color: color.map(Into::into),
            stock,
        }
    }

    /// Returns a copy carrying the given identifier.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    /// Whether the repository has assigned an identifier.
    #[inline]
    pub fn is_persisted(&self) -> bool {
        self.id > UNSAVED_ID
    }
}
