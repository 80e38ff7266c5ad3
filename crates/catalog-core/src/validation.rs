//! # Validation Module
//!
//! Turns raw field text (console lines, RPC strings) into domain values.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front-end (console prompt / gRPC message)                    │
//! │  └── THIS MODULE: parse text into Money / integers / Option<String>    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Database                                                     │
//! │  ├── NOT NULL on modelo, stock                                         │
//! │  └── DECIMAL(10,2) on precio                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No business rules beyond parsing live here: a product without a price
//! is valid, and so is zero or negative stock.

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;

/// Validates a model name.
///
/// ## Example
/// ```rust
/// use catalog_core::validation::validate_model;
///
/// assert_eq!(validate_model("  X1 ").unwrap(), "X1");
/// assert!(validate_model("   ").is_err());
/// ```
pub fn validate_model(model: &str) -> ValidationResult<String> {
    let model = model.trim();

    if model.is_empty() {
        return Err(ValidationError::Required {
            field: "model".to_string(),
        });
    }

    Ok(model.to_string())
}

/// Parses an optional price. Blank input means "no price" (NULL).
///
/// ## Example
/// ```rust
/// use catalog_core::validation::parse_price;
///
/// assert_eq!(parse_price("").unwrap(), None);
/// assert_eq!(parse_price("599.99").unwrap().unwrap().cents(), 59999);
/// assert!(parse_price("cheap").is_err());
/// ```
pub fn parse_price(text: &str) -> ValidationResult<Option<Money>> {
    let text = text.trim();

    if text.is_empty() {
        return Ok(None);
    }

    text.parse().map(Some)
}

/// Parses a whole number for the named field.
pub fn parse_integer<T: std::str::FromStr>(field: &str, text: &str) -> ValidationResult<T> {
    let text = text.trim();

    text.parse().map_err(|_| ValidationError::InvalidNumber {
        field: field.to_string(),
        value: text.to_string(),
    })
}

/// Maps blank text to `None`, anything else to its trimmed value.
pub fn optional_text(text: &str) -> Option<String> {
    let text = text.trim();

    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
