//! # Money Module
//!
//! Provides the `Money` type used for product prices.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  precio is a DECIMAL(10,2) column.                                     │
//! │  As f64:  599.99 → 599.990000000000009094947017729282379150390625      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents, decimal text at the edges                │
//! │    "599.99"  ──parse──►  Money(59999)  ──to_decimal_string──► "599.99" │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use catalog_core::money::Money;
//!
//! let price: Money = "599.99".parse().unwrap();
//! assert_eq!(price.cents(), 59999);
//! assert_eq!(price.to_string(), "$599.99");
//! assert_eq!(price.to_decimal_string(), "599.99");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Number of fractional digits stored in the `precio` column.
pub const SCALE: u32 = 2;

/// Largest magnitude `DECIMAL(10,2)` can hold, in cents (99999999.99).
pub const MAX_CENTS: i64 = 9_999_999_999;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// Serialized as a decimal string (`"599.99"`) so JSON fixtures and the
/// database column share one representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use catalog_core::money::Money;
    ///
    /// let price = Money::from_cents(49999);
    /// assert_eq!(price.to_decimal_string(), "499.99");
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Formats the value the way the `precio` column stores it.
    ///
    /// ## Example
    /// ```rust
    /// use catalog_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1000).to_decimal_string(), "10.00");
    /// assert_eq!(Money::from_cents(-550).to_decimal_string(), "-5.50");
    /// ```
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses decimal text such as `"599.99"`, `"10.5"`, `"-3"`.
///
/// ## Rules
/// - Optional leading `+` or `-`
/// - At least one integer digit
/// - At most two fractional digits
/// - At most eight integer digits (`DECIMAL(10,2)`)
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ValidationError::InvalidPrice {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        let text = s.trim();
        let (negative, unsigned) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            Some(_) => (false, text),
            None => return Err(invalid("empty value")),
        };

        let (int_part, frac_part) = match unsigned.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part),
            None => (unsigned, ""),
        };

        if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected digits before the decimal point"));
        }
        if !frac_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected digits after the decimal point"));
        }
        if frac_part.len() > SCALE as usize {
            return Err(invalid("at most two decimal places are allowed"));
        }

        let major: i64 = int_part.parse().map_err(|_| invalid("value is too large"))?;
        // "5" after the point means 50 cents, not 5
        let minor: i64 = match frac_part.len() {
            0 => 0,
            1 => frac_part.parse::<i64>().map_err(|_| invalid("bad fraction"))? * 10,
            _ => frac_part.parse().map_err(|_| invalid("bad fraction"))?,
        };

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(|| invalid("value is too large"))?;
        if cents > MAX_CENTS {
            return Err(invalid("value does not fit DECIMAL(10,2)"));
        }

        Ok(Money(if negative { -cents } else { cents }))
    }
}

impl TryFrom<String> for Money {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Money> for String {
    fn from(money: Money) -> Self {
        money.to_decimal_string()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money with a currency sign, as the console lists it.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.major().abs(), self.minor())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(59999);
        assert_eq!(money.cents(), 59999);
        assert_eq!(money.major(), 599);
        assert_eq!(money.minor(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
    }

    #[test]
    fn test_parse_accepts_column_formats() {
        assert_eq!("599.99".parse::<Money>().unwrap().cents(), 59999);
        assert_eq!("10".parse::<Money>().unwrap().cents(), 1000);
        // SQLite renders a REAL like 10.5 without the trailing zero
        assert_eq!("10.5".parse::<Money>().unwrap().cents(), 1050);
        assert_eq!("10.".parse::<Money>().unwrap().cents(), 1000);
        assert_eq!(" +0.07 ".parse::<Money>().unwrap().cents(), 7);
        assert_eq!("-3.25".parse::<Money>().unwrap().cents(), -325);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "-", "abc", ".50", "1.999", "1.2.3", "12a", "1,50", "99999999999999999999"] {
            assert!(bad.parse::<Money>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn test_parse_enforces_column_range() {
        assert_eq!("99999999.99".parse::<Money>().unwrap().cents(), MAX_CENTS);
        assert_eq!("-99999999.99".parse::<Money>().unwrap().cents(), -MAX_CENTS);

        for too_big in ["100000000", "100000000.00", "-100000000", "1234567890123456.78"] {
            assert!(
                matches!(too_big.parse::<Money>(), Err(ValidationError::InvalidPrice { .. })),
                "{too_big:?} should not fit the column"
            );
        }
    }

    #[test]
    fn test_decimal_string() {
        assert_eq!(Money::from_cents(49999).to_decimal_string(), "499.99");
        assert_eq!(Money::from_cents(7).to_decimal_string(), "0.07");
        assert_eq!(Money::from_cents(-7).to_decimal_string(), "-0.07");
    }

    #[test]
    fn test_serde_uses_decimal_text() {
        let json = serde_json::to_string(&Money::from_cents(59999)).unwrap();
        assert_eq!(json, "\"599.99\"");

        let back: Money = serde_json::from_str("\"12.30\"").unwrap();
        assert_eq!(back.cents(), 1230);

        assert!(serde_json::from_str::<Money>("\"twelve\"").is_err());
    }
}
