//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  sqlx::Error                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ── typed repository methods (get/list/...)      │
//! │       │                                                                 │
//! │       ├── NotFound            → "no such row"                          │
//! │       └── everything else     → storage failure                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Sentinel methods (find_by_id/insert/...) log it and return            │
//! │  None / empty / false / -1                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// No row matched the given key.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Every configured driver failed to connect.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The driver preference list is empty.
    #[error("No database driver configured")]
    NoDriverConfigured,

    /// Statement was rejected or failed while executing.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A stored value could not be turned back into a `Product`.
    #[error("Could not decode column {column}: {reason}")]
    Decode { column: String, reason: String },

    /// Insert succeeded but the driver reported no generated key.
    #[error("Insert did not return a generated key")]
    MissingGeneratedKey,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Creates a Decode error for a column.
    pub fn decode(column: impl Into<String>, reason: impl ToString) -> Self {
        DbError::Decode {
            column: column.into(),
            reason: reason.to_string(),
        }
    }

    /// True when the row simply does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DbError::NotFound { .. })
    }

    /// True for every failure of the storage itself (connectivity, SQL,
    /// decoding), as opposed to a missing row.
    pub fn is_storage_failure(&self) -> bool {
        !self.is_not_found()
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound          → DbError::NotFound
/// sqlx::Error::Database             → DbError::QueryFailed
/// sqlx::Error::Io / Tls / Config    → DbError::ConnectionFailed
/// sqlx::Error::ColumnDecode         → DbError::Decode
/// Other                             → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Record", "unknown"),

            sqlx::Error::Database(db_err) => DbError::QueryFailed(db_err.message().to_string()),

            sqlx::Error::Io(_) | sqlx::Error::Tls(_) | sqlx::Error::Configuration(_) => {
                DbError::ConnectionFailed(err.to_string())
            }

            sqlx::Error::ColumnDecode { index, source } => DbError::decode(index, source),

            sqlx::Error::ColumnNotFound(column) => DbError::decode(column, "column missing from result"),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_not_a_storage_failure() {
        let err = DbError::not_found("Product", 42);
        assert_eq!(err.to_string(), "Product not found: 42");
        assert!(err.is_not_found());
        assert!(!err.is_storage_failure());
    }

    #[test]
    fn test_storage_failures() {
        for err in [
            DbError::ConnectionFailed("refused".to_string()),
            DbError::NoDriverConfigured,
            DbError::QueryFailed("syntax".to_string()),
            DbError::MissingGeneratedKey,
        ] {
            assert!(err.is_storage_failure(), "{err}");
        }
    }

    #[test]
    fn test_sqlx_mapping() {
        assert!(DbError::from(sqlx::Error::RowNotFound).is_not_found());
        assert!(matches!(
            DbError::from(sqlx::Error::ColumnNotFound("precio".to_string())),
            DbError::Decode { .. }
        ));
        assert!(matches!(
            DbError::from(sqlx::Error::PoolClosed),
            DbError::Internal(_)
        ));
    }
}
