//! Error types for the gRPC adapter.

use catalog_core::ValidationError;
use tonic::Status;

/// Errors raised before a request reaches the repository.
///
/// Repository outcomes never become errors here: they travel back as the
/// sentinel fields of each response (`product` unset, `id = -1`, `ok = false`).
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] ValidationError),
}

impl From<RpcError> for Status {
    fn from(error: RpcError) -> Self {
        match error {
            RpcError::InvalidRequest(e) => Status::invalid_argument(e.to_string()),
        }
    }
}
