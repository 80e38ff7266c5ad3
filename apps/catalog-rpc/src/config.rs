//! RPC server configuration.
//!
//! Loaded from environment variables with fallback to defaults. Database
//! settings come from the `CATALOG_DB_*` variables (see [`DbConfig`]).

use std::env;
use std::net::SocketAddr;

use catalog_db::DbConfig;

/// Default listen address for the gRPC server.
pub const DEFAULT_ADDR: &str = "0.0.0.0:50051";

/// RPC server configuration.
#[derive(Debug, Clone)]
pub struct RpcConfig {
    /// Address the gRPC server binds to
    pub addr: SocketAddr,

    /// Storage settings
    pub db: DbConfig,
}

impl RpcConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr = lookup("CATALOG_RPC_ADDR")
            .unwrap_or_else(|| DEFAULT_ADDR.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("CATALOG_RPC_ADDR".to_string()))?;

        let db = DbConfig::from_lookup(&lookup)?;

        Ok(RpcConfig { addr, db })
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error(transparent)]
    Database(#[from] catalog_db::ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RpcConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.addr, DEFAULT_ADDR.parse::<SocketAddr>().unwrap());
        assert_eq!(config.db.database, "bd_example");
    }

    #[test]
    fn test_custom_addr() {
        let config = RpcConfig::from_lookup(|key| match key {
            "CATALOG_RPC_ADDR" => Some("127.0.0.1:6000".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.addr.port(), 6000);
    }

    #[test]
    fn test_invalid_addr() {
        let result = RpcConfig::from_lookup(|key| match key {
            "CATALOG_RPC_ADDR" => Some("not-an-addr".to_string()),
            _ => None,
        });
        assert!(matches!(result, Err(ConfigError::InvalidValue(var)) if var == "CATALOG_RPC_ADDR"));
    }

    #[test]
    fn test_invalid_db_value_surfaces() {
        let result = RpcConfig::from_lookup(|key| match key {
            "CATALOG_DB_PORT" => Some("abc".to_string()),
            _ => None,
        });
        assert!(matches!(result, Err(ConfigError::Database(_))));
    }
}
