//! User service configuration.

use std::env;
use std::str::FromStr;

use common::{DatabaseConfig, DocumentStoreConfig};

/// Which storage engine backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Relational,
    Document,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "mysql" | "postgres" | "sqlite" | "sql" => Ok(StorageBackend::Relational),
            "mongo" | "mongodb" | "document" => Ok(StorageBackend::Document),
            other => Err(format!("unknown storage backend: {}", other)),
        }
    }
}

/// User service configuration.
#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    /// Selected storage engine
    pub storage: StorageBackend,
    /// Relational database settings
    pub database: DatabaseConfig,
    /// Document database settings
    pub document: DocumentStoreConfig,
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Per-request deadline in milliseconds
    pub request_timeout_ms: u64,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let storage = storage_or_default(
            env::var("USER_SERVICE_STORAGE")
                .or_else(|_| env::var("MICROSERVICE_DATABASE_DRIVER"))
                .ok()
                .as_deref(),
            defaults.storage,
        );

        Self {
            storage,
            database: database_from_env(),
            document: DocumentStoreConfig {
                uri: env::var("MONGODB_URI").unwrap_or(defaults.document.uri),
                database: env::var("MONGODB_DB_NAME").unwrap_or(defaults.document.database),
            },
            host: env::var("USER_SERVICE_HOST").unwrap_or(defaults.host),
            port: env::var("USER_SERVICE_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            request_timeout_ms: env::var("USER_SERVICE_REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(defaults.request_timeout_ms),
        }
    }
}

/// Parse a configured backend name, falling back with a warning when it is unknown.
fn storage_or_default(value: Option<&str>, default: StorageBackend) -> StorageBackend {
    let Some(value) = value else {
        return default;
    };
    match value.parse() {
        Ok(storage) => storage,
        Err(_) => {
            tracing::warn!(value, fallback = ?default, "Unknown storage backend, using default");
            default
        }
    }
}

/// A full URL wins; otherwise the URL is assembled from its parts.
fn database_from_env() -> DatabaseConfig {
    if let Ok(url) = env::var("USER_SERVICE_DATABASE_URL").or_else(|_| env::var("DATABASE_URL")) {
        return DatabaseConfig {
            url,
            ..DatabaseConfig::default()
        };
    }

    match env::var("DATABASE_DRIVER") {
        Ok(driver) => {
            let var = |name: &str, default: &str| env::var(name).unwrap_or_else(|_| default.to_string());
            DatabaseConfig::from_parts(
                &driver,
                &var("DATABASE_USERNAME", "root"),
                &var("DATABASE_PASSWORD", ""),
                &var("DATABASE_IP", "localhost"),
                &var("DATABASE_PORT", "3306"),
                &var("DATABASE_NAME", "users"),
            )
        }
        Err(_) => DatabaseConfig::default(),
    }
}

impl Default for UserServiceConfig {
    fn default() -> Self {
        Self {
            storage: StorageBackend::Relational,
            database: DatabaseConfig::default(),
            document: DocumentStoreConfig::default(),
            host: "0.0.0.0".to_string(),
            port: 50051,
            request_timeout_ms: 30000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_backend_parsing() {
        assert_eq!("mysql".parse::<StorageBackend>(), Ok(StorageBackend::Relational));
        assert_eq!("Postgres".parse::<StorageBackend>(), Ok(StorageBackend::Relational));
        assert_eq!("mongo".parse::<StorageBackend>(), Ok(StorageBackend::Document));
        assert!("cassandra".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_storage_or_default() {
        let fallback = StorageBackend::Relational;
        assert_eq!(storage_or_default(None, fallback), fallback);
        assert_eq!(
            storage_or_default(Some("mongodb"), fallback),
            StorageBackend::Document
        );
        assert_eq!(storage_or_default(Some("mongo-db"), fallback), fallback);
        assert_eq!(
            storage_or_default(Some("postgresql"), StorageBackend::Document),
            StorageBackend::Document
        );
    }

    #[test]
    fn test_defaults() {
        let config = UserServiceConfig::default();
        assert_eq!(config.port, 50051);
        assert_eq!(config.storage, StorageBackend::Relational);
        assert_eq!(config.document.database, "bootcamp");
    }
}
