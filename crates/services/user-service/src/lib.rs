//! User Service Library
//!
//! This crate provides user management functionality via gRPC.
//! It can be run as a standalone service or embedded in the combined binary.

pub mod config;
pub mod grpc;
pub mod infra;
pub mod repository;
pub mod service;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tonic::transport::Server;
use tracing::info;

use crate::config::{StorageBackend, UserServiceConfig};
use crate::grpc::UserGrpcService;
use crate::infra::{Database, DocumentDatabase};
use crate::repository::{DocumentUserStore, SqlUserStore, UserStore};
use crate::service::UserManager;

/// Run the user service as an embedded component (for combined binary).
pub async fn run_embedded(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let config = UserServiceConfig::from_env();
    run_server_with_config(host, port, config).await
}

/// Run the user service with an explicit storage backend.
pub async fn run_with_storage(
    host: &str,
    port: u16,
    storage: StorageBackend,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = UserServiceConfig {
        storage,
        ..UserServiceConfig::from_env()
    };
    run_server_with_config(host, port, config).await
}

/// Connect the configured backend and wrap it in its store.
pub async fn build_store(
    config: &UserServiceConfig,
) -> Result<Arc<dyn UserStore>, Box<dyn std::error::Error>> {
    let store: Arc<dyn UserStore> = match config.storage {
        StorageBackend::Relational => {
            let db = Database::connect(&config.database).await?;
            Arc::new(SqlUserStore::new(db.get_connection()))
        }
        StorageBackend::Document => {
            let db = DocumentDatabase::connect(&config.document).await?;
            Arc::new(DocumentUserStore::from_database(db.database()))
        }
    };

    info!(storage = ?config.storage, "User store ready");
    Ok(store)
}

/// Run the gRPC server with the given configuration.
async fn run_server_with_config(
    host: &str,
    port: u16,
    config: UserServiceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    // Create store and service
    let store = build_store(&config).await?;
    let user_service = Arc::new(UserManager::new(store));

    // Create gRPC service
    let grpc_service = UserGrpcService::new(user_service);

    // Build address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("User service listening on {}", addr);

    // Run server
    Server::builder()
        .timeout(Duration::from_millis(config.request_timeout_ms))
        .add_service(proto::UserServiceServer::new(grpc_service))
        .serve(addr)
        .await?;

    Ok(())
}
