//! Gateway configuration.

use std::env;

use common::GrpcClientConfig;

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// User service gRPC client settings
    pub user_service: GrpcClientConfig,
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = GrpcClientConfig::default();

        Self {
            user_service: GrpcClientConfig {
                endpoint: env::var("USER_SERVICE_URL").unwrap_or(defaults.endpoint),
                connect_timeout_ms: env::var("USER_SERVICE_CONNECT_TIMEOUT_MS")
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .unwrap_or(defaults.connect_timeout_ms),
                request_timeout_ms: env::var("USER_SERVICE_REQUEST_TIMEOUT_MS")
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .unwrap_or(defaults.request_timeout_ms),
            },
            host: env::var("GATEWAY_HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("GATEWAY_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            user_service: GrpcClientConfig::default(),
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}
