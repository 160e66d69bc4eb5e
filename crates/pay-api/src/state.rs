//! # Application State
//!
//! Shared state for the Axum application: the payment gateway and the
//! server configuration. Both are immutable after startup; handlers share
//! them freely across concurrent requests.

use pay_core::BoxedPaymentGateway;
use pay_wompi::{WompiConfig, WompiGateway};
use std::sync::Arc;
use tracing::info;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address")
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payment gateway (processor client behind the trait seam)
    pub gateway: BoxedPaymentGateway,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create state from an already-built gateway (used by tests to plug
    /// in a stub).
    pub fn new(gateway: BoxedPaymentGateway, config: AppConfig) -> Self {
        Self { gateway, config }
    }

    /// Create state with the Wompi gateway configured from the
    /// environment. Fails fast when credentials are missing.
    pub fn from_env() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        let wompi = WompiConfig::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Wompi: {}", e))?;

        info!(
            "Wompi configured: key={}, test_mode={}",
            wompi.masked_public_key(),
            wompi.is_test_mode()
        );

        Ok(Self::new(Arc::new(WompiGateway::new(wompi)), config))
    }
}
