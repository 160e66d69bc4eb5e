//! # Wompi Configuration
//!
//! Configuration management for the Wompi integration.
//! All credentials are loaded from environment variables at process start
//! and are immutable for the process lifetime. Startup fails fast when any
//! credential is absent; none of them is ever logged in full.

use pay_core::PaymentError;
use std::env;
use std::time::Duration;

/// Wompi API configuration
#[derive(Debug, Clone)]
pub struct WompiConfig {
    /// Merchant public key (pub_test_... or pub_prod_...)
    pub public_key: String,

    /// Merchant private key (prv_test_... or prv_prod_...)
    pub private_key: String,

    /// Integrity secret used for the transaction signature
    pub integrity_secret: String,

    /// API base URL (overridable for testing/mocking)
    pub api_base_url: String,

    /// Hosted checkout base URL, used for the PSE fallback link
    pub checkout_base_url: String,

    /// Fixed delay before the single settlement re-check
    pub poll_delay: Duration,

    /// Timeout applied to every outbound call
    pub http_timeout: Duration,
}

impl WompiConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `WOMPI_PUBLIC_KEY`
    /// - `WOMPI_PRIVATE_KEY`
    /// - `WOMPI_INTEGRITY_SECRET`
    ///
    /// Optional:
    /// - `WOMPI_API_BASE_URL` (defaults to the production host)
    /// - `WOMPI_CHECKOUT_BASE_URL`
    /// - `WOMPI_POLL_DELAY_MS`
    pub fn from_env() -> Result<Self, PaymentError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let public_key = env::var("WOMPI_PUBLIC_KEY")
            .map_err(|_| PaymentError::Configuration("WOMPI_PUBLIC_KEY not set".to_string()))?;

        let private_key = env::var("WOMPI_PRIVATE_KEY")
            .map_err(|_| PaymentError::Configuration("WOMPI_PRIVATE_KEY not set".to_string()))?;

        let integrity_secret = env::var("WOMPI_INTEGRITY_SECRET").map_err(|_| {
            PaymentError::Configuration("WOMPI_INTEGRITY_SECRET not set".to_string())
        })?;

        // Validate key formats
        if !public_key.starts_with("pub_") {
            return Err(PaymentError::Configuration(
                "WOMPI_PUBLIC_KEY must start with pub_".to_string(),
            ));
        }

        if !private_key.starts_with("prv_") {
            return Err(PaymentError::Configuration(
                "WOMPI_PRIVATE_KEY must start with prv_".to_string(),
            ));
        }

        if integrity_secret.trim().is_empty() {
            return Err(PaymentError::Configuration(
                "WOMPI_INTEGRITY_SECRET must not be empty".to_string(),
            ));
        }

        let api_base_url = env::var("WOMPI_API_BASE_URL")
            .unwrap_or_else(|_| "https://production.wompi.co/v1".to_string());

        let checkout_base_url = env::var("WOMPI_CHECKOUT_BASE_URL")
            .unwrap_or_else(|_| "https://checkout.wompi.co".to_string());

        let poll_delay = env::var("WOMPI_POLL_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_millis(1500));

        Ok(Self {
            public_key,
            private_key,
            integrity_secret,
            api_base_url,
            checkout_base_url,
            poll_delay,
            http_timeout: Duration::from_secs(30),
        })
    }

    /// Create config with explicit values (for testing)
    pub fn new(
        public_key: impl Into<String>,
        private_key: impl Into<String>,
        integrity_secret: impl Into<String>,
    ) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: private_key.into(),
            integrity_secret: integrity_secret.into(),
            api_base_url: "https://production.wompi.co/v1".to_string(),
            checkout_base_url: "https://checkout.wompi.co".to_string(),
            poll_delay: Duration::from_millis(1500),
            http_timeout: Duration::from_secs(30),
        }
    }

    /// Check if using test keys
    pub fn is_test_mode(&self) -> bool {
        self.public_key.starts_with("pub_test_")
    }

    /// Authorization header for read-only merchant endpoints
    pub fn public_auth_header(&self) -> String {
        format!("Bearer {}", self.public_key)
    }

    /// Authorization header for transaction endpoints
    pub fn private_auth_header(&self) -> String {
        format!("Bearer {}", self.private_key)
    }

    /// Public key with the tail elided, safe for logs
    pub fn masked_public_key(&self) -> String {
        let visible: String = self.public_key.chars().take(12).collect();
        format!("{visible}…")
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Builder: set checkout base URL
    pub fn with_checkout_base_url(mut self, url: impl Into<String>) -> Self {
        self.checkout_base_url = url.into();
        self
    }

    /// Builder: set the settlement poll delay
    pub fn with_poll_delay(mut self, delay: Duration) -> Self {
        self.poll_delay = delay;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        let config = WompiConfig::new("pub_test_abc123", "prv_test_xyz789", "integrity_secret");
        assert!(config.is_test_mode());

        let config = WompiConfig::new("pub_prod_abc123", "prv_prod_xyz789", "integrity_secret");
        assert!(!config.is_test_mode());
    }

    #[test]
    fn test_auth_headers() {
        let config = WompiConfig::new("pub_test_abc123", "prv_test_xyz789", "s3cr3t");
        assert_eq!(config.public_auth_header(), "Bearer pub_test_abc123");
        assert_eq!(config.private_auth_header(), "Bearer prv_test_xyz789");
    }

    #[test]
    fn test_masked_public_key_hides_tail() {
        let config = WompiConfig::new("pub_test_abcdef123456", "prv_test_x", "s");
        let masked = config.masked_public_key();
        assert!(!masked.contains("123456"));
        assert!(masked.starts_with("pub_test_"));
    }

    #[test]
    fn test_masked_public_key_non_ascii() {
        // Env values are arbitrary strings; masking must not split a
        // multi-byte char.
        let config = WompiConfig::new("pub_test_ñañañañañaña", "prv_test_x", "s");
        let masked = config.masked_public_key();
        assert_eq!(masked, "pub_test_ñañ…");
    }

    #[test]
    fn test_from_env_missing_key() {
        env::remove_var("WOMPI_PUBLIC_KEY");

        let result = WompiConfig::from_env();
        assert!(result.is_err());
    }

    #[test]
    fn test_defaults_point_at_production() {
        let config = WompiConfig::new("pub_prod_a", "prv_prod_b", "s");
        assert!(config.api_base_url.starts_with("https://"));
        assert_eq!(config.checkout_base_url, "https://checkout.wompi.co");
        assert_eq!(config.poll_delay, Duration::from_millis(1500));
    }
}
