//! # Payment Error Types
//!
//! Typed error handling for the runetic-pay orchestration workflow.
//! All payment operations return `Result<T, PaymentError>`.

use thiserror::Error;

/// Core error type for all payment operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Client-supplied data failed local validation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A payment method is missing fields it requires
    #[error("Missing required fields for {method}: {}", fields.join(", "))]
    MissingRequiredFields { method: String, fields: Vec<String> },

    /// Unrecognized payment method tag
    #[error("Invalid payment method: {method}")]
    InvalidPaymentMethod { method: String },

    /// Network/transport failure reaching the processor
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Processor responded, but not in the expected shape
    #[error("Upstream protocol error: {0}")]
    UpstreamProtocolError(String),

    /// Processor returned a structured business error
    #[error("Upstream rejected [{code}]: {message}")]
    UpstreamRejected {
        /// HTTP status the processor answered with, when it answered at all
        status: Option<u16>,
        code: String,
        message: String,
    },

    /// Unexpected local failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PaymentError {
    /// Machine-readable code for the outward error contract
    pub fn code(&self) -> &str {
        match self {
            PaymentError::Configuration(_) => "CONFIGURATION_ERROR",
            PaymentError::InvalidInput(_) => "INVALID_INPUT",
            PaymentError::MissingRequiredFields { .. } => "MISSING_REQUIRED_FIELDS",
            PaymentError::InvalidPaymentMethod { .. } => "INVALID_PAYMENT_METHOD",
            PaymentError::UpstreamUnavailable(_) => "UPSTREAM_UNAVAILABLE",
            PaymentError::UpstreamProtocolError(_) => "UPSTREAM_PROTOCOL_ERROR",
            PaymentError::UpstreamRejected { code, .. } => code,
            PaymentError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the HTTP status code appropriate for this error.
    ///
    /// Caller input errors map to 400; upstream rejections mirror the
    /// processor's own status when it supplied one, else 500.
    pub fn status_code(&self) -> u16 {
        match self {
            PaymentError::Configuration(_) => 500,
            PaymentError::InvalidInput(_) => 400,
            PaymentError::MissingRequiredFields { .. } => 400,
            PaymentError::InvalidPaymentMethod { .. } => 400,
            PaymentError::UpstreamUnavailable(_) => 503,
            PaymentError::UpstreamProtocolError(_) => 502,
            PaymentError::UpstreamRejected { status, .. } => status.unwrap_or(500),
            PaymentError::Internal(_) => 500,
        }
    }
}

/// Result type alias for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;
