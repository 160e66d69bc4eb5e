//! # pay-wompi
//!
//! Wompi processor client for runetic-pay.
//!
//! This crate implements the full transaction orchestration workflow
//! against the Wompi REST API:
//!
//! - **Configuration** (`WompiConfig`) — credentials from env, fail-fast
//! - **Acceptance token fetcher** — fresh token per submission attempt
//! - **Payload builder** — PSE / CARD / NEQUI request construction with
//!   fail-fast validation
//! - **Transaction submitter + settlement poller** — one POST, and for
//!   asynchronous methods one bounded delayed re-check
//! - **Card tokenization** — raw card data in, opaque token out
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pay_wompi::WompiGateway;
//! use pay_core::PaymentGateway;
//!
//! // Create gateway from environment
//! let gateway = WompiGateway::from_env()?;
//!
//! // Run the whole workflow for one checkout request
//! let record = gateway.create_payment(request).await?;
//!
//! // Redirect the customer when an async method produced a URL
//! if let Some(url) = &record.checkout_url { /* ... */ }
//! ```

pub mod acceptance;
pub mod config;
pub mod gateway;
pub mod payload;
pub mod settlement;
pub mod tokenize;
pub mod upstream;

// Re-exports
pub use config::WompiConfig;
pub use gateway::WompiGateway;
pub use payload::{MethodPayload, TransactionPayload};
pub use settlement::{pse_fallback_url, WompiTransaction};
