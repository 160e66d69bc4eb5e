//! # pay-core
//!
//! Core types and traits for the runetic-pay orchestration service.
//!
//! This crate provides:
//! - `PaymentRequest` and the loosely-tagged `PaymentMethodInput`
//! - `TransactionRecord` and the processor status lifecycle
//! - `compute_signature` for the processor's integrity-signature contract
//! - `PaymentGateway` trait for processor implementations
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use pay_core::{compute_signature, PaymentGateway, PaymentRequest};
//!
//! // Compute the widget signature
//! let sig = compute_signature("ORD-42", 5_000_000, "COP", secret)?;
//!
//! // Run the full workflow through a gateway
//! let record = gateway.create_payment(request).await?;
//!
//! // Redirect the customer when an async method produced a URL
//! if let Some(url) = record.checkout_url { /* ... */ }
//! ```

pub mod error;
pub mod gateway;
pub mod request;
pub mod signature;
pub mod transaction;

// Re-exports for convenience
pub use error::{PaymentError, PaymentResult};
pub use gateway::{BoxedPaymentGateway, FinancialInstitution, PaymentGateway, WidgetSignature};
pub use request::{
    generate_reference, CardData, CustomerData, PaymentMethodInput, PaymentRequest,
};
pub use signature::compute_signature;
pub use transaction::{SettlementOutcome, TransactionRecord, TransactionStatus};
