//! # Payment Gateway Trait
//!
//! Seam between the HTTP layer and the processor client. The API crate
//! holds an `Arc<dyn PaymentGateway>`, so handlers can be exercised against
//! a stub and the processor implementation can be swapped without touching
//! handler code.

use crate::error::PaymentResult;
use crate::request::{CardData, PaymentRequest};
use crate::transaction::TransactionRecord;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Signature material for the processor's client-side widget.
///
/// A collaborator that renders the widget must present the integrity
/// signature together with the merchant public key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetSignature {
    pub reference: String,
    pub signature: String,
    pub public_key: String,
}

/// A bank selectable for PSE transfers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialInstitution {
    pub financial_institution_code: String,
    pub financial_institution_name: String,
}

/// Core trait for payment processor implementations.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Run the full orchestration workflow for one checkout request:
    /// signature, acceptance token, payload build, submission, and the
    /// bounded settlement re-check.
    async fn create_payment(&self, request: PaymentRequest) -> PaymentResult<TransactionRecord>;

    /// Read-only status lookup for a previously created transaction.
    async fn transaction_status(&self, transaction_id: &str) -> PaymentResult<TransactionRecord>;

    /// Exchange raw card data for an opaque token at the processor.
    /// Raw card data must never flow into a transaction payload directly.
    async fn tokenize_card(&self, card: CardData) -> PaymentResult<String>;

    /// List banks available for PSE transfers.
    async fn financial_institutions(&self) -> PaymentResult<Vec<FinancialInstitution>>;

    /// Compute the widget integrity signature for (reference, amount,
    /// currency) and pair it with the merchant public key. Pure; repeated
    /// calls with identical inputs return identical signatures.
    fn widget_signature(
        &self,
        reference: &str,
        amount_in_cents: i64,
        currency: &str,
    ) -> PaymentResult<WidgetSignature>;

    /// Processor name (for logging and routing).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared gateway (dynamic dispatch)
pub type BoxedPaymentGateway = Arc<dyn PaymentGateway>;
