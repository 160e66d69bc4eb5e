//! # Transaction Types
//!
//! The processor-side view of a payment attempt. Records are created by the
//! processor and only ever observed by this service; we hold no durable
//! copy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status assigned by the processor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionStatus {
    /// Awaiting customer action or bank settlement
    Pending,
    /// Payment completed successfully
    Approved,
    /// Payment rejected by the issuer or bank
    Declined,
    /// Transaction cancelled before completion
    Voided,
    /// Processor-side failure
    Error,
}

impl TransactionStatus {
    /// Whether the processor can still move this transaction
    pub fn is_final(&self) -> bool {
        !matches!(self, TransactionStatus::Pending)
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TransactionStatus::Pending => "PENDING",
            TransactionStatus::Approved => "APPROVED",
            TransactionStatus::Declined => "DECLINED",
            TransactionStatus::Voided => "VOIDED",
            TransactionStatus::Error => "ERROR",
        };
        write!(f, "{s}")
    }
}

/// A transaction as reported by the processor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Opaque ID assigned by the processor
    pub id: String,

    /// The merchant reference the transaction was created with
    pub reference: String,

    /// Current lifecycle status
    pub status: TransactionStatus,

    /// Redirect/checkout URL, present only for asynchronous methods
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout_url: Option<String>,

    /// When this service observed the transaction's creation
    pub created_at: DateTime<Utc>,

    /// When the processor reported a final status, if it has
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finalized_at: Option<DateTime<Utc>>,
}

impl TransactionRecord {
    /// Build a record from a processor response, stamping `finalized_at`
    /// when the status is already final.
    pub fn observed(
        id: impl Into<String>,
        reference: impl Into<String>,
        status: TransactionStatus,
        checkout_url: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            reference: reference.into(),
            status,
            checkout_url,
            created_at: now,
            finalized_at: status.is_final().then_some(now),
        }
    }
}

/// Outcome of the bounded settlement re-check.
///
/// The poll is a deliberate two-step state machine (submitted, then polled
/// once) rather than a retry loop: the HTTP response must return promptly
/// and longer-running settlement arrives over the notification path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettlementOutcome {
    /// The re-check produced an actionable checkout URL
    Settled { checkout_url: String },
    /// No URL materialized within the single re-check
    Unresolved,
}
