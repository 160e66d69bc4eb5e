//! # Payment Request Types
//!
//! Inbound checkout request types for runetic-pay.
//!
//! The `payment_method` field arrives loosely tagged (a `type` string plus
//! whatever method-specific fields the caller supplied) so that an unknown
//! tag can be rejected with `InvalidPaymentMethod` instead of a generic
//! deserialization failure, and so that missing-field errors can name the
//! exact fields. Resolution into a typed payload happens in the processor
//! crate's request builder, before anything touches the network.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A merchant checkout request, as received over HTTP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Unique reference for this payment attempt. Generated when absent;
    /// the processor deduplicates on it, so it must never be reused.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Amount in the currency's minor units (cents for COP)
    pub amount_in_cents: i64,

    /// ISO 4217 currency code
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Customer email, forwarded to the processor
    pub customer_email: String,

    /// Loosely-tagged payment method selection
    pub payment_method: PaymentMethodInput,

    /// Where the processor should send the customer after checkout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,

    /// Optional structured customer record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_data: Option<CustomerData>,
}

fn default_currency() -> String {
    "COP".to_string()
}

impl PaymentRequest {
    /// Return the caller-supplied reference, or mint a unique one.
    ///
    /// Format matches the merchant convention: `RUN<millis><8-hex-upper>`.
    pub fn reference_or_generated(&self) -> String {
        match &self.reference {
            Some(r) if !r.trim().is_empty() => r.clone(),
            _ => generate_reference(),
        }
    }
}

/// Mint a reference unique per attempt (timestamp plus random suffix).
pub fn generate_reference() -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix: String = Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(8)
        .collect::<String>()
        .to_uppercase();
    format!("RUN{millis}{suffix}")
}

/// Payment method selection as sent by the caller.
///
/// `method_type` carries the tag (`PSE`, `CARD`, `NEQUI`); the remaining
/// fields are populated per method and validated by the request builder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentMethodInput {
    /// Method tag, e.g. "PSE"
    #[serde(rename = "type")]
    pub method_type: String,

    // --- PSE ---
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub financial_institution_code: Option<String>,
    /// "natural" for persona natural, anything else is juridical
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_legal_id_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_legal_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_description: Option<String>,

    // --- CARD ---
    /// Token from a prior tokenization call; raw card data never appears here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installments: Option<i64>,
}

impl PaymentMethodInput {
    pub fn pse(
        financial_institution_code: impl Into<String>,
        user_type: impl Into<String>,
        user_legal_id_type: impl Into<String>,
        user_legal_id: impl Into<String>,
    ) -> Self {
        Self {
            method_type: "PSE".to_string(),
            financial_institution_code: Some(financial_institution_code.into()),
            user_type: Some(user_type.into()),
            user_legal_id_type: Some(user_legal_id_type.into()),
            user_legal_id: Some(user_legal_id.into()),
            ..Default::default()
        }
    }

    pub fn card(token: impl Into<String>, installments: Option<i64>) -> Self {
        Self {
            method_type: "CARD".to_string(),
            token: Some(token.into()),
            installments,
            ..Default::default()
        }
    }

    pub fn nequi() -> Self {
        Self {
            method_type: "NEQUI".to_string(),
            ..Default::default()
        }
    }
}

/// Optional customer record forwarded alongside the transaction
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal_id_type: Option<String>,
}

/// Raw card data for the tokenization sub-step.
///
/// This is only ever forwarded to the processor's tokenization endpoint.
/// It carries no `Serialize` for logging on purpose: `Debug` redacts the
/// sensitive fields.
#[derive(Clone, Deserialize)]
pub struct CardData {
    pub number: String,
    pub cvc: String,
    pub exp_month: String,
    pub exp_year: String,
    pub card_holder: String,
}

impl std::fmt::Debug for CardData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardData")
            .field("number", &mask_pan(&self.number))
            .field("cvc", &"***")
            .field("exp_month", &self.exp_month)
            .field("exp_year", &self.exp_year)
            .field("card_holder", &self.card_holder)
            .finish()
    }
}

// Caller-supplied and not validated yet at this point, so the tail is
// taken in chars rather than bytes.
fn mask_pan(number: &str) -> String {
    if number.chars().count() <= 4 {
        return "****".to_string();
    }
    let tail_start = number
        .char_indices()
        .rev()
        .nth(3)
        .map(|(i, _)| i)
        .unwrap_or(0);
    format!("****{}", &number[tail_start..])
}
