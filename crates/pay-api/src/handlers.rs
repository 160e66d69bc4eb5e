//! # Request Handlers
//!
//! Axum request handlers for the payment API. Every failure path maps onto
//! the stable outward contract `{success: false, error, message}`; success
//! paths return `{success: true, ...}` with the transaction fields.

use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use pay_core::{CardData, PaymentError, PaymentRequest, TransactionRecord, TransactionStatus};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Successful payment response
#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    pub success: bool,
    pub transaction_id: String,
    pub reference: String,
    pub status: TransactionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout_url: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finalized_at: Option<DateTime<Utc>>,
}

impl From<TransactionRecord> for PaymentResponse {
    fn from(record: TransactionRecord) -> Self {
        Self {
            success: true,
            transaction_id: record.id,
            reference: record.reference,
            status: record.status,
            checkout_url: record.checkout_url,
            created_at: record.created_at,
            finalized_at: record.finalized_at,
        }
    }
}

/// Signature utility request
#[derive(Debug, Deserialize)]
pub struct SignatureRequest {
    pub reference: String,
    pub amount_in_cents: i64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "COP".to_string()
}

/// Error response (stable outward error contract)
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    /// Machine-readable code
    pub error: String,
    /// Human-readable text
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            message: message.into(),
            details: None,
        }
    }
}

fn payment_error_to_response(err: PaymentError) -> (StatusCode, Json<ErrorResponse>) {
    let status = StatusCode::from_u16(err.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let response = ErrorResponse::new(err.code().to_string(), err.to_string());
    (status, Json(response))
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "runetic-pay",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Create a payment (primary operation).
///
/// Runs the full orchestration workflow and returns the normalized
/// synchronous-looking response, including the checkout URL when the
/// method produced one.
#[instrument(skip(state, request), fields(method = %request.payment_method.method_type))]
pub async fn create_payment(
    State(state): State<AppState>,
    Json(request): Json<PaymentRequest>,
) -> Result<Json<PaymentResponse>, (StatusCode, Json<ErrorResponse>)> {
    let record = state
        .gateway
        .create_payment(request)
        .await
        .map_err(|e| {
            error!("Payment creation failed: {}", e);
            payment_error_to_response(e)
        })?;

    info!(
        "Payment created: transaction={}, status={}",
        record.id, record.status
    );

    Ok(Json(record.into()))
}

/// Read-only transaction status lookup
#[instrument(skip(state))]
pub async fn get_payment(
    State(state): State<AppState>,
    Path(transaction_id): Path<String>,
) -> Result<Json<PaymentResponse>, (StatusCode, Json<ErrorResponse>)> {
    let record = state
        .gateway
        .transaction_status(&transaction_id)
        .await
        .map_err(payment_error_to_response)?;

    Ok(Json(record.into()))
}

/// Widget signature utility.
///
/// Pure and idempotent: repeated calls with identical inputs return the
/// identical signature string, paired with the merchant public key for the
/// processor's client-side widget.
pub async fn widget_signature(
    State(state): State<AppState>,
    Json(request): Json<SignatureRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let signature = state
        .gateway
        .widget_signature(&request.reference, request.amount_in_cents, &request.currency)
        .map_err(payment_error_to_response)?;

    Ok(Json(serde_json::json!({
        "success": true,
        "reference": signature.reference,
        "signature": signature.signature,
        "public_key": signature.public_key,
    })))
}

/// Card tokenization proxy.
///
/// Raw card data goes straight to the processor's tokenization endpoint
/// and is never logged or stored here.
pub async fn tokenize_card(
    State(state): State<AppState>,
    Json(card): Json<CardData>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let token = state
        .gateway
        .tokenize_card(card)
        .await
        .map_err(payment_error_to_response)?;

    Ok(Json(serde_json::json!({
        "success": true,
        "token": token,
    })))
}

/// List banks available for PSE transfers
pub async fn list_banks(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let banks = state
        .gateway
        .financial_institutions()
        .await
        .map_err(payment_error_to_response)?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": banks,
    })))
}

/// Processor notification receiver.
///
/// Acknowledges every delivery with 200 regardless of content; the
/// processor retries on anything else, and reconciliation against order
/// state belongs to an external collaborator, not this workflow.
pub async fn wompi_webhook(body: Bytes) -> impl IntoResponse {
    match serde_json::from_slice::<serde_json::Value>(&body) {
        Ok(event) => {
            let event_type = event.get("event").and_then(|e| e.as_str()).unwrap_or("unknown");
            let reference = event
                .pointer("/data/transaction/reference")
                .and_then(|r| r.as_str())
                .unwrap_or("unknown");
            let status = event
                .pointer("/data/transaction/status")
                .and_then(|s| s.as_str())
                .unwrap_or("unknown");

            info!(
                "Wompi event received: type={}, reference={}, status={}",
                event_type, reference, status
            );
        }
        Err(e) => {
            warn!("Unparseable Wompi event ({} bytes): {}", body.len(), e);
        }
    }

    (StatusCode::OK, Json(serde_json::json!({"success": true})))
}
