//! # Settlement Poller
//!
//! After submission, asynchronous methods (PSE, NEQUI) may need one
//! follow-up read before the processor exposes the redirect URL. This is a
//! deliberately bounded re-check: one fixed delay, one read, no loop and no
//! backoff. The synchronous-looking HTTP response must return promptly;
//! settlement that takes longer arrives via the notification path instead.
//!
//! The wait is scoped to the request's own task, so dropping the request
//! future cancels it.

use crate::config::WompiConfig;
use crate::upstream::map_error_body;
use pay_core::{PaymentError, PaymentResult, SettlementOutcome, TransactionStatus};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

/// Envelope every Wompi response wraps its payload in
#[derive(Debug, Deserialize)]
pub struct WompiEnvelope<T> {
    pub data: T,
}

/// A transaction as Wompi reports it
#[derive(Debug, Clone, Deserialize)]
pub struct WompiTransaction {
    pub id: String,
    pub reference: String,
    pub status: TransactionStatus,
    #[serde(default)]
    pub redirect_url: Option<String>,
    #[serde(default)]
    pub payment_method: Option<Value>,
}

impl WompiTransaction {
    /// Extract `payment_method.extra.async_payment_url` when present.
    /// The field is nested inside an unstructured blob, so every level is
    /// checked.
    pub fn async_payment_url(&self) -> Option<String> {
        self.payment_method
            .as_ref()?
            .get("extra")?
            .get("async_payment_url")?
            .as_str()
            .filter(|url| !url.is_empty())
            .map(String::from)
    }
}

/// Read the current state of a transaction from the processor.
pub async fn read_transaction(
    client: &Client,
    config: &WompiConfig,
    transaction_id: &str,
) -> PaymentResult<WompiTransaction> {
    let url = format!("{}/transactions/{}", config.api_base_url, transaction_id);

    let response = client
        .get(&url)
        .header("Authorization", config.private_auth_header())
        .send()
        .await
        .map_err(|e| PaymentError::UpstreamUnavailable(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| PaymentError::UpstreamUnavailable(e.to_string()))?;

    if !status.is_success() {
        return Err(map_error_body(status.as_u16(), &body));
    }

    let envelope: WompiEnvelope<WompiTransaction> = serde_json::from_str(&body).map_err(|e| {
        PaymentError::UpstreamProtocolError(format!("transaction response did not parse: {e}"))
    })?;

    Ok(envelope.data)
}

/// Wait the configured fixed delay, then re-query the transaction once.
///
/// Returns `Settled` when the re-check produced an actionable checkout URL
/// and `Unresolved` otherwise; status transitions themselves still arrive
/// through the notification path.
#[instrument(skip(client, config))]
pub async fn poll_once(
    client: &Client,
    config: &WompiConfig,
    transaction_id: &str,
) -> PaymentResult<(WompiTransaction, SettlementOutcome)> {
    tokio::time::sleep(config.poll_delay).await;

    let transaction = read_transaction(client, config, transaction_id).await?;

    let outcome = match transaction.async_payment_url() {
        Some(checkout_url) => {
            debug!("Settlement re-check produced checkout URL");
            SettlementOutcome::Settled { checkout_url }
        }
        None => SettlementOutcome::Unresolved,
    };

    Ok((transaction, outcome))
}

/// Deterministic fallback checkout link for PSE when the processor returns
/// no URL anywhere.
///
/// NOTE: this template is unconfirmed against the provider contract; it is
/// preserved as a documented fallback policy, not guaranteed behavior.
pub fn pse_fallback_url(config: &WompiConfig, transaction_id: &str) -> String {
    format!("{}/l/{}", config.checkout_base_url, transaction_id)
}
