//! # Wompi Gateway
//!
//! `PaymentGateway` implementation orchestrating the full transaction
//! workflow against the Wompi REST API:
//!
//! 1. compute the integrity signature (pure, local)
//! 2. resolve and validate the payment-method payload (local, fail-fast)
//! 3. fetch a fresh acceptance token
//! 4. submit the transaction
//! 5. for asynchronous methods with no immediate URL, run the bounded
//!    settlement re-check
//!
//! The workflow is request-scoped: nothing is shared across requests except
//! the immutable configuration and the connection pool. A failed call fails
//! the whole request; nothing is retried, so a payment is never submitted
//! twice.

use crate::acceptance::fetch_acceptance_token;
use crate::config::WompiConfig;
use crate::payload::{build_method_payload, build_transaction_payload, TransactionPayload};
use crate::settlement::{
    poll_once, pse_fallback_url, read_transaction, WompiEnvelope, WompiTransaction,
};
use crate::tokenize;
use crate::upstream::map_error_body;
use async_trait::async_trait;
use pay_core::{
    compute_signature, CardData, FinancialInstitution, PaymentError, PaymentGateway,
    PaymentRequest, PaymentResult, SettlementOutcome, TransactionRecord, WidgetSignature,
};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};

/// Wompi payment gateway
pub struct WompiGateway {
    config: WompiConfig,
    client: Client,
}

impl WompiGateway {
    /// Create a new gateway. Every outbound call inherits the configured
    /// timeout so a hang at the processor cannot hang a request.
    pub fn new(config: WompiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.http_timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Create from environment variables
    pub fn from_env() -> PaymentResult<Self> {
        let config = WompiConfig::from_env()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &WompiConfig {
        &self.config
    }

    /// Single POST to the transactions endpoint, bearer-authenticated with
    /// the private key.
    async fn submit(&self, payload: &TransactionPayload) -> PaymentResult<WompiTransaction> {
        let url = format!("{}/transactions", self.config.api_base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.private_auth_header())
            .json(payload)
            .send()
            .await
            .map_err(|e| PaymentError::UpstreamUnavailable(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PaymentError::UpstreamUnavailable(e.to_string()))?;

        if !status.is_success() {
            error!(
                reference = %payload.reference,
                status = status.as_u16(),
                "Wompi rejected transaction"
            );
            return Err(map_error_body(status.as_u16(), &body));
        }

        let envelope: WompiEnvelope<WompiTransaction> =
            serde_json::from_str(&body).map_err(|e| {
                PaymentError::UpstreamProtocolError(format!(
                    "transaction-create response did not parse: {e}"
                ))
            })?;

        Ok(envelope.data)
    }
}

#[async_trait]
impl PaymentGateway for WompiGateway {
    #[instrument(skip(self, request), fields(amount = request.amount_in_cents, method = %request.payment_method.method_type))]
    async fn create_payment(&self, request: PaymentRequest) -> PaymentResult<TransactionRecord> {
        let reference = request.reference_or_generated();

        // Signature and method resolution are both local; either failing
        // means no upstream call was spent.
        let signature = compute_signature(
            &reference,
            request.amount_in_cents,
            &request.currency,
            &self.config.integrity_secret,
        )?;
        let method = build_method_payload(&request, &reference)?;

        let needs_poll_fallback = method.is_async();
        let is_pse = method.is_pse();

        // Fresh token per attempt; the upstream guarantees no expiry
        // contract, so tokens are never reused.
        let acceptance_token = fetch_acceptance_token(&self.client, &self.config).await?;

        let payload =
            build_transaction_payload(&request, &reference, method, signature, acceptance_token);

        debug!(reference = %reference, "Submitting transaction");
        let submitted = self.submit(&payload).await?;

        info!(
            transaction_id = %submitted.id,
            reference = %reference,
            status = %submitted.status,
            "Transaction created"
        );

        let mut transaction = submitted.clone();
        let mut checkout_url = submitted
            .async_payment_url()
            .or(submitted.redirect_url.clone());

        // Asynchronous methods often expose the redirect URL only after the
        // processor has talked to the bank; one bounded re-check covers the
        // common case without turning this into a polling loop.
        if checkout_url.is_none() && needs_poll_fallback {
            let (polled, outcome) = poll_once(&self.client, &self.config, &submitted.id).await?;
            transaction = polled;

            checkout_url = match outcome {
                SettlementOutcome::Settled { checkout_url } => Some(checkout_url),
                SettlementOutcome::Unresolved if is_pse => {
                    Some(pse_fallback_url(&self.config, &submitted.id))
                }
                SettlementOutcome::Unresolved => None,
            };
        }

        Ok(TransactionRecord::observed(
            transaction.id,
            reference,
            transaction.status,
            checkout_url,
        ))
    }

    #[instrument(skip(self))]
    async fn transaction_status(&self, transaction_id: &str) -> PaymentResult<TransactionRecord> {
        let transaction = read_transaction(&self.client, &self.config, transaction_id).await?;

        let checkout_url = transaction
            .async_payment_url()
            .or(transaction.redirect_url.clone());

        Ok(TransactionRecord::observed(
            transaction.id,
            transaction.reference,
            transaction.status,
            checkout_url,
        ))
    }

    async fn tokenize_card(&self, card: CardData) -> PaymentResult<String> {
        tokenize::tokenize_card(&self.client, &self.config, &card).await
    }

    async fn financial_institutions(&self) -> PaymentResult<Vec<FinancialInstitution>> {
        let url = format!("{}/pse/financial_institutions", self.config.api_base_url);

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.config.public_auth_header())
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

        #[derive(Deserialize)]
        struct Banks {
            data: Vec<FinancialInstitution>,
        }

        let banks: Banks = serde_json::from_str(&body).map_err(|e| {
            PaymentError::UpstreamProtocolError(format!(
                "financial institutions response did not parse: {e}"
            ))
        })?;

        Ok(banks.data)
    }

    fn widget_signature(
        &self,
        reference: &str,
        amount_in_cents: i64,
        currency: &str,
    ) -> PaymentResult<WidgetSignature> {
        let signature = compute_signature(
            reference,
            amount_in_cents,
            currency,
            &self.config.integrity_secret,
        )?;

        Ok(WidgetSignature {
            reference: reference.to_string(),
            signature,
            public_key: self.config.public_key.clone(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "wompi"
    }
}
