//! # Card Tokenization
//!
//! Raw card data is exchanged for an opaque token at the processor's
//! tokenization endpoint; only the token ever enters a transaction payload.
//! The raw fields are never logged (see `CardData`'s redacting `Debug`).

use crate::config::WompiConfig;
use crate::upstream::{map_error_body, require_path};
use pay_core::{CardData, PaymentError, PaymentResult};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

#[derive(Serialize)]
struct TokenizeCardPayload<'a> {
    number: &'a str,
    cvc: &'a str,
    exp_month: &'a str,
    exp_year: &'a str,
    card_holder: &'a str,
}

/// Tokenize raw card data, returning the opaque token id (`tok_...`).
pub async fn tokenize_card(
    client: &Client,
    config: &WompiConfig,
    card: &CardData,
) -> PaymentResult<String> {
    let url = format!("{}/tokens/cards", config.api_base_url);

    let payload = TokenizeCardPayload {
        number: &card.number,
        cvc: &card.cvc,
        exp_month: &card.exp_month,
        exp_year: &card.exp_year,
        card_holder: &card.card_holder,
    };

    let response = client
        .post(&url)
        .header("Authorization", config.public_auth_header())
        .json(&payload)
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

    let parsed: Value = serde_json::from_str(&body).map_err(|e| {
        PaymentError::UpstreamProtocolError(format!("tokenization response is not JSON: {e}"))
    })?;

    let token = require_path(&parsed, &["data", "id"])?
        .as_str()
        .ok_or_else(|| {
            PaymentError::UpstreamProtocolError("card token id is not a string".to_string())
        })?;

    debug!("Card tokenized");

    Ok(token.to_string())
}
