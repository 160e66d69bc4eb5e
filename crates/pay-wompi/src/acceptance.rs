//! # Acceptance Token Fetcher
//!
//! Every transaction submission must carry a short-lived acceptance token
//! representing the merchant's presigned acceptance of Wompi's terms. The
//! upstream service guarantees no expiry contract, so a fresh token is
//! fetched for every submission attempt and never cached across requests.

use crate::config::WompiConfig;
use crate::upstream::{map_error_body, require_path};
use pay_core::{PaymentError, PaymentResult};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

/// Fetch a fresh acceptance token from the merchant-info endpoint.
///
/// Extracts `data.presigned_acceptance.acceptance_token`, verifying each
/// nesting level rather than assuming the response shape.
pub async fn fetch_acceptance_token(
    client: &Client,
    config: &WompiConfig,
) -> PaymentResult<String> {
    let url = format!("{}/merchants/{}", config.api_base_url, config.public_key);

    let response = client
        .get(&url)
        .header("Authorization", config.public_auth_header())
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
        PaymentError::UpstreamProtocolError(format!("merchant-info response is not JSON: {e}"))
    })?;

    let token = require_path(
        &parsed,
        &["data", "presigned_acceptance", "acceptance_token"],
    )?
    .as_str()
    .ok_or_else(|| {
        PaymentError::UpstreamProtocolError("acceptance_token is not a string".to_string())
    })?;

    debug!("Fetched fresh acceptance token");

    Ok(token.to_string())
}
