//! # Transaction Payload Builder
//!
//! Maps a generic `PaymentRequest` into the Wompi-specific transaction
//! payload, branching per payment-method variant. All method-specific
//! validation happens here, before anything reaches the network: a request
//! that fails validation never costs an upstream call.

use pay_core::{CustomerData, PaymentError, PaymentRequest, PaymentResult};
use serde::Serialize;

/// Full transaction-create payload sent to `/transactions`
#[derive(Debug, Clone, Serialize)]
pub struct TransactionPayload {
    pub acceptance_token: String,
    pub amount_in_cents: i64,
    pub currency: String,
    pub signature: String,
    pub customer_email: String,
    pub reference: String,
    pub payment_method: MethodPayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_data: Option<CustomerData>,
}

/// Processor-specific payment method payload, tagged the way Wompi expects
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum MethodPayload {
    #[serde(rename = "PSE")]
    Pse {
        user_type: u8,
        user_legal_id_type: String,
        user_legal_id: String,
        financial_institution_code: String,
        payment_description: String,
    },
    #[serde(rename = "CARD")]
    Card { token: String, installments: i64 },
    #[serde(rename = "NEQUI")]
    Nequi { phone_number: String },
}

impl MethodPayload {
    /// Asynchronous methods settle out-of-band and may produce a redirect
    /// URL after submission.
    pub fn is_async(&self) -> bool {
        matches!(self, MethodPayload::Pse { .. } | MethodPayload::Nequi { .. })
    }

    /// Whether the PSE fallback checkout link applies to this method
    pub fn is_pse(&self) -> bool {
        matches!(self, MethodPayload::Pse { .. })
    }
}

/// Resolve the loosely-tagged inbound method into a typed Wompi payload.
///
/// Missing fields fail fast with `MissingRequiredFields` naming the method
/// and every missing field; unknown tags fail with `InvalidPaymentMethod`.
pub fn build_method_payload(
    request: &PaymentRequest,
    reference: &str,
) -> PaymentResult<MethodPayload> {
    let method = &request.payment_method;

    match method.method_type.to_ascii_uppercase().as_str() {
        "PSE" => {
            let mut missing = Vec::new();
            if is_blank(&method.financial_institution_code) {
                missing.push("financial_institution_code".to_string());
            }
            if is_blank(&method.user_type) {
                missing.push("user_type".to_string());
            }
            if is_blank(&method.user_legal_id_type) {
                missing.push("user_legal_id_type".to_string());
            }
            if is_blank(&method.user_legal_id) {
                missing.push("user_legal_id".to_string());
            }
            if !missing.is_empty() {
                return Err(PaymentError::MissingRequiredFields {
                    method: "PSE".to_string(),
                    fields: missing,
                });
            }

            // Wompi encodes the payer kind numerically: 0 = persona
            // natural, 1 = persona juridica.
            let user_type = match method.user_type.as_deref() {
                Some(t) if t.eq_ignore_ascii_case("natural") => 0,
                _ => 1,
            };

            let payment_description = method
                .payment_description
                .clone()
                .unwrap_or_else(|| default_payment_description(reference));

            Ok(MethodPayload::Pse {
                user_type,
                user_legal_id_type: method.user_legal_id_type.clone().unwrap_or_default(),
                user_legal_id: method.user_legal_id.clone().unwrap_or_default(),
                financial_institution_code: method
                    .financial_institution_code
                    .clone()
                    .unwrap_or_default(),
                payment_description,
            })
        }
        "CARD" => {
            let token = match &method.token {
                Some(t) if !t.trim().is_empty() => t.clone(),
                _ => {
                    return Err(PaymentError::MissingRequiredFields {
                        method: "CARD".to_string(),
                        fields: vec!["token".to_string()],
                    })
                }
            };

            let installments = method.installments.filter(|i| *i > 0).unwrap_or(1);

            Ok(MethodPayload::Card {
                token,
                installments,
            })
        }
        "NEQUI" => {
            let phone_number = request
                .customer_data
                .as_ref()
                .and_then(|c| c.phone_number.clone())
                .filter(|p| !p.trim().is_empty())
                .ok_or_else(|| PaymentError::MissingRequiredFields {
                    method: "NEQUI".to_string(),
                    fields: vec!["customer_data.phone_number".to_string()],
                })?;

            Ok(MethodPayload::Nequi { phone_number })
        }
        other => Err(PaymentError::InvalidPaymentMethod {
            method: other.to_string(),
        }),
    }
}

/// Assemble the complete transaction payload.
pub fn build_transaction_payload(
    request: &PaymentRequest,
    reference: &str,
    method: MethodPayload,
    signature: String,
    acceptance_token: String,
) -> TransactionPayload {
    TransactionPayload {
        acceptance_token,
        amount_in_cents: request.amount_in_cents,
        currency: request.currency.clone(),
        signature,
        customer_email: request.customer_email.clone(),
        reference: reference.to_string(),
        payment_method: method,
        redirect_url: request.redirect_url.clone(),
        customer_data: request.customer_data.clone(),
    }
}

/// Default human-readable description shown to the payer at the bank,
/// keyed on the tail of the reference. References are caller-supplied and
/// not guaranteed ASCII, so the tail is taken in chars.
fn default_payment_description(reference: &str) -> String {
    let tail_start = reference
        .char_indices()
        .rev()
        .nth(7)
        .map(|(i, _)| i)
        .unwrap_or(0);
    format!("Compra RUNETIC #{}", &reference[tail_start..])
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map(str::trim).unwrap_or("").is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pay_core::{CustomerData, PaymentMethodInput};

    fn base_request(method: PaymentMethodInput) -> PaymentRequest {
        PaymentRequest {
            reference: Some("RUN1700000000000ABCD1234".into()),
            amount_in_cents: 5_000_000,
            currency: "COP".into(),
            customer_email: "buyer@example.com".into(),
            payment_method: method,
            redirect_url: Some("https://merchant.example.com/return".into()),
            customer_data: None,
        }
    }

    #[test]
    fn test_pse_natural_maps_to_zero() {
        let request = base_request(PaymentMethodInput::pse("1022", "natural", "CC", "1099888777"));
        let method = build_method_payload(&request, "RUN1700000000000ABCD1234").unwrap();

        match method {
            MethodPayload::Pse {
                user_type,
                financial_institution_code,
                payment_description,
                ..
            } => {
                assert_eq!(user_type, 0);
                assert_eq!(financial_institution_code, "1022");
                assert_eq!(payment_description, "Compra RUNETIC #ABCD1234");
            }
            other => panic!("unexpected method: {other:?}"),
        }
    }

    #[test]
    fn test_pse_juridical_maps_to_one() {
        let request = base_request(PaymentMethodInput::pse("1022", "juridica", "NIT", "900123456"));
        let method = build_method_payload(&request, "REF").unwrap();

        assert!(matches!(method, MethodPayload::Pse { user_type: 1, .. }));
    }

    #[test]
    fn test_pse_missing_fields_named() {
        let mut input = PaymentMethodInput::pse("", "natural", "CC", "1099888777");
        input.financial_institution_code = None;
        let request = base_request(input);

        let err = build_method_payload(&request, "REF").unwrap_err();
        match err {
            PaymentError::MissingRequiredFields { method, fields } => {
                assert_eq!(method, "PSE");
                assert_eq!(fields, vec!["financial_institution_code".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_pse_explicit_description_wins() {
        let mut input = PaymentMethodInput::pse("1022", "natural", "CC", "1099888777");
        input.payment_description = Some("Pedido 42".into());
        let request = base_request(input);

        let method = build_method_payload(&request, "REF").unwrap();
        assert!(matches!(
            method,
            MethodPayload::Pse { payment_description, .. } if payment_description == "Pedido 42"
        ));
    }

    #[test]
    fn test_card_installments_default_and_coercion() {
        let request = base_request(PaymentMethodInput::card("tok_test_1", None));
        let method = build_method_payload(&request, "REF").unwrap();
        assert!(matches!(method, MethodPayload::Card { installments: 1, .. }));

        let request = base_request(PaymentMethodInput::card("tok_test_1", Some(0)));
        let method = build_method_payload(&request, "REF").unwrap();
        assert!(matches!(method, MethodPayload::Card { installments: 1, .. }));

        let request = base_request(PaymentMethodInput::card("tok_test_1", Some(-3)));
        let method = build_method_payload(&request, "REF").unwrap();
        assert!(matches!(method, MethodPayload::Card { installments: 1, .. }));

        let request = base_request(PaymentMethodInput::card("tok_test_1", Some(6)));
        let method = build_method_payload(&request, "REF").unwrap();
        assert!(matches!(method, MethodPayload::Card { installments: 6, .. }));
    }

    #[test]
    fn test_card_requires_token() {
        let mut input = PaymentMethodInput::card("", None);
        input.token = None;
        let request = base_request(input);

        let err = build_method_payload(&request, "REF").unwrap_err();
        assert!(matches!(
            err,
            PaymentError::MissingRequiredFields { method, fields }
                if method == "CARD" && fields == vec!["token".to_string()]
        ));
    }

    #[test]
    fn test_nequi_sources_phone_from_customer_data() {
        let mut request = base_request(PaymentMethodInput::nequi());
        request.customer_data = Some(CustomerData {
            phone_number: Some("3001234567".into()),
            ..Default::default()
        });

        let method = build_method_payload(&request, "REF").unwrap();
        assert_eq!(
            method,
            MethodPayload::Nequi {
                phone_number: "3001234567".into()
            }
        );
    }

    #[test]
    fn test_nequi_without_phone_fails() {
        let request = base_request(PaymentMethodInput::nequi());

        let err = build_method_payload(&request, "REF").unwrap_err();
        assert!(matches!(
            err,
            PaymentError::MissingRequiredFields { method, .. } if method == "NEQUI"
        ));
    }

    #[test]
    fn test_unknown_method_rejected() {
        let input = PaymentMethodInput {
            method_type: "DAVIPLATA".into(),
            ..Default::default()
        };
        let request = base_request(input);

        let err = build_method_payload(&request, "REF").unwrap_err();
        assert!(matches!(
            err,
            PaymentError::InvalidPaymentMethod { method } if method == "DAVIPLATA"
        ));
    }

    #[test]
    fn test_payload_serializes_with_wompi_tag() {
        let request = base_request(PaymentMethodInput::pse("1022", "natural", "CC", "10998"));
        let method = build_method_payload(&request, "REF-1").unwrap();
        let payload = build_transaction_payload(
            &request,
            "REF-1",
            method,
            "deadbeef".into(),
            "eyJhbGciOi".into(),
        );

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["payment_method"]["type"], "PSE");
        assert_eq!(json["payment_method"]["user_type"], 0);
        assert_eq!(json["reference"], "REF-1");
        assert_eq!(json["signature"], "deadbeef");
        assert_eq!(json["acceptance_token"], "eyJhbGciOi");
        assert_eq!(json["redirect_url"], "https://merchant.example.com/return");
    }

    #[test]
    fn test_non_ascii_reference_description() {
        // References are arbitrary caller strings; a multi-byte char near
        // the tail must not break the 8-char cut.
        let request = base_request(PaymentMethodInput::pse("1022", "natural", "CC", "10998"));
        let method = build_method_payload(&request, "añbcdefgh").unwrap();
        assert!(matches!(
            method,
            MethodPayload::Pse { payment_description, .. }
                if payment_description == "Compra RUNETIC #ñbcdefgh"
        ));

        let method = build_method_payload(&request, "ñandú").unwrap();
        assert!(matches!(
            method,
            MethodPayload::Pse { payment_description, .. }
                if payment_description == "Compra RUNETIC #ñandú"
        ));
    }

    #[test]
    fn test_short_reference_description_does_not_panic() {
        let request = base_request(PaymentMethodInput::pse("1022", "natural", "CC", "10998"));
        let method = build_method_payload(&request, "R1").unwrap();
        assert!(matches!(
            method,
            MethodPayload::Pse { payment_description, .. }
                if payment_description == "Compra RUNETIC #R1"
        ));
    }
}
