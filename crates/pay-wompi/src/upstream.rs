//! # Upstream Error Mapping
//!
//! Wompi's error responses are not uniform: sometimes `error.type` carries
//! a machine code, sometimes `error.messages` is an object of per-field
//! message arrays, sometimes `error.reason` holds free text. This module
//! flattens all of those into `PaymentError::UpstreamRejected` so the rest
//! of the workflow sees one shape.

use pay_core::PaymentError;
use serde_json::Value;

/// Generic outward code when the upstream error carries no usable type
pub const GENERIC_ERROR_CODE: &str = "PAYMENT_ERROR";

/// Map a non-success upstream response body into a typed rejection.
///
/// The outward HTTP status mirrors the upstream status.
pub fn map_error_body(status: u16, body: &str) -> PaymentError {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let error = parsed.as_ref().and_then(|v| v.get("error"));

    let code = error
        .and_then(|e| e.get("type"))
        .and_then(|t| t.as_str())
        .unwrap_or(GENERIC_ERROR_CODE)
        .to_string();

    let message = error
        .and_then(|e| e.get("messages"))
        .and_then(flatten_messages)
        .or_else(|| {
            error
                .and_then(|e| e.get("reason").or_else(|| e.get("message")))
                .and_then(|m| m.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| code.clone());

    PaymentError::UpstreamRejected {
        status: Some(status),
        code,
        message,
    }
}

/// Flatten Wompi's `{field: ["msg", ...], ...}` messages object into a
/// single comma-joined line, e.g. `"amount_in_cents: must be positive"`.
fn flatten_messages(messages: &Value) -> Option<String> {
    let object = messages.as_object()?;

    let mut parts = Vec::new();
    for (field, entries) in object {
        let joined = match entries {
            Value::Array(items) => items
                .iter()
                .filter_map(|m| m.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        parts.push(format!("{field}: {joined}"));
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

/// Walk a nested JSON path, failing with `UpstreamProtocolError` naming the
/// first missing level. The upstream contract is not self-describing, so
/// every dereference is verified.
pub fn require_path<'a>(root: &'a Value, path: &[&str]) -> Result<&'a Value, PaymentError> {
    let mut current = root;
    for key in path {
        current = current.get(key).ok_or_else(|| {
            PaymentError::UpstreamProtocolError(format!(
                "missing field `{}` in upstream response (path: {})",
                key,
                path.join(".")
            ))
        })?;
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_type_becomes_code() {
        let body = r#"{"error": {"type": "INVALID_ACCESS_TOKEN", "reason": "bad key"}}"#;
        let err = map_error_body(401, body);

        match err {
            PaymentError::UpstreamRejected {
                status,
                code,
                message,
            } => {
                assert_eq!(status, Some(401));
                assert_eq!(code, "INVALID_ACCESS_TOKEN");
                assert_eq!(message, "bad key");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_messages_object_is_flattened() {
        let body = r#"{
            "error": {
                "type": "INPUT_VALIDATION_ERROR",
                "messages": {"amount_in_cents": ["must be positive"]}
            }
        }"#;
        let err = map_error_body(422, body);

        match err {
            PaymentError::UpstreamRejected {
                status, message, ..
            } => {
                assert_eq!(status, Some(422));
                assert!(message.contains("must be positive"));
                assert!(message.contains("amount_in_cents"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_multiple_messages_comma_joined() {
        let body = r#"{
            "error": {
                "messages": {
                    "currency": ["is unknown"],
                    "reference": ["already used", "too short"]
                }
            }
        }"#;
        let err = map_error_body(422, body);

        match err {
            PaymentError::UpstreamRejected { message, .. } => {
                assert!(message.contains("currency: is unknown"));
                assert!(message.contains("already used, too short"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unparseable_body_falls_back_to_generic_code() {
        let err = map_error_body(500, "<html>gateway timeout</html>");

        match err {
            PaymentError::UpstreamRejected {
                status,
                code,
                message,
            } => {
                assert_eq!(status, Some(500));
                assert_eq!(code, GENERIC_ERROR_CODE);
                assert_eq!(message, GENERIC_ERROR_CODE);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_require_path_names_missing_level() {
        let root = json!({"data": {"presigned_acceptance": {}}});

        let token = require_path(&root, &["data", "presigned_acceptance", "acceptance_token"]);
        let err = token.unwrap_err();
        assert!(matches!(err, PaymentError::UpstreamProtocolError(_)));
        assert!(err.to_string().contains("acceptance_token"));

        let present = require_path(&root, &["data", "presigned_acceptance"]).unwrap();
        assert!(present.is_object());
    }
}
