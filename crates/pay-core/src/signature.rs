//! # Integrity Signature
//!
//! Wompi requires every transaction to carry an integrity signature so the
//! processor can verify the request was not tampered with in transit:
//!
//! ```text
//! sha256(reference + amount_in_cents + currency + integrity_secret)
//! ```
//!
//! The concatenation order is fixed by the processor's API contract.
//! Computation is pure and deterministic: identical inputs always yield the
//! identical lowercase hex digest.

use crate::error::{PaymentError, PaymentResult};
use sha2::{Digest, Sha256};

/// Compute the integrity signature for a transaction.
///
/// Fails with `InvalidInput` on an empty reference or a non-positive
/// amount rather than signing malformed data.
pub fn compute_signature(
    reference: &str,
    amount_in_cents: i64,
    currency: &str,
    secret: &str,
) -> PaymentResult<String> {
    if reference.trim().is_empty() {
        return Err(PaymentError::InvalidInput(
            "signature reference must not be empty".to_string(),
        ));
    }
    if amount_in_cents <= 0 {
        return Err(PaymentError::InvalidInput(format!(
            "signature amount must be positive, got {amount_in_cents}"
        )));
    }
    if currency.len() != 3 {
        return Err(PaymentError::InvalidInput(format!(
            "currency must be a 3-letter code, got {currency:?}"
        )));
    }

    let mut hasher = Sha256::new();
    hasher.update(reference.as_bytes());
    hasher.update(amount_in_cents.to_string().as_bytes());
    hasher.update(currency.as_bytes());
    hasher.update(secret.as_bytes());

    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vector_fixes_concatenation_order() {
        // sha256("RUNETIC-15000000COPS3CR3T")
        let sig = compute_signature("RUNETIC-1", 5_000_000, "COP", "S3CR3T").unwrap();
        assert_eq!(
            sig,
            "79758c2eeac0d54392a4b70a1fdda5529f8c370a60db29a739a40e4fea4df82f"
        );
    }

    #[test]
    fn test_deterministic() {
        let a = compute_signature("ORD-9", 120_000, "COP", "secret").unwrap();
        let b = compute_signature("ORD-9", 120_000, "COP", "secret").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_any_field_change_alters_digest() {
        let base = compute_signature("ORD-9", 120_000, "COP", "secret").unwrap();
        assert_ne!(
            base,
            compute_signature("ORD-8", 120_000, "COP", "secret").unwrap()
        );
        assert_ne!(
            base,
            compute_signature("ORD-9", 120_001, "COP", "secret").unwrap()
        );
        assert_ne!(
            base,
            compute_signature("ORD-9", 120_000, "USD", "secret").unwrap()
        );
        assert_ne!(
            base,
            compute_signature("ORD-9", 120_000, "COP", "secret2").unwrap()
        );
    }

    #[test]
    fn test_lowercase_hex_output() {
        let sig = compute_signature("ORD-9", 120_000, "COP", "secret").unwrap();
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_rejects_malformed_input() {
        assert!(matches!(
            compute_signature("", 1000, "COP", "s"),
            Err(PaymentError::InvalidInput(_))
        ));
        assert!(matches!(
            compute_signature("   ", 1000, "COP", "s"),
            Err(PaymentError::InvalidInput(_))
        ));
        assert!(matches!(
            compute_signature("REF", 0, "COP", "s"),
            Err(PaymentError::InvalidInput(_))
        ));
        assert!(matches!(
            compute_signature("REF", -5, "COP", "s"),
            Err(PaymentError::InvalidInput(_))
        ));
        assert!(matches!(
            compute_signature("REF", 1000, "PESO", "s"),
            Err(PaymentError::InvalidInput(_))
        ));
    }
}
