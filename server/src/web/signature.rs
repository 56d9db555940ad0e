//! Shopify webhook signature verification.
//!
//! Shopify signs each webhook with HMAC-SHA256 over the raw request body and
//! sends the base64 digest in the `X-Shopify-Hmac-Sha256` header.
//! Reference: https://shopify.dev/docs/apps/build/webhooks/subscribe/https#step-2-verify-the-webhook

use axum::http::HeaderMap;
use base64::{engine::general_purpose, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::warn;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the base64 HMAC digest. HeaderMap lookups are
/// case-insensitive, so any inbound casing matches.
pub const SHOPIFY_HMAC_HEADER: &str = "x-shopify-hmac-sha256";

/// Verify a Shopify webhook signature.
///
/// Computes HMAC-SHA256 over the exact raw body bytes under the shared
/// secret and compares it against the decoded header digest in constant
/// time. Returns `false` (never panics) for a missing body, a missing or
/// non-UTF-8 header, or a header that is not well-formed base64.
///
/// Digests are deliberately not logged; only presence and length are.
pub fn verify_shopify_signature(headers: &HeaderMap, raw_body: &str, secret: &str) -> bool {
    if raw_body.is_empty() {
        warn!("shopify_signature_missing_body");
        return false;
    }

    let hmac_header = match headers.get(SHOPIFY_HMAC_HEADER).and_then(|v| v.to_str().ok()) {
        Some(h) => h,
        None => {
            warn!("shopify_signature_missing_header");
            return false;
        }
    };

    // Malformed base64 is a verification failure, not an error
    let received = match general_purpose::STANDARD.decode(hmac_header) {
        Ok(bytes) => bytes,
        Err(_) => {
            warn!(
                header_length = hmac_header.len(),
                "shopify_signature_malformed_base64"
            );
            return false;
        }
    };

    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(m) => m,
        Err(_) => {
            warn!("shopify_signature_invalid_key");
            return false;
        }
    };

    mac.update(raw_body.as_bytes());
    let computed = mac.finalize().into_bytes();

    let valid = constant_time_compare(&received, &computed);

    if !valid {
        warn!(
            received_length = received.len(),
            computed_length = computed.len(),
            "shopify_signature_mismatch"
        );
    }

    valid
}

/// Constant-time byte comparison to prevent timing attacks.
///
/// A length mismatch rejects immediately; length is public (the digest size
/// is fixed by the algorithm) and reveals nothing about matching prefixes.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}
