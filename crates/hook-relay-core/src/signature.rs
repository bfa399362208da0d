//! Webhook signature computation and verification.
//!
//! Implements the HMAC-SHA256 scheme GitHub uses for the
//! `X-Hub-Signature-256` header: `sha256=<hex-digest>` over the raw request
//! body, keyed by the shared webhook secret. Verification uses constant-time
//! comparison to prevent timing attacks.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Prefix carried by every well-formed signature header value.
pub const SIGNATURE_PREFIX: &str = "sha256=";

/// Compute the signature for `body` keyed by `secret`.
///
/// Returns the full header value, `sha256=<hex-digest>`. The result is
/// deterministic in `(secret, body)` and has no side effects.
pub fn compute_signature(secret: &[u8], body: &[u8]) -> String {
    let digest = hmac_sha256(secret, body);
    format!("{}{}", SIGNATURE_PREFIX, hex::encode(digest))
}

/// Verify a signature header value against `body` keyed by `secret`.
///
/// Returns `true` iff `provided` decodes to exactly the HMAC-SHA256 digest
/// of `body` under `secret`. The digest bytes are compared in constant time.
///
/// An absent header (`None`), an empty value, a missing `sha256=` prefix,
/// or a value that is not valid hex all compare `false`; this function
/// never panics and never errors.
///
/// # Arguments
///
/// * `secret` - The shared webhook secret bytes
/// * `body` - The raw request body, exactly as received
/// * `provided` - The `X-Hub-Signature-256` header value, if present
pub fn verify_signature(secret: &[u8], body: &[u8], provided: Option<&str>) -> bool {
    let provided = match provided {
        Some(value) if !value.is_empty() => value,
        _ => return false,
    };

    let hex_part = match provided.strip_prefix(SIGNATURE_PREFIX) {
        Some(hex_part) => hex_part,
        None => return false,
    };

    let provided_digest = match hex::decode(hex_part) {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };

    let expected = hmac_sha256(secret, body);

    // The digest length is public knowledge; only the digest bytes need the
    // constant-time path.
    if provided_digest.len() != expected.len() {
        return false;
    }

    provided_digest.ct_eq(&expected).into()
}

/// HMAC-SHA256 digest of `body` keyed by `secret`.
fn hmac_sha256(secret: &[u8], body: &[u8]) -> Vec<u8> {
    // HMAC accepts keys of any length, so construction cannot fail.
    let mut mac =
        HmacSha256::new_from_slice(secret).expect("HMAC-SHA256 accepts keys of any length");
    mac.update(body);
    mac.finalize().into_bytes().to_vec()
}

#[cfg(test)]
#[path = "signature_tests.rs"]
mod tests;
