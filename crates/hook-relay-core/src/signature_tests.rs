//! Tests for webhook signature computation and verification.

use super::*;

// ============================================================================
// compute_signature tests
// ============================================================================

mod compute_signature_tests {
    use super::*;

    /// The computed signature carries the `sha256=` prefix followed by a
    /// 64-character hex digest.
    #[test]
    fn test_signature_format() {
        let signature = compute_signature(b"secret", b"payload");

        assert!(signature.starts_with(SIGNATURE_PREFIX));
        let hex_part = signature.strip_prefix(SIGNATURE_PREFIX).unwrap();
        assert_eq!(hex_part.len(), 64, "SHA-256 digest is 32 bytes / 64 hex chars");
        assert!(hex_part.chars().all(|c| c.is_ascii_hexdigit()));
    }

    /// The signature is deterministic in (secret, body).
    #[test]
    fn test_signature_is_deterministic() {
        let first = compute_signature(b"secret", b"payload");
        let second = compute_signature(b"secret", b"payload");

        assert_eq!(first, second);
    }

    /// Known-answer test against a digest produced by GitHub's own
    /// documentation example (secret "It's a Secret to Everybody",
    /// payload "Hello, World!").
    #[test]
    fn test_known_answer() {
        let signature =
            compute_signature(b"It's a Secret to Everybody", b"Hello, World!");

        assert_eq!(
            signature,
            "sha256=757107ea0eb2509fc211221cce984b8a37570b6d7586c22c46f4379c8b043e17"
        );
    }

    /// Different secrets produce different signatures for the same body.
    #[test]
    fn test_signature_depends_on_secret() {
        let body = b"same payload";

        assert_ne!(
            compute_signature(b"secret-one", body),
            compute_signature(b"secret-two", body)
        );
    }
}

// ============================================================================
// verify_signature tests
// ============================================================================

mod verify_signature_tests {
    use super::*;

    /// Round-trip: a freshly computed signature always verifies.
    #[test]
    fn test_round_trip_verifies() {
        let secret = b"my-webhook-secret";
        let body = b"{\"action\":\"push\"}";
        let signature = compute_signature(secret, body);

        assert!(verify_signature(secret, body, Some(&signature)));
    }

    /// A signature computed over a different body must not verify.
    #[test]
    fn test_tampered_body_rejected() {
        let secret = b"my-webhook-secret";
        let body = b"original body";
        let signature = compute_signature(secret, b"tampered body");

        assert!(!verify_signature(secret, body, Some(&signature)));
    }

    /// A signature computed with a different secret must not verify.
    #[test]
    fn test_wrong_secret_rejected() {
        let body = b"payload";
        let signature = compute_signature(b"attacker-secret", body);

        assert!(!verify_signature(b"real-secret", body, Some(&signature)));
    }

    /// An absent header compares false without panicking.
    #[test]
    fn test_absent_signature_rejected() {
        assert!(!verify_signature(b"secret", b"body", None));
    }

    /// An empty header value compares false without panicking.
    #[test]
    fn test_empty_signature_rejected() {
        assert!(!verify_signature(b"secret", b"body", Some("")));
    }

    /// A value without the `sha256=` prefix is rejected.
    #[test]
    fn test_missing_prefix_rejected() {
        let secret = b"secret";
        let body = b"body";
        let bare_hex = compute_signature(secret, body)
            .strip_prefix(SIGNATURE_PREFIX)
            .unwrap()
            .to_string();

        assert!(!verify_signature(secret, body, Some(&bare_hex)));
    }

    /// Non-hex signature content is rejected, not an error.
    #[test]
    fn test_non_hex_rejected() {
        assert!(!verify_signature(
            b"secret",
            b"body",
            Some("sha256=not-valid-hex!!")
        ));
    }

    /// A digest of the wrong length (truncated hex) is rejected.
    #[test]
    fn test_truncated_digest_rejected() {
        let secret = b"secret";
        let body = b"body";
        let truncated: String = compute_signature(secret, body)
            .chars()
            .take(SIGNATURE_PREFIX.len() + 32)
            .collect();

        assert!(!verify_signature(secret, body, Some(&truncated)));
    }

    /// An empty body still signs and verifies correctly (edge case).
    #[test]
    fn test_empty_body_round_trip() {
        let secret = b"secret-for-empty-body";
        let signature = compute_signature(secret, b"");

        assert!(verify_signature(secret, b"", Some(&signature)));
    }

    /// An empty secret is a legal HMAC key; round-trip still holds.
    #[test]
    fn test_empty_secret_round_trip() {
        let signature = compute_signature(b"", b"body");

        assert!(verify_signature(b"", b"body", Some(&signature)));
    }
}
