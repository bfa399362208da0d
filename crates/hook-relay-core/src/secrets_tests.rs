//! Tests for secret name validation and secret value handling.

use super::*;

// ============================================================================
// SecretName tests
// ============================================================================

mod secret_name_tests {
    use super::*;

    #[test]
    fn test_valid_names_accepted() {
        assert!(SecretName::new("github-webhook-secret").is_ok());
        assert!(SecretName::new("GithubWebhookSecret2").is_ok());
        assert!(SecretName::new("s").is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let result = SecretName::new("");

        assert!(matches!(result, Err(SecretError::InvalidName { .. })));
    }

    #[test]
    fn test_overlong_name_rejected() {
        let result = SecretName::new("a".repeat(128));

        assert!(matches!(result, Err(SecretError::InvalidName { .. })));
    }

    #[test]
    fn test_invalid_characters_rejected() {
        assert!(SecretName::new("has_underscore").is_err());
        assert!(SecretName::new("has space").is_err());
        assert!(SecretName::new("has/slash").is_err());
    }

    /// `FromStr` goes through the same validation as `new`.
    #[test]
    fn test_from_str_validates() {
        let parsed: Result<SecretName, _> = "github-webhook-secret".parse();
        assert!(parsed.is_ok());

        let invalid: Result<SecretName, _> = "bad name".parse();
        assert!(invalid.is_err());
    }

    #[test]
    fn test_display_round_trips() {
        let name = SecretName::new("webhook-secret").unwrap();

        assert_eq!(name.to_string(), "webhook-secret");
        assert_eq!(name.as_str(), "webhook-secret");
    }
}

// ============================================================================
// SecretValue tests
// ============================================================================

mod secret_value_tests {
    use super::*;

    #[test]
    fn test_exposes_value_and_bytes() {
        let secret = SecretValue::from_string("hunter2".to_string());

        assert_eq!(secret.expose_secret(), "hunter2");
        assert_eq!(secret.expose_bytes(), b"hunter2");
        assert_eq!(secret.len(), 7);
        assert!(!secret.is_empty());
    }

    /// Debug output must not reveal the secret value.
    #[test]
    fn test_debug_redacts_value() {
        let secret = SecretValue::from_string("sensitive-data".to_string());
        let debug_output = format!("{:?}", secret);

        assert!(!debug_output.contains("sensitive-data"));
        assert!(debug_output.contains("[REDACTED]"));
    }
}

// ============================================================================
// SecretError tests
// ============================================================================

mod secret_error_tests {
    use super::*;
    use std::time::Duration;

    /// Error messages carry the secret name but never a secret value.
    #[test]
    fn test_error_display() {
        let name = SecretName::new("webhook-secret").unwrap();

        let not_found = SecretError::NotFound { name };
        assert!(not_found.to_string().contains("webhook-secret"));

        let timeout = SecretError::Timeout {
            timeout: Duration::from_secs(10),
        };
        assert!(timeout.to_string().contains("10s"));
    }
}
