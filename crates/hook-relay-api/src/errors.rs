//! Error types for the HTTP service.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use hook_relay_core::secrets::SecretError;
use tracing::{error, warn};

/// Webhook handler errors with HTTP status code mapping.
///
/// Everything that occurs before the response is finalized surfaces here as
/// a response status; failures inside the detached trigger task never reach
/// this type; they are terminal at the logging boundary.
///
/// # Security Considerations
///
/// Response bodies are fixed strings. Provider error details (which may
/// name infrastructure) are logged server-side only.
#[derive(Debug, thiserror::Error)]
pub enum WebhookHandlerError {
    /// Signature verification failed, or the signature header was absent.
    ///
    /// Maps to: `403 Forbidden` with the body `Bad signature`, the exact
    /// response the webhook sender's delivery log shows on a shared-secret
    /// mismatch.
    #[error("Bad signature")]
    BadSignature,

    /// The shared webhook secret could not be resolved.
    ///
    /// Maps to:
    /// - `500 Internal Server Error` for configuration-shaped causes
    ///   (invalid secret name, resolver misconfiguration)
    /// - `503 Service Unavailable` for provider-shaped causes (vault
    ///   unreachable, secret missing, timeout)
    ///
    /// Without the secret no verification is possible, so the request is
    /// rejected; a resolution failure is never treated as verified.
    #[error("Secret resolution failed: {0}")]
    SecretResolution(#[from] SecretError),
}

impl IntoResponse for WebhookHandlerError {
    fn into_response(self) -> Response {
        match self {
            Self::BadSignature => {
                warn!("Rejecting webhook: signature verification failed");
                (StatusCode::FORBIDDEN, "Bad signature").into_response()
            }
            Self::SecretResolution(ref cause) => {
                let status = match cause {
                    SecretError::InvalidName { .. } | SecretError::Configuration { .. } => {
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                    SecretError::NotFound { .. }
                    | SecretError::Unavailable { .. }
                    | SecretError::Timeout { .. } => StatusCode::SERVICE_UNAVAILABLE,
                };

                error!(error = %cause, "Rejecting webhook: secret resolution failed");
                (status, "Webhook secret unavailable").into_response()
            }
        }
    }
}

// ============================================================================
// Service Errors
// ============================================================================

/// Errors raised while starting or running the HTTP server.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("failed to bind to {address}: {message}")]
    BindFailed { address: String, message: String },

    #[error("server failed: {message}")]
    ServerFailed { message: String },
}
