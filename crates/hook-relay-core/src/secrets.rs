//! Secret resolution for webhook verification.
//!
//! The webhook secret lives in an external key vault and is fetched on the
//! request's critical path, so resolution is abstracted behind the
//! [`SecretResolver`] trait: the handler can be tested against fakes, and
//! every call carries a caller-specified timeout so a slow provider rejects
//! the request instead of hanging it.

use async_trait::async_trait;
use std::{fmt, str::FromStr, time::Duration};
use zeroize::Zeroize;

// ============================================================================
// Secret Name
// ============================================================================

/// Validated secret identifier.
///
/// Enforces the Azure Key Vault naming constraint so that an invalid name is
/// rejected at configuration time rather than surfacing as a provider error
/// on the first webhook.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SecretName(String);

impl SecretName {
    /// Create a new secret name with validation.
    ///
    /// # Validation Rules
    /// - Must be 1-127 characters (Azure Key Vault limit)
    /// - Must contain only alphanumeric characters and hyphens
    pub fn new(name: impl Into<String>) -> Result<Self, SecretError> {
        let name = name.into();

        if name.is_empty() {
            return Err(SecretError::InvalidName {
                name,
                reason: "secret name cannot be empty".to_string(),
            });
        }

        if name.len() > 127 {
            return Err(SecretError::InvalidName {
                name,
                reason: "secret name exceeds 127 character limit".to_string(),
            });
        }

        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(SecretError::InvalidName {
                name,
                reason: "secret name contains invalid characters".to_string(),
            });
        }

        Ok(Self(name))
    }

    /// Get string representation.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SecretName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SecretName {
    type Err = SecretError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

// ============================================================================
// Secret Value
// ============================================================================

/// Container for a resolved secret value.
///
/// The value never appears in `Debug` output and the backing memory is
/// zeroized on drop.
#[derive(Clone)]
pub struct SecretValue {
    inner: String,
}

impl SecretValue {
    /// Create a secret value from a string.
    pub fn from_string(value: String) -> Self {
        Self { inner: value }
    }

    /// Get the secret as a string slice.
    ///
    /// # Security Warning
    /// The returned slice contains the actual secret value. Use immediately
    /// and avoid storing it.
    pub fn expose_secret(&self) -> &str {
        &self.inner
    }

    /// Get the secret as bytes, for use as an HMAC key.
    pub fn expose_bytes(&self) -> &[u8] {
        self.inner.as_bytes()
    }

    /// Check if the secret is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Get the secret length without exposing content.
    pub fn len(&self) -> usize {
        self.inner.len()
    }
}

impl fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretValue")
            .field("length", &self.len())
            .field("value", &"[REDACTED]")
            .finish()
    }
}

impl Drop for SecretValue {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

// ============================================================================
// Resolver Trait
// ============================================================================

/// Interface for resolving the current value of a named secret.
///
/// Resolution sits on the webhook request's critical path: it must complete
/// before signature verification can run. Implementations must honor the
/// caller-specified `timeout`; on expiry the call fails with
/// [`SecretError::Timeout`] so the handler rejects the request instead of
/// hanging, and a failure is never treated as a successful verification.
#[async_trait]
pub trait SecretResolver: Send + Sync {
    /// Resolve the current value of `name`.
    ///
    /// # Arguments
    ///
    /// * `name` - The secret to resolve
    /// * `timeout` - Upper bound on the total resolution time
    ///
    /// # Errors
    /// - [`SecretError::NotFound`] - the name does not exist in the provider
    /// - [`SecretError::Unavailable`] - the provider is unreachable or denied access
    /// - [`SecretError::Timeout`] - resolution did not complete within `timeout`
    async fn resolve(
        &self,
        name: &SecretName,
        timeout: Duration,
    ) -> Result<SecretValue, SecretError>;
}

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur while resolving a secret.
#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    #[error("secret not found: {name}")]
    NotFound { name: SecretName },

    #[error("secret provider unavailable: {message}")]
    Unavailable { message: String },

    #[error("secret resolution timed out after {}s", timeout.as_secs())]
    Timeout { timeout: Duration },

    #[error("invalid secret name: {name} - {reason}")]
    InvalidName { name: String, reason: String },

    #[error("secret provider configuration error: {message}")]
    Configuration { message: String },
}

#[cfg(test)]
#[path = "secrets_tests.rs"]
mod tests;
