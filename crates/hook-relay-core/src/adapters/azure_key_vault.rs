//! # Azure Key Vault Secret Resolver
//!
//! Production [`SecretResolver`] over the Azure SDK with managed identity
//! authentication. Every resolution is bounded by the caller-specified
//! timeout so a slow or unreachable vault rejects the webhook instead of
//! hanging it.

use crate::secrets::{SecretError, SecretName, SecretResolver, SecretValue};
use async_trait::async_trait;
use azure_identity::{DefaultAzureCredential, TokenCredentialOptions};
use azure_security_keyvault::SecretClient;
use std::{sync::Arc, time::Duration};
use tracing::{debug, error, instrument};

/// [`SecretResolver`] backed by Azure Key Vault.
///
/// Uses `DefaultAzureCredential` for authentication, supporting:
/// - Managed Identity (production in Azure)
/// - Azure CLI (local development)
/// - Environment variables
pub struct AzureKeyVaultResolver {
    client: SecretClient,
}

impl AzureKeyVaultResolver {
    /// Create a new resolver for the given vault.
    ///
    /// # Arguments
    ///
    /// * `vault_url` - Key Vault endpoint, e.g. `https://my-vault.vault.azure.net`
    ///
    /// # Errors
    ///
    /// Returns [`SecretError::Configuration`] when the vault URL is empty
    /// or the Key Vault client cannot be constructed.
    pub fn new(vault_url: &str) -> Result<Self, SecretError> {
        if vault_url.is_empty() {
            return Err(SecretError::Configuration {
                message: "vault_url is required".to_string(),
            });
        }

        let credential = Arc::new(
            DefaultAzureCredential::create(TokenCredentialOptions::default()).map_err(|e| {
                SecretError::Configuration {
                    message: format!("failed to create Azure credential: {}", e),
                }
            })?,
        );

        let client =
            SecretClient::new(vault_url, credential).map_err(|e| SecretError::Configuration {
                message: format!("failed to create Key Vault client: {}", e),
            })?;

        Ok(Self { client })
    }

    /// Map an Azure SDK error onto the [`SecretError`] taxonomy.
    ///
    /// The Azure SDK surfaces HTTP failures as opaque error strings, so the
    /// mapping matches on status-code markers in the rendered message.
    fn map_azure_error(name: &SecretName, error: azure_core::Error) -> SecretError {
        let error_string = error.to_string();

        if error_string.contains("404") || error_string.contains("NotFound") {
            SecretError::NotFound { name: name.clone() }
        } else {
            SecretError::Unavailable {
                message: error_string,
            }
        }
    }
}

impl std::fmt::Debug for AzureKeyVaultResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureKeyVaultResolver").finish()
    }
}

#[async_trait]
impl SecretResolver for AzureKeyVaultResolver {
    #[instrument(skip(self), fields(secret_name = %name))]
    async fn resolve(
        &self,
        name: &SecretName,
        timeout: Duration,
    ) -> Result<SecretValue, SecretError> {
        debug!("Fetching secret from Azure Key Vault");

        let fetch = self.client.get(name.as_str());

        let result = tokio::time::timeout(timeout, fetch)
            .await
            .map_err(|_| SecretError::Timeout { timeout })?;

        match result {
            Ok(secret) => {
                debug!("Successfully retrieved secret from Key Vault");
                Ok(SecretValue::from_string(secret.value))
            }
            Err(e) => {
                error!(error = %e, "Failed to retrieve secret from Key Vault");
                Err(Self::map_azure_error(name, e))
            }
        }
    }
}

#[cfg(test)]
#[path = "azure_key_vault_tests.rs"]
mod tests;
