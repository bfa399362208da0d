//! Environment-sourced relay configuration.
//!
//! All connection settings for the two external collaborators (the key
//! vault holding the webhook secret and the Azure DevOps pipeline) come
//! from required environment variables, read once at startup. A missing
//! variable is a named [`ConfigError::MissingEnvVar`], never a generic
//! failure, so a misconfigured deployment fails fast with a clear message.

use crate::secrets::SecretName;
use crate::trigger::TriggerConfig;
use std::fmt;
use url::Url;

// ============================================================================
// Environment Variables
// ============================================================================

/// Azure DevOps organization URL, e.g. `https://dev.azure.com/my-org`.
pub const ENV_AZDO_ORG_URL: &str = "AZDO_ORG_URL";

/// Azure DevOps project name.
pub const ENV_AZDO_PROJECT_NAME: &str = "AZDO_PROJECT_NAME";

/// Identifier of the pipeline to trigger.
pub const ENV_AZDO_PIPELINE_ID: &str = "AZDO_PIPELINE_ID";

/// Personal access token authorized to queue pipeline runs.
pub const ENV_AZDO_PAT: &str = "AZDO_PAT";

/// Name of the Azure Key Vault holding the webhook secret.
pub const ENV_KEY_VAULT_NAME: &str = "KEY_VAULT_NAME";

/// Name of the Key Vault secret holding the shared webhook secret.
pub const ENV_GITHUB_WEBHOOK_SECRET_NAME: &str = "GITHUB_WEBHOOK_SECRET_NAME";

// ============================================================================
// Relay Configuration
// ============================================================================

/// Connection settings for the relay's external collaborators.
///
/// Populated once at process start via [`RelayConfig::from_env`] and passed
/// by reference into the handler wiring; nothing re-reads the environment
/// afterwards. The access token is redacted in `Debug` output.
#[derive(Clone)]
pub struct RelayConfig {
    /// Azure DevOps organization URL.
    pub organization_url: Url,

    /// Azure DevOps project name.
    pub project: String,

    /// Pipeline identifier to trigger.
    pub pipeline_id: String,

    /// Personal access token for the pipeline trigger call.
    pub access_token: String,

    /// Key Vault endpoint derived from the vault name,
    /// `https://{name}.vault.azure.net`.
    pub vault_url: String,

    /// Name of the secret holding the shared webhook secret.
    pub webhook_secret_name: SecretName,
}

impl RelayConfig {
    /// Load configuration from the environment.
    ///
    /// Expected environment variables (all required):
    /// - `AZDO_ORG_URL`: Azure DevOps organization URL
    /// - `AZDO_PROJECT_NAME`: project name
    /// - `AZDO_PIPELINE_ID`: pipeline identifier
    /// - `AZDO_PAT`: personal access token
    /// - `KEY_VAULT_NAME`: Azure Key Vault name
    /// - `GITHUB_WEBHOOK_SECRET_NAME`: webhook secret name within the vault
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] naming the first absent
    /// variable, or [`ConfigError::Invalid`] when a value fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        let organization_url = require_env(ENV_AZDO_ORG_URL)?;
        let project = require_env(ENV_AZDO_PROJECT_NAME)?;
        let pipeline_id = require_env(ENV_AZDO_PIPELINE_ID)?;
        let access_token = require_env(ENV_AZDO_PAT)?;
        let vault_name = require_env(ENV_KEY_VAULT_NAME)?;
        let secret_name = require_env(ENV_GITHUB_WEBHOOK_SECRET_NAME)?;

        Self::from_values(
            &organization_url,
            project,
            pipeline_id,
            access_token,
            &vault_name,
            &secret_name,
        )
    }

    /// Build and validate configuration from explicit values.
    ///
    /// Split out of [`RelayConfig::from_env`] so validation can be tested
    /// without mutating process environment.
    pub fn from_values(
        organization_url: &str,
        project: String,
        pipeline_id: String,
        access_token: String,
        vault_name: &str,
        secret_name: &str,
    ) -> Result<Self, ConfigError> {
        let organization_url =
            Url::parse(organization_url).map_err(|e| ConfigError::Invalid {
                variable: ENV_AZDO_ORG_URL.to_string(),
                reason: format!("not a valid URL: {}", e),
            })?;

        if organization_url.scheme() != "https" {
            return Err(ConfigError::Invalid {
                variable: ENV_AZDO_ORG_URL.to_string(),
                reason: "organization URL must use HTTPS".to_string(),
            });
        }

        if project.is_empty() {
            return Err(ConfigError::Invalid {
                variable: ENV_AZDO_PROJECT_NAME.to_string(),
                reason: "project name cannot be empty".to_string(),
            });
        }

        if pipeline_id.is_empty() {
            return Err(ConfigError::Invalid {
                variable: ENV_AZDO_PIPELINE_ID.to_string(),
                reason: "pipeline identifier cannot be empty".to_string(),
            });
        }

        if access_token.is_empty() {
            return Err(ConfigError::Invalid {
                variable: ENV_AZDO_PAT.to_string(),
                reason: "access token cannot be empty".to_string(),
            });
        }

        // Azure Key Vault names: 3-24 characters, alphanumeric and hyphens.
        if vault_name.len() < 3
            || vault_name.len() > 24
            || !vault_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(ConfigError::Invalid {
                variable: ENV_KEY_VAULT_NAME.to_string(),
                reason: "vault name must be 3-24 alphanumeric or hyphen characters"
                    .to_string(),
            });
        }

        let webhook_secret_name =
            SecretName::new(secret_name).map_err(|e| ConfigError::Invalid {
                variable: ENV_GITHUB_WEBHOOK_SECRET_NAME.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            organization_url,
            project,
            pipeline_id,
            access_token,
            vault_url: format!("https://{}.vault.azure.net", vault_name),
            webhook_secret_name,
        })
    }

    /// Trigger settings for the configured pipeline.
    pub fn trigger_config(&self) -> TriggerConfig {
        TriggerConfig {
            organization_url: self.organization_url.clone(),
            project: self.project.clone(),
            pipeline_id: self.pipeline_id.clone(),
            access_token: self.access_token.clone(),
        }
    }
}

impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("organization_url", &self.organization_url.as_str())
            .field("project", &self.project)
            .field("pipeline_id", &self.pipeline_id)
            .field("access_token", &"<REDACTED>")
            .field("vault_url", &self.vault_url)
            .field("webhook_secret_name", &self.webhook_secret_name)
            .finish()
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Errors raised while loading relay configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {variable}")]
    MissingEnvVar { variable: String },

    #[error("invalid value for {variable}: {reason}")]
    Invalid { variable: String, reason: String },
}

// ============================================================================
// Private helpers
// ============================================================================

/// Read a required environment variable.
///
/// An unset variable and an empty value are both treated as missing.
fn require_env(variable: &str) -> Result<String, ConfigError> {
    match std::env::var(variable) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingEnvVar {
            variable: variable.to_string(),
        }),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
