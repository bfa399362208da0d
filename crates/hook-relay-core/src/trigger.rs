//! Azure DevOps pipeline trigger dispatch.
//!
//! After a webhook is verified, the relay requests one run of a configured
//! pipeline through the Azure DevOps REST API. The call runs detached from
//! the request-handling path: its outcome is observed only through logs,
//! never through the webhook response, and it is never retried.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::{fmt, time::Duration};
use tracing::{debug, instrument};
use url::Url;

/// Azure DevOps REST API version used for the run-pipeline call.
const API_VERSION: &str = "7.0";

/// Request timeout for the trigger call.
///
/// Failures are non-fatal, so this only bounds how long a detached task
/// can linger after the webhook response has already been sent.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// How much of an error response body is carried into the trigger outcome.
const BODY_EXCERPT_LIMIT: usize = 512;

// ============================================================================
// Configuration
// ============================================================================

/// Connection settings for one Azure DevOps pipeline.
///
/// Loaded once at startup and treated as immutable afterwards. The access
/// token is an opaque credential: it is redacted in `Debug` output and never
/// logged.
#[derive(Clone)]
pub struct TriggerConfig {
    /// Organization URL, e.g. `https://dev.azure.com/my-org`.
    pub organization_url: Url,

    /// Project name within the organization.
    pub project: String,

    /// Pipeline identifier (numeric for classic definitions, but treated as
    /// an opaque string).
    pub pipeline_id: String,

    /// Personal access token used as the basic-auth password.
    pub access_token: String,
}

impl fmt::Debug for TriggerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriggerConfig")
            .field("organization_url", &self.organization_url.as_str())
            .field("project", &self.project)
            .field("pipeline_id", &self.pipeline_id)
            .field("access_token", &"<REDACTED>")
            .finish()
    }
}

// ============================================================================
// Outcome Types
// ============================================================================

/// Outcome of one trigger attempt that reached Azure DevOps.
///
/// Exists only for the duration of the detached dispatch task; it is
/// consumed by logging and then discarded.
#[derive(Debug, Clone)]
pub struct TriggerRun {
    /// Whether Azure DevOps accepted the run request (HTTP 200 or 201).
    pub success: bool,

    /// HTTP status code returned by Azure DevOps.
    pub status: u16,

    /// Human-readable outcome; an excerpt of the response body on failure.
    pub message: String,
}

/// Errors that prevent a trigger attempt from producing a [`TriggerRun`].
#[derive(Debug, thiserror::Error)]
pub enum TriggerError {
    #[error("failed to reach Azure DevOps: {message}")]
    Network { message: String },

    #[error("invalid trigger configuration: {message}")]
    Configuration { message: String },
}

// ============================================================================
// Trigger Trait
// ============================================================================

/// Interface for requesting one downstream pipeline run.
///
/// The webhook handler schedules this as a detached task after successful
/// verification; implementations must not assume anyone awaits the result.
/// Failures are terminal; no implementation retries.
#[async_trait]
pub trait PipelineTrigger: Send + Sync {
    /// Request one pipeline run.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError::Network`] when Azure DevOps cannot be
    /// reached (connect failure, TLS failure, timeout). A reachable server
    /// returning a non-2xx status is NOT an error: it yields a
    /// [`TriggerRun`] with `success == false` so the caller can log the
    /// status and body excerpt.
    async fn trigger_run(&self) -> Result<TriggerRun, TriggerError>;
}

// ============================================================================
// Azure DevOps Client
// ============================================================================

/// [`PipelineTrigger`] implementation over the Azure DevOps REST API.
///
/// Issues `POST {org}/{project}/_apis/pipelines/{id}/runs?api-version=7.0`
/// with basic authentication (empty username, the access token as password)
/// and an empty JSON object body.
pub struct PipelineTriggerClient {
    http: reqwest::Client,
    config: TriggerConfig,
    runs_url: String,
}

impl PipelineTriggerClient {
    /// Create a new trigger client for the configured pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError::Configuration`] when the underlying HTTP
    /// client cannot be constructed.
    pub fn new(config: TriggerConfig) -> Result<Self, TriggerError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TriggerError::Configuration {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        let runs_url = format!(
            "{}/{}/_apis/pipelines/{}/runs?api-version={}",
            config.organization_url.as_str().trim_end_matches('/'),
            config.project,
            config.pipeline_id,
            API_VERSION
        );

        Ok(Self {
            http,
            config,
            runs_url,
        })
    }

    /// The fully-formed run-pipeline endpoint URL.
    pub fn runs_url(&self) -> &str {
        &self.runs_url
    }
}

impl fmt::Debug for PipelineTriggerClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineTriggerClient")
            .field("config", &self.config)
            .finish()
    }
}

#[async_trait]
impl PipelineTrigger for PipelineTriggerClient {
    #[instrument(skip(self), fields(pipeline_id = %self.config.pipeline_id))]
    async fn trigger_run(&self) -> Result<TriggerRun, TriggerError> {
        debug!("Requesting pipeline run");

        let response = self
            .http
            .post(&self.runs_url)
            .basic_auth("", Some(&self.config.access_token))
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(|e| TriggerError::Network {
                message: e.to_string(),
            })?;

        let status = response.status();

        if status == StatusCode::OK || status == StatusCode::CREATED {
            return Ok(TriggerRun {
                success: true,
                status: status.as_u16(),
                message: "pipeline run queued".to_string(),
            });
        }

        // Non-2xx: carry a bounded excerpt of the body for the log record.
        let body = response.text().await.unwrap_or_default();
        let excerpt: String = body.chars().take(BODY_EXCERPT_LIMIT).collect();

        Ok(TriggerRun {
            success: false,
            status: status.as_u16(),
            message: excerpt,
        })
    }
}

#[cfg(test)]
#[path = "trigger_tests.rs"]
mod tests;
