//! # Hook-Relay HTTP Service
//!
//! HTTP surface for the webhook relay: one webhook intake endpoint plus a
//! liveness endpoint.
//!
//! The webhook handler implements the immediate-response pattern:
//! 1. Resolve the shared secret (bounded by a configured timeout)
//! 2. Verify the `X-Hub-Signature-256` HMAC over the raw body
//! 3. Spawn the pipeline trigger as a detached task
//! 4. Return the HTTP response without waiting on the trigger
//!
//! The caller's perceived latency therefore never includes the pipeline
//! round-trip, and a trigger failure can never alter the response.

pub mod errors;
pub mod responses;



use axum::{
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use bytes::Bytes;
use hook_relay_core::{
    secrets::{SecretName, SecretResolver},
    signature::verify_signature,
    trigger::PipelineTrigger,
};
use serde::{Deserialize, Serialize};
use std::{sync::Arc, time::Duration};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{error, info, instrument};
use uuid::Uuid;

pub use errors::{ServiceError, WebhookHandlerError};
pub use responses::HealthResponse;

/// Response body sent to the webhook caller on acceptance.
pub const ACCEPTED_BODY: &str = "Webhook processed!";

/// Signature header carried by GitHub webhook deliveries.
pub const SIGNATURE_HEADER: &str = "x-hub-signature-256";

// ============================================================================
// Application State
// ============================================================================

/// Shared application state.
///
/// Holds only immutable configuration and stateless collaborators behind
/// `Arc`, so concurrent requests share nothing mutable and cannot
/// cross-talk.
#[derive(Clone)]
pub struct AppState {
    /// Configuration for the service.
    pub config: ServiceConfig,

    /// Name of the vault secret holding the shared webhook secret.
    pub webhook_secret_name: SecretName,

    /// Resolver for the shared webhook secret.
    pub secret_resolver: Arc<dyn SecretResolver>,

    /// Dispatcher for downstream pipeline runs.
    pub trigger: Arc<dyn PipelineTrigger>,
}

impl AppState {
    /// Create new application state.
    pub fn new(
        config: ServiceConfig,
        webhook_secret_name: SecretName,
        secret_resolver: Arc<dyn SecretResolver>,
        trigger: Arc<dyn PipelineTrigger>,
    ) -> Self {
        Self {
            config,
            webhook_secret_name,
            secret_resolver,
            trigger,
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Service configuration.
///
/// Every field carries a serde default, so an entirely unconfigured
/// environment yields a valid service with built-in settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Webhook processing settings.
    #[serde(default)]
    pub webhooks: WebhookConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Graceful shutdown timeout in seconds.
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_seconds: u64,

    /// Maximum request body size in bytes.
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            shutdown_timeout_seconds: default_shutdown_timeout(),
            max_body_size: default_max_body_size(),
        }
    }
}

/// Webhook processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Webhook endpoint path.
    #[serde(default = "default_endpoint_path")]
    pub endpoint_path: String,

    /// Upper bound on secret resolution, in seconds. Resolution sits on the
    /// request's critical path; on expiry the request is rejected rather
    /// than left hanging.
    #[serde(default = "default_secret_timeout")]
    pub secret_timeout_seconds: u64,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            endpoint_path: default_endpoint_path(),
            secret_timeout_seconds: default_secret_timeout(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_shutdown_timeout() -> u64 {
    30
}

fn default_max_body_size() -> usize {
    10 * 1024 * 1024 // 10MB
}

fn default_endpoint_path() -> String {
    "/webhook".to_string()
}

fn default_secret_timeout() -> u64 {
    10
}

// ============================================================================
// HTTP Server
// ============================================================================

/// Create the HTTP router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    let webhook_routes = Router::new().route(
        &state.config.webhooks.endpoint_path,
        post(handle_webhook),
    );

    let health_routes = Router::new().route("/health", get(handle_health_check));

    Router::new()
        .merge(webhook_routes)
        .merge(health_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .into_inner(),
        )
        .layer(DefaultBodyLimit::max(state.config.server.max_body_size))
        .with_state(state)
}

/// Start the HTTP server.
///
/// Binds to the configured host and port and serves until SIGINT or
/// SIGTERM, then shuts down gracefully: new connections stop immediately,
/// in-flight requests drain. Detached trigger tasks remain best-effort:
/// a task still running when the process exits is lost.
pub async fn start_server(state: AppState) -> Result<(), ServiceError> {
    let address = format!("{}:{}", state.config.server.host, state.config.server.port);
    let shutdown_timeout = Duration::from_secs(state.config.server.shutdown_timeout_seconds);

    let app = create_router(state);

    let listener =
        tokio::net::TcpListener::bind(&address)
            .await
            .map_err(|e| ServiceError::BindFailed {
                address: address.clone(),
                message: e.to_string(),
            })?;

    info!("Starting HTTP server on {}", address);

    let shutdown_signal = async move {
        let ctrl_c = async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to install Ctrl+C signal handler");
        };

        #[cfg(unix)]
        let terminate = async {
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("Failed to install SIGTERM signal handler")
                .recv()
                .await;
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {
                info!(
                    "Received SIGINT (Ctrl+C), initiating graceful shutdown with {}s timeout",
                    shutdown_timeout.as_secs()
                );
            },
            _ = terminate => {
                info!(
                    "Received SIGTERM, initiating graceful shutdown with {}s timeout",
                    shutdown_timeout.as_secs()
                );
            },
        }
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| ServiceError::ServerFailed {
            message: e.to_string(),
        })?;

    info!("HTTP server shutdown complete");
    Ok(())
}

// ============================================================================
// Webhook Handler
// ============================================================================

/// Handle an inbound webhook delivery.
///
/// Three terminal outcomes, no retries at this layer:
/// 1. Secret resolution fails → 5xx, the trigger is never dispatched.
/// 2. Signature verification fails (including an absent or empty header)
///    → `403 "Bad signature"`, the trigger is never dispatched.
/// 3. Verification succeeds → the trigger is spawned as a detached task and
///    the response is `200 "Webhook processed!"` immediately.
///
/// The body is never parsed; only its raw bytes feed the HMAC.
#[instrument(skip(state, headers, body), fields(body_len = body.len()))]
pub async fn handle_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, &'static str), WebhookHandlerError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok());

    // Secret resolution sits on the critical path and is bounded: a slow
    // vault rejects the request instead of hanging it, and a resolution
    // failure is never treated as verified.
    let timeout = Duration::from_secs(state.config.webhooks.secret_timeout_seconds);
    let secret = state
        .secret_resolver
        .resolve(&state.webhook_secret_name, timeout)
        .await
        .map_err(WebhookHandlerError::SecretResolution)?;

    if !verify_signature(secret.expose_bytes(), &body, signature) {
        return Err(WebhookHandlerError::BadSignature);
    }

    // Fire-and-forget: the response must not wait on the pipeline trigger,
    // and trigger failures are terminal at this logging boundary. If the
    // process exits right after the response, the run is lost; nothing
    // guards against that.
    let dispatch_id = Uuid::new_v4();
    let trigger = Arc::clone(&state.trigger);
    tokio::spawn(async move {
        match trigger.trigger_run().await {
            Ok(run) if run.success => {
                info!(
                    dispatch_id = %dispatch_id,
                    status = run.status,
                    "Pipeline run triggered"
                );
            }
            Ok(run) => {
                error!(
                    dispatch_id = %dispatch_id,
                    status = run.status,
                    message = %run.message,
                    "Pipeline trigger rejected by Azure DevOps"
                );
            }
            Err(e) => {
                error!(
                    dispatch_id = %dispatch_id,
                    error = %e,
                    "Pipeline trigger failed"
                );
            }
        }
    });

    info!(dispatch_id = %dispatch_id, "Webhook verified; pipeline trigger scheduled");

    Ok((StatusCode::OK, ACCEPTED_BODY))
}

// ============================================================================
// Health Check Handler
// ============================================================================

/// Liveness endpoint.
///
/// Reports only that the process is serving requests; it deliberately does
/// not call out to the key vault or Azure DevOps.
#[instrument]
async fn handle_health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
