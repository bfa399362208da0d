//! # Hook-Relay Service
//!
//! Binary entry point for the hook-relay HTTP service.
//!
//! This executable:
//! - Initializes structured logging
//! - Loads relay configuration from environment variables (fail-fast)
//! - Wires the Azure Key Vault secret resolver and the Azure DevOps
//!   pipeline trigger client
//! - Starts the HTTP server from hook-relay-api

use hook_relay_api::{start_server, AppState, ServiceConfig, ServiceError};
use hook_relay_core::adapters::AzureKeyVaultResolver;
use hook_relay_core::{PipelineTriggerClient, RelayConfig};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "hook_relay_service=info,hook_relay_api=info,hook_relay_core=info,tower_http=info"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Hook-Relay Service");

    // -------------------------------------------------------------------------
    // Load server settings
    //
    // Every field carries a serde default, so an unconfigured environment
    // produces a valid service config. Overrides come from environment
    // variables prefixed HR with a double-underscore separator for nesting,
    // e.g. HR_SERVER__PORT=9090 sets server.port. A variable that cannot be
    // coerced to the correct type IS a hard error because it indicates
    // deliberate-but-broken operator configuration.
    // -------------------------------------------------------------------------
    let service_config: ServiceConfig = match config::Config::builder()
        .add_source(config::Environment::with_prefix("HR").separator("__"))
        .build()
        .and_then(|cfg| cfg.try_deserialize())
    {
        Ok(sc) => sc,
        Err(e) => {
            error!(
                error = %e,
                "Could not load service configuration; aborting. \
                 Fix the configuration and restart."
            );
            std::process::exit(3);
        }
    };

    // -------------------------------------------------------------------------
    // Load relay configuration
    //
    // The six AZDO_* / KEY_VAULT_* / GITHUB_* variables are all required;
    // a missing one aborts startup with the variable named in the error
    // instead of surfacing as a 5xx on the first webhook.
    // -------------------------------------------------------------------------
    let relay_config = match RelayConfig::from_env() {
        Ok(rc) => rc,
        Err(e) => {
            error!(error = %e, "Relay configuration is invalid; aborting");
            std::process::exit(3);
        }
    };

    // -------------------------------------------------------------------------
    // Wire external collaborators
    //
    // The secret resolver talks to Azure Key Vault with managed identity;
    // the trigger client talks to Azure DevOps with the configured PAT.
    // Both are stateless and shared across requests behind Arc.
    // -------------------------------------------------------------------------
    let secret_resolver = match AzureKeyVaultResolver::new(&relay_config.vault_url) {
        Ok(resolver) => Arc::new(resolver),
        Err(e) => {
            error!(error = %e, "Failed to initialize Key Vault resolver; aborting");
            std::process::exit(4);
        }
    };

    let trigger = match PipelineTriggerClient::new(relay_config.trigger_config()) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!(error = %e, "Failed to initialize pipeline trigger client; aborting");
            std::process::exit(3);
        }
    };

    info!(
        host = %service_config.server.host,
        port = service_config.server.port,
        pipeline_id = %relay_config.pipeline_id,
        "Starting HTTP server"
    );

    let state = AppState::new(
        service_config,
        relay_config.webhook_secret_name.clone(),
        secret_resolver,
        trigger,
    );

    // Start the server
    if let Err(e) = start_server(state).await {
        error!("Failed to start server: {}", e);

        let exit_code = match e {
            ServiceError::BindFailed { .. } => 1,
            ServiceError::ServerFailed { .. } => 2,
        };

        std::process::exit(exit_code);
    }

    Ok(())
}
