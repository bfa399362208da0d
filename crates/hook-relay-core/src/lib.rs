//! # Hook-Relay Core
//!
//! Domain logic for the hook-relay webhook-to-pipeline service.
//!
//! This crate contains everything the relay does that is not HTTP-server
//! plumbing: webhook signature verification, secret resolution, pipeline
//! trigger dispatch, and environment-sourced configuration.
//!
//! ## Architecture
//!
//! External collaborators sit behind trait abstractions:
//! - [`secrets::SecretResolver`] hides the key vault so the verification
//!   path can be tested without network access.
//! - [`trigger::PipelineTrigger`] hides the Azure DevOps REST surface so
//!   dispatch behavior can be observed in tests.
//!
//! Concrete infrastructure implementations live in [`adapters`] and are
//! injected at startup by the service binary.

pub mod adapters;
pub mod config;
pub mod secrets;
pub mod signature;
pub mod trigger;

pub use config::{ConfigError, RelayConfig};
pub use secrets::{SecretError, SecretName, SecretResolver, SecretValue};
pub use signature::{compute_signature, verify_signature};
pub use trigger::{PipelineTrigger, PipelineTriggerClient, TriggerConfig, TriggerError, TriggerRun};
