//! # Infrastructure Adapters
//!
//! Concrete [`SecretResolver`](crate::secrets::SecretResolver)
//! implementations injected at startup.

pub mod memory;

#[cfg(feature = "azure")]
pub mod azure_key_vault;

pub use memory::InMemorySecretResolver;

#[cfg(feature = "azure")]
pub use azure_key_vault::AzureKeyVaultResolver;
