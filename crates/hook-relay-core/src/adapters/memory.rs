//! # In-Memory Secret Resolver
//!
//! Thread-safe in-memory implementation for testing and development.
//! Not suitable for production: secrets live in ordinary process memory and
//! are supplied at construction time instead of coming from a vault.

use crate::secrets::{SecretError, SecretName, SecretResolver, SecretValue};
use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
    time::Duration,
};

/// [`SecretResolver`] backed by an in-process map.
///
/// Uses `RwLock` for concurrent access; the resolve path only takes the
/// read lock.
#[derive(Clone, Default)]
pub struct InMemorySecretResolver {
    secrets: Arc<RwLock<HashMap<SecretName, String>>>,
}

impl InMemorySecretResolver {
    /// Create a new empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver pre-populated with one secret.
    pub fn with_secret(name: SecretName, value: impl Into<String>) -> Self {
        let resolver = Self::new();
        resolver.insert(name, value);
        resolver
    }

    /// Insert or replace a secret.
    pub fn insert(&self, name: SecretName, value: impl Into<String>) {
        self.secrets
            .write()
            .expect("secret map lock poisoned")
            .insert(name, value.into());
    }

    /// Remove a secret, if present.
    pub fn remove(&self, name: &SecretName) {
        self.secrets
            .write()
            .expect("secret map lock poisoned")
            .remove(name);
    }
}

impl std::fmt::Debug for InMemorySecretResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.secrets.read().map(|s| s.len()).unwrap_or(0);
        f.debug_struct("InMemorySecretResolver")
            .field("secret_count", &count)
            .finish()
    }
}

#[async_trait]
impl SecretResolver for InMemorySecretResolver {
    async fn resolve(
        &self,
        name: &SecretName,
        _timeout: Duration,
    ) -> Result<SecretValue, SecretError> {
        let secrets = self.secrets.read().map_err(|_| SecretError::Unavailable {
            message: "secret map lock poisoned".to_string(),
        })?;

        secrets
            .get(name)
            .map(|value| SecretValue::from_string(value.clone()))
            .ok_or_else(|| SecretError::NotFound { name: name.clone() })
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
