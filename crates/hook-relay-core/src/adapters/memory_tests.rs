//! Tests for the in-memory secret resolver.

use super::*;

fn name(s: &str) -> SecretName {
    SecretName::new(s).unwrap()
}

#[tokio::test]
async fn test_resolves_inserted_secret() {
    let resolver = InMemorySecretResolver::with_secret(name("webhook-secret"), "hunter2");

    let value = resolver
        .resolve(&name("webhook-secret"), Duration::from_secs(1))
        .await
        .unwrap();

    assert_eq!(value.expose_secret(), "hunter2");
}

#[tokio::test]
async fn test_missing_secret_is_not_found() {
    let resolver = InMemorySecretResolver::new();

    let result = resolver
        .resolve(&name("absent"), Duration::from_secs(1))
        .await;

    assert!(matches!(result, Err(SecretError::NotFound { .. })));
}

#[tokio::test]
async fn test_insert_replaces_value() {
    let resolver = InMemorySecretResolver::with_secret(name("webhook-secret"), "old");
    resolver.insert(name("webhook-secret"), "new");

    let value = resolver
        .resolve(&name("webhook-secret"), Duration::from_secs(1))
        .await
        .unwrap();

    assert_eq!(value.expose_secret(), "new");
}

#[tokio::test]
async fn test_remove_makes_secret_unresolvable() {
    let resolver = InMemorySecretResolver::with_secret(name("webhook-secret"), "hunter2");
    resolver.remove(&name("webhook-secret"));

    let result = resolver
        .resolve(&name("webhook-secret"), Duration::from_secs(1))
        .await;

    assert!(matches!(result, Err(SecretError::NotFound { .. })));
}

/// Debug output exposes only the entry count, never values.
#[test]
fn test_debug_hides_values() {
    let resolver = InMemorySecretResolver::with_secret(name("webhook-secret"), "hunter2");
    let debug_str = format!("{:?}", resolver);

    assert!(!debug_str.contains("hunter2"));
    assert!(debug_str.contains("secret_count"));
}
