//! secrets::memory_store
//!
//! In-memory secret storage for deterministic testing.
//!
//! # Design
//!
//! Mirrors the keychain store's observable behavior (`Ok(None)` for absent
//! keys, idempotent delete) without touching any platform credential store.
//! A failure mode can be injected to exercise the "store unavailable"
//! precondition path.

use std::collections::HashMap;
use std::sync::Mutex;

use super::traits::{SecretError, SecretStore};

/// In-memory secret store for tests.
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    /// Stored secrets by key
    secrets: Mutex<HashMap<String, String>>,
    /// When true, every operation fails as if the store were unavailable
    unavailable: bool,
}

impl MemorySecretStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with one secret.
    pub fn with_secret(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        store
            .secrets
            .lock()
            .expect("secret store lock poisoned")
            .insert(key.into(), value.into());
        store
    }

    /// Create a store where every operation fails.
    pub fn unavailable() -> Self {
        Self {
            secrets: Mutex::new(HashMap::new()),
            unavailable: true,
        }
    }

    fn check_available(&self) -> Result<(), SecretError> {
        if self.unavailable {
            Err(SecretError::ReadError("secret store unavailable".into()))
        } else {
            Ok(())
        }
    }
}

impl SecretStore for MemorySecretStore {
    fn get(&self, key: &str) -> Result<Option<String>, SecretError> {
        self.check_available()?;
        Ok(self
            .secrets
            .lock()
            .expect("secret store lock poisoned")
            .get(key)
            .cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SecretError> {
        self.check_available()?;
        self.secrets
            .lock()
            .expect("secret store lock poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), SecretError> {
        self.check_available()?;
        self.secrets
            .lock()
            .expect("secret store lock poisoned")
            .remove(key);
        Ok(())
    }
}
