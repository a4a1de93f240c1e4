//! secrets::keychain_store
//!
//! Keychain-based secret storage using the OS credential store.
//!
//! # Platform Support
//!
//! This module uses the `keyring` crate which supports:
//! - macOS: Keychain
//! - Windows: Credential Manager
//! - Linux: Secret Service (via D-Bus)
//!
//! The token that authorizes pushes must be stored here before running the
//! tool, under the service name `orgsync` and the key passed via `--cred`
//! (default `https://github.com`).

use keyring::Entry;

use super::traits::{SecretError, SecretStore};

/// Service name for keychain entries.
const SERVICE: &str = "orgsync";

/// Keychain-based secret storage.
///
/// Uses the OS credential store (macOS Keychain, Windows Credential Manager,
/// Linux Secret Service) via the `keyring` crate.
#[derive(Debug)]
pub struct KeychainSecretStore {
    /// Service name for keychain entries
    service: String,
}

impl KeychainSecretStore {
    /// Create a new keychain secret store with the default service name.
    pub fn new() -> Self {
        Self {
            service: SERVICE.to_string(),
        }
    }

    /// Create a new keychain secret store with a custom service name.
    ///
    /// This is primarily useful for testing to avoid conflicts.
    pub fn with_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    /// Get the service name.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Create a keyring entry for the given key.
    fn entry(&self, key: &str) -> Result<Entry, SecretError> {
        Entry::new(&self.service, key)
            .map_err(|e| SecretError::ReadError(format!("cannot create keyring entry: {}", e)))
    }
}

impl Default for KeychainSecretStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretStore for KeychainSecretStore {
    fn get(&self, key: &str) -> Result<Option<String>, SecretError> {
        let entry = self.entry(key)?;

        match entry.get_password() {
            Ok(password) => Ok(Some(password)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(keyring::Error::Ambiguous(_)) => {
                // Multiple entries found - this shouldn't happen with our usage
                Err(SecretError::ReadError(
                    "ambiguous keychain entry".to_string(),
                ))
            }
            Err(e) => Err(SecretError::ReadError(format!(
                "cannot read from keychain: {}",
                e
            ))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SecretError> {
        let entry = self.entry(key)?;

        entry
            .set_password(value)
            .map_err(|e| SecretError::WriteError(format!("cannot write to keychain: {}", e)))
    }

    fn delete(&self, key: &str) -> Result<(), SecretError> {
        let entry = self.entry(key)?;

        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()), // Already gone, that's fine
            Err(e) => Err(SecretError::DeleteError(format!(
                "cannot delete from keychain: {}",
                e
            ))),
        }
    }
}
