//! secrets
//!
//! Credential resolution from the OS credential store.
//!
//! # Architecture
//!
//! Secrets are read through the `SecretStore` trait, which has two
//! implementations:
//!
//! - [`KeychainSecretStore`]: the OS credential store (production)
//! - [`MemorySecretStore`]: deterministic in-memory store (tests)
//!
//! Credential resolution is a run-level precondition: it happens exactly
//! once, before any repository is discovered or touched, and its failure
//! aborts the whole run. The resolved token is then shared read-only by the
//! hosted-API client and every push.
//!
//! # Security
//!
//! Secret values are never logged and never appear in error messages.

mod keychain_store;
mod memory_store;
mod traits;

pub use keychain_store::KeychainSecretStore;
pub use memory_store::MemorySecretStore;
pub use traits::{SecretError, SecretStore};

/// Resolve the token stored under the given key.
///
/// An absent entry is an error here, not `None`: without a token neither the
/// hosted API nor the push transport can authenticate, so there is nothing
/// useful a run could do.
pub fn resolve_token(store: &dyn SecretStore, key: &str) -> Result<String, SecretError> {
    match store.get(key)? {
        Some(token) => Ok(token),
        None => Err(SecretError::NotFound(key.to_string())),
    }
}
