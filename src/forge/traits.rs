//! forge::traits
//!
//! Gateway trait for the repository hosting service.
//!
//! # Design
//!
//! The `HostGateway` trait is async because gateway operations involve
//! network I/O. "Repository absent" is an explicit `Ok(None)` from
//! [`HostGateway::get_repo`], not an error: a transient API failure must
//! fail the repository being processed instead of silently triggering a
//! create attempt.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from hosted-API operations.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// Authentication failed (invalid token, expired, insufficient permissions).
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded.
    #[error("rate limited")]
    RateLimited,

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Network or connection error.
    #[error("network error: {0}")]
    NetworkError(String),
}

/// A repository on the hosting service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostedRepo {
    /// Repository name
    pub name: String,
    /// Owner-qualified name, e.g. "acme/widget"
    pub full_name: String,
    /// Whether the repository is private
    pub private: bool,
}

/// The gateway to the repository hosting service.
///
/// Exactly two operations are consumed: fetch a repository by organization
/// and name, and create a private repository under an organization. The
/// production implementation holds one credential set for the lifetime of
/// the run.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow use across async tasks.
#[async_trait]
pub trait HostGateway: Send + Sync {
    /// Get the gateway name (e.g., "github").
    fn name(&self) -> &'static str;

    /// Fetch a repository by organization and name.
    ///
    /// Returns `Ok(Some(repo))` when it exists and `Ok(None)` when the host
    /// reports it absent. Any other failure is an error.
    async fn get_repo(&self, org: &str, name: &str) -> Result<Option<HostedRepo>, GatewayError>;

    /// Create a private repository with the given name under the
    /// organization.
    async fn create_private_repo(&self, org: &str, name: &str)
        -> Result<HostedRepo, GatewayError>;
}
