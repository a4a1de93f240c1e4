//! forge
//!
//! Gateway to the repository hosting service.
//!
//! # Architecture
//!
//! The [`HostGateway`] trait defines the two hosted-API operations the sync
//! engine consumes: fetch a repository by organization and name, and create
//! a private repository. [`github::GitHubGateway`] is the production
//! implementation; [`mock::MockGateway`] backs the engine's fault-isolation
//! tests without network access.
//!
//! Gateway calls happen before any local repository state is mutated, and a
//! gateway failure never compromises local correctness - it fails the
//! repository being processed and the run moves on.

pub mod github;
pub mod mock;
mod traits;

pub use traits::{GatewayError, HostGateway, HostedRepo};

/// Result of [`ensure_repo`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnsureOutcome {
    /// The hosted repository, fetched or newly created
    pub repo: HostedRepo,
    /// Whether this call created it
    pub created: bool,
}

/// Ensure a hosted repository exists, creating it (private) if absent.
///
/// Only an explicit "absent" from the host triggers creation; a transient
/// API error propagates instead, so a flaky fetch never causes a duplicate
/// create attempt.
pub async fn ensure_repo(
    gateway: &dyn HostGateway,
    org: &str,
    name: &str,
) -> Result<EnsureOutcome, GatewayError> {
    if let Some(repo) = gateway.get_repo(org, name).await? {
        return Ok(EnsureOutcome {
            repo,
            created: false,
        });
    }
    let repo = gateway.create_private_repo(org, name).await?;
    Ok(EnsureOutcome {
        repo,
        created: true,
    })
}
