//! engine::reconcile
//!
//! Remote reconciliation: ensure exactly one remote under the fixed logical
//! name points at the target URL.
//!
//! # Design
//!
//! Reconciliation is idempotent. A remote already pointing at the target URL
//! is returned untouched, whatever its name; a remote squatting on the fixed
//! name with a different URL is removed before the replacement is created.

use crate::git::{Git, GitError, RemoteInfo};
use crate::ui::output::{self, Verbosity};

/// Fixed logical name of the reconciled remote.
pub const REMOTE_NAME: &str = "github";

/// Ensure `git` has a remote at `target_url`, repairing or creating the
/// fixed-name remote as needed.
pub fn reconcile_remote(
    git: &Git,
    target_url: &str,
    verbosity: Verbosity,
) -> Result<RemoteInfo, GitError> {
    if let Some(existing) = git.find_remote_by_url(target_url)? {
        output::debug(
            format!("remote '{}' already points at {}", existing.name, target_url),
            verbosity,
        );
        return Ok(existing);
    }

    if git.remote_exists(REMOTE_NAME) {
        output::warn(
            format!(
                "bad '{}' remote in {}, replacing it",
                REMOTE_NAME,
                git.root_path().display()
            ),
            verbosity,
        );
        git.remove_remote(REMOTE_NAME)?;
    }

    output::print(
        format!("added '{}' remote in {}", REMOTE_NAME, git.root_path().display()),
        verbosity,
    );
    git.add_remote(REMOTE_NAME, target_url)
}
