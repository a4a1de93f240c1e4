//! engine::tracking
//!
//! Tracking-reference synchronization: give every local branch a
//! remote-tracking reference at its current tip, plus upstream metadata
//! pointing back at it.
//!
//! # Design
//!
//! Tracking refs are always deleted and recreated, never compared or
//! patched. They are cheap metadata, and recreation guarantees the ref
//! matches the branch tip no matter what state a previous interrupted run
//! left behind. Push selects branches by their tracking reference, so this
//! must complete for all branches before any push is attempted.

use crate::git::{Git, GitError};

/// Reflog message recorded when a tracking ref is written.
const REFLOG_MESSAGE: &str = "orgsync: sync tracking ref";

/// Rebuild the remote-tracking reference and upstream metadata for every
/// local branch. Returns the number of branches synchronized.
pub fn sync_tracking_refs(git: &Git, remote_name: &str) -> Result<usize, GitError> {
    let branches = git.local_branches()?;
    for branch in &branches {
        let tracking_ref = format!("refs/remotes/{}/{}", remote_name, branch.name);

        if git.ref_exists(&tracking_ref) {
            git.delete_ref(&tracking_ref)?;
        }
        git.create_ref(&tracking_ref, branch.tip, REFLOG_MESSAGE)?;
        git.set_branch_upstream(&branch.name, &format!("{}/{}", remote_name, branch.name))?;
    }
    Ok(branches.len())
}
