//! engine::push
//!
//! Push orchestration: force-push every tracked branch, then push every tag.
//!
//! # Design
//!
//! Branches push one refspec per push call so a failure is attributed to a
//! specific branch in the log. The refspec is built from the tracking
//! reference, rewritten into the local heads namespace on both sides and
//! prefixed with `+` for force semantics: the remote is a mirror, and local
//! history wins.
//!
//! Tags push by their fully qualified name, unforced; a tag whose remote
//! counterpart already matches is a no-op, and a diverged tag is the host's
//! concern to reject.

use crate::git::{Git, GitError, PushCredentials};
use crate::ui::output::{self, Verbosity};

/// Rewrite a tracking reference into a force refspec over the local heads
/// namespace: `refs/remotes/<remote>/feature/x` becomes
/// `+refs/heads/feature/x:refs/heads/feature/x`.
fn force_refspec(tracking_ref: &str, remote_name: &str) -> String {
    let prefix = format!("refs/remotes/{}/", remote_name);
    let head_ref = tracking_ref.replacen(&prefix, "refs/heads/", 1);
    format!("+{0}:{0}", head_ref)
}

/// Force-push every tracking reference under the remote's namespace.
/// Returns the number of branches pushed.
pub fn push_branches(
    git: &Git,
    remote_name: &str,
    credentials: &PushCredentials,
    verbosity: Verbosity,
) -> Result<usize, GitError> {
    let tracking_refs = git.remote_tracking_refs(remote_name)?;
    let mut pushed = 0;
    for tracking_ref in tracking_refs {
        let refspec = force_refspec(&tracking_ref, remote_name);
        output::print(
            format!("{} pushing {}", output::timestamp(), tracking_ref),
            verbosity,
        );
        git.push(remote_name, &[refspec], credentials)?;
        output::print(
            format!("{} pushed {}", output::timestamp(), tracking_ref),
            verbosity,
        );
        pushed += 1;
    }
    Ok(pushed)
}

/// Push every tag by its fully qualified reference name.
/// Returns the number of tags pushed.
pub fn push_tags(
    git: &Git,
    remote_name: &str,
    credentials: &PushCredentials,
    verbosity: Verbosity,
) -> Result<usize, GitError> {
    let tags = git.tag_names()?;
    let mut pushed = 0;
    for tag in tags {
        let refspec = format!("refs/tags/{0}:refs/tags/{0}", tag);
        output::debug(format!("pushing tag {}", tag), verbosity);
        git.push(remote_name, &[refspec], credentials)?;
        pushed += 1;
    }
    Ok(pushed)
}
