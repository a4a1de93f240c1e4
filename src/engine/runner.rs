//! engine::runner
//!
//! Drives one sync run: walk the tree, process each repository through the
//! fixed stage order, and aggregate the results.
//!
//! # Fault isolation
//!
//! Each repository is a fault boundary. A failure in any stage is logged
//! with the repository path and recorded in that repository's report, and
//! the run continues with the next repository. Within one repository the
//! branch-push and tag-push results are recorded independently of each
//! other. Only two things abort a run outright: credential resolution
//! (which happens before the engine is built) and a missing scan root.

use std::path::Path;

use crate::core::outcome::{PushOutcome, RepoOutcome, RepoReport, RunOutcome, Stage};
use crate::core::settings::SyncSettings;
use crate::engine::discover::{discover, DiscoverError};
use crate::engine::{push, reconcile, tracking};
use crate::forge::{self, HostGateway};
use crate::git::{Git, PushCredentials};
use crate::ui::output::{self, Verbosity};

/// The sync engine for one run.
///
/// Holds the immutable settings, the hosted-repository gateway, and the
/// credentials resolved at startup. Repositories are processed sequentially
/// in discovery order; the ordering dependency within one repository
/// (remote, then tracking refs, then pushes) leaves nothing to parallelize
/// there.
pub struct SyncEngine {
    /// Run configuration
    settings: SyncSettings,
    /// Hosted-repository gateway, holding the run's API credentials
    gateway: Box<dyn HostGateway>,
    /// Push transport credentials
    credentials: PushCredentials,
    /// Output level
    verbosity: Verbosity,
}

impl SyncEngine {
    /// Create an engine from resolved run state.
    pub fn new(
        settings: SyncSettings,
        gateway: Box<dyn HostGateway>,
        credentials: PushCredentials,
        verbosity: Verbosity,
    ) -> Self {
        Self {
            settings,
            gateway,
            credentials,
            verbosity,
        }
    }

    /// Walk the scan root and mirror every discovered repository.
    ///
    /// Fails only when the scan root itself cannot be walked; everything
    /// else is recorded in the returned outcome.
    pub async fn run(&self) -> Result<RunOutcome, DiscoverError> {
        let walker = discover(self.settings.root())?;
        let mut outcome = RunOutcome::default();
        for item in walker {
            match item {
                Ok(path) => outcome.reports.push(self.process_repository(&path).await),
                Err(err) => {
                    output::error(&err);
                    outcome.scan_failures.push(err.to_string());
                }
            }
        }
        Ok(outcome)
    }

    /// Process one repository through ensure-hosted, reconcile, tracking
    /// sync, branch push, and tag push.
    async fn process_repository(&self, path: &Path) -> RepoReport {
        output::print(format!("starting {}", path.display()), self.verbosity);

        let git = match Git::open(path) {
            Ok(git) => git,
            Err(err) => return self.fail(path, None, Stage::Open, err.to_string()),
        };
        let name = match git.name() {
            Ok(name) => name,
            Err(err) => return self.fail(path, None, Stage::Open, err.to_string()),
        };

        let url = self.settings.remote_url(&name);
        output::print(format!("remote URL {}", url), self.verbosity);

        match forge::ensure_repo(self.gateway.as_ref(), self.settings.organization(), &name).await
        {
            Ok(ensured) if ensured.created => output::print(
                format!("created hosted repository {}", ensured.repo.full_name),
                self.verbosity,
            ),
            Ok(_) => {}
            Err(err) => return self.fail(path, Some(name), Stage::EnsureHosted, err.to_string()),
        }

        let remote = match reconcile::reconcile_remote(&git, &url, self.verbosity) {
            Ok(remote) => remote,
            Err(err) => {
                return self.fail(path, Some(name), Stage::ReconcileRemote, err.to_string())
            }
        };

        match tracking::sync_tracking_refs(&git, &remote.name) {
            Ok(synced) => output::debug(
                format!("synchronized {} tracking refs", synced),
                self.verbosity,
            ),
            Err(err) => {
                return self.fail(path, Some(name), Stage::SyncTrackingRefs, err.to_string())
            }
        }

        let branches =
            match push::push_branches(&git, &remote.name, &self.credentials, self.verbosity) {
                Ok(pushed) => PushOutcome::Succeeded { pushed },
                Err(err) => {
                    output::error(format!("branch push failed for {}: {}", path.display(), err));
                    PushOutcome::Failed(err.to_string())
                }
            };

        // Tag pushes are attempted even when the branch pass failed; the two
        // results stay separate.
        let tags = match push::push_tags(&git, &remote.name, &self.credentials, self.verbosity) {
            Ok(pushed) => PushOutcome::Succeeded { pushed },
            Err(err) => {
                output::error(format!("tag push failed for {}: {}", path.display(), err));
                PushOutcome::Failed(err.to_string())
            }
        };

        RepoReport {
            path: path.to_path_buf(),
            name: Some(name),
            outcome: RepoOutcome::Pushed { branches, tags },
        }
    }

    fn fail(&self, path: &Path, name: Option<String>, stage: Stage, message: String) -> RepoReport {
        output::error(format!("{} failed for {}: {}", stage, path.display(), message));
        RepoReport::failed(path, name, stage, message)
    }
}
