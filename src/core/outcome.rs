//! core::outcome
//!
//! Per-repository and aggregate run results.
//!
//! # Design
//!
//! One repository failing must not hide the results of the others, and a
//! branch-push failure must not be conflated with a tag-push failure. The
//! report types here keep those outcomes separate; the process exit status
//! collapses them to a single pass/fail signal while the log stream carries
//! the detail.

use std::path::PathBuf;
use std::process::ExitCode;

/// The processing stage a repository failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Opening the local repository
    Open,
    /// Ensuring the hosted counterpart exists
    EnsureHosted,
    /// Reconciling the fixed-name remote
    ReconcileRemote,
    /// Rebuilding remote-tracking references
    SyncTrackingRefs,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Open => "open repository",
            Stage::EnsureHosted => "ensure hosted repository",
            Stage::ReconcileRemote => "reconcile remote",
            Stage::SyncTrackingRefs => "sync tracking refs",
        };
        write!(f, "{}", name)
    }
}

/// Result of one push pass (branches or tags).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    /// Every ref in the pass was pushed.
    Succeeded {
        /// Number of refs pushed
        pushed: usize,
    },
    /// The pass failed; refs pushed before the failure stay pushed.
    Failed(String),
}

impl PushOutcome {
    /// Whether the pass completed without error.
    pub fn is_success(&self) -> bool {
        matches!(self, PushOutcome::Succeeded { .. })
    }
}

/// Outcome of processing one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoOutcome {
    /// All setup stages completed; push results recorded per pass.
    Pushed {
        /// Branch-push result
        branches: PushOutcome,
        /// Tag-push result, independent of the branch result
        tags: PushOutcome,
    },
    /// Failed before any push was attempted.
    Failed {
        /// The stage that failed
        stage: Stage,
        /// The underlying error message
        message: String,
    },
}

/// Report for one discovered repository.
#[derive(Debug, Clone)]
pub struct RepoReport {
    /// Repository root path as discovered
    pub path: PathBuf,
    /// Repository name, when it was resolved before the failure
    pub name: Option<String>,
    /// What happened
    pub outcome: RepoOutcome,
}

impl RepoReport {
    /// Build a failure report for the given stage.
    pub fn failed(
        path: impl Into<PathBuf>,
        name: Option<String>,
        stage: Stage,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            name,
            outcome: RepoOutcome::Failed {
                stage,
                message: message.into(),
            },
        }
    }

    /// Whether this repository was fully mirrored.
    pub fn succeeded(&self) -> bool {
        match &self.outcome {
            RepoOutcome::Pushed { branches, tags } => branches.is_success() && tags.is_success(),
            RepoOutcome::Failed { .. } => false,
        }
    }
}

/// Aggregate result of a sync run.
#[derive(Debug, Default)]
pub struct RunOutcome {
    /// One report per discovered repository, in discovery order
    pub reports: Vec<RepoReport>,
    /// Subtrees that could not be scanned
    pub scan_failures: Vec<String>,
}

impl RunOutcome {
    /// Whether every repository and every scanned subtree succeeded.
    pub fn is_success(&self) -> bool {
        self.scan_failures.is_empty() && self.reports.iter().all(RepoReport::succeeded)
    }

    /// Process exit status for this outcome.
    pub fn exit_code(&self) -> ExitCode {
        if self.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }

    /// One-line summary for the end of the run.
    pub fn summary(&self) -> String {
        let synced = self.reports.iter().filter(|r| r.succeeded()).count();
        let mut line = format!("synchronized {} of {} repositories", synced, self.reports.len());
        let failed = self.reports.len() - synced;
        if failed > 0 {
            line.push_str(&format!(", {} failed", failed));
        }
        if !self.scan_failures.is_empty() {
            line.push_str(&format!(
                ", {} unreadable subtrees",
                self.scan_failures.len()
            ));
        }
        line
    }
}
