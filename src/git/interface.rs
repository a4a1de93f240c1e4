//! git::interface
//!
//! Git interface implementation using git2.
//!
//! This module is the single doorway to all Git operations. No other module
//! imports `git2` directly, which keeps error handling consistent and gives
//! the engine a narrow, mockable surface to test against.
//!
//! # Responsibilities
//!
//! - Probing directories for repository boundaries (bare or working-copy)
//! - Remote enumeration, creation, and removal
//! - Branch, tag, and reference reads and writes
//! - Pushing refspecs with credentials
//!
//! # Error Handling
//!
//! git2 errors are normalized into typed [`GitError`] variants. Per-ref push
//! rejections reported by the remote are surfaced as
//! [`GitError::PushRejected`] rather than being dropped.

use std::cell::RefCell;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from Git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was probed
        path: PathBuf,
    },

    /// The repository root has no usable base name.
    #[error("cannot derive repository name from {path}")]
    UnnamedRepository {
        /// The path the name was derived from
        path: PathBuf,
    },

    /// Requested ref does not exist.
    #[error("ref not found: {refname}")]
    RefNotFound {
        /// The ref that was not found
        refname: String,
    },

    /// Requested remote does not exist.
    #[error("remote not found: {name}")]
    RemoteNotFound {
        /// The remote that was not found
        name: String,
    },

    /// A branch, tag, or ref name is not valid UTF-8.
    #[error("invalid ref name: {message}")]
    InvalidName {
        /// Description of the problem
        message: String,
    },

    /// The remote rejected a ref update during push.
    #[error("push rejected for {refname}: {message}")]
    PushRejected {
        /// The ref the remote rejected
        refname: String,
        /// The rejection message from the remote
        message: String,
    },

    /// Permission or filesystem error.
    #[error("repository access error: {message}")]
    AccessError {
        /// Description of the error
        message: String,
    },

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        match err.code() {
            git2::ErrorCode::NotFound => GitError::RefNotFound {
                refname: err.message().to_string(),
            },
            git2::ErrorCode::Locked | git2::ErrorCode::Auth => GitError::AccessError {
                message: err.message().to_string(),
            },
            _ => GitError::Internal {
                message: err.message().to_string(),
            },
        }
    }
}

/// A commit id.
///
/// Wraps the underlying git2 object id so other modules can carry ids around
/// without importing git2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Oid(git2::Oid);

impl std::fmt::Display for Oid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A remote as a (logical name, URL) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteInfo {
    /// Logical name, e.g. "github"
    pub name: String,
    /// Fetch/push URL
    pub url: String,
}

/// A local branch with its tip commit.
#[derive(Debug, Clone)]
pub struct LocalBranch {
    /// Short branch name, e.g. "feature/x"
    pub name: String,
    /// Commit the branch points at
    pub tip: Oid,
}

/// Username and secret supplied to the push transport.
///
/// Resolved once per run and passed by reference into every push; the
/// transport's credential callback hands out the same pair each time.
#[derive(Clone)]
pub struct PushCredentials {
    /// Username pushes authenticate as
    pub username: String,
    /// Token or password
    pub secret: String,
}

// Custom Debug so the secret never reaches a log line.
impl std::fmt::Debug for PushCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PushCredentials")
            .field("username", &self.username)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Check whether a repository boundary exists at exactly this directory.
///
/// Recognizes both bare repositories (the directory is the git directory)
/// and working copies (the directory contains the git metadata). The probe
/// does not search parent directories; discovery prunes at the boundary it
/// finds, so an upward search would re-report enclosing repositories.
pub fn is_repository_root(path: &Path) -> bool {
    git2::Repository::open_ext(
        path,
        git2::RepositoryOpenFlags::NO_SEARCH,
        &[] as &[&OsStr],
    )
    .is_ok()
}

/// An opened local repository.
///
/// Owned for the duration of processing one repository and dropped when that
/// repository's run completes, success or failure.
pub struct Git {
    /// The underlying git2 repository
    repo: git2::Repository,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl Git {
    /// Open the repository rooted at exactly `path`.
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::open_ext(
            path,
            git2::RepositoryOpenFlags::NO_SEARCH,
            &[] as &[&OsStr],
        )
        .map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;
        Ok(Self { repo })
    }

    /// Whether this is a bare repository.
    pub fn is_bare(&self) -> bool {
        self.repo.is_bare()
    }

    /// The path identifying this repository: the working directory for a
    /// working copy, the git directory for a bare repository.
    pub fn root_path(&self) -> &Path {
        match self.repo.workdir() {
            Some(workdir) => workdir,
            None => self.repo.path(),
        }
    }

    /// The repository name: the base name of [`root_path`](Self::root_path).
    ///
    /// A bare repository directory named `proj.git` yields `proj.git`; the
    /// hosted repository is created under that literal name.
    pub fn name(&self) -> Result<String, GitError> {
        let path = self.root_path();
        path.file_name()
            .and_then(OsStr::to_str)
            .map(str::to_string)
            .ok_or_else(|| GitError::UnnamedRepository {
                path: path.to_path_buf(),
            })
    }

    // =========================================================================
    // Remotes
    // =========================================================================

    /// List all remotes as (name, URL) pairs.
    ///
    /// Remotes with non-UTF-8 names or URLs are reported as errors rather
    /// than skipped.
    pub fn remotes(&self) -> Result<Vec<RemoteInfo>, GitError> {
        let names = self.repo.remotes()?;
        let mut remotes = Vec::with_capacity(names.len());
        for name in names.iter() {
            let name = name.ok_or_else(|| GitError::InvalidName {
                message: "remote name is not valid UTF-8".to_string(),
            })?;
            let remote = self.repo.find_remote(name)?;
            let url = remote.url().ok_or_else(|| GitError::InvalidName {
                message: format!("URL of remote '{}' is not valid UTF-8", name),
            })?;
            remotes.push(RemoteInfo {
                name: name.to_string(),
                url: url.to_string(),
            });
        }
        Ok(remotes)
    }

    /// Find a remote whose URL exactly equals `url`.
    pub fn find_remote_by_url(&self, url: &str) -> Result<Option<RemoteInfo>, GitError> {
        Ok(self.remotes()?.into_iter().find(|r| r.url == url))
    }

    /// Whether a remote with the given name exists.
    pub fn remote_exists(&self, name: &str) -> bool {
        self.repo.find_remote(name).is_ok()
    }

    /// Remove the remote with the given name and its configuration.
    pub fn remove_remote(&self, name: &str) -> Result<(), GitError> {
        self.repo
            .remote_delete(name)
            .map_err(|e| match e.code() {
                git2::ErrorCode::NotFound => GitError::RemoteNotFound {
                    name: name.to_string(),
                },
                _ => e.into(),
            })
    }

    /// Create a remote with the given name and URL.
    pub fn add_remote(&self, name: &str, url: &str) -> Result<RemoteInfo, GitError> {
        self.repo.remote(name, url)?;
        Ok(RemoteInfo {
            name: name.to_string(),
            url: url.to_string(),
        })
    }

    // =========================================================================
    // Branches and References
    // =========================================================================

    /// List local (non-remote-tracking) branches with their tips.
    pub fn local_branches(&self) -> Result<Vec<LocalBranch>, GitError> {
        let mut branches = Vec::new();
        for entry in self.repo.branches(Some(git2::BranchType::Local))? {
            let (branch, _) = entry?;
            let name = branch
                .name()?
                .ok_or_else(|| GitError::InvalidName {
                    message: "branch name is not valid UTF-8".to_string(),
                })?
                .to_string();
            let tip = match branch.get().target() {
                Some(oid) => oid,
                // Symbolic branch ref; resolve through to the commit.
                None => branch.get().peel_to_commit()?.id(),
            };
            branches.push(LocalBranch {
                name,
                tip: Oid(tip),
            });
        }
        Ok(branches)
    }

    /// Whether a reference with the given full name exists.
    pub fn ref_exists(&self, refname: &str) -> bool {
        self.repo.find_reference(refname).is_ok()
    }

    /// Resolve a reference to the commit id it points at.
    pub fn resolve_ref(&self, refname: &str) -> Result<Oid, GitError> {
        let reference =
            self.repo
                .find_reference(refname)
                .map_err(|_| GitError::RefNotFound {
                    refname: refname.to_string(),
                })?;
        let oid = reference.peel_to_commit()?.id();
        Ok(Oid(oid))
    }

    /// Delete the reference with the given full name.
    pub fn delete_ref(&self, refname: &str) -> Result<(), GitError> {
        let mut reference =
            self.repo
                .find_reference(refname)
                .map_err(|_| GitError::RefNotFound {
                    refname: refname.to_string(),
                })?;
        reference.delete()?;
        Ok(())
    }

    /// Create a direct reference at the given commit, recording
    /// `log_message` in the reflog.
    pub fn create_ref(&self, refname: &str, target: Oid, log_message: &str) -> Result<(), GitError> {
        self.repo.reference(refname, target.0, false, log_message)?;
        Ok(())
    }

    /// Set a local branch's upstream to `<remote>/<branch>`.
    ///
    /// The remote-tracking reference must already exist.
    pub fn set_branch_upstream(&self, branch: &str, upstream: &str) -> Result<(), GitError> {
        let mut branch = self
            .repo
            .find_branch(branch, git2::BranchType::Local)
            .map_err(|_| GitError::RefNotFound {
                refname: format!("refs/heads/{}", branch),
            })?;
        branch.set_upstream(Some(upstream))?;
        Ok(())
    }

    /// List the full names of remote-tracking references under the given
    /// remote's namespace, e.g. `refs/remotes/github/main`.
    pub fn remote_tracking_refs(&self, remote_name: &str) -> Result<Vec<String>, GitError> {
        let glob = format!("refs/remotes/{}/*", remote_name);
        let mut refs = Vec::new();
        for entry in self.repo.references_glob(&glob)? {
            let reference = entry?;
            let name = reference.name().ok_or_else(|| GitError::InvalidName {
                message: "tracking ref name is not valid UTF-8".to_string(),
            })?;
            refs.push(name.to_string());
        }
        Ok(refs)
    }

    /// List all tag names.
    pub fn tag_names(&self) -> Result<Vec<String>, GitError> {
        let names = self.repo.tag_names(None)?;
        let mut tags = Vec::with_capacity(names.len());
        for name in names.iter() {
            let name = name.ok_or_else(|| GitError::InvalidName {
                message: "tag name is not valid UTF-8".to_string(),
            })?;
            tags.push(name.to_string());
        }
        Ok(tags)
    }

    // =========================================================================
    // Push
    // =========================================================================

    /// Push the given refspecs to a remote.
    ///
    /// The credential callback answers every transport prompt with the same
    /// username/secret pair. A per-ref rejection reported by the remote is
    /// returned as [`GitError::PushRejected`] even when the transport call
    /// itself succeeds.
    pub fn push(
        &self,
        remote_name: &str,
        refspecs: &[String],
        credentials: &PushCredentials,
    ) -> Result<(), GitError> {
        let mut remote = self
            .repo
            .find_remote(remote_name)
            .map_err(|_| GitError::RemoteNotFound {
                name: remote_name.to_string(),
            })?;

        let rejection: RefCell<Option<(String, String)>> = RefCell::new(None);
        {
            let mut callbacks = git2::RemoteCallbacks::new();
            let username = credentials.username.clone();
            let secret = credentials.secret.clone();
            callbacks.credentials(move |_url, _username_from_url, _allowed| {
                git2::Cred::userpass_plaintext(&username, &secret)
            });
            callbacks.push_update_reference(|refname, status| {
                if let Some(message) = status {
                    *rejection.borrow_mut() = Some((refname.to_string(), message.to_string()));
                }
                Ok(())
            });

            let mut options = git2::PushOptions::new();
            options.remote_callbacks(callbacks);

            let specs: Vec<&str> = refspecs.iter().map(String::as_str).collect();
            remote.push(&specs, Some(&mut options))?;
        }

        if let Some((refname, message)) = rejection.into_inner() {
            return Err(GitError::PushRejected { refname, message });
        }
        Ok(())
    }
}
