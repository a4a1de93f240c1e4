//! git
//!
//! Single interface for all Git operations.
//!
//! # Architecture
//!
//! This module is the only doorway to Git. All repository reads and writes
//! flow through [`Git`]; no other module imports `git2`. The engine stages
//! (discovery, reconciliation, tracking-ref sync, push) compose the
//! operations exposed here.
//!
//! # Responsibilities
//!
//! - Repository boundary probing and opening (bare and working-copy)
//! - Remote add/remove/lookup
//! - Branch, tag, and reference reads and writes
//! - Push with refspecs and credentials

mod interface;

pub use interface::{
    is_repository_root, Git, GitError, LocalBranch, Oid, PushCredentials, RemoteInfo,
};
