//! Orgsync - mirror a tree of local git repositories into a GitHub
//! organization.
//!
//! Orgsync scans a directory tree for git repositories (bare or
//! working-copy), ensures each one has a private hosted counterpart under a
//! configured organization, reconciles a dedicated `github` remote and its
//! remote-tracking references, and force-pushes every branch and tag so the
//! hosted side mirrors local state.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, validates
//!   preconditions, delegates to the engine)
//! - [`engine`] - Discovery, remote reconciliation, tracking-ref sync, and
//!   push orchestration with per-repository fault isolation
//! - [`core`] - Run configuration and per-repository result records
//! - [`git`] - Single interface for all Git operations
//! - [`forge`] - Gateway to the repository hosting service
//! - [`secrets`] - Credential resolution from the OS credential store
//! - [`ui`] - Console output utilities
//!
//! # Correctness Invariants
//!
//! 1. After reconciliation a repository has exactly one remote at the
//!    target URL; a stale fixed-name remote is replaced, never duplicated
//! 2. Every local branch has a tracking reference at its current tip before
//!    any push is attempted
//! 3. One repository's failure never blocks the rest of the run, but always
//!    fails the aggregate exit status
//! 4. Credential resolution happens once, before any repository is touched

pub mod cli;
pub mod core;
pub mod engine;
pub mod forge;
pub mod git;
pub mod secrets;
pub mod ui;
