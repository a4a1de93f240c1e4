//! core
//!
//! Domain types shared across the crate: the immutable run configuration
//! and the per-repository result records.

pub mod outcome;
pub mod settings;

pub use outcome::{PushOutcome, RepoOutcome, RepoReport, RunOutcome, Stage};
pub use settings::{SyncSettings, DEFAULT_CREDENTIAL_KEY, DEFAULT_HOST};
