//! ui
//!
//! Console output utilities.
//!
//! The sync engine reports progress and failures through [`output`] rather
//! than printing directly, so the `--quiet` and `--debug` flags apply to
//! every message the tool emits.

pub mod output;

pub use output::Verbosity;
