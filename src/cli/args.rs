//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Flags
//!
//! - `--path <dir>`: base directory scanned for git repositories (required)
//! - `--org <name>`: organization holding the mirrored repositories (required)
//! - `--user <name>`: username pushes authenticate as (required)
//! - `--cred <key>`: credential-store key for the token (default
//!   `https://github.com`)
//! - `--quiet` / `-q`: minimal output
//! - `--debug`: verbose output
//!
//! A lone `-h`, `--h`, `-?`, or `--?` prints usage and exits successfully;
//! all four spellings are accepted for compatibility with the tool this
//! replaces.

use clap::Parser;
use std::path::PathBuf;

use crate::core::settings::DEFAULT_CREDENTIAL_KEY;

/// Mirror a tree of local git repositories into a GitHub organization.
///
/// Scans --path for git repositories (bare or working-copy), ensures each
/// has a private hosted counterpart under --org, reconciles a 'github'
/// remote and its tracking refs, and force-pushes all branches and tags.
/// The GitHub token is read from the OS credential store under service
/// 'orgsync' and the key given by --cred.
#[derive(Parser, Debug)]
#[command(name = "orgsync", version, about)]
pub struct Cli {
    /// Base directory scanned for git repositories
    #[arg(long)]
    pub path: PathBuf,

    /// Organization that holds the mirrored repositories
    #[arg(long)]
    pub org: String,

    /// Username pushes authenticate as
    #[arg(long)]
    pub user: String,

    /// Credential-store key holding the GitHub token
    #[arg(long, default_value = DEFAULT_CREDENTIAL_KEY)]
    pub cred: String,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Whether the raw arguments are a lone help request.
///
/// Handled before clap parses so the legacy `--h` and `-?`/`--?` spellings
/// work; clap's own `-h`/`--help` remain available alongside other flags.
pub fn is_help_request(args: &[String]) -> bool {
    if args.len() != 1 {
        return false;
    }
    matches!(args[0].as_str(), "-h" | "--h" | "-?" | "--?")
}
