//! cli
//!
//! Command-line interface layer.
//!
//! # Responsibilities
//!
//! - Parse arguments and validate run preconditions (scan root exists,
//!   credential resolves)
//! - Wire the resolved credential into the gateway and the push transport
//! - Delegate to [`crate::engine::SyncEngine`] and map its outcome to the
//!   process exit status
//!
//! The CLI layer performs no repository mutations itself.

pub mod args;

pub use args::Cli;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::CommandFactory;

use crate::core::settings::SyncSettings;
use crate::engine::SyncEngine;
use crate::forge::github::GitHubGateway;
use crate::git::PushCredentials;
use crate::secrets::{self, KeychainSecretStore};
use crate::ui::output::{self, Verbosity};

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`. Returns the process
/// exit code: success only when argument validation, credential loading,
/// and every discovered repository all succeeded.
pub async fn run() -> Result<ExitCode> {
    let raw: Vec<String> = std::env::args().skip(1).collect();
    if args::is_help_request(&raw) {
        Cli::command()
            .print_help()
            .context("cannot print usage")?;
        return Ok(ExitCode::SUCCESS);
    }

    // Exits with usage and a nonzero status when required flags are missing.
    let cli = Cli::parse_args();
    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);
    let settings = SyncSettings::new(cli.path, cli.org, cli.user, cli.cred);

    if !settings.root().is_dir() {
        anyhow::bail!("scan root not found: {}", settings.root().display());
    }

    // Credential resolution is the last precondition: no repository is
    // touched until the token is in hand.
    let store = KeychainSecretStore::new();
    let token = secrets::resolve_token(&store, settings.credential_key())
        .context("failed to load hosting credentials")?;

    let credentials = PushCredentials {
        username: settings.user().to_string(),
        secret: token.clone(),
    };
    let gateway = Box::new(GitHubGateway::new(token));

    let engine = SyncEngine::new(settings, gateway, credentials, verbosity);
    let outcome = engine.run().await?;

    output::print(outcome.summary(), verbosity);
    Ok(outcome.exit_code())
}
