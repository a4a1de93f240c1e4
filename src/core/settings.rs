//! core::settings
//!
//! Process-wide sync configuration.
//!
//! # Design
//!
//! `SyncSettings` is built once from parsed arguments and never mutated.
//! There is no ambient or static configuration state; every component that
//! needs a setting receives the struct by reference.

use std::path::{Path, PathBuf};

/// Default credential-store key for the GitHub token.
///
/// Matches the entry name git's own credential helpers use for GitHub, so a
/// token stored for normal git usage is picked up without extra setup.
pub const DEFAULT_CREDENTIAL_KEY: &str = "https://github.com";

/// Default host base URL that mirrored repositories are pushed to.
pub const DEFAULT_HOST: &str = "https://github.com";

/// Immutable configuration for one sync run.
#[derive(Debug, Clone)]
pub struct SyncSettings {
    /// Root directory scanned for repositories
    root: PathBuf,
    /// Organization that holds the mirrored repositories
    organization: String,
    /// Username pushes authenticate as
    user: String,
    /// Credential-store key holding the token
    credential_key: String,
    /// Host base URL remote URLs are built from
    host: String,
}

impl SyncSettings {
    /// Create settings with the default host.
    pub fn new(
        root: impl Into<PathBuf>,
        organization: impl Into<String>,
        user: impl Into<String>,
        credential_key: impl Into<String>,
    ) -> Self {
        Self {
            root: root.into(),
            organization: organization.into(),
            user: user.into(),
            credential_key: credential_key.into(),
            host: DEFAULT_HOST.to_string(),
        }
    }

    /// Override the host base URL.
    ///
    /// Tests point this at a directory of local bare repositories so pushes
    /// never leave the machine.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// The scan root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The target organization.
    pub fn organization(&self) -> &str {
        &self.organization
    }

    /// The push username.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// The credential-store key.
    pub fn credential_key(&self) -> &str {
        &self.credential_key
    }

    /// Build the remote URL a repository of the given name is mirrored to.
    pub fn remote_url(&self, repo_name: &str) -> String {
        format!("{}/{}/{}.git", self.host, self.organization, repo_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_url_shape() {
        let settings = SyncSettings::new("/repos", "acme", "deploy-bot", DEFAULT_CREDENTIAL_KEY);
        assert_eq!(
            settings.remote_url("widget"),
            "https://github.com/acme/widget.git"
        );
    }

    #[test]
    fn remote_url_keeps_literal_directory_name() {
        // A bare repository directory named proj.git mirrors under that
        // literal name.
        let settings = SyncSettings::new("/repos", "acme", "deploy-bot", DEFAULT_CREDENTIAL_KEY);
        assert_eq!(
            settings.remote_url("proj.git"),
            "https://github.com/acme/proj.git.git"
        );
    }

    #[test]
    fn host_override() {
        let settings =
            SyncSettings::new("/repos", "acme", "deploy-bot", "token-key").with_host("/tmp/mirror");
        assert_eq!(settings.remote_url("widget"), "/tmp/mirror/acme/widget.git");
    }

    #[test]
    fn accessors() {
        let settings = SyncSettings::new("/repos", "acme", "deploy-bot", "key");
        assert_eq!(settings.root(), Path::new("/repos"));
        assert_eq!(settings.organization(), "acme");
        assert_eq!(settings.user(), "deploy-bot");
        assert_eq!(settings.credential_key(), "key");
    }
}
