//! forge::mock
//!
//! Mock gateway implementation for deterministic testing.
//!
//! # Design
//!
//! The mock gateway stores hosted repositories in memory, records every
//! operation for later verification, and allows injecting failures per
//! method to exercise the engine's fault-isolation boundaries.
//!
//! # Example
//!
//! ```
//! use orgsync::forge::mock::MockGateway;
//! use orgsync::forge::HostGateway;
//!
//! # tokio_test::block_on(async {
//! let gateway = MockGateway::new();
//!
//! // Nothing hosted yet
//! assert!(gateway.get_repo("acme", "widget").await.unwrap().is_none());
//!
//! // Create it
//! let repo = gateway.create_private_repo("acme", "widget").await.unwrap();
//! assert_eq!(repo.full_name, "acme/widget");
//! assert!(repo.private);
//!
//! // Now it is found
//! assert!(gateway.get_repo("acme", "widget").await.unwrap().is_some());
//! # });
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::traits::{GatewayError, HostGateway, HostedRepo};

/// Mock gateway for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockGateway {
    /// Internal state shared across clones.
    inner: Arc<Mutex<MockGatewayInner>>,
}

/// Internal mutable state.
#[derive(Debug, Default)]
struct MockGatewayInner {
    /// Hosted repositories by "org/name".
    repos: HashMap<String, HostedRepo>,
    /// Method to fail on (for testing error paths).
    fail_on: Option<FailOn>,
    /// Recorded operations for verification.
    operations: Vec<MockOperation>,
}

/// Configuration for which operation should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Fail get_repo with the given error.
    GetRepo(GatewayError),
    /// Fail create_private_repo with the given error.
    CreateRepo(GatewayError),
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    /// get_repo was called.
    GetRepo {
        /// Organization queried
        org: String,
        /// Repository name queried
        name: String,
    },
    /// create_private_repo was called.
    CreateRepo {
        /// Organization created under
        org: String,
        /// Repository name created
        name: String,
    },
}

impl MockGateway {
    /// Create an empty mock gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a hosted repository so `get_repo` finds it.
    pub fn with_existing_repo(self, org: &str, name: &str) -> Self {
        {
            let mut inner = self.inner.lock().expect("mock gateway lock poisoned");
            inner.repos.insert(
                format!("{}/{}", org, name),
                HostedRepo {
                    name: name.to_string(),
                    full_name: format!("{}/{}", org, name),
                    private: true,
                },
            );
        }
        self
    }

    /// Configure a method to fail.
    pub fn fail_on(self, fail: FailOn) -> Self {
        self.inner
            .lock()
            .expect("mock gateway lock poisoned")
            .fail_on = Some(fail);
        self
    }

    /// Recorded operations, in call order.
    pub fn operations(&self) -> Vec<MockOperation> {
        self.inner
            .lock()
            .expect("mock gateway lock poisoned")
            .operations
            .clone()
    }

    /// Names of repositories created through this gateway.
    pub fn created_repos(&self) -> Vec<String> {
        self.operations()
            .into_iter()
            .filter_map(|op| match op {
                MockOperation::CreateRepo { org, name } => Some(format!("{}/{}", org, name)),
                MockOperation::GetRepo { .. } => None,
            })
            .collect()
    }
}

#[async_trait]
impl HostGateway for MockGateway {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn get_repo(&self, org: &str, name: &str) -> Result<Option<HostedRepo>, GatewayError> {
        let mut inner = self.inner.lock().expect("mock gateway lock poisoned");
        inner.operations.push(MockOperation::GetRepo {
            org: org.to_string(),
            name: name.to_string(),
        });
        if let Some(FailOn::GetRepo(err)) = &inner.fail_on {
            return Err(err.clone());
        }
        Ok(inner.repos.get(&format!("{}/{}", org, name)).cloned())
    }

    async fn create_private_repo(
        &self,
        org: &str,
        name: &str,
    ) -> Result<HostedRepo, GatewayError> {
        let mut inner = self.inner.lock().expect("mock gateway lock poisoned");
        inner.operations.push(MockOperation::CreateRepo {
            org: org.to_string(),
            name: name.to_string(),
        });
        if let Some(FailOn::CreateRepo(err)) = &inner.fail_on {
            return Err(err.clone());
        }
        let repo = HostedRepo {
            name: name.to_string(),
            full_name: format!("{}/{}", org, name),
            private: true,
        };
        inner.repos.insert(repo.full_name.clone(), repo.clone());
        Ok(repo)
    }
}
