//! forge::github
//!
//! GitHub gateway implementation using the REST API.
//!
//! # Design
//!
//! Two endpoints are consumed:
//!
//! - `GET /repos/{org}/{repo}` - fetch a repository; 404 maps to `Ok(None)`
//! - `POST /orgs/{org}/repos` - create a private repository
//!
//! # Authentication
//!
//! The gateway holds the bearer token resolved at startup for the lifetime
//! of the run. There is no refresh: a rejected token fails the repository
//! being processed and the run's aggregate status.
//!
//! # Rate Limiting
//!
//! GitHub rate-limit responses surface as `GatewayError::RateLimited`;
//! there is no automatic retry.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

use super::traits::{GatewayError, HostGateway, HostedRepo};

/// Default GitHub API base URL.
const DEFAULT_API_BASE: &str = "https://api.github.com";

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = "orgsync-cli";

/// GitHub gateway.
pub struct GitHubGateway {
    /// HTTP client for making requests
    client: Client,
    /// Bearer token, set once for the run
    token: String,
    /// API base URL (configurable for GitHub Enterprise and tests)
    api_base: String,
}

// Custom Debug to avoid exposing the token
impl std::fmt::Debug for GitHubGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubGateway")
            .field("api_base", &self.api_base)
            .finish()
    }
}

/// Request body for repository creation.
#[derive(Debug, Serialize)]
struct CreateRepoRequest<'a> {
    name: &'a str,
    private: bool,
}

/// Repository payload returned by the API.
#[derive(Debug, Deserialize)]
struct RepoResponse {
    name: String,
    full_name: String,
    private: bool,
}

impl From<RepoResponse> for HostedRepo {
    fn from(repo: RepoResponse) -> Self {
        HostedRepo {
            name: repo.name,
            full_name: repo.full_name,
            private: repo.private,
        }
    }
}

/// Error payload returned by the API.
#[derive(Debug, Deserialize)]
struct GitHubErrorResponse {
    message: String,
}

impl GitHubGateway {
    /// Create a gateway talking to api.github.com.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            token: token.into(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Create a gateway with a custom API base URL.
    ///
    /// Used for GitHub Enterprise installations and for tests pointing at a
    /// local mock server.
    pub fn with_api_base(token: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            token: token.into(),
            api_base: api_base.into(),
        }
    }

    /// Build common headers for API requests.
    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", self.token)) {
            headers.insert(AUTHORIZATION, value);
        }
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );
        headers
    }

    /// Handle API response, mapping errors appropriately.
    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: Response,
    ) -> Result<T, GatewayError> {
        let status = response.status();

        if status.is_success() {
            response.json().await.map_err(|e| GatewayError::ApiError {
                status: status.as_u16(),
                message: format!("failed to parse response: {}", e),
            })
        } else {
            Err(Self::error_from_response(response, status).await)
        }
    }

    /// Map an error response to a typed error.
    async fn error_from_response(response: Response, status: StatusCode) -> GatewayError {
        let message = match response.json::<GitHubErrorResponse>().await {
            Ok(err) => err.message,
            Err(_) => "unknown error".to_string(),
        };

        match status {
            StatusCode::UNAUTHORIZED => GatewayError::AuthFailed("invalid or expired token".into()),
            StatusCode::FORBIDDEN => GatewayError::AuthFailed(format!("permission denied: {}", message)),
            StatusCode::NOT_FOUND => GatewayError::NotFound(message),
            StatusCode::TOO_MANY_REQUESTS => GatewayError::RateLimited,
            _ => GatewayError::ApiError {
                status: status.as_u16(),
                message,
            },
        }
    }
}

#[async_trait]
impl HostGateway for GitHubGateway {
    fn name(&self) -> &'static str {
        "github"
    }

    async fn get_repo(&self, org: &str, name: &str) -> Result<Option<HostedRepo>, GatewayError> {
        let url = format!("{}/repos/{}/{}", self.api_base, org, name);
        let response = self
            .client
            .get(&url)
            .headers(self.headers())
            .send()
            .await
            .map_err(|e| GatewayError::NetworkError(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let repo: RepoResponse = self.handle_response(response).await?;
        Ok(Some(repo.into()))
    }

    async fn create_private_repo(
        &self,
        org: &str,
        name: &str,
    ) -> Result<HostedRepo, GatewayError> {
        let url = format!("{}/orgs/{}/repos", self.api_base, org);
        let body = CreateRepoRequest {
            name,
            private: true,
        };
        let response = self
            .client
            .post(&url)
            .headers(self.headers())
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::NetworkError(e.to_string()))?;

        let repo: RepoResponse = self.handle_response(response).await?;
        Ok(repo.into())
    }
}
