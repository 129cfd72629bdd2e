// src/github/fetch.rs
// =============================================================================
// This module fetches an account's public repositories from GitHub.
//
// Strategy:
// - Build GET {api_base}/users/{account}/repos?type=public&sort=pushed&per_page=100
// - Decode the JSON array into ApiRepository records
// - Map each record to our local Repository shape
//
// The HTTP call lives behind the RepoTransport trait. The real transport
// uses reqwest; tests plug in a stub that returns canned JSON (or fails).
//
// Failure handling:
// - Any failure (network, rate limit, bad status, malformed JSON) is logged
//   with its real cause and then reported to the caller as a single
//   FetchError::FetchFailed. The caller can't do anything smarter than
//   "try again later", so the detail stays in the logs.
// - No retries here. How long a result stays valid is the caller's business
//   (see snapshot.rs).
// =============================================================================

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use super::repository::{ApiRepository, Repository};

/// Public GitHub REST API
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// GitHub's maximum page size; we only ever ask for one page
pub const PAGE_SIZE: u32 = 100;

// GitHub rejects requests without a User-Agent
const DEFAULT_USER_AGENT: &str = concat!("portfolio-content/", env!("CARGO_PKG_VERSION"));

/// The only error callers ever see
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to fetch repositories")]
    FetchFailed,
}

// Everything the HTTP transport needs, passed in explicitly
//
// The token is optional: unauthenticated calls work, just with a much
// lower rate limit.
#[derive(Debug, Clone)]
pub struct GithubConfig {
    pub api_base: Url,
    pub token: Option<String>,
    pub user_agent: String,
    pub timeout: Duration,
}

impl GithubConfig {
    pub fn new(api_base: Url, token: Option<String>) -> Self {
        Self {
            api_base,
            token,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

// Something that can list raw repository records for an account
#[async_trait]
pub trait RepoTransport: Send + Sync {
    async fn list_repos(&self, account: &str) -> Result<Vec<ApiRepository>>;
}

// The real transport: one reqwest Client, reused for every call
pub struct HttpTransport {
    client: Client,
    api_base: Url,
}

impl HttpTransport {
    pub fn new(config: &GithubConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

        if let Some(token) = &config.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| anyhow!("GitHub token contains characters not allowed in a header"))?;
            // Keeps the token out of Debug output
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            api_base: config.api_base.clone(),
        })
    }
}

#[async_trait]
impl RepoTransport for HttpTransport {
    async fn list_repos(&self, account: &str) -> Result<Vec<ApiRepository>> {
        let url = repos_url(&self.api_base, account)?;
        tracing::debug!(%url, "Requesting repositories");

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            bail!("GitHub API returned HTTP {} for account '{}'", status, account);
        }

        let repos = response.json::<Vec<ApiRepository>>().await?;
        Ok(repos)
    }
}

// Lists repositories through any transport and normalizes them
pub struct RepoFetcher<T = HttpTransport> {
    transport: T,
}

impl RepoFetcher<HttpTransport> {
    pub fn new(config: &GithubConfig) -> Result<Self> {
        Ok(Self::with_transport(HttpTransport::new(config)?))
    }
}

impl<T: RepoTransport> RepoFetcher<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    // Fetches up to 100 public repositories, most recently pushed first
    //
    // Returns: every record mapped to Repository, or FetchError::FetchFailed.
    // There is no partial success: one bad record fails the whole call.
    pub async fn list_public_repos(&self, account: &str) -> Result<Vec<Repository>, FetchError> {
        match self.transport.list_repos(account).await {
            Ok(records) => {
                tracing::debug!(account, count = records.len(), "Fetched repositories");
                Ok(records.into_iter().map(Repository::from).collect())
            }
            Err(cause) => {
                tracing::error!(account, error = %format!("{cause:#}"), "Error fetching GitHub repos");
                Err(FetchError::FetchFailed)
            }
        }
    }
}

// Builds the endpoint URL for `account`
//
// Path segments go through the url crate, so an odd account name gets
// percent-encoded instead of changing the path.
//
// Example:
//   ("https://api.github.com", "octocat")
//   -> "https://api.github.com/users/octocat/repos?type=public&sort=pushed&per_page=100"
fn repos_url(api_base: &Url, account: &str) -> Result<Url> {
    if account.trim().is_empty() {
        bail!("GitHub account name is empty");
    }

    let mut url = api_base.clone();
    url.path_segments_mut()
        .map_err(|_| anyhow!("Not a usable API base URL: {}", api_base))?
        .pop_if_empty()
        .extend(["users", account, "repos"]);

    url.query_pairs_mut()
        .clear()
        .append_pair("type", "public")
        .append_pair("sort", "pushed")
        .append_pair("per_page", &PAGE_SIZE.to_string());

    Ok(url)
}
