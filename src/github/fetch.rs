// src/github/fetch.rs
// =============================================================================
// This module fetches JSON from the GitHub REST API.
//
// Strategy:
// - Every request is authenticated with HTTP basic auth (user name + token)
// - Collection endpoints are walked page by page with ?per_page=100&page=N
// - The first page that decodes to an empty array ends the walk
// - Requests are made one at a time, in order
//
// What counts as an error:
// - Transport failures (DNS, TLS, connection reset, timeout)
// - Any non-2xx status. A failed call is never mistaken for "no more pages",
//   otherwise a 403 halfway through would silently truncate an export
// - A body that isn't the JSON shape we expect. The contributors endpoint
//   answers 204 with an empty body for empty repositories, which lands here,
//   so callers can match on `ApiError::Decode` and skip that repository
// =============================================================================

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Public GitHub API. Override with --api-url for Enterprise installs.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Largest page size GitHub accepts.
pub const PER_PAGE: u32 = 100;

// Errors that can come out of a single API call
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid API URL '{url}': {source}")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered HTTP {status}: {message}")]
    Status {
        url: String,
        status: StatusCode,
        message: String,
    },

    #[error("{url} did not return the expected JSON: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

// The user name + API token pair sent with every request
#[derive(Clone)]
pub struct Credentials {
    pub user: String,
    pub token: String,
}

// Keeps the token out of logs and panic messages
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("token", &"***")
            .finish()
    }
}

/// Read access to the GitHub API.
///
/// `path` is relative to the API base, e.g. `orgs/acme/repos`
/// (see `github::endpoints`).
#[async_trait]
pub trait GithubApi: Send + Sync {
    /// Fetches every page of a collection endpoint and returns the items in
    /// the order GitHub served them.
    async fn fetch_all(&self, path: &str) -> Result<Vec<Value>, ApiError>;

    /// Fetches a single, non-paginated resource.
    async fn fetch_one(&self, path: &str) -> Result<Value, ApiError>;
}

// The real client, backed by reqwest
#[derive(Debug, Clone)]
pub struct GithubClient {
    client: Client,
    base: Url,
    credentials: Credentials,
}

impl GithubClient {
    // Creates a client for the given API base URL
    //
    // Parameters:
    //   api_url: e.g. "https://api.github.com" or "https://ghe.example.com/api/v3"
    //   credentials: user name + token for basic auth
    pub fn new(api_url: &str, credentials: Credentials) -> Result<Self, ApiError> {
        let mut base = Url::parse(api_url).map_err(|source| ApiError::Url {
            url: api_url.to_string(),
            source,
        })?;

        // Url::join drops the last path segment unless it ends with '/',
        // which would turn ".../api/v3" + "orgs/x" into ".../api/orgs/x"
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        // GitHub rejects requests without a User-Agent
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|source| ApiError::Http {
                url: api_url.to_string(),
                source,
            })?;

        Ok(Self {
            client,
            base,
            credentials,
        })
    }

    // Resolves a relative endpoint path against the base URL
    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base.join(path).map_err(|source| ApiError::Url {
            url: format!("{}{}", self.base, path),
            source,
        })
    }

    // Sends one authenticated GET and returns the raw body of a 2xx response
    async fn get(&self, url: Url) -> Result<Vec<u8>, ApiError> {
        tracing::debug!(%url, "GET");

        let response = self
            .client
            .get(url.clone())
            .basic_auth(&self.credentials.user, Some(&self.credentials.token))
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .map_err(|source| ApiError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            // GitHub error bodies look like {"message": "...", "documentation_url": "..."}
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
                .unwrap_or(body);

            return Err(ApiError::Status {
                url: url.to_string(),
                status,
                message,
            });
        }

        let bytes = response.bytes().await.map_err(|source| ApiError::Http {
            url: url.to_string(),
            source,
        })?;

        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl GithubApi for GithubClient {
    async fn fetch_all(&self, path: &str) -> Result<Vec<Value>, ApiError> {
        let mut records = Vec::new();
        let mut page: u32 = 1;

        loop {
            let mut url = self.endpoint(path)?;
            url.query_pairs_mut()
                .append_pair("per_page", &PER_PAGE.to_string())
                .append_pair("page", &page.to_string());

            let body = self.get(url.clone()).await?;
            let items: Vec<Value> =
                serde_json::from_slice(&body).map_err(|source| ApiError::Decode {
                    url: url.to_string(),
                    source,
                })?;

            // An empty page means we've walked past the last one
            if items.is_empty() {
                break;
            }

            records.extend(items);
            page += 1;
        }

        tracing::debug!(path, pages = page, records = records.len(), "pagination finished");
        Ok(records)
    }

    async fn fetch_one(&self, path: &str) -> Result<Value, ApiError> {
        let url = self.endpoint(path)?;
        let body = self.get(url.clone()).await?;

        serde_json::from_slice(&body).map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why a trait in front of the client?
//    - Reports only need "give me every item of this endpoint"
//    - Tests hand reports an in-memory GithubApi and never open a socket
//    - #[async_trait] makes the async methods usable through &dyn GithubApi
//
// 2. Why read bytes and decode ourselves instead of response.json()?
//    - We want our own ApiError::Decode with the URL in it, so the
//      contributors report can tell "empty repository" apart from a
//      transport failure
//
// 3. Why is there no retry?
//    - A failed request ends the run. Restarting from scratch is simpler
//      than guessing which partial exports are still trustworthy
// -----------------------------------------------------------------------------
