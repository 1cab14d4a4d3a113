//! HTTP clients for the remote services.
//!
//! [`ApiClient`] owns the shared `reqwest::Client` and performs every
//! GET: status check, full body read, then JSON decode. The per-service
//! modules only build URLs and pick the response type.

pub mod github;
pub mod news;
pub mod reddit;
pub mod weather;

pub use github::GithubClient;
pub use news::NewsClient;
pub use reddit::RedditClient;
pub use weather::WeatherClient;

use crate::config::EndpointsConfig;
use crate::error::FetchError;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Thin wrapper around a shared `reqwest::Client`.
///
/// Cloning is cheap; all clones share one connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
}

impl ApiClient {
    /// Build a client from the endpoint settings.
    pub fn new(endpoints: &EndpointsConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(endpoints.user_agent.clone());

        if let Some(secs) = endpoints.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let http = builder.build().context("Failed to create HTTP client")?;
        Ok(Self { http })
    }

    /// GET `url` and return the whole body.
    ///
    /// Non-2xx answers are errors. The response is consumed before
    /// returning, so the connection is released on every path.
    pub async fn get_bytes(&self, url: &str, query: &[(&str, &str)]) -> Result<Vec<u8>, FetchError> {
        debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| FetchError::transport(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::from_status(url, status));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::transport(url, e))?;

        debug!("{} returned {} bytes", url, body.len());
        Ok(body.to_vec())
    }

    /// GET `url` and decode the body as JSON.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, FetchError> {
        let body = self.get_bytes(url, query).await?;

        serde_json::from_slice(&body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

/// Join a base URL and a path without doubling slashes.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
