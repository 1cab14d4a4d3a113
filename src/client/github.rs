//! GitHub users and repositories.

use super::{join_url, ApiClient};
use crate::error::FetchError;
use crate::models::{Repo, User};

/// Client for the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GithubClient {
    api: ApiClient,
    base_url: String,
}

impl GithubClient {
    pub fn new(api: ApiClient, base_url: impl Into<String>) -> Self {
        Self {
            api,
            base_url: base_url.into(),
        }
    }

    /// Fetch a user profile from `/users/{login}`.
    ///
    /// The returned user has empty stats; they are computed by the caller.
    pub async fn fetch_user(&self, login: &str) -> Result<User, FetchError> {
        let url = join_url(&self.base_url, &format!("users/{}", login));
        self.api.get_json(&url, &[]).await
    }

    /// Fetch the public repositories of a user, in the order GitHub returns them.
    pub async fn fetch_repos(&self, login: &str) -> Result<Vec<Repo>, FetchError> {
        let url = join_url(&self.base_url, &format!("users/{}/repos", login));
        self.api.get_json(&url, &[]).await
    }
}
