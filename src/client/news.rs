//! Top headlines from the news API.

use super::ApiClient;
use crate::error::FetchError;
use crate::models::{Article, NewsResponse};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct NewsClient {
    api: ApiClient,
    url: String,
    api_key: String,
}

impl NewsClient {
    pub fn new(api: ApiClient, url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api,
            url: url.into(),
            api_key: api_key.into(),
        }
    }

    /// Fetch the top headlines for a country, optionally narrowed to a category.
    pub async fn top_headlines(
        &self,
        country: &str,
        category: Option<&str>,
    ) -> Result<Vec<Article>, FetchError> {
        let mut query = vec![("apiKey", self.api_key.as_str()), ("country", country)];
        if let Some(category) = category.filter(|c| !c.is_empty()) {
            query.push(("category", category));
        }

        let response: NewsResponse = self.api.get_json(&self.url, &query).await?;
        debug!(
            "news status {}: {} of {} articles",
            response.status,
            response.articles.len(),
            response.total_results
        );

        Ok(response.articles)
    }
}
