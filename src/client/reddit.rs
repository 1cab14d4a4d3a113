//! Reddit search and comment listings (public JSON endpoints).

use super::{join_url, ApiClient};
use crate::error::FetchError;
use crate::models::{Listing, RedditPost};

#[derive(Debug, Clone)]
pub struct RedditClient {
    api: ApiClient,
    base_url: String,
}

impl RedditClient {
    pub fn new(api: ApiClient, base_url: impl Into<String>) -> Self {
        Self {
            api,
            base_url: base_url.into(),
        }
    }

    /// Search posts matching a keyword.
    pub async fn search_posts(&self, keyword: &str) -> Result<Vec<RedditPost>, FetchError> {
        let url = join_url(&self.base_url, "search.json");
        let listing: Listing = self.api.get_json(&url, &[("q", keyword)]).await?;

        Ok(into_posts(listing))
    }

    /// Fetch a post and its comments.
    ///
    /// Reddit answers with two listings (the post, then the comment tree);
    /// their entries are returned flattened in that order, without the
    /// "load more" placeholders.
    pub async fn post_comments(&self, post_id: &str) -> Result<Vec<RedditPost>, FetchError> {
        let url = join_url(&self.base_url, &format!("comments/{}.json", post_id));
        let listings: Vec<Listing> = self.api.get_json(&url, &[]).await?;

        Ok(listings.into_iter().flat_map(into_posts).collect())
    }
}

fn into_posts(listing: Listing) -> Vec<RedditPost> {
    listing
        .data
        .children
        .into_iter()
        .filter(|thing| thing.kind != "more")
        .map(|thing| thing.data)
        .collect()
}
