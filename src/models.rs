//! Data models decoded from the remote APIs.
//!
//! Every struct is `#[serde(default)]` so missing fields fall back to
//! zero values instead of failing the whole document. Fields the APIs
//! send as `null` are `Option`s.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Category used for repositories with no detected language.
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// A GitHub user profile from `/users/{login}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub login: String,
    pub id: u64,
    pub avatar_url: String,
    pub html_url: String,
    pub repos_url: String,
    pub gists_url: String,
    pub name: Option<String>,
    pub company: Option<String>,
    pub blog: Option<String>,
    pub location: Option<String>,
    pub email: Option<String>,
    pub hireable: Option<bool>,
    pub bio: Option<String>,
    pub public_repos: u64,
    pub public_gists: u64,
    pub followers: u64,
    pub following: u64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    /// Language breakdown of the user's repositories, computed locally.
    #[serde(skip_deserializing)]
    pub stats: Stats,
}

/// A repository from `/users/{login}/repos`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Repo {
    pub id: u64,
    pub name: String,
    pub private: bool,
    pub html_url: String,
    pub description: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub git_url: String,
    pub size: u64,
    pub language: Option<String>,
    pub default_branch: String,
}

impl Repo {
    /// The aggregation category, `unknown` when GitHub detected none.
    pub fn category(&self) -> &str {
        match self.language.as_deref() {
            Some(lang) if !lang.is_empty() => lang,
            _ => UNKNOWN_CATEGORY,
        }
    }
}

/// Percentage breakdown of a categorical field, keyed by category.
///
/// Values are truncated integer percentages, so they may sum to less
/// than 100.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats(BTreeMap<String, u32>);

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: impl Into<String>, percentage: u32) {
        self.0.insert(category.into(), percentage);
    }

    #[allow(dead_code)] // Lookup by category, used by tests
    pub fn get(&self, category: &str) -> Option<u32> {
        self.0.get(category).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all percentages. Never above 100.
    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Entries ordered by percentage (highest first), then by name.
    pub fn ranked(&self) -> Vec<(&str, u32)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}

/// Top-headlines response from the news API.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewsResponse {
    pub status: String,
    pub total_results: u64,
    pub articles: Vec<Article>,
}

/// A single news article.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Article {
    pub source: ArticleSource,
    pub author: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub url_to_image: Option<String>,
    pub published_at: String,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleSource {
    pub id: Option<String>,
    pub name: String,
}

/// A Reddit listing (`{"kind": "Listing", "data": {"children": [...]}}`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Listing {
    pub data: ListingData,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListingData {
    pub children: Vec<Thing>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Thing {
    pub kind: String,
    pub data: RedditPost,
}

/// A Reddit post (`t3`) or comment (`t1`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RedditPost {
    pub id: String,
    pub author: String,
    pub title: String,
    pub subreddit: String,
    /// Post body; empty for link posts and comments.
    pub selftext: String,
    /// Comment body; empty for posts.
    pub body: String,
    pub created_utc: f64,
}

impl RedditPost {
    /// Creation time, or the epoch when the timestamp is out of range.
    pub fn created(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.created_utc as i64, 0)
            .single()
            .unwrap_or_default()
    }
}

/// Current weather for a city.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Weather {
    pub name: String,
    pub sys: WeatherSys,
    pub weather: Vec<WeatherCondition>,
    pub main: WeatherMain,
    pub wind: WeatherWind,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WeatherSys {
    pub country: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WeatherCondition {
    pub main: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WeatherMain {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: u32,
    pub pressure: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WeatherWind {
    pub speed: f64,
}
