//! Query dispatch.
//!
//! Runs each resolved [`Query`] once, in order. A failing query is
//! logged with the identifier it was about and the next one still runs;
//! nothing is retried.

use crate::analysis::compute_stats;
use crate::ascii;
use crate::client::{ApiClient, GithubClient, NewsClient, RedditClient, WeatherClient};
use crate::config::Config;
use crate::error::FetchError;
use crate::models::User;
use crate::render::{Renderable, Renderer};
use crate::scaffold;
use anyhow::Result;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// One unit of work requested on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Write a Node.js service skeleton under `parent`.
    Scaffold { name: String, parent: PathBuf },
    /// Posts and comments of one Reddit post.
    RedditComments { keyword: String, post_id: String },
    /// Reddit posts matching a keyword.
    RedditPosts { keyword: String },
    /// Repository listing for each user.
    UserRepos { users: Vec<String> },
    /// Profile and language statistics for each user.
    Users { users: Vec<String> },
    /// Top headlines for a country.
    News {
        country: String,
        category: Option<String>,
    },
    /// A local image as ASCII art.
    AsciiFile { path: PathBuf },
    /// Current weather for a city.
    Weather { city: String },
}

impl Query {
    /// Short name used in diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            Query::Scaffold { .. } => "project",
            Query::RedditComments { .. } => "reddit comments",
            Query::RedditPosts { .. } => "reddit posts",
            Query::UserRepos { .. } => "user repos",
            Query::Users { .. } => "users",
            Query::News { .. } => "news",
            Query::AsciiFile { .. } => "ascii",
            Query::Weather { .. } => "weather",
        }
    }

    /// The identifier the query is about.
    pub fn target(&self) -> String {
        match self {
            Query::Scaffold { name, .. } => name.clone(),
            Query::RedditComments { keyword, post_id } => format!("{}/{}", keyword, post_id),
            Query::RedditPosts { keyword } => keyword.clone(),
            Query::UserRepos { users } | Query::Users { users } => users.join(","),
            Query::News { country, .. } => country.clone(),
            Query::AsciiFile { path } => path.display().to_string(),
            Query::Weather { city } => city.clone(),
        }
    }
}

/// Outcome of a dispatch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
}

/// Executes queries against the configured services.
pub struct Dispatcher {
    config: Config,
    api: ApiClient,
    github: GithubClient,
    news: NewsClient,
    reddit: RedditClient,
    weather: WeatherClient,
    show_progress: bool,
}

impl Dispatcher {
    pub fn new(config: Config, show_progress: bool) -> Result<Self> {
        let api = ApiClient::new(&config.endpoints)?;
        let endpoints = &config.endpoints;

        let github = GithubClient::new(api.clone(), endpoints.github_url.clone());
        let news = NewsClient::new(
            api.clone(),
            endpoints.news_url.clone(),
            config.keys.news_api_key.clone(),
        );
        let reddit = RedditClient::new(api.clone(), endpoints.reddit_url.clone());
        let weather = WeatherClient::new(
            api.clone(),
            endpoints.weather_url.clone(),
            config.keys.weather_api_key.clone(),
        );

        Ok(Self {
            config,
            api,
            github,
            news,
            reddit,
            weather,
            show_progress,
        })
    }

    fn renderer(&self) -> Renderer<'_> {
        Renderer::new(
            &self.api,
            self.config.general.width,
            self.config.general.concurrency,
        )
    }

    /// Run every query in order, writing results to `out`.
    pub async fn run<W: Write>(&self, queries: &[Query], out: &mut W) -> RunSummary {
        let mut summary = RunSummary::default();

        for query in queries {
            info!("Running {} query for '{}'", query.label(), query.target());

            match self.run_query(query, out).await {
                Ok(()) => summary.succeeded += 1,
                Err(e) => {
                    warn!(
                        "{} query for '{}' failed: {:#}",
                        query.label(),
                        query.target(),
                        e
                    );
                    summary.failed += 1;
                }
            }
        }

        summary
    }

    async fn run_query<W: Write>(&self, query: &Query, out: &mut W) -> Result<()> {
        match query {
            Query::Scaffold { name, parent } => self.scaffold(name, parent, out),
            Query::RedditComments { post_id, .. } => self.reddit_comments(post_id, out).await,
            Query::RedditPosts { keyword } => self.reddit_posts(keyword, out).await,
            Query::UserRepos { users } => self.user_repos(users, out).await,
            Query::Users { users } => self.users(users, out).await,
            Query::News { country, category } => {
                self.news(country, category.as_deref(), out).await
            }
            Query::AsciiFile { path } => {
                let art = ascii::convert_file(path, self.config.general.width).await?;
                out.write_all(art.as_bytes())?;
                Ok(())
            }
            Query::Weather { city } => {
                let weather = self.weather.current(city).await?;
                out.write_all(weather.text_block().as_bytes())?;
                Ok(())
            }
        }
    }

    fn scaffold<W: Write>(&self, name: &str, parent: &Path, out: &mut W) -> Result<()> {
        let report = scaffold::create_project(parent, name, self.show_progress)?;

        for file in &report.files {
            writeln!(out, "wrote {} {} bytes", file.path.display(), file.bytes)?;
        }
        writeln!(out, "Project ready in {}", report.root.display())?;
        Ok(())
    }

    async fn reddit_posts<W: Write>(&self, keyword: &str, out: &mut W) -> Result<()> {
        writeln!(out, "Searching reddit post(s): {}", keyword)?;

        let posts: Vec<_> = self
            .reddit
            .search_posts(keyword)
            .await?
            .into_iter()
            .filter(|p| !p.selftext.is_empty())
            .collect();

        if posts.is_empty() {
            report_empty("text posts", keyword);
            return Ok(());
        }

        self.renderer().render(&posts, out).await?;
        Ok(())
    }

    async fn reddit_comments<W: Write>(&self, post_id: &str, out: &mut W) -> Result<()> {
        writeln!(out, "Searching reddit comments ID: {}", post_id)?;

        let entries: Vec<_> = self
            .reddit
            .post_comments(post_id)
            .await?
            .into_iter()
            .filter(|p| !p.selftext.is_empty() || !p.body.is_empty())
            .collect();

        if entries.is_empty() {
            report_empty("comments", post_id);
            return Ok(());
        }

        self.renderer().render(&entries, out).await?;
        Ok(())
    }

    async fn user_repos<W: Write>(&self, users: &[String], out: &mut W) -> Result<()> {
        let mut failures = 0;

        for login in users {
            writeln!(out, "Searching [{}]'s repo(s):", login)?;

            match self.github.fetch_repos(login).await {
                Ok(repos) if repos.is_empty() => report_empty("repositories", login),
                Ok(repos) => {
                    self.renderer().render(&repos, out).await?;
                }
                Err(e) => {
                    warn!("repositories of '{}' unavailable: {}", login, e);
                    failures += 1;
                }
            }
        }

        all_failed(failures, users.len(), "user repos")
    }

    async fn users<W: Write>(&self, users: &[String], out: &mut W) -> Result<()> {
        writeln!(out, "Searching user(s): {}", users.join(", "))?;

        let mut found = Vec::with_capacity(users.len());
        for login in users {
            match self.user_with_stats(login).await {
                Ok(user) => found.push(user),
                Err(e) => warn!("user '{}' unavailable: {}", login, e),
            }
        }

        let failures = users.len() - found.len();
        self.renderer().render(&found, out).await?;

        all_failed(failures, users.len(), "users")
    }

    /// Fetch a profile and its repositories together and attach the
    /// language statistics.
    ///
    /// If only the repositories fail, the profile is still returned with
    /// empty statistics.
    pub async fn user_with_stats(&self, login: &str) -> Result<User, FetchError> {
        let (user, repos) = tokio::join!(
            self.github.fetch_user(login),
            self.github.fetch_repos(login)
        );

        let mut user = user?;
        match repos {
            Ok(repos) => {
                user.stats = compute_stats(&repos);
                debug!(
                    "{}: {} repositories, {} languages, {}% attributed",
                    login,
                    repos.len(),
                    user.stats.len(),
                    user.stats.total()
                );
            }
            Err(e) => warn!(
                "repositories of '{}' unavailable, statistics left empty: {}",
                login, e
            ),
        }

        Ok(user)
    }

    async fn news<W: Write>(
        &self,
        country: &str,
        category: Option<&str>,
        out: &mut W,
    ) -> Result<()> {
        writeln!(
            out,
            "Getting {} news: {}",
            category.unwrap_or("top"),
            country
        )?;

        let articles = self.news.top_headlines(country, category).await?;
        if articles.is_empty() {
            report_empty("articles", country);
            return Ok(());
        }

        let summary = self.renderer().render(&articles, out).await?;
        info!(
            "Rendered {} articles ({} images, {} unavailable)",
            summary.blocks, summary.art_blocks, summary.failed_images
        );
        Ok(())
    }
}

fn report_empty(what: &'static str, id: &str) {
    let err = FetchError::EmptyResult {
        what,
        id: id.to_string(),
    };
    warn!("{}", err);
}

/// A multi-identifier query fails only when every identifier failed.
fn all_failed(failures: usize, total: usize, label: &str) -> Result<()> {
    if total > 0 && failures == total {
        anyhow::bail!("no {} could be fetched", label);
    }
    Ok(())
}
