//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and resolution into [`Query`] values.

use crate::dispatch::Query;
use clap::Parser;
use std::path::PathBuf;

/// Termfetch - GitHub, news, Reddit and weather from your terminal
///
/// Every query flag is independent; passing several runs each of them
/// once, in a fixed order.
///
/// Examples:
///   termfetch -u octocat,torvalds
///   termfetch -u octocat -r
///   termfetch -n fr -c technology -x 60
///   termfetch -R rust -C 1abcde
///   termfetch -w paris,fr
///   termfetch -a ./logo.png
///   termfetch -p my-service -d ./services
///   termfetch --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// GitHub user(s) to look up (comma-separated)
    #[arg(short, long, value_name = "USERS")]
    pub user: Option<String>,

    /// List the repositories of the given user(s) instead of their profiles
    #[arg(short, long, requires = "user")]
    pub repo: bool,

    /// Top news headlines by ISO 3166-1 alpha-2 country code (ex: fr, us)
    #[arg(short, long, value_name = "COUNTRY")]
    pub news: Option<String>,

    /// News category
    ///
    /// One of: business entertainment general health science sports technology
    #[arg(short, long, value_name = "CATEGORY", requires = "news")]
    pub category: Option<String>,

    /// Search Reddit posts by keyword
    #[arg(short = 'R', long, value_name = "KEYWORD")]
    pub reddit: Option<String>,

    /// Show the comments of a Reddit post by id
    #[arg(short = 'C', long, value_name = "POST_ID", requires = "reddit")]
    pub com: Option<String>,

    /// Current weather by city (ex: paris,fr)
    #[arg(short, long, value_name = "CITY")]
    pub weather: Option<String>,

    /// Display a local image as ASCII art
    #[arg(short, long, value_name = "FILE")]
    pub ascii: Option<PathBuf>,

    /// Create a Node.js micro-service project with this name
    #[arg(short, long, value_name = "NAME")]
    pub project: Option<String>,

    /// Parent directory for --project
    #[arg(short, long, value_name = "DIR", default_value = ".", requires = "project")]
    pub dir: PathBuf,

    /// Width in characters of displayed ASCII images
    #[arg(short = 'x', long, value_name = "CHARS")]
    pub width: Option<u32>,

    /// Number of news items rendered concurrently
    #[arg(long, value_name = "NUM")]
    pub concurrency: Option<usize>,

    /// News API key
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    pub news_api_key: Option<String>,

    /// OpenWeatherMap API key
    #[arg(long, env = "WEATHER_API_KEY", hide_env_values = true)]
    pub weather_api_key: Option<String>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .termfetch.toml in the current directory
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .termfetch.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.width == Some(0) {
            return Err("Width must be at least 1".to_string());
        }

        if self.concurrency == Some(0) {
            return Err("Concurrency must be at least 1".to_string());
        }

        if let Some(ref users) = self.user {
            if split_list(users).is_empty() {
                return Err("--user needs at least one user name".to_string());
            }
        }

        if let Some(ref name) = self.project {
            let name = clean_quotes(name);
            if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
                return Err(format!("Invalid project name: '{}'", name));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        }
    }

    /// Resolve the flags into queries, in dispatch order.
    pub fn queries(&self) -> Vec<Query> {
        let mut queries = Vec::new();

        if let Some(ref name) = self.project {
            queries.push(Query::Scaffold {
                name: clean_quotes(name),
                parent: self.dir.clone(),
            });
        }

        if let Some(ref keyword) = self.reddit {
            let keyword = clean_quotes(keyword);
            match self.com {
                Some(ref post_id) => queries.push(Query::RedditComments {
                    keyword,
                    post_id: clean_quotes(post_id),
                }),
                None => queries.push(Query::RedditPosts { keyword }),
            }
        }

        if let Some(ref users) = self.user {
            let users = split_list(users);
            if self.repo {
                queries.push(Query::UserRepos { users });
            } else {
                queries.push(Query::Users { users });
            }
        }

        if let Some(ref country) = self.news {
            queries.push(Query::News {
                country: clean_quotes(country),
                category: self.category.as_deref().map(clean_quotes),
            });
        }

        if let Some(ref path) = self.ascii {
            queries.push(Query::AsciiFile { path: path.clone() });
        }

        if let Some(ref city) = self.weather {
            queries.push(Query::Weather {
                city: clean_quotes(city),
            });
        }

        queries
    }
}

/// Strip surrounding whitespace and quotes left by some shells.
pub fn clean_quotes(value: &str) -> String {
    value
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim()
        .to_string()
}

/// Split a comma-separated flag value, dropping empty entries.
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(clean_quotes)
        .filter(|s| !s.is_empty())
        .collect()
}
