//! Text blocks for each kind of result.
//!
//! Every block is a banner line followed by one labeled field per line.

use crate::models::{Article, RedditPost, Repo, Stats, User, Weather};
use chrono::{DateTime, Utc};

const RULE: &str = "****************************************************";
const LABEL_WIDTH: usize = 20;
const STATS_COLUMN: usize = 29;

/// Something the renderer can display.
pub trait Renderable {
    /// The labeled text block, newline-terminated.
    fn text_block(&self) -> String;

    /// Image to render as ASCII art after the text block.
    fn image_url(&self) -> Option<&str> {
        None
    }
}

fn field(block: &mut String, label: &str, value: impl std::fmt::Display) {
    block.push_str(&format!(
        "{:<width$} {}\n",
        format!("{}:", label),
        value,
        width = LABEL_WIDTH
    ));
}

fn opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

fn date(value: &Option<DateTime<Utc>>) -> String {
    value
        .map(|d| d.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_default()
}

fn banner(title: &str) -> String {
    let title = format!(" {} ", title);
    let pad = RULE.len().saturating_sub(title.len());
    let left = pad / 2;
    format!("{}{}{}\n", "*".repeat(left), title, "*".repeat(pad - left))
}

/// The statistics section shown under a user profile.
pub fn stats_section(stats: &Stats) -> String {
    let mut section = banner("Statistics");

    for (category, percentage) in stats.ranked() {
        let value = percentage.to_string();
        let gap = STATS_COLUMN.saturating_sub(category.len() + value.len()).max(1);
        section.push_str(&format!(
            "*      {}{}{} %\n",
            category,
            " ".repeat(gap),
            value
        ));
    }

    section.push_str(RULE);
    section.push('\n');
    section
}

impl Renderable for User {
    fn text_block(&self) -> String {
        let mut block = String::new();

        block.push_str(RULE);
        block.push('\n');
        field(&mut block, "Username", &self.login);
        field(&mut block, "Name", opt(&self.name));
        field(&mut block, "Email", opt(&self.email));
        field(&mut block, "Bio", opt(&self.bio));
        field(&mut block, "Location", opt(&self.location));
        field(&mut block, "CreatedAt", date(&self.created_at));
        field(&mut block, "UpdatedAt", date(&self.updated_at));
        field(&mut block, "ReposURL", &self.repos_url);
        field(&mut block, "Public repos", self.public_repos);
        field(&mut block, "Followers", self.followers);
        field(&mut block, "GistsURL", &self.gists_url);
        field(
            &mut block,
            "Hireable",
            self.hireable.map(|h| h.to_string()).unwrap_or_default(),
        );
        block.push_str(&stats_section(&self.stats));

        block
    }
}

impl Renderable for Repo {
    fn text_block(&self) -> String {
        let mut block = String::new();

        block.push_str(RULE);
        block.push('\n');
        field(&mut block, "Name", &self.name);
        field(&mut block, "Private", self.private);
        field(&mut block, "Description", opt(&self.description));
        field(&mut block, "Updated_at", opt(&self.updated_at));
        field(&mut block, "Git_url", &self.git_url);
        field(&mut block, "Size", self.size);
        field(&mut block, "Language", opt(&self.language));
        field(&mut block, "ID", self.id);

        block
    }
}

impl Renderable for Article {
    fn text_block(&self) -> String {
        let mut block = String::new();

        block.push_str(RULE);
        block.push('\n');
        field(&mut block, "Source", &self.source.name);
        field(&mut block, "Publishing date", &self.published_at);
        field(&mut block, "Title", &self.title);
        field(&mut block, "Content", opt(&self.content));
        field(&mut block, "Url", &self.url);
        block.push('\n');

        block
    }

    fn image_url(&self) -> Option<&str> {
        self.url_to_image.as_deref().filter(|url| !url.is_empty())
    }
}

impl Renderable for RedditPost {
    fn text_block(&self) -> String {
        let mut block = String::new();

        field(
            &mut block,
            "Date",
            self.created().format("%Y-%m-%d %H:%M:%S UTC"),
        );
        field(&mut block, "Author", &self.author);
        field(&mut block, "PostId", &self.id);
        if !self.selftext.is_empty() {
            field(&mut block, "PostContent", cleanup_breaks(&self.selftext));
            block.push_str(&banner("Post"));
        } else {
            field(&mut block, "CommentContent", cleanup_breaks(&self.body));
            block.push_str(&banner("Comment"));
        }

        block
    }
}

impl Renderable for Weather {
    fn text_block(&self) -> String {
        let mut block = String::new();

        block.push_str(&banner("Weather"));
        field(
            &mut block,
            "City",
            format!("{}, {}", self.name, self.sys.country),
        );
        if let Some(condition) = self.weather.first() {
            field(
                &mut block,
                "Conditions",
                format!("{} ({})", condition.main, condition.description),
            );
        }
        field(&mut block, "Temperature", format!("{:.1} °C", self.main.temp));
        field(&mut block, "Feels like", format!("{:.1} °C", self.main.feels_like));
        field(
            &mut block,
            "Min / Max",
            format!("{:.1} / {:.1} °C", self.main.temp_min, self.main.temp_max),
        );
        field(&mut block, "Humidity", format!("{} %", self.main.humidity));
        field(&mut block, "Pressure", format!("{} hPa", self.main.pressure));
        field(&mut block, "Wind", format!("{:.1} m/s", self.wind.speed));
        block.push_str(RULE);
        block.push('\n');

        block
    }
}

/// Replace HTML line breaks Reddit leaves in text.
fn cleanup_breaks(text: &str) -> String {
    text.replace("<br />", "\n")
}
