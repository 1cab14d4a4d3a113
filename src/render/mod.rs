//! Terminal rendering of result lists.
//!
//! Items are prepared concurrently (text block plus optional image
//! download and ASCII conversion) with a bounded number in flight.
//! Finished items are written by a single writer in input order, so an
//! item's text and art are always adjacent and never interleaved with
//! another item's output.

pub mod blocks;

pub use blocks::Renderable;

use crate::ascii;
use crate::client::ApiClient;
use crate::error::FetchError;
use futures::stream::{self, StreamExt};
use std::io::{self, Write};
use tracing::{debug, warn};

/// Counters describing one render pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSummary {
    /// Text blocks written.
    pub blocks: usize,
    /// ASCII art blocks written.
    pub art_blocks: usize,
    /// Items whose image could not be fetched or converted.
    pub failed_images: usize,
}

/// One item ready to be written.
struct RenderedItem {
    text: String,
    art: Option<Result<String, FetchError>>,
}

/// Renders lists of [`Renderable`] items to a writer.
pub struct Renderer<'a> {
    api: &'a ApiClient,
    width: u32,
    concurrency: usize,
}

impl<'a> Renderer<'a> {
    pub fn new(api: &'a ApiClient, width: u32, concurrency: usize) -> Self {
        Self {
            api,
            width: width.max(1),
            concurrency: concurrency.max(1),
        }
    }

    /// Render every item in order.
    ///
    /// A failed image only drops that item's art block; the error is
    /// logged and rendering carries on. Only write errors abort.
    pub async fn render<T, W>(&self, items: &[T], out: &mut W) -> io::Result<RenderSummary>
    where
        T: Renderable,
        W: Write,
    {
        debug!(
            "Rendering {} items ({} in flight, width {})",
            items.len(),
            self.concurrency,
            self.width
        );

        let mut rendered = stream::iter(items)
            .map(|item| self.render_item(item))
            .buffered(self.concurrency);

        let mut summary = RenderSummary::default();

        while let Some(item) = rendered.next().await {
            out.write_all(item.text.as_bytes())?;
            summary.blocks += 1;

            match item.art {
                Some(Ok(art)) => {
                    out.write_all(art.as_bytes())?;
                    writeln!(out)?;
                    summary.art_blocks += 1;
                }
                Some(Err(err)) => {
                    warn!("Skipping image ({}): {}", err.kind(), err);
                    summary.failed_images += 1;
                }
                None => {}
            }
        }

        out.flush()?;
        Ok(summary)
    }

    async fn render_item<T: Renderable>(&self, item: &T) -> RenderedItem {
        let text = item.text_block();
        let art = match item.image_url() {
            Some(url) => Some(self.image_art(url).await),
            None => None,
        };

        RenderedItem { text, art }
    }

    async fn image_art(&self, url: &str) -> Result<String, FetchError> {
        let bytes = self.api.get_bytes(url, &[]).await?;

        ascii::convert(&bytes, self.width).map_err(|source| FetchError::Image {
            url: url.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EndpointsConfig;
    use crate::models::{Article, ArticleSource, Repo};
    use crate::testutil::{closed_url, gradient_png, Stub, StubServer};

    fn article(title: &str, image: Option<String>) -> Article {
        Article {
            source: ArticleSource {
                id: None,
                name: "Wire".to_string(),
            },
            title: title.to_string(),
            url_to_image: image,
            ..Article::default()
        }
    }

    fn api() -> ApiClient {
        ApiClient::new(&EndpointsConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_failed_image_keeps_text_and_later_items() {
        let server = StubServer::start(vec![(
            "/ok.png",
            Stub::bytes("image/png", gradient_png(32, 16)),
        )])
        .await;

        let items = vec![
            article("first", Some(closed_url().await)),
            article("second", Some(server.url("/ok.png"))),
        ];

        let api = api();
        let renderer = Renderer::new(&api, 16, 4);
        let mut out = Vec::new();
        let summary = renderer.render(&items, &mut out).await.unwrap();

        assert_eq!(
            summary,
            RenderSummary {
                blocks: 2,
                art_blocks: 1,
                failed_images: 1,
            }
        );

        let output = String::from_utf8(out).unwrap();
        let first_text = items[0].text_block();
        let second_text = items[1].text_block();
        let art = ascii::convert(&gradient_png(32, 16), 16).unwrap();

        let expected = format!("{}{}{}\n", first_text, second_text, art);
        assert_eq!(output, expected);
    }

    #[tokio::test]
    async fn test_order_preserved_with_concurrency() {
        let png = gradient_png(20, 20);
        let routes: Vec<(String, Stub)> = (0..8)
            .map(|i| (format!("/img{}.png", i), Stub::bytes("image/png", png.clone())))
            .collect();
        let server = StubServer::start(
            routes
                .iter()
                .map(|(path, stub)| (path.as_str(), stub.clone()))
                .collect(),
        )
        .await;

        let items: Vec<Article> = (0..8)
            .map(|i| article(&format!("item {}", i), Some(server.url(&format!("/img{}.png", i)))))
            .collect();

        let api = api();
        let renderer = Renderer::new(&api, 10, 3);
        let mut out = Vec::new();
        let summary = renderer.render(&items, &mut out).await.unwrap();
        assert_eq!(summary.blocks, 8);
        assert_eq!(summary.art_blocks, 8);

        let output = String::from_utf8(out).unwrap();
        let art = ascii::convert(&png, 10).unwrap();
        let expected: String = items
            .iter()
            .map(|a| format!("{}{}\n", a.text_block(), art))
            .collect();
        assert_eq!(output, expected);
    }

    #[tokio::test]
    async fn test_undecodable_image_is_skipped() {
        let server = StubServer::start(vec![(
            "/broken.png",
            Stub::bytes("image/png", b"not a png".to_vec()),
        )])
        .await;

        let items = vec![article("only", Some(server.url("/broken.png")))];
        let api = api();
        let mut out = Vec::new();
        let summary = Renderer::new(&api, 10, 1)
            .render(&items, &mut out)
            .await
            .unwrap();

        assert_eq!(summary.failed_images, 1);
        assert_eq!(String::from_utf8(out).unwrap(), items[0].text_block());
    }

    #[tokio::test]
    async fn test_items_without_images() {
        let repos = vec![
            Repo {
                name: "one".to_string(),
                ..Repo::default()
            },
            Repo {
                name: "two".to_string(),
                ..Repo::default()
            },
        ];

        let api = api();
        let mut out = Vec::new();
        let summary = Renderer::new(&api, 80, 4)
            .render(&repos, &mut out)
            .await
            .unwrap();

        assert_eq!(summary.blocks, 2);
        assert_eq!(summary.art_blocks, 0);
        let output = String::from_utf8(out).unwrap();
        assert!(output.find("one").unwrap() < output.find("two").unwrap());
    }

    #[tokio::test]
    async fn test_empty_list_writes_nothing() {
        let api = api();
        let mut out = Vec::new();
        let summary = Renderer::new(&api, 80, 4)
            .render::<Repo, _>(&[], &mut out)
            .await
            .unwrap();

        assert_eq!(summary, RenderSummary::default());
        assert!(out.is_empty());
    }
}
