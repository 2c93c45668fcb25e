//! "The AI Rundown" beehiiv RSS feed.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::{entry_to_article, FetchSource};
use crate::fetcher::Fetcher;
use crate::types::{Article, FetchError, Result};

pub const SOURCE_LABEL: &str = "The AI Rundown";

pub struct AiRundownSource {
    feed_url: String,
    fetcher: Arc<Fetcher>,
}

impl AiRundownSource {
    pub fn new(feed_url: String, fetcher: Arc<Fetcher>) -> Self {
        Self { feed_url, fetcher }
    }
}

#[async_trait]
impl FetchSource for AiRundownSource {
    async fn fetch(&self) -> Result<Vec<Article>> {
        info!(url = %self.feed_url, "fetching RSS feed");
        let body = self.fetcher.fetch_text(&self.feed_url).await?;
        let feed = feed_rs::parser::parse(body.as_bytes())
            .map_err(|e| FetchError::Feed(format!("{}: {e}", self.feed_url)))?;

        // Feed entries carry their own category terms, so no tag override.
        let articles: Vec<Article> = feed
            .entries
            .into_iter()
            .map(|entry| entry_to_article(entry, SOURCE_LABEL, None))
            .collect();

        info!(count = articles.len(), "fetched articles from {SOURCE_LABEL}");
        Ok(articles)
    }
}
