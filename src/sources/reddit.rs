//! Subreddit RSS feeds (r/artificial, r/MachineLearning by default).

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::{entry_to_article, FetchSource};
use crate::fetcher::Fetcher;
use crate::types::{Article, FetchError, Result};

pub fn feed_url(subreddit: &str) -> String {
    format!("https://www.reddit.com/r/{subreddit}/.rss")
}

pub struct RedditSource {
    subreddits: Vec<String>,
    fetcher: Arc<Fetcher>,
}

impl RedditSource {
    pub fn new(subreddits: Vec<String>, fetcher: Arc<Fetcher>) -> Self {
        Self {
            subreddits,
            fetcher,
        }
    }

    async fn fetch_subreddit(&self, subreddit: &str) -> Result<Vec<Article>> {
        let url = feed_url(subreddit);
        info!(%subreddit, "fetching subreddit feed");
        let body = self.fetcher.fetch_text(&url).await?;
        let feed = feed_rs::parser::parse(body.as_bytes())
            .map_err(|e| FetchError::Feed(format!("r/{subreddit}: {e}")))?;

        let source = format!("r/{subreddit}");
        let tags = vec![subreddit.to_string(), "reddit".to_string()];
        let articles: Vec<Article> = feed
            .entries
            .into_iter()
            .map(|entry| entry_to_article(entry, &source, Some(&tags)))
            .collect();

        info!(count = articles.len(), "fetched posts from r/{subreddit}");
        Ok(articles)
    }
}

#[async_trait]
impl FetchSource for RedditSource {
    /// One failing subreddit fails the whole adapter; the aggregator contains
    /// it and the other sources still run.
    async fn fetch(&self) -> Result<Vec<Article>> {
        let mut all = Vec::new();
        for subreddit in &self.subreddits {
            all.extend(self.fetch_subreddit(subreddit).await?);
        }
        Ok(all)
    }
}
