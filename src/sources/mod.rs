//! Source adapters. Each one turns a single upstream provider's records into
//! canonical [`Article`]s, independently of the others; the aggregator only
//! ever sees the `FetchSource` capability.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::AppConfig;
use crate::fetcher::Fetcher;
use crate::normalize::{canonical_timestamp, clip_summary, now_timestamp, strip_html};
use crate::types::{Article, Result};

pub mod ai_rundown;
pub mod bens_bites;
pub mod reddit;

pub use ai_rundown::AiRundownSource;
pub use bens_bites::BensBitesSource;
pub use reddit::RedditSource;

/// The one capability the aggregator depends on.
#[async_trait]
pub trait FetchSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<Article>>;
}

/// Build the fixed, tagged source list the aggregator runs over.
pub fn configured_sources(
    config: &AppConfig,
    fetcher: Arc<Fetcher>,
) -> Vec<(String, Box<dyn FetchSource>)> {
    vec![
        (
            "ai_rundown".to_string(),
            Box::new(AiRundownSource::new(
                config.ai_rundown_feed_url.clone(),
                fetcher.clone(),
            )) as Box<dyn FetchSource>,
        ),
        (
            "reddit".to_string(),
            Box::new(RedditSource::new(config.subreddits.clone(), fetcher.clone())),
        ),
        (
            "bens_bites".to_string(),
            Box::new(BensBitesSource::new(config.bens_bites_url.clone(), fetcher)),
        ),
    ]
}

/// Shared feed-entry normalization for the RSS-style adapters.
///
/// `fixed_tags` overrides the entry's own category terms for sources that
/// carry no usable tags of their own (the subreddit feeds).
pub(crate) fn entry_to_article(
    entry: feed_rs::model::Entry,
    source: &str,
    fixed_tags: Option<&[String]>,
) -> Article {
    let link = entry
        .links
        .first()
        .map(|l| l.href.clone())
        .unwrap_or_default();
    let id = if entry.id.is_empty() {
        link.clone()
    } else {
        entry.id.clone()
    };
    let title = entry
        .title
        .map(|t| t.content)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "No Title".to_string());
    let summary_raw = entry.summary.map(|s| s.content).unwrap_or_default();
    let summary = clip_summary(&strip_html(&summary_raw));
    let published = entry
        .published
        .map(canonical_timestamp)
        .unwrap_or_else(now_timestamp);
    let tags = match fixed_tags {
        Some(tags) => tags.to_vec(),
        None => entry.categories.into_iter().map(|c| c.term).collect(),
    };

    Article {
        id,
        title,
        summary,
        link,
        published,
        source: source.to_string(),
        tags,
        saved: false,
    }
}
