//! Ben's Bites posts endpoint. Nominally a web page, but it answers JSON of
//! the shape `{"posts": [...], "pagination": {...}}` when asked politely.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{info, warn};

use super::FetchSource;
use crate::fetcher::Fetcher;
use crate::normalize::{canonical_timestamp, clip_summary, now_timestamp, strip_html};
use crate::types::{Article, Result};

pub const SOURCE_LABEL: &str = "Ben's Bites";

/// Cap on raw posts taken per fetch, bounding unexpectedly large payloads.
const MAX_POSTS: usize = 20;

/// The endpoint only serves JSON to browser-looking requests.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

#[derive(Debug, Deserialize)]
pub(crate) struct PostsPage {
    #[serde(default)]
    pub posts: Vec<RawPost>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawPost {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub web_title: Option<String>,
    #[serde(default)]
    pub web_subtitle: Option<String>,
}

pub struct BensBitesSource {
    url: String,
    fetcher: Arc<Fetcher>,
}

impl BensBitesSource {
    pub fn new(url: String, fetcher: Arc<Fetcher>) -> Self {
        Self { url, fetcher }
    }
}

#[async_trait]
impl FetchSource for BensBitesSource {
    /// Transport failures and non-JSON bodies both mean "no data", never an
    /// error out of this adapter.
    async fn fetch(&self) -> Result<Vec<Article>> {
        info!(url = %self.url, "fetching {SOURCE_LABEL}");
        let headers = [
            ("User-Agent", BROWSER_USER_AGENT),
            ("Accept", "application/json"),
        ];
        let body = match self.fetcher.fetch_text_with_headers(&self.url, &headers).await {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "error fetching {SOURCE_LABEL}");
                return Ok(Vec::new());
            }
        };

        let articles = decode_posts(&body);
        info!(count = articles.len(), "fetched articles from {SOURCE_LABEL}");
        Ok(articles)
    }
}

/// Decode a response body into articles. A body that is not the expected JSON
/// (the endpoint falls back to HTML) means "no data", not an error.
pub(crate) fn decode_posts(body: &str) -> Vec<Article> {
    match serde_json::from_str::<PostsPage>(body) {
        Ok(page) => posts_to_articles(page),
        Err(_) => {
            warn!("{SOURCE_LABEL} response was not valid JSON, content might be HTML");
            Vec::new()
        }
    }
}

/// Normalize the raw post list. Posts without a slug have no link and are
/// dropped entirely.
pub(crate) fn posts_to_articles(page: PostsPage) -> Vec<Article> {
    page.posts
        .into_iter()
        .take(MAX_POSTS)
        .filter_map(|post| {
            let slug = post.slug.filter(|s| !s.is_empty())?;
            let link = format!("https://bensbites.beehiiv.com/p/{slug}");

            // Beehiiv dates arrive as RFC 3339 with millis and a Z suffix.
            let published = post
                .created_at
                .as_deref()
                .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
                .map(|dt| canonical_timestamp(dt.with_timezone(&Utc)))
                .unwrap_or_else(now_timestamp);

            let summary_raw = post.web_subtitle.unwrap_or_default();
            let summary = clip_summary(&strip_html(&summary_raw));

            Some(Article {
                id: post.id.filter(|s| !s.is_empty()).unwrap_or_else(|| link.clone()),
                title: post
                    .web_title
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| "No Title".to_string()),
                summary,
                link,
                published,
                source: SOURCE_LABEL.to_string(),
                tags: vec!["bensbites".to_string()],
                saved: false,
            })
        })
        .collect()
}
