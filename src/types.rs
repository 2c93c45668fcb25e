use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Hard cap on summary content before the ellipsis marker is appended.
pub const SUMMARY_LIMIT: usize = 250;
pub const ELLIPSIS: &str = "...";

/// Canonical article record produced by every source adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub link: String,
    /// Canonical `YYYY-MM-DDTHH:MM:SS` timestamp, naive, no timezone suffix.
    pub published: String,
    pub source: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub saved: bool,
}

impl Article {
    /// Structural validation applied by the aggregator to every record an
    /// adapter hands back. Invalid records are dropped, not fatal.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(self.invalid("empty id"));
        }
        if self.title.is_empty() {
            return Err(self.invalid("empty title"));
        }
        if self.source.is_empty() {
            return Err(self.invalid("empty source"));
        }
        if self.published.is_empty() {
            return Err(self.invalid("empty published timestamp"));
        }
        if self.summary.chars().count() > SUMMARY_LIMIT + ELLIPSIS.len() + 1 {
            return Err(self.invalid("summary exceeds clip limit"));
        }
        Ok(())
    }

    fn invalid(&self, reason: &str) -> FetchError {
        FetchError::InvalidArticle {
            article_source: self.source.clone(),
            reason: reason.to_string(),
        }
    }
}

/// Response body of the interactive `/api/articles` endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleList {
    pub articles: Vec<Article>,
}

/// One cached aggregation result. Replaced wholesale on refresh, never
/// partially updated.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub articles: Vec<Article>,
    pub captured_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed parse error: {0}")]
    Feed(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("upstream returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("invalid article from {article_source}: {reason}")]
    InvalidArticle { article_source: String, reason: String },

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, FetchError>;
