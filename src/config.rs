use url::Url;

use crate::types::Result;

/// Where each adapter points. The source set is fixed and known: one RSS feed,
/// a handful of subreddit feeds, and one JSON posts endpoint.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub ai_rundown_feed_url: String,
    pub subreddits: Vec<String>,
    pub bens_bites_url: String,
    pub fetch: FetchConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ai_rundown_feed_url: "https://rss.beehiiv.com/feeds/2R3C6Bt5wj.xml".to_string(),
            subreddits: vec!["artificial".to_string(), "MachineLearning".to_string()],
            bens_bites_url: "https://bensbites.beehiiv.com/posts".to_string(),
            fetch: FetchConfig::default(),
        }
    }
}

impl AppConfig {
    /// Fail fast on malformed source URLs instead of discovering them at the
    /// first fetch.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.ai_rundown_feed_url)?;
        Url::parse(&self.bens_bites_url)?;
        for subreddit in &self.subreddits {
            Url::parse(&crate::sources::reddit::feed_url(subreddit))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub follow_redirects: bool,
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "ai-news-dashboard/1.0".to_string(),
            timeout_seconds: 10,
            follow_redirects: true,
            max_redirects: 5,
        }
    }
}
