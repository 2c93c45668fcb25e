use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use crate::aggregator::Aggregator;
use crate::types::{Article, Snapshot};

/// Default snapshot lifetime for the request-driven serving shape.
pub const DEFAULT_TIMEOUT_SECS: u64 = 900;

/// Time-boxed gate in front of the aggregator. Serves the held snapshot while
/// it is fresh, rebuilds when stale, and prefers a stale snapshot over an
/// empty rebuild.
///
/// The clock is injected through `get` so tests can advance time
/// deterministically.
pub struct CacheGate {
    aggregator: Aggregator,
    timeout: Duration,
    snapshot: Option<Snapshot>,
}

impl CacheGate {
    pub fn new(aggregator: Aggregator, timeout_secs: u64) -> Self {
        Self {
            aggregator,
            timeout: Duration::seconds(timeout_secs as i64),
            snapshot: None,
        }
    }

    /// Serve the merged article list as of `now`, re-aggregating only when no
    /// fresh snapshot exists.
    pub async fn get(&mut self, now: DateTime<Utc>) -> Vec<Article> {
        if let Some(snapshot) = &self.snapshot {
            if now.signed_duration_since(snapshot.captured_at) < self.timeout {
                info!(
                    count = snapshot.articles.len(),
                    "returning cached articles"
                );
                return snapshot.articles.clone();
            }
        }

        let articles = self.aggregator.aggregate().await;

        if !articles.is_empty() {
            self.snapshot = Some(Snapshot {
                articles: articles.clone(),
                captured_at: now,
            });
            return articles;
        }

        // An empty rebuild is never cached and never evicts last-known-good
        // data; staleness beats emptiness.
        match &self.snapshot {
            Some(snapshot) => {
                warn!(
                    count = snapshot.articles.len(),
                    "refresh produced no articles, serving stale snapshot"
                );
                snapshot.articles.clone()
            }
            None => articles,
        }
    }

    pub fn invalidate(&mut self) {
        self.snapshot = None;
    }

    pub fn captured_at(&self) -> Option<DateTime<Utc>> {
        self.snapshot.as_ref().map(|s| s.captured_at)
    }
}
