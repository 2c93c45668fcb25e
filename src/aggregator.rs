use tracing::{error, info, warn};

use crate::normalize::parse_timestamp;
use crate::sources::FetchSource;
use crate::types::Article;

/// Number of leading articles echoed to the log after each sort, to make
/// source interleaving visible.
const LOG_TOP_N: usize = 5;

/// Merges every configured source into one sorted article list, isolating
/// per-source and per-record failures.
pub struct Aggregator {
    sources: Vec<(String, Box<dyn FetchSource>)>,
}

impl Aggregator {
    pub fn new(sources: Vec<(String, Box<dyn FetchSource>)>) -> Self {
        Self { sources }
    }

    /// Run every adapter in turn and fold the results. A failing adapter
    /// contributes zero articles; a record failing validation is dropped.
    /// Never errors: total failure is an empty list.
    pub async fn aggregate(&self) -> Vec<Article> {
        let mut all_articles = Vec::new();

        info!("starting global fetch");
        for (name, source) in &self.sources {
            info!(source = %name, "fetching");
            match source.fetch().await {
                Ok(articles) => {
                    let mut kept = 0usize;
                    for article in articles {
                        match article.validate() {
                            Ok(()) => {
                                all_articles.push(article);
                                kept += 1;
                            }
                            Err(e) => {
                                error!(source = %name, "validation error for article: {e}")
                            }
                        }
                    }
                    info!(source = %name, count = kept, "source fetch complete");
                }
                Err(e) => error!(source = %name, "error fetching: {e}"),
            }
        }

        sort_by_published_desc(&mut all_articles);

        for article in all_articles.iter().take(LOG_TOP_N) {
            let title: String = article.title.chars().take(30).collect();
            info!(
                "top article: {} | {} | {}...",
                article.published, article.source, title
            );
        }
        info!(total = all_articles.len(), "global fetch complete");

        all_articles
    }
}

/// Sort newest-first on the parsed canonical timestamp. If any record's
/// timestamp fails to parse, the whole batch falls back to lexicographic
/// comparison on the raw `published` string so a total order still exists.
pub fn sort_by_published_desc(articles: &mut [Article]) {
    let all_parse = articles
        .iter()
        .all(|a| parse_timestamp(&a.published).is_some());

    if all_parse {
        articles.sort_by_cached_key(|a| std::cmp::Reverse(parse_timestamp(&a.published)));
    } else {
        warn!("timestamp parse failed, falling back to string sort on published");
        articles.sort_by(|a, b| b.published.cmp(&a.published));
    }
}
