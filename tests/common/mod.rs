//! Shared fixtures for the integration tests: canned and scripted sources
//! standing in for the network-bound adapters.

// Each test binary uses a different subset of these fixtures.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use ai_news_dashboard::sources::FetchSource;
use ai_news_dashboard::types::{Article, FetchError, Result};
use async_trait::async_trait;

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .try_init()
            .ok();
    });
}

pub fn article(id: &str, source: &str, published: &str) -> Article {
    Article {
        id: id.to_string(),
        title: format!("title {id}"),
        summary: "summary".to_string(),
        link: format!("https://example.com/{id}"),
        published: published.to_string(),
        source: source.to_string(),
        tags: vec![],
        saved: false,
    }
}

/// Always returns the same articles.
pub struct StaticSource {
    pub articles: Vec<Article>,
}

#[async_trait]
impl FetchSource for StaticSource {
    async fn fetch(&self) -> Result<Vec<Article>> {
        Ok(self.articles.clone())
    }
}

/// Always fails, simulating a dead upstream.
pub struct FailingSource;

#[async_trait]
impl FetchSource for FailingSource {
    async fn fetch(&self) -> Result<Vec<Article>> {
        Err(FetchError::Feed("simulated upstream outage".to_string()))
    }
}

/// Returns one scripted batch per call (empty once the script runs out) and
/// counts how often it was invoked.
pub struct ScriptedSource {
    calls: Arc<AtomicUsize>,
    batches: Arc<Mutex<VecDeque<Vec<Article>>>>,
}

impl ScriptedSource {
    pub fn new(batches: Vec<Vec<Article>>) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = Self {
            calls: calls.clone(),
            batches: Arc::new(Mutex::new(batches.into())),
        };
        (source, calls)
    }
}

#[async_trait]
impl FetchSource for ScriptedSource {
    async fn fetch(&self) -> Result<Vec<Article>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let batch = self.batches.lock().unwrap().pop_front().unwrap_or_default();
        Ok(batch)
    }
}

pub fn call_count(calls: &Arc<AtomicUsize>) -> usize {
    calls.load(Ordering::SeqCst)
}
