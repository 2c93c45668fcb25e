//! HTTP layer for both deployment shapes. The interactive app checks the
//! cache gate inside the request handler; the store-backed app is a pure read
//! of the durable snapshot, refreshing on demand only when the store has
//! never been populated.

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::{error, info};

use crate::aggregator::Aggregator;
use crate::cache::CacheGate;
use crate::normalize::now_timestamp;
use crate::store::{SnapshotStore, StoredSnapshot};
use crate::types::ArticleList;

pub struct AppState {
    pub gate: Mutex<CacheGate>,
}

/// Request-driven shape: gate check happens synchronously inside the handler.
pub fn live_app(state: AppState, static_dir: Option<PathBuf>) -> Router {
    let mut app = Router::new()
        .route("/api/articles", get(get_articles))
        .with_state(Arc::new(state));
    if let Some(dir) = static_dir {
        // Dashboard frontend passthrough, nothing of the pipeline lives here.
        app = app.fallback_service(ServeDir::new(dir));
    }
    app.layer(CorsLayer::permissive())
}

async fn get_articles(State(state): State<Arc<AppState>>) -> Json<ArticleList> {
    let articles = state.gate.lock().await.get(Utc::now()).await;
    Json(ArticleList { articles })
}

pub struct StoreState {
    pub store: SnapshotStore,
    pub aggregator: Aggregator,
}

#[derive(Debug, Serialize)]
pub struct StoreResponse {
    pub articles: Vec<crate::types::Article>,
    pub last_updated: Option<String>,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Timer-driven shape: serve whatever the scheduled job last stored.
pub fn store_app(state: StoreState) -> Router {
    Router::new()
        .route("/api/articles", get(get_stored_articles))
        .with_state(Arc::new(state))
        .layer(CorsLayer::permissive())
}

async fn get_stored_articles(
    State(state): State<Arc<StoreState>>,
) -> Result<Json<StoreResponse>, (StatusCode, String)> {
    let snapshot = match state.store.load().map_err(internal)? {
        Some(snapshot) => snapshot,
        None => {
            // Never populated: one synchronous on-demand refresh.
            info!("no stored snapshot found, running initial refresh");
            refresh_into(&state.aggregator, &state.store)
                .await
                .map_err(internal)?
        }
    };

    if snapshot.articles.is_empty() && snapshot.last_updated.is_none() {
        return Ok(Json(StoreResponse {
            articles: Vec::new(),
            last_updated: None,
            count: 0,
            error: Some("Initial refresh in progress. Try again shortly.".to_string()),
        }));
    }

    let count = snapshot.articles.len();
    Ok(Json(StoreResponse {
        articles: snapshot.articles,
        last_updated: snapshot.last_updated,
        count,
        error: None,
    }))
}

fn internal(e: crate::types::FetchError) -> (StatusCode, String) {
    error!("store error: {e}");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

/// One scheduled-job run: aggregate everything and persist the result. An
/// empty aggregation never overwrites a populated store.
pub async fn refresh_into(
    aggregator: &Aggregator,
    store: &SnapshotStore,
) -> crate::types::Result<StoredSnapshot> {
    let articles = aggregator.aggregate().await;

    if articles.is_empty() {
        if let Some(existing) = store.load()? {
            if !existing.articles.is_empty() {
                tracing::warn!("refresh produced no articles, keeping stored snapshot");
                return Ok(existing);
            }
        }
        // Nothing to serve and nothing worth persisting.
        tracing::warn!("refresh produced no articles and the store is empty");
        return Ok(StoredSnapshot::default());
    }

    let snapshot = StoredSnapshot {
        articles,
        last_updated: Some(now_timestamp()),
    };
    store.save(&snapshot)?;
    Ok(snapshot)
}
