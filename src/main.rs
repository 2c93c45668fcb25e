use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use ai_news_dashboard::cache::DEFAULT_TIMEOUT_SECS;
use ai_news_dashboard::server::{self, AppState, StoreState};
use ai_news_dashboard::{
    configured_sources, Aggregator, AppConfig, CacheGate, Fetcher, SnapshotStore,
};
use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::sync::Mutex;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "ai-news-dashboard", about = "AI News Dashboard API")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the dashboard API, aggregating behind an in-process cache.
    Serve {
        #[arg(long, default_value = "0.0.0.0:8000")]
        addr: SocketAddr,
        /// Snapshot lifetime before a request triggers a re-fetch.
        #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
        cache_timeout_secs: u64,
        /// Optional frontend directory served on non-API paths.
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
    /// One aggregation run into the snapshot store. Intended to be invoked by
    /// an external scheduler (e.g. every 24 hours).
    Refresh {
        #[arg(long, default_value = "article-cache.json")]
        store_path: PathBuf,
    },
    /// Serve articles straight from the snapshot store, refreshing only if it
    /// has never been populated.
    ServeStore {
        #[arg(long, default_value = "0.0.0.0:8000")]
        addr: SocketAddr,
        #[arg(long, default_value = "article-cache.json")]
        store_path: PathBuf,
    },
}

fn build_aggregator(config: &AppConfig) -> anyhow::Result<Aggregator> {
    config.validate().context("invalid source configuration")?;
    let fetcher = Arc::new(Fetcher::new(&config.fetch)?);
    Ok(Aggregator::new(configured_sources(config, fetcher)))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = AppConfig::default();

    match cli.command {
        Command::Serve {
            addr,
            cache_timeout_secs,
            static_dir,
        } => {
            let aggregator = build_aggregator(&config)?;
            let gate = CacheGate::new(aggregator, cache_timeout_secs);
            let app = server::live_app(
                AppState {
                    gate: Mutex::new(gate),
                },
                static_dir,
            );

            info!(%addr, cache_timeout_secs, "serving dashboard API");
            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, app).await?;
        }
        Command::Refresh { store_path } => {
            let aggregator = build_aggregator(&config)?;
            let store = SnapshotStore::new(store_path);
            let snapshot = server::refresh_into(&aggregator, &store).await?;
            info!(
                store = %store.path().display(),
                count = snapshot.articles.len(),
                last_updated = snapshot.last_updated.as_deref().unwrap_or("never"),
                "refresh complete"
            );
        }
        Command::ServeStore { addr, store_path } => {
            let aggregator = build_aggregator(&config)?;
            let store = SnapshotStore::new(store_path);
            let app = server::store_app(StoreState { store, aggregator });

            info!(%addr, "serving dashboard API from snapshot store");
            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
