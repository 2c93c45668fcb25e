pub mod types;
pub mod config;
pub mod fetcher;
pub mod normalize;
pub mod sources;
pub mod aggregator;
pub mod cache;
pub mod store;
pub mod server;

pub use types::*;
pub use config::{AppConfig, FetchConfig};
pub use fetcher::Fetcher;
pub use sources::{configured_sources, FetchSource};
pub use aggregator::Aggregator;
pub use cache::CacheGate;
pub use store::{SnapshotStore, StoredSnapshot};
