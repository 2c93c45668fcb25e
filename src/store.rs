//! Durable snapshot document for the scheduled-refresh deployment shape: a
//! JSON file holding the `articles` and `last_updated` keys, written via
//! temp-file + rename so a concurrent reader never observes a partial write.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::types::{Article, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoredSnapshot {
    #[serde(default)]
    pub articles: Vec<Article>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when the store has never been populated.
    pub fn load(&self) -> Result<Option<StoredSnapshot>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, snapshot: &StoredSnapshot) -> Result<()> {
        let raw = serde_json::to_string(snapshot)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)?;
        info!(
            path = %self.path.display(),
            count = snapshot.articles.len(),
            "snapshot stored"
        );
        Ok(())
    }
}
