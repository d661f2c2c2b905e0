//! Persistent metadata store collaborators
//!
//! The cache mirrors itself into a [`MetadataStore`]. Stores are
//! best-effort by contract: the cache logs a failed save or clear and keeps
//! going, so a broken disk never takes the session down.

use crate::error::{TarponError, TarponResult};
use crate::registry::PackageMetadata;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, warn};

/// Persisted form of a single cache entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedEntry {
    /// Full cache key (registry base + package name)
    pub key: String,

    /// When the metadata was first fetched
    pub fetched_at: DateTime<Utc>,

    /// The metadata itself
    pub metadata: PackageMetadata,
}

/// Abstract persistent store behind the metadata cache
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Load every persisted entry. Called once at cache construction.
    async fn load_all(&self) -> TarponResult<Vec<CachedEntry>>;

    /// Persist one entry
    async fn save(&self, entry: &CachedEntry) -> TarponResult<()>;

    /// Remove every persisted entry
    async fn clear(&self) -> TarponResult<()>;
}

/// Filesystem store: one JSON file per entry.
///
/// File names are the hex SHA-256 of the cache key — keys embed registry
/// URLs, which are not safe as file names.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let digest = hex::encode(Sha256::digest(key.as_bytes()));
        self.dir.join(format!("{}.json", digest))
    }
}

#[async_trait]
impl MetadataStore for FileStore {
    async fn load_all(&self) -> TarponResult<Vec<CachedEntry>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        let mut dir = fs::read_dir(&self.dir)
            .await
            .map_err(|e| TarponError::io(format!("reading cache dir {}", self.dir.display()), e))?;

        while let Some(item) = dir
            .next_entry()
            .await
            .map_err(|e| TarponError::io("reading cache dir entry", e))?
        {
            let path = item.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            let content = match fs::read_to_string(&path).await {
                Ok(content) => content,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping unreadable cache file");
                    continue;
                }
            };
            match serde_json::from_str::<CachedEntry>(&content) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping corrupt cache file");
                }
            }
        }

        debug!(count = entries.len(), "Loaded persisted metadata cache");
        Ok(entries)
    }

    async fn save(&self, entry: &CachedEntry) -> TarponResult<()> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| TarponError::io(format!("creating cache dir {}", self.dir.display()), e))?;

        let path = self.entry_path(&entry.key);
        let content = serde_json::to_string(entry)?;
        fs::write(&path, content)
            .await
            .map_err(|e| TarponError::io(format!("writing cache file {}", path.display()), e))?;

        debug!(key = %entry.key, "Persisted cache entry");
        Ok(())
    }

    async fn clear(&self) -> TarponResult<()> {
        if !self.dir.exists() {
            return Ok(());
        }

        let mut dir = fs::read_dir(&self.dir)
            .await
            .map_err(|e| TarponError::io("reading cache directory", e))?;

        while let Some(item) = dir
            .next_entry()
            .await
            .map_err(|e| TarponError::io("reading cache entry", e))?
        {
            if item.path().extension().is_some_and(|ext| ext == "json") {
                fs::remove_file(item.path())
                    .await
                    .map_err(|e| TarponError::io("removing cache file", e))?;
            }
        }

        Ok(())
    }
}
