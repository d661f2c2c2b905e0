//! Session metadata cache
//!
//! Key-value store mapping `(registry, package name)` to fetched metadata.
//! Entries are written once per session and never overwritten; the only way
//! to drop them is an explicit [`MetadataCache::clear`]. A pluggable
//! [`MetadataStore`] mirrors the map across runs, best-effort.
//!
//! All fetches run serialized on one logical task, so at most one request
//! is ever in flight for a key; the mutex here only guards the map across
//! await points and is never held during I/O.

pub mod store;

pub use store::{CachedEntry, FileStore, MetadataStore};

use crate::registry::PackageMetadata;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// One in-memory cache record
#[derive(Clone)]
struct CacheRecord {
    metadata: Arc<PackageMetadata>,
    fetched_at: DateTime<Utc>,
}

/// Row returned by [`MetadataCache::snapshot`] for display
#[derive(Debug, Clone)]
pub struct CacheSnapshotRow {
    pub key: String,
    pub name: String,
    pub version: String,
    pub fetched_at: DateTime<Utc>,
}

/// In-memory metadata cache mirrored to a persistent store
pub struct MetadataCache {
    entries: Mutex<HashMap<String, CacheRecord>>,
    store: Arc<dyn MetadataStore>,
}

impl MetadataCache {
    /// Create a cache and hydrate it from the store.
    ///
    /// A store that fails to load yields an empty cache and a warning; the
    /// session still works, it just refetches.
    pub async fn load(store: Arc<dyn MetadataStore>) -> Self {
        let mut entries = HashMap::new();
        match store.load_all().await {
            Ok(persisted) => {
                for entry in persisted {
                    entries.entry(entry.key).or_insert(CacheRecord {
                        metadata: Arc::new(entry.metadata),
                        fetched_at: entry.fetched_at,
                    });
                }
            }
            Err(e) => warn!(error = %e, "Failed to load persisted metadata cache"),
        }
        debug!(count = entries.len(), "Metadata cache ready");
        Self {
            entries: Mutex::new(entries),
            store,
        }
    }

    /// Look up a cached entry
    pub fn get(&self, key: &str) -> Option<Arc<PackageMetadata>> {
        self.entries
            .lock()
            .unwrap()
            .get(key)
            .map(|record| Arc::clone(&record.metadata))
    }

    /// Insert a freshly fetched entry and mirror it to the store.
    ///
    /// First write wins: if the key is already present the existing entry
    /// is returned untouched. The store save is best-effort — a failure is
    /// logged and the in-memory entry stands.
    pub async fn insert(&self, key: String, metadata: PackageMetadata) -> Arc<PackageMetadata> {
        let (record, fresh) = {
            let mut entries = self.entries.lock().unwrap();
            match entries.get(&key) {
                Some(existing) => (existing.clone(), false),
                None => {
                    let record = CacheRecord {
                        metadata: Arc::new(metadata),
                        fetched_at: Utc::now(),
                    };
                    entries.insert(key.clone(), record.clone());
                    (record, true)
                }
            }
        };

        if fresh {
            let entry = CachedEntry {
                key: key.clone(),
                fetched_at: record.fetched_at,
                metadata: (*record.metadata).clone(),
            };
            if let Err(e) = self.store.save(&entry).await {
                warn!(key = %key, error = %e, "Failed to persist cache entry");
            }
        }

        record.metadata
    }

    /// Drop every entry, in-memory first, then the persistent mirror.
    ///
    /// The in-memory map is emptied before the store clear is issued, so no
    /// subsequent `get` can observe stale data while the store catches up.
    /// A store failure is logged, never propagated.
    pub async fn clear(&self) {
        self.entries.lock().unwrap().clear();
        if let Err(e) = self.store.clear().await {
            warn!(error = %e, "Failed to clear persistent cache store");
        }
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the cache for display, ordered by key
    pub fn snapshot(&self) -> Vec<CacheSnapshotRow> {
        let mut rows: Vec<CacheSnapshotRow> = self
            .entries
            .lock()
            .unwrap()
            .iter()
            .map(|(key, record)| CacheSnapshotRow {
                key: key.clone(),
                name: record.metadata.name.clone(),
                version: record.metadata.version.clone(),
                fetched_at: record.fetched_at,
            })
            .collect();
        rows.sort_by(|a, b| a.key.cmp(&b.key));
        rows
    }
}
