//! Registry metadata fetcher
//!
//! Cache-first access to the `/{name}/latest` endpoint. On a hit no network
//! call is made; on a miss the response is classified into the error
//! taxonomy and a success is written through to the cache before returning.

use crate::cache::MetadataCache;
use crate::error::{TarponError, TarponResult};
use crate::registry::http::HttpClient;
use crate::registry::metadata::{cache_key, latest_url, PackageMetadata, RegistryErrorBody};
use std::sync::Arc;
use tracing::debug;

/// Fetcher for package metadata, owning the session cache
pub struct RegistryClient {
    http: Arc<dyn HttpClient>,
    cache: MetadataCache,
}

impl RegistryClient {
    pub fn new(http: Arc<dyn HttpClient>, cache: MetadataCache) -> Self {
        Self { http, cache }
    }

    /// The session cache, for direct probes and the `cache` command
    pub fn cache(&self) -> &MetadataCache {
        &self.cache
    }

    /// Look up `name` in the cache without touching the network
    pub fn cached(&self, registry: &str, name: &str) -> Option<Arc<PackageMetadata>> {
        self.cache.get(&cache_key(registry, name))
    }

    /// Fetch metadata for the latest version of `name`.
    ///
    /// Cache hits return the stored entry with no side effects. Misses
    /// issue one GET and classify the outcome:
    /// - transport failure -> [`TarponError::Network`]
    /// - non-2xx -> [`TarponError::Registry`] carrying the body's `error`
    ///   field when present, else the raw status and body
    /// - 2xx that is not valid metadata -> [`TarponError::Parse`]
    ///
    /// A 2xx body that itself carries an `error` field is a registry
    /// rejection; some registries report missing packages that way.
    pub async fn fetch(&self, registry: &str, name: &str) -> TarponResult<Arc<PackageMetadata>> {
        let key = cache_key(registry, name);
        if let Some(metadata) = self.cache.get(&key) {
            debug!(name, "Metadata cache hit");
            return Ok(metadata);
        }

        let url = latest_url(registry, name);
        let response = self.http.get(&url).await?;

        if !response.is_success() {
            let message = match serde_json::from_slice::<RegistryErrorBody>(&response.body) {
                Ok(body) => body.error,
                Err(_) => format!("HTTP {}: {}", response.status, response.body_text()),
            };
            return Err(TarponError::registry(name, message));
        }

        if let Ok(body) = serde_json::from_slice::<RegistryErrorBody>(&response.body) {
            return Err(TarponError::registry(name, body.error));
        }

        let metadata: PackageMetadata = serde_json::from_slice(&response.body)
            .map_err(|e| TarponError::parse(name, e.to_string()))?;

        debug!(name, version = %metadata.version, "Fetched metadata");
        Ok(self.cache.insert(key, metadata).await)
    }
}
