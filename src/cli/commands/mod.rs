//! CLI command implementations

pub mod cache;
pub mod config;
pub mod download;
pub mod graph;
pub mod info;
pub mod resolve;

pub use cache::execute as cache;
pub use config::execute as config;
pub use download::execute as download;
pub use graph::execute as graph;
pub use info::execute as info;
pub use resolve::execute as resolve;

use crate::cache::{FileStore, MetadataCache, MetadataStore};
use crate::config::{cache_dir, Config};
use crate::error::TarponResult;
use crate::registry::{HttpClient, RegistryClient, ReqwestClient};
use std::sync::Arc;

/// Wire up the HTTP client, persistent store, and cache for a command
pub(crate) async fn build_client(config: &Config) -> TarponResult<RegistryClient> {
    let http = Arc::new(ReqwestClient::new(config.registry.timeout_secs)?) as Arc<dyn HttpClient>;
    let store = Arc::new(FileStore::new(cache_dir(config))) as Arc<dyn MetadataStore>;
    let cache = MetadataCache::load(store).await;
    Ok(RegistryClient::new(http, cache))
}
