//! Registry access: metadata types, HTTP seam, and the cache-first fetcher

pub mod client;
pub mod http;
pub mod metadata;

pub use client::RegistryClient;
pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use metadata::{cache_key, encode_package_name, latest_url, DistInfo, PackageMetadata};

/// Default registry queried when neither flag nor config overrides it
pub const DEFAULT_REGISTRY: &str = "https://registry.npmjs.org";
