//! Registry response types
//!
//! Serde types for the `GET {registry}/{name}/latest` endpoint, plus the
//! cache-key and URL composition helpers shared by the fetcher and the
//! download pipeline.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metadata for the latest published version of a package.
///
/// Unknown registry fields are ignored. `dependencies` is a `BTreeMap` so
/// iteration order is deterministic across runs, which keeps traversal
/// order (and therefore bounded-graph admission) reproducible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageMetadata {
    /// Package name
    pub name: String,

    /// Version this metadata describes
    pub version: String,

    /// Package description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Direct dependencies (name -> version range)
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,

    /// Distribution info (tarball location)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dist: Option<DistInfo>,
}

/// Distribution section of a metadata record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistInfo {
    /// URL of the downloadable tarball
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tarball: Option<String>,
}

impl PackageMetadata {
    /// The tarball URL, if the registry published one
    pub fn tarball_url(&self) -> Option<&str> {
        self.dist.as_ref()?.tarball.as_deref()
    }

    /// Names of the direct dependencies, in deterministic order
    pub fn dependency_names(&self) -> impl Iterator<Item = &str> {
        self.dependencies.keys().map(String::as_str)
    }
}

/// Error body some registries return alongside a failure status,
/// e.g. `{"error": "Not found"}`
#[derive(Debug, Deserialize)]
pub struct RegistryErrorBody {
    pub error: String,
}

/// Compose the cache key for a (registry, package) pair.
///
/// The `::` separator cannot appear in a registry URL path segment or a
/// package name, so the composition is unambiguous.
pub fn cache_key(registry: &str, name: &str) -> String {
    format!("{}::{}", registry.trim_end_matches('/'), name)
}

/// Compose the metadata URL for the latest version of `name`
pub fn latest_url(registry: &str, name: &str) -> String {
    format!(
        "{}/{}/latest",
        registry.trim_end_matches('/'),
        encode_package_name(name)
    )
}

/// Encode a package name for use in a URL path.
///
/// Scoped names (`@org/name`) carry a `/` that must not be read as a path
/// separator; everything else passes through unchanged.
pub fn encode_package_name(name: &str) -> String {
    if name.starts_with('@') {
        name.replacen('/', "%2F", 1)
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cache_key_strips_trailing_slash() {
        assert_eq!(
            cache_key("https://registry.npmjs.org/", "react"),
            "https://registry.npmjs.org::react"
        );
        assert_eq!(
            cache_key("https://registry.npmjs.org", "react"),
            "https://registry.npmjs.org::react"
        );
    }

    #[test]
    fn latest_url_composition() {
        assert_eq!(
            latest_url("https://registry.npmjs.org/", "react"),
            "https://registry.npmjs.org/react/latest"
        );
    }

    #[test]
    fn encode_scoped_names() {
        assert_eq!(encode_package_name("lodash"), "lodash");
        assert_eq!(encode_package_name("@babel/core"), "@babel%2Fcore");
        assert_eq!(encode_package_name("@my-org/my-pkg"), "@my-org%2Fmy-pkg");
    }

    #[test]
    fn metadata_deserializes_minimal() {
        let meta: PackageMetadata =
            serde_json::from_value(json!({"name": "tiny", "version": "1.0.0"})).unwrap();
        assert_eq!(meta.name, "tiny");
        assert!(meta.dependencies.is_empty());
        assert!(meta.tarball_url().is_none());
    }

    #[test]
    fn metadata_deserializes_full() {
        let meta: PackageMetadata = serde_json::from_value(json!({
            "name": "left-pad",
            "version": "1.3.0",
            "description": "String left pad",
            "dependencies": {"b": "^2.0.0", "a": "^1.0.0"},
            "dist": {"tarball": "https://registry.npmjs.org/left-pad/-/left-pad-1.3.0.tgz"},
            "license": "WTFPL"
        }))
        .unwrap();
        assert_eq!(meta.description.as_deref(), Some("String left pad"));
        // BTreeMap iterates name-ordered regardless of source order
        let names: Vec<&str> = meta.dependency_names().collect();
        assert_eq!(names, vec!["a", "b"]);
        assert!(meta.tarball_url().unwrap().ends_with(".tgz"));
    }
}
