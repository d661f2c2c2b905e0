//! Configuration schema for Tarpon
//!
//! Configuration is stored at `~/.config/tarpon/config.toml`

use crate::graph::DEFAULT_MAX_NODES;
use crate::registry::DEFAULT_REGISTRY;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Registry settings
    pub registry: RegistryConfig,

    /// Metadata cache settings
    pub cache: CacheConfig,

    /// Download settings
    pub download: DownloadConfig,

    /// Graph settings
    pub graph: GraphConfig,
}

/// Registry endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Registry base URL
    pub url: String,

    /// HTTP request timeout in seconds; 0 disables the timeout
    pub timeout_secs: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_REGISTRY.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Metadata cache configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache directory (defaults to the platform cache dir)
    pub dir: Option<PathBuf>,
}

/// Download configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Directory tarballs are written to (defaults to the current directory)
    pub dir: Option<PathBuf>,
}

/// Graph builder configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Maximum number of nodes admitted into a graph
    pub max_nodes: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            max_nodes: DEFAULT_MAX_NODES,
        }
    }
}
