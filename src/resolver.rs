//! Transitive dependency resolution
//!
//! Breadth-first expansion of a root package into the flat set of every
//! package name reachable through dependency edges. A name is enqueued at
//! most once, so traversal terminates even over cyclic metadata, and a
//! package whose lookup fails simply contributes no further names.

use crate::registry::RegistryClient;
use std::collections::{HashSet, VecDeque};
use tracing::debug;

/// Set of package names in insertion (BFS discovery) order
#[derive(Debug, Default, Clone)]
pub struct DependencySet {
    names: Vec<String>,
    index: HashSet<String>,
}

impl DependencySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a name; returns false if it was already present
    pub fn insert(&mut self, name: &str) -> bool {
        if !self.index.insert(name.to_string()) {
            return false;
        }
        self.names.push(name.to_string());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains(name)
    }

    fn remove(&mut self, name: &str) {
        if self.index.remove(name) {
            self.names.retain(|n| n != name);
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names in discovery order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.names
    }
}

/// Resolve the transitive dependency set of `root`, excluding `root`.
///
/// Lookup failures for individual packages are swallowed: the package is
/// kept in the set (it was reachable) but expands to nothing. Callers that
/// want the root's own failure surfaced fetch it first; see the `resolve`
/// command.
pub async fn resolve_transitive(
    client: &RegistryClient,
    registry: &str,
    root: &str,
) -> DependencySet {
    let mut seen = DependencySet::new();
    let mut frontier = VecDeque::new();

    seen.insert(root);
    frontier.push_back(root.to_string());

    while let Some(current) = frontier.pop_front() {
        for dep in expand(client, registry, &current).await {
            if seen.insert(&dep) {
                frontier.push_back(dep);
            }
        }
    }

    seen.remove(root);
    debug!(root, count = seen.len(), "Resolved transitive dependencies");
    seen
}

/// Direct dependency names of `name`, or empty when the lookup fails.
///
/// The traversal must never unwind on a broken package, so the failure is
/// folded into "no dependencies" here.
async fn expand(client: &RegistryClient, registry: &str, name: &str) -> Vec<String> {
    match client.fetch(registry, name).await {
        Ok(metadata) => metadata.dependency_names().map(str::to_string).collect(),
        Err(e) => {
            debug!(name, error = %e, "Skipping unexpandable package");
            Vec::new()
        }
    }
}
