//! Bounded dependency graph construction
//!
//! Same breadth-first shape as the resolver, but emits the node and edge
//! lists a renderer needs. Node admission is capped at `max_nodes`; once
//! the cap is hit the frontier keeps draining so every observed edge is
//! still recorded, including edges whose target was never admitted.
//! Consumers that require a closed graph can filter edges against `nodes`.

use crate::registry::{PackageMetadata, RegistryClient};
use serde::Serialize;
use std::collections::{HashSet, VecDeque};
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::debug;

/// Node bound used when the caller does not specify one
pub const DEFAULT_MAX_NODES: usize = 200;

/// A graph node, identified by package name
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GraphNode {
    pub id: String,
}

/// A directed dependency edge
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
}

/// Node/edge lists in discovery order, ready for a renderer
#[derive(Debug, Clone, Default, Serialize)]
pub struct DependencyGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl DependencyGraph {
    /// Render as Graphviz DOT
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph dependencies {\n");
        for node in &self.nodes {
            let _ = writeln!(out, "    \"{}\";", node.id);
        }
        for edge in &self.edges {
            let _ = writeln!(out, "    \"{}\" -> \"{}\";", edge.source, edge.target);
        }
        out.push_str("}\n");
        out
    }
}

/// Build the dependency graph rooted at `root`, admitting at most
/// `max_nodes` nodes.
///
/// The cache is probed before falling back to the fetch path — graph
/// requests usually follow a resolve over the same packages. Lookup
/// failures are swallowed; the failed node contributes no outgoing edges.
pub async fn build_graph(
    client: &RegistryClient,
    registry: &str,
    root: &str,
    max_nodes: usize,
) -> DependencyGraph {
    let mut graph = DependencyGraph::default();
    let mut admitted: HashSet<String> = HashSet::new();
    let mut frontier = VecDeque::new();

    if max_nodes == 0 {
        return graph;
    }

    admitted.insert(root.to_string());
    graph.nodes.push(GraphNode {
        id: root.to_string(),
    });
    frontier.push_back(root.to_string());

    while let Some(current) = frontier.pop_front() {
        let Some(metadata) = lookup(client, registry, &current).await else {
            continue;
        };

        for dep in metadata.dependency_names() {
            if !admitted.contains(dep) && graph.nodes.len() < max_nodes {
                admitted.insert(dep.to_string());
                graph.nodes.push(GraphNode {
                    id: dep.to_string(),
                });
                frontier.push_back(dep.to_string());
            }
            // edges are recorded unconditionally, even past the node bound
            graph.edges.push(GraphEdge {
                source: current.clone(),
                target: dep.to_string(),
            });
        }
    }

    debug!(
        root,
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "Built dependency graph"
    );
    graph
}

/// Cache-first lookup; `None` when the package cannot be fetched
async fn lookup(
    client: &RegistryClient,
    registry: &str,
    name: &str,
) -> Option<Arc<PackageMetadata>> {
    if let Some(metadata) = client.cached(registry, name) {
        return Some(metadata);
    }
    match client.fetch(registry, name).await {
        Ok(metadata) => Some(metadata),
        Err(e) => {
            debug!(name, error = %e, "Node lookup failed, no outgoing edges");
            None
        }
    }
}
