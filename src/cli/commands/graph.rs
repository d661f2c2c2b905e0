//! Graph command - emit a bounded dependency graph

use crate::cli::args::{GraphArgs, GraphFormat};
use crate::cli::commands::build_client;
use crate::config::Config;
use crate::error::{TarponError, TarponResult};
use crate::graph::build_graph;
use crate::ui::{TaskSpinner, UiContext};
use tokio::fs;

/// Execute the graph command
pub async fn execute(args: GraphArgs, config: &Config, registry: &str) -> TarponResult<()> {
    let client = build_client(config).await?;
    let ctx = UiContext::detect();
    let max_nodes = args.max_nodes.unwrap_or(config.graph.max_nodes);

    // Surface a bad root before the traversal starts swallowing failures
    client.fetch(registry, &args.name).await?;

    // spinner only when the graph goes to a file; stdout stays parseable
    let mut spinner = args.output.is_some().then(|| TaskSpinner::new(&ctx));
    if let Some(spinner) = spinner.as_mut() {
        spinner.start(&format!("Building graph for {}...", args.name));
    }
    let graph = build_graph(&client, registry, &args.name, max_nodes).await;
    if let Some(spinner) = spinner.as_mut() {
        spinner.stop(&format!(
            "{} nodes, {} edges",
            graph.nodes.len(),
            graph.edges.len()
        ));
    }

    let rendered = match args.format {
        GraphFormat::Json => serde_json::to_string_pretty(&graph)?,
        GraphFormat::Dot => graph.to_dot(),
    };

    match args.output {
        Some(path) => {
            fs::write(&path, rendered)
                .await
                .map_err(|e| TarponError::io(format!("writing graph to {}", path.display()), e))?;
            println!("Wrote {}", path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
