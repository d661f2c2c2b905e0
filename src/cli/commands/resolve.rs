//! Resolve command - expand a package's transitive dependency set

use crate::cli::args::ResolveArgs;
use crate::cli::commands::build_client;
use crate::config::Config;
use crate::error::TarponResult;
use crate::resolver::resolve_transitive;
use crate::ui::{TaskSpinner, UiContext};
use console::style;

/// Execute the resolve command
pub async fn execute(args: ResolveArgs, config: &Config, registry: &str) -> TarponResult<()> {
    let client = build_client(config).await?;
    let ctx = UiContext::detect();

    // The root lookup is the one failure the user must see; traversal
    // failures past it degrade to "no dependencies" per package.
    client.fetch(registry, &args.name).await?;

    if args.json {
        let set = resolve_transitive(&client, registry, &args.name).await;
        let names: Vec<&str> = set.iter().collect();
        println!("{}", serde_json::to_string_pretty(&names)?);
        return Ok(());
    }

    let mut spinner = TaskSpinner::new(&ctx);
    spinner.start(&format!("Resolving dependencies of {}...", args.name));
    let set = resolve_transitive(&client, registry, &args.name).await;
    spinner.stop(&format!("{} transitive dependencies", set.len()));

    if set.is_empty() {
        println!("{}", style("No dependencies").dim());
        return Ok(());
    }
    for name in set.iter() {
        println!("{}", name);
    }

    Ok(())
}
