//! Info command - show a package's latest metadata

use crate::cli::args::InfoArgs;
use crate::cli::commands::build_client;
use crate::config::Config;
use crate::error::TarponResult;
use crate::ui::{TaskSpinner, UiContext};
use console::style;

/// Execute the info command
pub async fn execute(args: InfoArgs, config: &Config, registry: &str) -> TarponResult<()> {
    let client = build_client(config).await?;
    let ctx = UiContext::detect();

    // keep stdout clean for --json consumers
    if args.json {
        let metadata = client.fetch(registry, &args.name).await?;
        println!("{}", serde_json::to_string_pretty(&*metadata)?);
        return Ok(());
    }

    let mut spinner = TaskSpinner::new(&ctx);
    spinner.start(&format!("Fetching {}...", args.name));
    let metadata = match client.fetch(registry, &args.name).await {
        Ok(metadata) => {
            spinner.stop(&format!("{} {}", metadata.name, metadata.version));
            metadata
        }
        Err(e) => {
            spinner.stop_error(&format!("Failed to fetch {}", args.name));
            return Err(e);
        }
    };

    if let Some(description) = &metadata.description {
        println!("{}", style(description).dim());
    }
    println!();
    println!(
        "{} ({})",
        style("Dependencies").bold(),
        metadata.dependencies.len()
    );
    if metadata.dependencies.is_empty() {
        println!("  {}", style("none").dim());
    }
    for (name, range) in &metadata.dependencies {
        println!("  {:<32} {}", name, style(range).dim());
    }

    match metadata.tarball_url() {
        Some(url) => println!("\n{} {}", style("Tarball:").bold(), url),
        None => println!("\n{}", style("No tarball published").yellow()),
    }

    Ok(())
}
