//! Cache command - inspect and clear the metadata cache

use crate::cache::CacheSnapshotRow;
use crate::cli::args::{CacheAction, CacheArgs, OutputFormat};
use crate::cli::commands::build_client;
use crate::config::{cache_dir, Config};
use crate::error::TarponResult;
use console::style;

/// Execute the cache command
pub async fn execute(args: CacheArgs, config: &Config) -> TarponResult<()> {
    match args.action {
        CacheAction::List { format } => list_entries(config, format).await,
        CacheAction::Clear { yes } => clear(config, yes).await,
        CacheAction::Path => {
            println!("{}", cache_dir(config).display());
            Ok(())
        }
    }
}

/// List cached metadata entries
async fn list_entries(config: &Config, format: OutputFormat) -> TarponResult<()> {
    let client = build_client(config).await?;
    let rows = client.cache().snapshot();

    if rows.is_empty() {
        println!("Cache is empty.");
        return Ok(());
    }

    match format {
        OutputFormat::Table => print_table(&rows),
        OutputFormat::Json => print_json(&rows)?,
    }

    Ok(())
}

fn print_table(rows: &[CacheSnapshotRow]) {
    println!("{:<32} {:<12} {:<20}", "PACKAGE", "VERSION", "FETCHED");
    println!("{}", "-".repeat(64));

    for row in rows {
        let fetched = row.fetched_at.format("%Y-%m-%d %H:%M").to_string();
        println!("{:<32} {:<12} {:<20}", row.name, row.version, fetched);
    }

    println!();
    println!("Total: {} entr{}", rows.len(), if rows.len() == 1 { "y" } else { "ies" });
}

fn print_json(rows: &[CacheSnapshotRow]) -> TarponResult<()> {
    #[derive(serde::Serialize)]
    struct RowJson<'a> {
        key: &'a str,
        name: &'a str,
        version: &'a str,
        fetched_at: String,
    }

    let rows: Vec<RowJson> = rows
        .iter()
        .map(|row| RowJson {
            key: &row.key,
            name: &row.name,
            version: &row.version,
            fetched_at: row.fetched_at.to_rfc3339(),
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

/// Clear both cache layers
async fn clear(config: &Config, yes: bool) -> TarponResult<()> {
    if !yes {
        println!(
            "{} this removes every cached metadata entry. Re-run with --yes to confirm.",
            style("Refusing:").yellow()
        );
        return Ok(());
    }

    let client = build_client(config).await?;
    let count = client.cache().len();
    client.cache().clear().await;
    println!("{} cleared {} entr{}", style("Done:").green(), count, if count == 1 { "y" } else { "ies" });
    Ok(())
}
