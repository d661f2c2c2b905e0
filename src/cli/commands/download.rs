//! Download command - batch-download tarballs with progress and Ctrl-C

use crate::cli::args::DownloadArgs;
use crate::cli::commands::build_client;
use crate::config::{download_dir, Config};
use crate::download::{DownloadOrchestrator, Downloader, HttpDownloader};
use crate::error::TarponResult;
use crate::registry::{HttpClient, ReqwestClient};
use crate::resolver::resolve_transitive;
use crate::ui::{BatchProgress, TaskSpinner, UiContext};
use console::style;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Execute the download command
pub async fn execute(args: DownloadArgs, config: &Config, registry: &str) -> TarponResult<()> {
    let client = build_client(config).await?;
    let ctx = UiContext::detect();

    // Root failures surface; everything after is best-effort
    let root = client.fetch(registry, &args.name).await?;

    let mut names = vec![args.name.clone()];
    if args.deps {
        names.extend(root.dependency_names().map(str::to_string));
    } else if args.recursive {
        let mut spinner = TaskSpinner::new(&ctx);
        spinner.start("Resolving dependency graph...");
        let set = resolve_transitive(&client, registry, &args.name).await;
        spinner.stop(&format!("{} packages to download", set.len() + 1));
        names.extend(set.into_vec());
    }

    let dir = args.dir.unwrap_or_else(|| download_dir(config));
    debug!(dir = %dir.display(), count = names.len(), "Starting batch download");

    let http = Arc::new(ReqwestClient::new(config.registry.timeout_secs)?) as Arc<dyn HttpClient>;
    let downloader = Arc::new(HttpDownloader::new(http, dir)) as Arc<dyn Downloader>;
    let orchestrator = DownloadOrchestrator::new(downloader);

    // Ctrl-C requests cooperative cancellation: the in-flight download
    // finishes, the next one never starts.
    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!(
                "\n{} finishing current download, then stopping",
                style("Cancelling:").yellow()
            );
            signal_cancel.cancel();
        }
    });

    let bar = BatchProgress::new(&ctx, names.len());
    let summary = orchestrator
        .download_all(&client, registry, &names, &cancel, |progress| {
            bar.on_progress(progress)
        })
        .await?;
    bar.finish();

    if summary.was_cancelled {
        println!(
            "{} downloaded {} of {} packages",
            style("Cancelled:").yellow(),
            summary.completed,
            summary.total
        );
    } else {
        println!(
            "{} {} package(s) processed",
            style("Done:").green(),
            summary.completed
        );
    }

    Ok(())
}
