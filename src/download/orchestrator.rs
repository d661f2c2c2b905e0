//! Batch download orchestration
//!
//! A strictly sequential state machine over a list of package names:
//! `Idle -> Downloading -> {Cancelled | Completed} -> Idle`. Each iteration
//! polls the cancellation token, fetches metadata, hands the tarball to the
//! [`Downloader`], and awaits its completion signal before advancing — the
//! only suspension points are those awaits. Per-item failures are logged
//! and skipped; only cancellation ends a batch early.

use crate::download::downloader::{tarball_filename, DownloadRequest, Downloader};
use crate::error::{TarponError, TarponResult};
use crate::registry::{PackageMetadata, RegistryClient};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Progress report delivered after every processed name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadProgress {
    /// Names processed so far (downloaded or skipped)
    pub completed: usize,
    /// Batch size
    pub total: usize,
    /// Whether cancellation has been observed
    pub cancelled: bool,
}

/// Outcome of a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadSummary {
    pub completed: usize,
    pub total: usize,
    pub was_cancelled: bool,
}

/// Sequential batch downloader with cooperative cancellation
pub struct DownloadOrchestrator {
    downloader: Arc<dyn Downloader>,
    in_progress: AtomicBool,
}

impl DownloadOrchestrator {
    pub fn new(downloader: Arc<dyn Downloader>) -> Self {
        Self {
            downloader,
            in_progress: AtomicBool::new(false),
        }
    }

    /// Download every named package's tarball, in order.
    ///
    /// The token is polled once per iteration, before any work for that
    /// name: cancellation never aborts the in-flight transfer, it only
    /// prevents the next one from starting. `on_progress` fires after each
    /// processed name and once more if cancellation cuts the batch short.
    ///
    /// A second batch started while one is running is rejected with
    /// [`TarponError::DownloadInProgress`].
    pub async fn download_all(
        &self,
        client: &RegistryClient,
        registry: &str,
        names: &[String],
        cancel: &CancellationToken,
        mut on_progress: impl FnMut(&DownloadProgress),
    ) -> TarponResult<DownloadSummary> {
        if self
            .in_progress
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(TarponError::DownloadInProgress);
        }

        let total = names.len();
        let mut completed = 0;

        for name in names {
            if cancel.is_cancelled() {
                info!(completed, total, "Batch cancelled");
                on_progress(&DownloadProgress {
                    completed,
                    total,
                    cancelled: true,
                });
                self.in_progress.store(false, Ordering::SeqCst);
                return Ok(DownloadSummary {
                    completed,
                    total,
                    was_cancelled: true,
                });
            }

            if let Err(e) = self.process(client, registry, name).await {
                warn!(name, error = %e, "Skipping package");
            }
            completed += 1;
            on_progress(&DownloadProgress {
                completed,
                total,
                cancelled: false,
            });
        }

        info!(completed, total, "Batch complete");
        self.in_progress.store(false, Ordering::SeqCst);
        Ok(DownloadSummary {
            completed,
            total,
            was_cancelled: false,
        })
    }

    /// Fetch one package's metadata and download its tarball
    async fn process(&self, client: &RegistryClient, registry: &str, name: &str) -> TarponResult<()> {
        let metadata = client.fetch(registry, name).await?;
        let url = metadata
            .tarball_url()
            .ok_or_else(|| TarponError::MissingArtifact(name.to_string()))?;

        let request = DownloadRequest {
            url: url.to_string(),
            filename: tarball_filename(name),
        };
        self.downloader.request(&request).await?;
        debug!(name, "Downloaded");
        Ok(())
    }

    /// Queue a single package's tarball download.
    ///
    /// Fails fast when the metadata has no tarball URL; otherwise the
    /// request is handed off and this returns once it is accepted, without
    /// waiting for the transfer to finish.
    pub fn download_one(&self, metadata: &PackageMetadata, name: &str) -> TarponResult<()> {
        let url = metadata
            .tarball_url()
            .ok_or_else(|| TarponError::MissingArtifact(name.to_string()))?;

        let request = DownloadRequest {
            url: url.to_string(),
            filename: tarball_filename(name),
        };
        let downloader = Arc::clone(&self.downloader);
        let name = name.to_string();
        tokio::spawn(async move {
            if let Err(e) = downloader.request(&request).await {
                error!(name, error = %e, "Download failed");
            }
        });
        Ok(())
    }
}
