//! Download collaborator seam
//!
//! The orchestrator hands each tarball to a [`Downloader`] and treats the
//! returned future resolving as the completion signal — exactly once per
//! request, success or failure. The shipped implementation fetches over
//! HTTP and writes into the download directory.

use crate::error::{TarponError, TarponResult};
use crate::registry::HttpClient;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tracing::debug;

/// A single tarball to retrieve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: String,
    pub filename: String,
}

/// Host download collaborator
#[async_trait]
pub trait Downloader: Send + Sync {
    /// Retrieve one artifact; resolves when the transfer has finished
    async fn request(&self, request: &DownloadRequest) -> TarponResult<()>;
}

/// Downloader that GETs the tarball and writes it under `dir`
pub struct HttpDownloader {
    http: Arc<dyn HttpClient>,
    dir: PathBuf,
}

impl HttpDownloader {
    pub fn new(http: Arc<dyn HttpClient>, dir: PathBuf) -> Self {
        Self { http, dir }
    }
}

#[async_trait]
impl Downloader for HttpDownloader {
    async fn request(&self, request: &DownloadRequest) -> TarponResult<()> {
        let response = self.http.get(&request.url).await?;
        if !response.is_success() {
            return Err(TarponError::network(
                &request.url,
                format!("HTTP {}", response.status),
            ));
        }

        fs::create_dir_all(&self.dir).await.map_err(|e| {
            TarponError::io(format!("creating download dir {}", self.dir.display()), e)
        })?;

        let path = self.dir.join(&request.filename);
        fs::write(&path, &response.body)
            .await
            .map_err(|e| TarponError::io(format!("writing {}", path.display()), e))?;

        debug!(path = %path.display(), bytes = response.body.len(), "Tarball written");
        Ok(())
    }
}

/// File name for a package tarball.
///
/// Scoped names carry a `/` that must not become a path separator.
pub fn tarball_filename(name: &str) -> String {
    format!("{}.tgz", name.replace('/', "-"))
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;
    use tempfile::TempDir;
    use tokio::sync::Semaphore;

    /// Recording downloader for orchestrator tests.
    ///
    /// Optionally fails specific URLs, and can gate every request on a
    /// semaphore so a test can hold a batch mid-flight.
    #[derive(Default)]
    pub struct RecordingDownloader {
        pub requests: Mutex<Vec<DownloadRequest>>,
        pub fail_urls: HashSet<String>,
        pub gate: Option<Arc<Semaphore>>,
    }

    impl RecordingDownloader {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn failing(urls: &[&str]) -> Self {
            Self {
                fail_urls: urls.iter().map(|u| u.to_string()).collect(),
                ..Self::default()
            }
        }

        pub fn gated(gate: Arc<Semaphore>) -> Self {
            Self {
                gate: Some(gate),
                ..Self::default()
            }
        }

        pub fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Downloader for RecordingDownloader {
        async fn request(&self, request: &DownloadRequest) -> TarponResult<()> {
            if let Some(gate) = &self.gate {
                let permit = gate.acquire().await.expect("gate closed");
                permit.forget();
            }
            self.requests.lock().unwrap().push(request.clone());
            if self.fail_urls.contains(&request.url) {
                return Err(TarponError::network(&request.url, "simulated failure"));
            }
            Ok(())
        }
    }

    #[test]
    fn tarball_filenames() {
        assert_eq!(tarball_filename("left-pad"), "left-pad.tgz");
        assert_eq!(tarball_filename("@babel/core"), "@babel-core.tgz");
    }

    #[tokio::test]
    async fn http_downloader_writes_file() {
        use crate::registry::http::tests::MockHttpClient;

        let temp = TempDir::new().unwrap();
        let http = Arc::new(
            MockHttpClient::new().reply("https://cdn.test/a-1.0.0.tgz", 200, b"tar bytes".to_vec()),
        );
        let downloader = HttpDownloader::new(http as Arc<dyn HttpClient>, temp.path().to_path_buf());

        downloader
            .request(&DownloadRequest {
                url: "https://cdn.test/a-1.0.0.tgz".into(),
                filename: "a.tgz".into(),
            })
            .await
            .unwrap();

        let written = std::fs::read(temp.path().join("a.tgz")).unwrap();
        assert_eq!(written, b"tar bytes");
    }

    #[tokio::test]
    async fn http_downloader_rejects_error_status() {
        use crate::registry::http::tests::MockHttpClient;

        let temp = TempDir::new().unwrap();
        let http =
            Arc::new(MockHttpClient::new().reply("https://cdn.test/gone.tgz", 404, Vec::new()));
        let downloader = HttpDownloader::new(http as Arc<dyn HttpClient>, temp.path().to_path_buf());

        let result = downloader
            .request(&DownloadRequest {
                url: "https://cdn.test/gone.tgz".into(),
                filename: "gone.tgz".into(),
            })
            .await;

        assert!(matches!(result, Err(TarponError::Network { .. })));
        assert!(!temp.path().join("gone.tgz").exists());
    }
}
