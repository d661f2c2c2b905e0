//! Tarball download pipeline: collaborator seam and batch orchestration

pub mod downloader;
pub mod orchestrator;

pub use downloader::{tarball_filename, DownloadRequest, Downloader, HttpDownloader};
pub use orchestrator::{DownloadOrchestrator, DownloadProgress, DownloadSummary};
