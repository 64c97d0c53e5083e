//! Ensures a resolved artifact version is present in local storage.
//!
//! A file already on disk is a cache hit and never touches the network.
//! Anything below the minimum artifact size is treated as a corrupt download
//! and deleted, whether it was just fetched or was already there.

use crate::catalog::ArtifactEntry;
use crate::credentials::Credentials;
use crate::error::CamError;
use crate::storage::{self, StorageLayout};
use crate::template;
use crate::transport::Transport;
use std::path::{Path, PathBuf};

/// Files smaller than this are treated as truncated or error pages.
pub const DEFAULT_MIN_ARTIFACT_BYTES: u64 = 1000;

/// How an artifact ended up on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    CacheHit { path: PathBuf, size: u64 },
    Downloaded { path: PathBuf, size: u64 },
}

impl FetchOutcome {
    pub fn path(&self) -> &Path {
        match self {
            FetchOutcome::CacheHit { path, .. } | FetchOutcome::Downloaded { path, .. } => path,
        }
    }
}

/// Per-version results of a batch, in request order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub results: Vec<(String, Result<FetchOutcome, CamError>)>,
}

impl BatchReport {
    /// Versions removed for being undersized.
    pub fn corrupt_count(&self) -> usize {
        self.results
            .iter()
            .filter(|(_, r)| matches!(r, Err(CamError::DownloadCorrupt { .. })))
            .count()
    }

    /// Versions that failed for any reason other than the size check.
    pub fn failed_count(&self) -> usize {
        self.results
            .iter()
            .filter(|(_, r)| matches!(r, Err(e) if !matches!(e, CamError::DownloadCorrupt { .. })))
            .count()
    }

    pub fn ok_count(&self) -> usize {
        self.results.iter().filter(|(_, r)| r.is_ok()).count()
    }
}

pub struct Fetcher<'t, T: Transport + ?Sized> {
    transport: &'t T,
    credentials: Credentials,
    min_size: u64,
}

impl<'t, T: Transport + ?Sized> Fetcher<'t, T> {
    pub fn new(transport: &'t T, credentials: Credentials, min_size: u64) -> Self {
        Self {
            transport,
            credentials,
            min_size,
        }
    }

    /// Makes sure `entry` at `version` exists under `layout` and is at least the minimum size.
    pub fn fetch(
        &self,
        entry: &ArtifactEntry,
        version: &str,
        layout: &StorageLayout,
    ) -> Result<FetchOutcome, CamError> {
        template::validate_version(version)?;
        let file_name = entry.file_name(version);
        let dest = layout.dest_path(entry.repo_kind, &file_name);
        storage::ensure_parent(&dest)?;

        tracing::debug!("Check if {} is here", file_name);
        let downloaded = match storage::file_size(&dest)? {
            Some(_) => false,
            None => {
                let url = entry.url(version);
                tracing::info!(url = %url, "Download {}", file_name);
                self.download(&url, &dest)?;
                true
            }
        };

        let size = storage::file_size(&dest)?.unwrap_or(0);
        if size < self.min_size {
            storage::remove(&dest)?;
            return Err(CamError::DownloadCorrupt { path: dest, size });
        }

        Ok(if downloaded {
            FetchOutcome::Downloaded { path: dest, size }
        } else {
            FetchOutcome::CacheHit { path: dest, size }
        })
    }

    /// Fetches each version in order. A failed version is logged and the next one is tried.
    pub fn fetch_all<S: AsRef<str>>(
        &self,
        entry: &ArtifactEntry,
        versions: &[S],
        layout: &StorageLayout,
    ) -> BatchReport {
        let mut report = BatchReport::default();
        for version in versions {
            let version = version.as_ref();
            let result = self.fetch(entry, version, layout);
            match &result {
                Ok(FetchOutcome::CacheHit { path, size }) => {
                    tracing::info!(version, size, "already present: {}", path.display());
                }
                Ok(FetchOutcome::Downloaded { path, size }) => {
                    tracing::info!(version, size, "saved {}", path.display());
                }
                Err(e) => tracing::error!(version, "{}", e),
            }
            report.results.push((version.to_string(), result));
        }
        tracing::info!(
            ok = report.ok_count(),
            corrupt = report.corrupt_count(),
            failed = report.failed_count(),
            "finished {} version(s)",
            report.results.len()
        );
        report
    }

    /// GET into `<dest>.part`, then rename into place. The temp file never outlives a failure.
    fn download(&self, url: &str, dest: &Path) -> Result<u64, CamError> {
        let part = storage::temp_path(dest);
        match self.transport.download(url, &self.credentials, &part) {
            Ok(n) => {
                storage::finalize(&part, dest)?;
                Ok(n)
            }
            Err(source) => {
                storage::remove_quietly(&part);
                Err(CamError::NetworkFailure {
                    url: url.to_string(),
                    source,
                })
            }
        }
    }
}
