//! Error taxonomy for resolution and fetching.
//!
//! Fatal variants stop the process before (or instead of) any download;
//! the rest are per-version failures the batch loop reports and moves past.

use crate::transport::TransportError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CamError {
    /// Username or password was given neither as a flag nor in the environment.
    #[error("Please set {env} env variable or use -{flag} key")]
    MissingCredential { env: &'static str, flag: char },

    /// No alias scored above the similarity cutoff.
    #[error("Can't find {query}")]
    NotFound { query: String },

    /// Matched aliases belong to more than one catalog entry.
    #[error("Found more than 1 package using \"{query}\" name: {}", .candidates.join(", "))]
    AmbiguousMatch {
        query: String,
        candidates: Vec<String>,
    },

    /// Version string would produce an unsafe file name.
    #[error("invalid version {version:?}: {reason}")]
    InvalidVersion {
        version: String,
        reason: &'static str,
    },

    /// File on disk was below the minimum artifact size; it has been removed.
    #[error("Bad artifact file {}. Size={size}", .path.display())]
    DownloadCorrupt { path: PathBuf, size: u64 },

    #[error("download of {url} failed: {source}")]
    NetworkFailure {
        url: String,
        #[source]
        source: TransportError,
    },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CamError {
    /// Fatal errors abort the whole run; the others only fail one version.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            CamError::MissingCredential { .. }
                | CamError::NotFound { .. }
                | CamError::AmbiguousMatch { .. }
                | CamError::InvalidVersion { .. }
        )
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CamError::Io {
            path: path.into(),
            source,
        }
    }
}
