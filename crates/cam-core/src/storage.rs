//! Local artifact layout and file lifecycle.
//!
//! Artifacts live at `<root>/<repo_kind>/<file_name>` by default, or directly
//! in a flat directory. Downloads land in a `.part` temp file first and are
//! renamed into place once the transfer succeeds.

use crate::catalog::RepoKind;
use crate::error::CamError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Temporary file suffix used before the rename into place.
pub const TEMP_SUFFIX: &str = ".part";

/// Where artifacts are stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageLayout {
    /// `<root>/<repo_kind>/<file_name>`.
    Nested { root: PathBuf },
    /// `<dir>/<file_name>`, usually the working directory.
    Flat { dir: PathBuf },
}

impl StorageLayout {
    pub fn dest_path(&self, repo_kind: RepoKind, file_name: &str) -> PathBuf {
        match self {
            StorageLayout::Nested { root } => root.join(repo_kind.as_str()).join(file_name),
            StorageLayout::Flat { dir } => dir.join(file_name),
        }
    }
}

/// Path for the temp file: appends `.part` to the final path (e.g. `a.jar` → `a.jar.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Creates the parent directory of `path` (and its parents). No error if it exists.
pub fn ensure_parent(path: &Path) -> Result<(), CamError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| CamError::io(parent, e))
        }
        _ => Ok(()),
    }
}

/// Size of the file at `path`, or `None` when it does not exist.
pub fn file_size(path: &Path) -> Result<Option<u64>, CamError> {
    match fs::metadata(path) {
        Ok(meta) => Ok(Some(meta.len())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(CamError::io(path, e)),
    }
}

pub fn remove(path: &Path) -> Result<(), CamError> {
    fs::remove_file(path).map_err(|e| CamError::io(path, e))
}

/// Best-effort removal for cleanup paths; a missing file is not an error.
pub fn remove_quietly(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        if e.kind() != io::ErrorKind::NotFound {
            tracing::warn!("could not remove {}: {}", path.display(), e);
        }
    }
}

/// Moves a finished temp file into place.
pub fn finalize(temp: &Path, final_path: &Path) -> Result<(), CamError> {
    fs::rename(temp, final_path).map_err(|e| CamError::io(final_path, e))
}
