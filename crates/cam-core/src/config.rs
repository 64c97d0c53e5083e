use crate::fetcher::DEFAULT_MIN_ARTIFACT_BYTES;
use crate::resolver::MatchOptions;
use crate::transport::CurlOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Directory name under the home directory used when no storage root is configured.
pub const DEFAULT_STORAGE_DIR: &str = "corda_jars_storage";

/// Alias matching parameters (optional `[matching]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Maximum number of close aliases considered.
    pub limit: usize,
    /// Similarity cutoff in `[0, 1]`.
    pub cutoff: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        let opts = MatchOptions::default();
        Self {
            limit: opts.limit,
            cutoff: opts.cutoff,
        }
    }
}

impl MatchingConfig {
    pub fn options(&self) -> MatchOptions {
        MatchOptions {
            limit: self.limit.max(1),
            // NaN survives clamp and would reject every alias.
            cutoff: if self.cutoff.is_finite() {
                self.cutoff.clamp(0.0, 1.0)
            } else {
                MatchOptions::default().cutoff
            },
        }
    }
}

/// Global configuration loaded from `~/.config/cam/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CamConfig {
    /// Root of the artifact cache; `~/corda_jars_storage` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_root: Option<PathBuf>,
    /// Files smaller than this many bytes are treated as corrupt and removed.
    pub min_artifact_bytes: u64,
    /// Connect timeout for the artifact repository.
    pub connect_timeout_secs: u64,
    /// Overall per-download timeout.
    pub timeout_secs: u64,
    #[serde(default)]
    pub matching: MatchingConfig,
}

impl Default for CamConfig {
    fn default() -> Self {
        let curl = CurlOptions::default();
        Self {
            storage_root: None,
            min_artifact_bytes: DEFAULT_MIN_ARTIFACT_BYTES,
            connect_timeout_secs: curl.connect_timeout.as_secs(),
            timeout_secs: curl.timeout.as_secs(),
            matching: MatchingConfig::default(),
        }
    }
}

impl CamConfig {
    pub fn curl_options(&self) -> CurlOptions {
        CurlOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    /// Configured storage root, else `<home>/corda_jars_storage`.
    pub fn storage_root(&self) -> Result<PathBuf> {
        match &self.storage_root {
            Some(root) => Ok(root.clone()),
            None => default_storage_root(),
        }
    }
}

pub fn default_storage_root() -> Result<PathBuf> {
    let dirs = directories::BaseDirs::new().context("could not determine home directory")?;
    Ok(dirs.home_dir().join(DEFAULT_STORAGE_DIR))
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("cam")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<CamConfig> {
    load_or_init_at(&config_path()?)
}

pub fn load_or_init_at(path: &Path) -> Result<CamConfig> {
    if !path.exists() {
        let default_cfg = CamConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: CamConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

/// Like [`load_or_init`], but never fails: problems are logged and defaults used.
pub fn load_or_default() -> CamConfig {
    match load_or_init() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!("using default config: {:#}", e);
            CamConfig::default()
        }
    }
}
