//! CLI for cam: resolve a package alias and fetch the requested versions.

use anyhow::{Context, Result};
use cam_core::catalog::Catalog;
use cam_core::config::{self, CamConfig};
use cam_core::credentials::{Credentials, PASSWORD_ENV, USERNAME_ENV};
use cam_core::error::CamError;
use cam_core::fetcher::{BatchReport, Fetcher};
use cam_core::resolver;
use cam_core::storage::StorageLayout;
use cam_core::template;
use cam_core::transport::CurlTransport;
use clap::parser::ValueSource;
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Fetch versioned Corda artifacts by package alias into a local cache.
#[derive(Debug, Parser)]
#[command(name = "cam", version)]
#[command(about = "cam: fetch Corda artifacts by alias into a local cache", long_about = None)]
#[command(
    after_help = "Logs are appended to $XDG_STATE_HOME/cam/cam.log (default ~/.local/state/cam/cam.log) and mirrored to stderr."
)]
pub struct Cli {
    /// Name or alias of the Corda package (close matches are accepted).
    pub package: String,

    /// Version to fetch; repeat for several versions.
    #[arg(short = 't', long = "test-version", required = true, value_name = "VERSION")]
    pub versions: Vec<String>,

    /// Artifactory username.
    #[arg(short = 'u', long = "corda-artifactory-username", env = USERNAME_ENV)]
    pub username: Option<String>,

    /// Artifactory password.
    #[arg(
        short = 'p',
        long = "corda-artifactory-password",
        env = PASSWORD_ENV,
        hide_env_values = true
    )]
    pub password: Option<String>,

    /// Storage root; artifacts go to <root>/<repo kind>/. Defaults to ~/corda_jars_storage.
    #[arg(short = 's', long = "corda-storage", value_name = "DIR")]
    pub storage: Option<PathBuf>,

    /// Store artifacts directly in the current directory.
    #[arg(short = 'c', long = "current-storage")]
    pub current_storage: bool,
}

pub fn run_from_args() -> Result<ExitCode> {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    // Credentials are checked before the config file is touched.
    let credentials = credentials(&cli)?;
    tracing::debug!(
        "artifactory user {} (username from {}, password from {})",
        credentials.username,
        value_origin(&matches, "username"),
        value_origin(&matches, "password")
    );

    let cfg = config::load_or_default();
    tracing::debug!("loaded config: {:?}", cfg);
    run(cli, credentials, &cfg)
}

/// Merged flag/environment credentials; a flag always beats its environment variable.
pub fn credentials(cli: &Cli) -> Result<Credentials, CamError> {
    Credentials::from_parts(cli.username.clone(), cli.password.clone())
}

/// Where clap took an argument's value from, for logging.
pub fn value_origin(matches: &ArgMatches, id: &str) -> &'static str {
    match matches.value_source(id) {
        Some(ValueSource::CommandLine) => "command line",
        Some(ValueSource::EnvVariable) => "environment",
        Some(_) => "default",
        None => "unset",
    }
}

pub fn run(cli: Cli, credentials: Credentials, cfg: &CamConfig) -> Result<ExitCode> {
    let catalog = Catalog::builtin();
    let entry = resolver::resolve(&catalog, &cli.package, &cfg.matching.options())?;
    for version in &cli.versions {
        template::validate_version(version)?;
    }

    let cwd = std::env::current_dir().context("current directory")?;
    let layout = storage_layout(&cli, cfg, &cwd)?;
    tracing::debug!("storage layout: {:?}", layout);

    let transport = CurlTransport::new(cfg.curl_options());
    let fetcher = Fetcher::new(&transport, credentials, cfg.min_artifact_bytes);
    let report = fetcher.fetch_all(entry, &cli.versions, &layout);
    Ok(ExitCode::from(exit_status(&report)))
}

/// Flat mode wins over any storage root; otherwise flag, then config, then `~/corda_jars_storage`.
pub fn storage_layout(cli: &Cli, cfg: &CamConfig, cwd: &Path) -> Result<StorageLayout> {
    if cli.current_storage {
        return Ok(StorageLayout::Flat {
            dir: cwd.to_path_buf(),
        });
    }
    let root = match &cli.storage {
        Some(root) => root.clone(),
        None => cfg.storage_root()?,
    };
    Ok(StorageLayout::Nested { root })
}

/// Undersized files are logged and removed but do not fail the run; transfer errors do.
pub fn exit_status(report: &BatchReport) -> u8 {
    if report.failed_count() > 0 {
        1
    } else {
        0
    }
}
