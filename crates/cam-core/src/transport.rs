//! Authenticated HTTP GET into a local file.
//!
//! The fetcher only depends on the [`Transport`] trait; [`CurlTransport`] is the
//! libcurl implementation used by the binary.

use crate::credentials::Credentials;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Failure of a single GET.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Curl reported an error (timeout, connection, TLS, etc.).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// HTTP response had a non-2xx status.
    #[error("HTTP {0}")]
    Status(u32),
    /// Writing the body to disk failed.
    #[error("write: {0}")]
    Write(#[source] std::io::Error),
}

/// Downloads `url` with basic auth, writing the full body to `dest`.
/// Returns the number of bytes written.
pub trait Transport {
    fn download(&self, url: &str, credentials: &Credentials, dest: &Path)
        -> Result<u64, TransportError>;
}

/// Timeouts applied to every request.
#[derive(Debug, Clone, Copy)]
pub struct CurlOptions {
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

impl Default for CurlOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            timeout: Duration::from_secs(3600),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CurlTransport {
    options: CurlOptions,
}

impl CurlTransport {
    pub fn new(options: CurlOptions) -> Self {
        Self { options }
    }
}

impl Transport for CurlTransport {
    fn download(
        &self,
        url: &str,
        credentials: &Credentials,
        dest: &Path,
    ) -> Result<u64, TransportError> {
        let file = File::create(dest).map_err(TransportError::Write)?;
        let mut out = BufWriter::new(file);
        let mut written: u64 = 0;
        let mut write_err: Option<std::io::Error> = None;

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.username(&credentials.username)?;
        easy.password(&credentials.password)?;
        let mut auth = curl::easy::Auth::new();
        auth.basic(true);
        easy.http_auth(&auth)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.options.connect_timeout)?;
        easy.low_speed_limit(1024)?;
        easy.low_speed_time(Duration::from_secs(60))?;
        easy.timeout(self.options.timeout)?;

        let performed = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| match out.write_all(data) {
                Ok(()) => {
                    written += data.len() as u64;
                    Ok(data.len())
                }
                Err(e) => {
                    write_err = Some(e);
                    Ok(0) // abort transfer
                }
            })?;
            transfer.perform()
        };

        if let Some(e) = write_err {
            return Err(TransportError::Write(e));
        }
        performed?;

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(TransportError::Status(code));
        }

        out.flush().map_err(TransportError::Write)?;
        Ok(written)
    }
}
