//! Release archive retrieval.
//!
//! Uses the curl crate (libcurl) for a single GET into memory. Redirects are
//! followed since release hosts answer with a 302 to object storage. No retries.

use crate::checksum;
use crate::error::InstallError;
use crate::formula::PlatformTarget;
use std::time::Duration;

/// Anything that can produce the bytes behind a URL.
pub trait ArchiveSource {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, InstallError>;
}

/// Transfer limits for [`CurlSource`].
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub max_redirections: u32,
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(600),
            max_redirections: 10,
            user_agent: concat!("relay-formula/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CurlSource {
    opts: FetchOptions,
}

impl CurlSource {
    pub fn new(opts: FetchOptions) -> Self {
        Self { opts }
    }
}

impl ArchiveSource for CurlSource {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, InstallError> {
        let fail = |reason: String| InstallError::DownloadFailure {
            url: url.to_string(),
            reason,
        };
        let curl_fail = |e: curl::Error| fail(e.to_string());

        let mut body: Vec<u8> = Vec::new();
        let mut easy = curl::easy::Easy::new();
        easy.url(url).map_err(curl_fail)?;
        easy.get(true).map_err(curl_fail)?;
        easy.follow_location(true).map_err(curl_fail)?;
        easy.max_redirections(self.opts.max_redirections)
            .map_err(curl_fail)?;
        easy.useragent(&self.opts.user_agent).map_err(curl_fail)?;
        easy.connect_timeout(self.opts.connect_timeout)
            .map_err(curl_fail)?;
        easy.timeout(self.opts.timeout).map_err(curl_fail)?;

        {
            let mut transfer = easy.transfer();
            transfer
                .write_function(|data| {
                    body.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(curl_fail)?;
            transfer.perform().map_err(curl_fail)?;
        }

        let code = easy.response_code().map_err(curl_fail)?;
        if !(200..300).contains(&code) {
            return Err(fail(format!("HTTP {}", code)));
        }
        tracing::debug!(url, bytes = body.len(), "archive downloaded");
        Ok(body)
    }
}

/// Download the archive for `target` and refuse it unless its SHA-256 matches.
pub fn fetch_and_verify(
    source: &dyn ArchiveSource,
    target: &PlatformTarget,
) -> Result<Vec<u8>, InstallError> {
    tracing::info!(url = %target.url, "downloading");
    let bytes = source.fetch(&target.url)?;
    checksum::verify(&bytes, &target.checksum)?;
    Ok(bytes)
}
