//! Module byte acquisition.
//!
//! Resolves a [`PluginSource`] to raw module bytes: HTTP(S) download for
//! remote sources, filesystem read for local ones, passthrough for inline
//! bytes. Sources carrying a blake3 pin are verified before the bytes are
//! handed to the runtime.

use std::time::Duration;

use crate::error::{HostError, HostResult};
use crate::source::PluginSource;

/// Maximum module download size: 100 MB.
const MAX_MODULE_SIZE: u64 = 100 * 1024 * 1024;

/// Timeout for the artifact download.
const FETCH_TIMEOUT: Duration = Duration::from_secs(120);

const USER_AGENT: &str = concat!("plugincall-host/", env!("CARGO_PKG_VERSION"));

/// Resolve a source to raw module bytes, verifying any content pin.
///
/// # Errors
///
/// Returns an error if the fetch fails, the endpoint answers non-2xx, the
/// download exceeds the size cap, the file cannot be read, or the bytes do
/// not match the source's pin.
pub async fn fetch_module(source: &PluginSource) -> HostResult<Vec<u8>> {
    let bytes = match source {
        PluginSource::Url { url, .. } => fetch_url(url).await?,
        PluginSource::File { path, .. } => std::fs::read(path).map_err(|e| HostError::Io {
            path: path.clone(),
            source: e,
        })?,
        PluginSource::Bytes(bytes) => bytes.clone(),
    };
    verify_pin(&bytes, source.pin())?;
    Ok(bytes)
}

/// Download module bytes over HTTP(S).
async fn fetch_url(url: &str) -> HostResult<Vec<u8>> {
    tracing::debug!("fetching plugin module: {url}");

    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(10))
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(|e| HostError::Fetch {
            url: url.to_string(),
            message: format!("failed to create HTTP client: {e}"),
        })?;

    let response = client.get(url).send().await.map_err(|e| HostError::Fetch {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    if !response.status().is_success() {
        return Err(HostError::FetchStatus {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    // Check Content-Length up front to fail fast on honest servers.
    if let Some(len) = response.content_length() {
        check_size(len)?;
    }

    let capacity =
        usize::try_from(response.content_length().unwrap_or(0).min(MAX_MODULE_SIZE)).unwrap_or(0);
    let body = collect_with_limit(url, response.bytes_stream(), capacity, MAX_MODULE_SIZE).await?;

    tracing::debug!(size = body.len(), "module fetched");
    Ok(body)
}

/// Collect a body stream, aborting once the running total exceeds the cap.
///
/// Content-Length is advisory; a server can omit or understate it, so the
/// cap must bound the bytes actually received, not the header.
async fn collect_with_limit<S, B, E>(
    url: &str,
    stream: S,
    capacity: usize,
    max_size: u64,
) -> HostResult<Vec<u8>>
where
    S: futures::Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: std::fmt::Display,
{
    use futures::StreamExt;

    let mut stream = std::pin::pin!(stream);
    let mut bytes = Vec::with_capacity(capacity);

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| HostError::Fetch {
            url: url.to_string(),
            message: format!("failed to read response body: {e}"),
        })?;
        bytes.extend_from_slice(chunk.as_ref());
        let current_size = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
        if current_size > max_size {
            return Err(HostError::TooLarge {
                size: current_size,
                limit: max_size,
            });
        }
    }

    Ok(bytes)
}

/// Reject artifacts over the size cap.
fn check_size(size: u64) -> HostResult<()> {
    if size > MAX_MODULE_SIZE {
        return Err(HostError::TooLarge {
            size,
            limit: MAX_MODULE_SIZE,
        });
    }
    Ok(())
}

/// Verify module bytes against a blake3 pin, if one is present.
///
/// Unpinned sources pass with a warning: a URL referencing a mutable branch
/// can serve different bytes on every run, and nothing here would notice.
fn verify_pin(bytes: &[u8], expected: Option<&str>) -> HostResult<()> {
    match expected {
        Some(expected_hex) => {
            let actual_hex = blake3::hash(bytes).to_hex().to_string();
            if actual_hex != expected_hex {
                return Err(HostError::HashMismatch {
                    expected: expected_hex.to_string(),
                    actual: actual_hex,
                });
            }
            tracing::debug!("module content pin verified");
        },
        None => {
            tracing::warn!("module source carries no content pin, artifact integrity not verified");
        },
    }
    Ok(())
}
