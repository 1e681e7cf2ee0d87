//! Module source specifiers.

use std::fmt;
use std::path::PathBuf;

use crate::error::{HostError, HostResult};

/// Where the plugin module bytes come from.
///
/// Remote and file sources may carry an optional blake3 content pin. A URL
/// that embeds a branch name (rather than an immutable revision) can serve
/// different bytes between runs; pinning turns that drift into a hard
/// [`HostError::HashMismatch`] instead of silently running changed code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginSource {
    /// Remote artifact fetched over HTTP(S).
    Url {
        /// Artifact URL.
        url: String,
        /// Optional blake3 hex digest pinning the artifact content.
        hash: Option<String>,
    },
    /// Module on the local filesystem.
    File {
        /// Path to the `.wasm` file.
        path: PathBuf,
        /// Optional blake3 hex digest pinning the file content.
        hash: Option<String>,
    },
    /// Module bytes already in memory.
    Bytes(Vec<u8>),
}

impl PluginSource {
    /// Remote source without a content pin.
    #[must_use]
    pub fn url(url: impl Into<String>) -> Self {
        Self::Url {
            url: url.into(),
            hash: None,
        }
    }

    /// Local file source without a content pin.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File {
            path: path.into(),
            hash: None,
        }
    }

    /// Attach a blake3 hex digest pin to this source.
    ///
    /// Inline byte sources need no pin (the caller already holds the exact
    /// bytes), so for [`PluginSource::Bytes`] this is a no-op.
    #[must_use]
    pub fn pinned(mut self, digest: impl Into<String>) -> Self {
        match &mut self {
            Self::Url { hash, .. } | Self::File { hash, .. } => *hash = Some(digest.into()),
            Self::Bytes(_) => {},
        }
        self
    }

    /// Parse a module source specifier string.
    ///
    /// `http://` and `https://` specifiers become [`PluginSource::Url`];
    /// anything without a scheme is treated as a local file path.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::InvalidSource`] for specifiers with an
    /// unsupported URL scheme (e.g. `ftp://`, `file://`).
    pub fn parse(spec: &str) -> HostResult<Self> {
        if spec.is_empty() {
            return Err(HostError::InvalidSource(
                "module source must not be empty".into(),
            ));
        }
        if spec.starts_with("https://") || spec.starts_with("http://") {
            return Ok(Self::url(spec));
        }
        if spec.contains("://") {
            return Err(HostError::InvalidSource(format!(
                "unsupported scheme in '{spec}', expected http(s) URL or local path"
            )));
        }
        Ok(Self::file(spec))
    }

    /// The content pin attached to this source, if any.
    #[must_use]
    pub fn pin(&self) -> Option<&str> {
        match self {
            Self::Url { hash, .. } | Self::File { hash, .. } => hash.as_deref(),
            Self::Bytes(_) => None,
        }
    }
}

impl fmt::Display for PluginSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url { url, .. } => f.write_str(url),
            Self::File { path, .. } => write!(f, "{}", path.display()),
            Self::Bytes(bytes) => write!(f, "<{} bytes inline>", bytes.len()),
        }
    }
}
