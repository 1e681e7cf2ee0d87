//! Host error types.

use std::path::PathBuf;

/// Errors from module acquisition and capability invocation.
///
/// Every variant is fatal to the bootstrap sequence; there is no retry or
/// partial-failure handling anywhere in this crate. A call that succeeds but
/// produces no output is `Ok(None)`, not an error.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// The module source specifier could not be understood.
    #[error("invalid module source: {0}")]
    InvalidSource(String),

    /// HTTP transport failure while fetching the module.
    #[error("fetch failed for {url}: {message}")]
    Fetch {
        /// The URL that was being fetched.
        url: String,
        /// Transport error description.
        message: String,
    },

    /// The remote endpoint answered with a non-success status.
    #[error("fetch of {url} returned HTTP {status}")]
    FetchStatus {
        /// The URL that was being fetched.
        url: String,
        /// The HTTP status code received.
        status: u16,
    },

    /// The downloaded artifact exceeds the size cap.
    #[error("module too large: {size} bytes (limit: {limit} bytes)")]
    TooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Maximum allowed size in bytes.
        limit: u64,
    },

    /// Module bytes do not match the pinned digest.
    #[error("hash mismatch: expected {expected}, got {actual}")]
    HashMismatch {
        /// Expected blake3 hex digest.
        expected: String,
        /// Actual blake3 hex digest.
        actual: String,
    },

    /// Failed to read a module from the local filesystem.
    #[error("failed to read module at {path}: {source}")]
    Io {
        /// Path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The module could not be validated or instantiated.
    #[error("instantiation failed: {0}")]
    Instantiation(String),

    /// The named capability is missing from the module, or trapped.
    #[error("capability '{capability}' failed: {message}")]
    CapabilityCall {
        /// The capability that was being invoked.
        capability: String,
        /// Failure reason from the runtime.
        message: String,
    },
}

/// Result type for host operations.
pub type HostResult<T> = Result<T, HostError>;
