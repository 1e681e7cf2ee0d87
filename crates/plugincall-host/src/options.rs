//! Instantiation options.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default maximum WASM linear memory: 64 MB.
const DEFAULT_MAX_MEMORY_BYTES: u64 = 64 * 1024 * 1024;

/// Default maximum execution time per call: 30 seconds.
const DEFAULT_MAX_EXECUTION_TIME: Duration = Duration::from_secs(30);

/// Options forwarded unchanged to the concrete host at instantiation.
///
/// The orchestration layer never interprets these; [`PluginHost::acquire`]
/// receives exactly the value the caller supplied.
///
/// [`PluginHost::acquire`]: crate::host::PluginHost::acquire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstanceOptions {
    /// Grant the module the WASI capability set. Off by default; the demo
    /// module needs no system interface.
    pub wasi: bool,
    /// Maximum WASM linear memory in bytes.
    pub max_memory_bytes: u64,
    /// Maximum execution time per capability call.
    pub max_execution_time: Duration,
}

impl Default for InstanceOptions {
    fn default() -> Self {
        Self {
            wasi: false,
            max_memory_bytes: DEFAULT_MAX_MEMORY_BYTES,
            max_execution_time: DEFAULT_MAX_EXECUTION_TIME,
        }
    }
}

impl InstanceOptions {
    /// Toggle the WASI capability set.
    #[must_use]
    pub fn with_wasi(mut self, wasi: bool) -> Self {
        self.wasi = wasi;
        self
    }

    /// Set the maximum WASM linear memory in bytes.
    #[must_use]
    pub fn with_memory_limit(mut self, bytes: u64) -> Self {
        self.max_memory_bytes = bytes;
        self
    }

    /// Set the maximum execution time per capability call.
    #[must_use]
    pub fn with_timeout(mut self, duration: Duration) -> Self {
        self.max_execution_time = duration;
        self
    }
}
