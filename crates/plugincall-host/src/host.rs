//! Host and handle traits.
//!
//! The seam between orchestration and the concrete WASM runtime: a
//! [`PluginHost`] turns a module source into a live [`PluginHandle`], and a
//! handle invokes named capabilities. [`Bootstrap`](crate::Bootstrap) is
//! generic over these traits so tests can drive it with fakes instead of a
//! real runtime.

use async_trait::async_trait;

use crate::error::HostResult;
use crate::options::InstanceOptions;
use crate::source::PluginSource;

/// An instantiated plugin module, callable by capability name.
#[async_trait]
pub trait PluginHandle: Send {
    /// Invoke a named capability with raw input bytes.
    ///
    /// Returns `Ok(None)` when the call succeeds but the capability writes
    /// no output; decoding never coalesces absence into empty text.
    ///
    /// # Errors
    ///
    /// Fails if the capability is not exported by the module, or if the
    /// call traps inside the runtime.
    async fn invoke(&mut self, capability: &str, input: &[u8]) -> HostResult<Option<String>>;
}

/// A host able to turn a module source into a live handle.
#[async_trait]
pub trait PluginHost: Send + Sync {
    /// Fetch, validate, and instantiate the module identified by `source`.
    ///
    /// `options` must reach the concrete runtime unchanged; the host makes
    /// no decisions of its own about WASI or resource limits.
    ///
    /// # Errors
    ///
    /// Fails if the module cannot be fetched, fails pin verification, or
    /// cannot be instantiated.
    async fn acquire(
        &self,
        source: &PluginSource,
        options: &InstanceOptions,
    ) -> HostResult<Box<dyn PluginHandle>>;
}
