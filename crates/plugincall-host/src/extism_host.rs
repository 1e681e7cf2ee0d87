//! Extism-backed plugin host.
//!
//! [`ExtismHost`] implements [`PluginHost`] on top of the Extism runtime:
//! module bytes go through [`fetch_module`], instantiation options map onto
//! the Extism manifest and builder, and the resulting handle invokes guest
//! exports by name.

use async_trait::async_trait;
use extism::{Manifest, PluginBuilder, Wasm};

use crate::error::{HostError, HostResult};
use crate::fetch::fetch_module;
use crate::host::{PluginHandle, PluginHost};
use crate::options::InstanceOptions;
use crate::source::PluginSource;

/// WASM pages are 64 KB each.
const WASM_PAGE_BYTES: u64 = 64 * 1024;

/// [`PluginHost`] backed by the Extism runtime.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExtismHost;

impl ExtismHost {
    /// Create a new Extism host.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PluginHost for ExtismHost {
    async fn acquire(
        &self,
        source: &PluginSource,
        options: &InstanceOptions,
    ) -> HostResult<Box<dyn PluginHandle>> {
        let wasm_bytes = fetch_module(source).await?;

        let wasm = Wasm::data(wasm_bytes);
        let mut manifest = Manifest::new([wasm]);
        manifest = manifest.with_timeout(options.max_execution_time);
        // Cap at u32::MAX pages if the byte limit is very large.
        let pages = options.max_memory_bytes / WASM_PAGE_BYTES;
        let max_pages = u32::try_from(pages).unwrap_or(u32::MAX);
        manifest = manifest.with_memory_max(max_pages);

        let plugin = PluginBuilder::new(manifest)
            .with_wasi(options.wasi)
            .build()
            .map_err(|e| HostError::Instantiation(format!("failed to build Extism plugin: {e}")))?;

        tracing::debug!(source = %source, wasi = options.wasi, "plugin instantiated");
        Ok(Box::new(ExtismHandle { plugin }))
    }
}

/// A live Extism plugin instance.
pub struct ExtismHandle {
    plugin: extism::Plugin,
}

impl std::fmt::Debug for ExtismHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtismHandle").finish_non_exhaustive()
    }
}

#[async_trait]
impl PluginHandle for ExtismHandle {
    async fn invoke(&mut self, capability: &str, input: &[u8]) -> HostResult<Option<String>> {
        let output: Vec<u8> =
            self.plugin
                .call(capability, input.to_vec())
                .map_err(|e| HostError::CapabilityCall {
                    capability: capability.to_string(),
                    message: e.to_string(),
                })?;

        if output.is_empty() {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&output).into_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn acquire_rejects_malformed_module() {
        let host = ExtismHost::new();
        let source = PluginSource::Bytes(b"not a wasm module".to_vec());
        let result = host.acquire(&source, &InstanceOptions::default()).await;
        assert!(matches!(result, Err(HostError::Instantiation(_))));
    }

    #[tokio::test]
    async fn acquire_propagates_fetch_errors() {
        let host = ExtismHost::new();
        let source = PluginSource::file("/nonexistent/output.wasm");
        let result = host.acquire(&source, &InstanceOptions::default()).await;
        assert!(matches!(result, Err(HostError::Io { .. })));
    }
}
