//! The acquire-then-invoke pipeline.
//!
//! [`Bootstrap`] runs the fetch-instantiate-invoke sequence exactly once, as
//! two explicit ordered stages. Stage one acquires a handle from a
//! [`PluginHost`]; stage two invokes one named capability on it. Either
//! stage failing short-circuits the remainder, so an unreachable source
//! never leads to an invoke attempt.

use crate::error::HostResult;
use crate::host::PluginHost;
use crate::options::InstanceOptions;
use crate::source::PluginSource;

/// Marker printed in place of an absent result.
///
/// A call that succeeds without output must stay distinguishable from one
/// that returned empty text.
pub const ABSENT_MARKER: &str = "<none>";

/// Single-shot acquire-then-invoke pipeline over a [`PluginHost`].
#[derive(Debug, Clone)]
pub struct Bootstrap {
    source: PluginSource,
    options: InstanceOptions,
}

impl Bootstrap {
    /// Create a pipeline for `source` with default [`InstanceOptions`].
    #[must_use]
    pub fn new(source: PluginSource) -> Self {
        Self {
            source,
            options: InstanceOptions::default(),
        }
    }

    /// Replace the instantiation options.
    #[must_use]
    pub fn with_options(mut self, options: InstanceOptions) -> Self {
        self.options = options;
        self
    }

    /// Run both stages in order and return the decoded result.
    ///
    /// # Errors
    ///
    /// Propagates the first stage failure unchanged: acquisition errors
    /// (fetch, pin, instantiation) or invocation errors (missing export,
    /// trap). No stage is retried.
    pub async fn run<H>(
        &self,
        host: &H,
        capability: &str,
        input: &str,
    ) -> HostResult<Option<String>>
    where
        H: PluginHost + ?Sized,
    {
        let mut handle = host.acquire(&self.source, &self.options).await?;
        tracing::info!(source = %self.source, "plugin acquired");

        let result = handle.invoke(capability, input.as_bytes()).await?;
        tracing::info!(capability, has_output = result.is_some(), "capability invoked");

        Ok(result)
    }
}

/// Render an invocation result as the line written to stdout.
///
/// Absence renders as [`ABSENT_MARKER`], never as an empty string.
#[must_use]
pub fn render(result: Option<String>) -> String {
    result.unwrap_or_else(|| ABSENT_MARKER.to_string())
}
