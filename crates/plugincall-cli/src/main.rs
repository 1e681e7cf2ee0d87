//! Fetch a remote Extism plugin and invoke its `count_vowels` capability.
//!
//! The module URL, capability name, and input are fixed; the binary takes
//! no flags and reads no configuration. It prints exactly one line to
//! stdout: the decoded text result of the call, or an absence marker when
//! the call produced no output. Any fetch, instantiation, or call failure
//! propagates out of `main` and terminates the process. Logs go to stderr
//! (`RUST_LOG` controls verbosity, default `info`).

#![deny(unsafe_code)]
#![deny(clippy::all)]
#![deny(clippy::unwrap_used)]

use anyhow::Result;
use plugincall_host::{Bootstrap, ExtismHost, PluginSource, render};
use tracing_subscriber::EnvFilter;

/// Remote demo module. The URL references a branch, not an immutable
/// revision, so its content can drift; chain [`PluginSource::pinned`] with a
/// blake3 digest once the artifact is published under a fixed tag.
const MODULE_URL: &str = "https://github.com/mikezamora/yapperai-plugins/raw/refs/heads/assmebly-script/assembly-script/dist/output.wasm";

/// Capability exported by the demo module.
const CAPABILITY: &str = "count_vowels";

/// Fixed input for the single call.
const INPUT: &str = "Hello World";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let source = PluginSource::parse(MODULE_URL)?;
    let result = Bootstrap::new(source)
        .run(&ExtismHost::new(), CAPABILITY, INPUT)
        .await?;

    println!("{}", render(result));
    Ok(())
}
