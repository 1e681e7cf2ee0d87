//! Host abstraction for fetching and invoking remote Extism plugin modules.
//!
//! Provides the pieces of a fetch-instantiate-invoke-print sequence:
//!
//! - [`PluginSource`]: Where the module bytes come from (URL, file, inline),
//!   with optional blake3 content pinning
//! - [`InstanceOptions`]: Instantiation options forwarded unchanged to the
//!   concrete host (WASI toggle, memory cap, call timeout)
//! - [`PluginHost`] / [`PluginHandle`]: Traits decoupling orchestration from
//!   the concrete WASM runtime, so tests can drive the pipeline with fakes
//! - [`ExtismHost`]: The concrete host backed by the Extism runtime
//! - [`Bootstrap`]: The two-stage acquire-then-invoke pipeline
//!
//! # Result decoding
//!
//! A capability call that succeeds but writes no output decodes to `None`,
//! and [`render`] turns that into a visible absence marker rather than an
//! empty line.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod bootstrap;
pub mod error;
pub mod extism_host;
pub mod fetch;
pub mod host;
pub mod options;
pub mod source;

pub use bootstrap::{ABSENT_MARKER, Bootstrap, render};
pub use error::{HostError, HostResult};
pub use extism_host::ExtismHost;
pub use fetch::fetch_module;
pub use host::{PluginHandle, PluginHost};
pub use options::InstanceOptions;
pub use source::PluginSource;
