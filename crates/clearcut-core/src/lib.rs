#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Channel multiplexer and dispatch pipeline for the Clearcut logging facade.
//!
//! Layout: `operation.rs` (closed set of output primitives), `options.rs`
//! (channel configuration and partial patches), `probe.rs` (colour directive
//! capability), `directive.rs` (argument transformation), `history.rs`
//! (recorded calls), `sink.rs` (outbound sink trait + in-memory sink),
//! `channel.rs`, `registry.rs`, `proxy.rs` (default-channel `Log`),
//! `config.rs` (registry configuration documents).

#[macro_use]
mod macros;

pub mod channel;
pub mod config;
pub mod directive;
pub mod error;
pub mod history;
pub mod operation;
pub mod options;
pub mod probe;
pub mod proxy;
pub mod registry;
pub mod sink;

use std::sync::Arc;

pub use channel::Channel;
pub use config::RegistryConfig;
pub use error::{ClearcutError, ClearcutResult};
pub use history::{History, RecordedCall};
pub use operation::Operation;
pub use options::{ChannelOptions, ChannelPatch};
pub use probe::{detected_color_support, supports_color_directive, target_identity};
pub use proxy::Log;
pub use registry::{DEFAULT_CHANNEL, Registry};
pub use sink::{EmittedCall, MemorySink, OutputSink};

/// Construct the application's `Log` entry point over the given sink.
///
/// Hosts call this once at start-up and pass the returned `Log` to whatever
/// needs it; nothing is attached to global state.
#[must_use]
pub fn init(sink: Arc<dyn OutputSink>) -> Log {
    Log::new(sink)
}
