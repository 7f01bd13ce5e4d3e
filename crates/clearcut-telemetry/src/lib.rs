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

//! Logging primitives shared across the Clearcut workspace.
//!
//! Layout: `init.rs` (subscriber installation and format selection), `sink.rs` (output sink
//! that turns channel calls into `tracing` events), `error.rs` (telemetry error type).

pub mod error;
pub mod init;
pub mod sink;

pub use error::{Result, TelemetryError};
pub use init::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, init_logging, logging_config_from};
pub use sink::{TracingSink, render_arguments};
