//! A named logging stream with its own switch, history, and dispatch pipeline.
//!
//! # Design
//! - Recording and forwarding are independent: a disabled channel still records when history
//!   is on, and the enabled flag only gates what reaches the sink.
//! - Enabled means calls are forwarded; channels start enabled.
//! - Forced replay re-emits the last recorded call without re-enabling the channel and without
//!   recording the replay itself.

use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::directive::prepare_arguments;
use crate::history::{History, RecordedCall};
use crate::operation::Operation;
use crate::options::{ChannelOptions, ChannelPatch};
use crate::sink::OutputSink;

/// Named logging stream.
pub struct Channel {
    name: String,
    options: ChannelOptions,
    history: History,
    sink: Arc<dyn OutputSink>,
    color_supported: bool,
}

impl Channel {
    pub(crate) fn new(
        name: impl Into<String>,
        options: ChannelOptions,
        sink: Arc<dyn OutputSink>,
        color_supported: bool,
    ) -> Self {
        let history = History::with_limit(options.history_limit);
        Self {
            name: name.into(),
            options,
            history,
            sink,
            color_supported,
        }
    }

    /// Channel name, unique within its registry.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current configuration.
    #[must_use]
    pub const fn options(&self) -> &ChannelOptions {
        &self.options
    }

    /// Whether calls are forwarded to the sink.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.options.enabled
    }

    /// Whether the output target renders colour directives.
    #[must_use]
    pub const fn color_supported(&self) -> bool {
        self.color_supported
    }

    /// Merge a partial configuration into the current one.
    pub fn configure(&mut self, patch: &ChannelPatch) -> &mut Self {
        if patch.is_empty() {
            return self;
        }
        self.options.merge(patch);
        self.history.set_limit(self.options.history_limit);
        debug!(
            channel = %self.name,
            enabled = self.options.enabled,
            history = self.options.history,
            "channel reconfigured"
        );
        self
    }

    /// Forward subsequent calls to the sink.
    pub const fn enable(&mut self) -> &mut Self {
        self.options.enabled = true;
        self
    }

    /// Stop forwarding; calls are still recorded when history is on.
    pub const fn disable(&mut self) -> &mut Self {
        self.options.enabled = false;
        self
    }

    /// Recorded calls, oldest first.
    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    /// Record and, when enabled, forward one call.
    pub fn dispatch<I, V>(&mut self, operation: Operation, args: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let args: Vec<Value> = args.into_iter().map(Into::into).collect();

        if self.options.history {
            self.history.push(RecordedCall::new(operation, args.clone()));
        }
        if !self.options.enabled {
            return self;
        }

        self.forward(operation, &args);
        self
    }

    /// Re-emit the most recent recorded call of a disabled channel.
    ///
    /// Does nothing when the channel is enabled or has no history.
    pub fn force(&mut self) -> &mut Self {
        if self.options.enabled {
            return self;
        }
        if let Some(last) = self.history.last() {
            debug!(channel = %self.name, operation = %last.operation, "forcing replay");
            self.forward(last.operation, &last.arguments);
        }
        self
    }

    operation_methods!();

    fn forward(&self, operation: Operation, args: &[Value]) {
        if !self.sink.supports(operation) {
            debug!(
                channel = %self.name,
                operation = %operation,
                "output sink lacks operation; call dropped"
            );
            return;
        }
        let prepared = prepare_arguments(
            operation,
            args,
            self.color_supported && self.sink.renders_color_directive(),
            self.options.prefix.as_deref(),
        );
        self.sink.write(operation, &prepared);
    }
}

impl Debug for Channel {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Channel")
            .field("name", &self.name)
            .field("options", &self.options)
            .field("history_len", &self.history.len())
            .field("color_supported", &self.color_supported)
            .finish_non_exhaustive()
    }
}
