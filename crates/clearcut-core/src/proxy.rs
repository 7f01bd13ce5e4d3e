//! Default-channel proxy: a flat logger that still exposes the whole registry.
//!
//! # Design
//! - Owns the registry and forwards every output method to the `default` channel.
//! - Methods return the proxy so calls chain (`log.call(["foo"]).force()`).

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use crate::channel::Channel;
use crate::history::{History, RecordedCall};
use crate::operation::Operation;
use crate::options::ChannelPatch;
use crate::registry::{DEFAULT_CHANNEL, Registry};
use crate::sink::OutputSink;

/// Top-level logger bound to the `default` channel.
#[derive(Debug)]
pub struct Log {
    registry: Registry,
}

impl Log {
    /// Create the registry and its `default` channel over `sink`.
    #[must_use]
    pub fn new(sink: Arc<dyn OutputSink>) -> Self {
        Self::from_registry(Registry::new(sink))
    }

    /// Like [`Log::new`], configuring the default channel with `patch`.
    #[must_use]
    pub fn with_options(sink: Arc<dyn OutputSink>, patch: &ChannelPatch) -> Self {
        let mut log = Self::new(sink);
        log.configure(patch);
        log
    }

    /// Like [`Log::new`] for a target with known colour capability.
    #[must_use]
    pub fn with_color_support(sink: Arc<dyn OutputSink>, color_supported: bool) -> Self {
        Self::from_registry(Registry::with_color_support(sink, color_supported))
    }

    /// Wrap an existing registry.
    #[must_use]
    pub fn from_registry(mut registry: Registry) -> Self {
        registry.channel(DEFAULT_CHANNEL);
        Self { registry }
    }

    /// Log `args` on the default channel and hand back the proxy for chaining.
    pub fn call<I, V>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.dispatch(Operation::Log, args)
    }

    /// Dispatch one call on the default channel.
    pub fn dispatch<I, V>(&mut self, operation: Operation, args: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.default_channel().dispatch(operation, args);
        self
    }

    operation_methods!();

    /// Merge `patch` into the default channel's configuration.
    pub fn configure(&mut self, patch: &ChannelPatch) -> &mut Self {
        self.default_channel().configure(patch);
        self
    }

    /// Enable the default channel.
    pub fn enable(&mut self) -> &mut Self {
        self.default_channel().enable();
        self
    }

    /// Disable the default channel.
    pub fn disable(&mut self) -> &mut Self {
        self.default_channel().disable();
        self
    }

    /// Replay the default channel's last call if it is disabled.
    pub fn force(&mut self) -> &mut Self {
        self.default_channel().force();
        self
    }

    /// Recorded calls of the default channel.
    #[must_use]
    pub fn history(&self) -> &History {
        match self.registry.get(DEFAULT_CHANNEL) {
            Some(channel) => channel.history(),
            None => empty_history(),
        }
    }

    /// Whether the default channel forwards calls.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.registry
            .get(DEFAULT_CHANNEL)
            .is_some_and(Channel::is_enabled)
    }

    /// The `default` channel itself.
    pub fn default_channel(&mut self) -> &mut Channel {
        self.registry.channel(DEFAULT_CHANNEL)
    }

    /// Look up or create a named channel.
    pub fn channel(&mut self, name: &str) -> &mut Channel {
        self.registry.channel(name)
    }

    /// Look up or create a named channel, applying `patch`.
    pub fn channel_with(&mut self, name: &str, patch: &ChannelPatch) -> &mut Channel {
        self.registry.channel_with(name, patch)
    }

    /// Enable every channel.
    pub fn enable_all(&mut self) -> &mut Self {
        self.registry.enable_all();
        self
    }

    /// Disable every channel.
    pub fn disable_all(&mut self) -> &mut Self {
        self.registry.disable_all();
        self
    }

    /// Recorded calls of every channel keyed by name.
    #[must_use]
    pub fn history_all(&self) -> BTreeMap<String, Vec<RecordedCall>> {
        self.registry.history_all()
    }

    /// Read access to the registry.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Write access to the registry.
    pub const fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }
}

fn empty_history() -> &'static History {
    static EMPTY: once_cell::sync::Lazy<History> = once_cell::sync::Lazy::new(History::new);
    &EMPTY
}
