//! Channel registry: lookup-or-create by name plus bulk control.
//!
//! # Design
//! - Channels are created lazily on first lookup and never removed.
//! - The `default` channel exists from construction.
//! - Every channel shares the registry's sink and colour capability.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use tracing::debug;

use crate::channel::Channel;
use crate::history::RecordedCall;
use crate::options::{ChannelOptions, ChannelPatch};
use crate::probe::detected_color_support;
use crate::sink::OutputSink;

/// Name of the channel every registry starts with.
pub const DEFAULT_CHANNEL: &str = "default";

/// The set of channels sharing one output sink.
pub struct Registry {
    channels: BTreeMap<String, Channel>,
    sink: Arc<dyn OutputSink>,
    color_supported: bool,
}

impl Registry {
    /// Build a registry whose colour capability is detected from the environment.
    #[must_use]
    pub fn new(sink: Arc<dyn OutputSink>) -> Self {
        Self::with_color_support(sink, detected_color_support())
    }

    /// Build a registry for a target with known colour capability.
    #[must_use]
    pub fn with_color_support(sink: Arc<dyn OutputSink>, color_supported: bool) -> Self {
        let mut registry = Self {
            channels: BTreeMap::new(),
            sink,
            color_supported,
        };
        registry.channel(DEFAULT_CHANNEL);
        registry
    }

    /// Look up a channel, creating it with default options on first use.
    pub fn channel(&mut self, name: &str) -> &mut Channel {
        self.channel_with(name, &ChannelPatch::default())
    }

    /// Look up a channel and apply `patch`, creating it from `patch` on first use.
    pub fn channel_with(&mut self, name: &str, patch: &ChannelPatch) -> &mut Channel {
        match self.channels.entry(name.to_string()) {
            Entry::Occupied(entry) => entry.into_mut().configure(patch),
            Entry::Vacant(entry) => {
                debug!(channel = name, "channel created");
                entry.insert(Channel::new(
                    name,
                    ChannelOptions::from_patch(patch),
                    Arc::clone(&self.sink),
                    self.color_supported,
                ))
            }
        }
    }

    /// Read-only lookup without creating.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Channel> {
        self.channels.get(name)
    }

    /// Whether a channel with `name` exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.channels.contains_key(name)
    }

    /// Channel names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.channels.keys().map(String::as_str)
    }

    /// Every channel in name order.
    pub fn channels(&self) -> impl Iterator<Item = &Channel> {
        self.channels.values()
    }

    /// Number of registered channels, the default channel included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Always `false`: the default channel is never removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Colour capability shared by every channel.
    #[must_use]
    pub const fn color_supported(&self) -> bool {
        self.color_supported
    }

    /// Enable every registered channel.
    pub fn enable_all(&mut self) -> &mut Self {
        for channel in self.channels.values_mut() {
            channel.enable();
        }
        self
    }

    /// Disable every registered channel.
    pub fn disable_all(&mut self) -> &mut Self {
        for channel in self.channels.values_mut() {
            channel.disable();
        }
        self
    }

    /// Recorded calls of every channel keyed by name.
    #[must_use]
    pub fn history_all(&self) -> BTreeMap<String, Vec<RecordedCall>> {
        self.channels
            .iter()
            .map(|(name, channel)| (name.clone(), channel.history().to_vec()))
            .collect()
    }
}

impl Debug for Registry {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Registry")
            .field("channels", &self.channels)
            .field("color_supported", &self.color_supported)
            .finish_non_exhaustive()
    }
}
