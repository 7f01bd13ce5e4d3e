//! Channel configuration and partial overrides.
//!
//! # Design
//! - `ChannelOptions` is the resolved state a channel runs with.
//! - `ChannelPatch` carries only the fields a caller wants to change; merging never resets
//!   fields the patch leaves unset.
//! - Optional settings are tri-state in a patch: absent keeps the value, an explicit `null`
//!   clears it.
//! - JSON payloads must be objects with known keys; anything else is rejected rather than coerced.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{ClearcutError, ClearcutResult};

/// Resolved configuration for a single channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelOptions {
    /// Record every call into the channel history.
    pub history: bool,
    /// Forward calls to the output sink. Disabled channels only record.
    pub enabled: bool,
    /// Label prepended to message-class calls.
    pub prefix: Option<String>,
    /// Maximum number of recorded calls kept; `None` keeps everything.
    pub history_limit: Option<usize>,
}

impl Default for ChannelOptions {
    fn default() -> Self {
        Self {
            history: true,
            enabled: true,
            prefix: None,
            history_limit: None,
        }
    }
}

impl ChannelOptions {
    /// Overwrite every field the patch sets.
    pub fn merge(&mut self, patch: &ChannelPatch) {
        if let Some(history) = patch.history {
            self.history = history;
        }
        if let Some(enabled) = patch.enabled {
            self.enabled = enabled;
        }
        if let Some(prefix) = &patch.prefix {
            self.prefix.clone_from(prefix);
        }
        if let Some(limit) = patch.history_limit {
            self.history_limit = limit;
        }
    }

    /// Defaults with the patch applied on top.
    #[must_use]
    pub fn from_patch(patch: &ChannelPatch) -> Self {
        let mut options = Self::default();
        options.merge(patch);
        options
    }
}

/// Partial channel configuration.
#[allow(clippy::option_option)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChannelPatch {
    /// New history recording flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<bool>,
    /// New forwarding flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// New message prefix; `Some(None)` removes it.
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub prefix: Option<Option<String>>,
    /// New history capacity; `Some(None)` makes the history unbounded.
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub history_limit: Option<Option<usize>>,
}

impl ChannelPatch {
    /// An empty patch that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the history recording flag.
    #[must_use]
    pub fn history(mut self, history: bool) -> Self {
        self.history = Some(history);
        self
    }

    /// Set the forwarding flag.
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    /// Set the message prefix.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(Some(prefix.into()));
        self
    }

    /// Remove the message prefix.
    #[must_use]
    pub fn clear_prefix(mut self) -> Self {
        self.prefix = Some(None);
        self
    }

    /// Cap the history buffer.
    #[must_use]
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(Some(limit));
        self
    }

    /// Lift the history cap.
    #[must_use]
    pub fn clear_history_limit(mut self) -> Self {
        self.history_limit = Some(None);
        self
    }

    /// Whether the patch leaves every field untouched.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.history.is_none()
            && self.enabled.is_none()
            && self.prefix.is_none()
            && self.history_limit.is_none()
    }

    /// Parse a patch from a JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`ClearcutError::InvalidConfiguration`] when the payload is not an object,
    /// carries unknown keys, or has fields of the wrong type.
    pub fn from_value(value: &Value) -> ClearcutResult<Self> {
        if !value.is_object() {
            return Err(ClearcutError::InvalidConfiguration {
                channel: None,
                reason: "expected_object",
                detail: Some(json_kind(value).to_string()),
            });
        }
        Self::deserialize(value).map_err(|err| ClearcutError::InvalidConfiguration {
            channel: None,
            reason: "invalid_field",
            detail: Some(err.to_string()),
        })
    }
}

/// Maps a present key to `Some`, so an explicit `null` becomes `Some(None)` while a missing key
/// stays `None` through `#[serde(default)]`.
#[allow(clippy::option_option)]
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
