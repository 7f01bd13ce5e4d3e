//! Registry configuration documents.
//!
//! # Design
//! - A single JSON document lists channel patches by name alongside logging preferences.
//! - Every channel entry is validated through `ChannelPatch::from_value` so errors carry the
//!   offending channel name.
//! - `log_format`/`log_level` are kept as raw strings; the telemetry layer interprets them.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::{ClearcutError, ClearcutResult};
use crate::options::ChannelPatch;
use crate::registry::Registry;

/// Parsed configuration for a registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Preferred log output format (`json` or `pretty`).
    pub log_format: Option<String>,
    /// Preferred log level filter.
    pub log_level: Option<String>,
    /// Channel patches keyed by channel name.
    pub channels: BTreeMap<String, ChannelPatch>,
}

impl RegistryConfig {
    /// Parse a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ClearcutError::InvalidConfiguration`] when the text is not valid JSON or the
    /// document fails validation.
    pub fn from_json_str(text: &str) -> ClearcutResult<Self> {
        let value: Value =
            serde_json::from_str(text).map_err(|err| ClearcutError::InvalidConfiguration {
                channel: None,
                reason: "invalid_json",
                detail: Some(err.to_string()),
            })?;
        Self::from_value(&value)
    }

    /// Parse a configuration from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`ClearcutError::InvalidConfiguration`] when the document or any channel entry
    /// is not an object, or a field has the wrong type.
    pub fn from_value(value: &Value) -> ClearcutResult<Self> {
        let document = value
            .as_object()
            .ok_or(ClearcutError::InvalidConfiguration {
                channel: None,
                reason: "expected_object",
                detail: None,
            })?;

        let mut config = Self {
            log_format: optional_string(document, "log_format")?,
            log_level: optional_string(document, "log_level")?,
            channels: BTreeMap::new(),
        };

        match document.get("channels") {
            None | Some(Value::Null) => {}
            Some(Value::Object(channels)) => {
                for (name, entry) in channels {
                    let patch =
                        ChannelPatch::from_value(entry).map_err(|err| err.for_channel(name))?;
                    config.channels.insert(name.clone(), patch);
                }
            }
            Some(_) => {
                return Err(ClearcutError::InvalidConfiguration {
                    channel: None,
                    reason: "channels_expected_object",
                    detail: None,
                });
            }
        }

        Ok(config)
    }

    /// Create or reconfigure every listed channel.
    pub fn apply(&self, registry: &mut Registry) {
        for (name, patch) in &self.channels {
            registry.channel_with(name, patch);
        }
    }
}

fn optional_string(
    document: &Map<String, Value>,
    key: &'static str,
) -> ClearcutResult<Option<String>> {
    match document.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(other) => Err(ClearcutError::InvalidConfiguration {
            channel: None,
            reason: "expected_string",
            detail: Some(format!("{key}: {other}")),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::DEFAULT_CHANNEL;
    use crate::sink::MemorySink;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn parses_channels_and_logging_preferences() -> ClearcutResult<()> {
        let config = RegistryConfig::from_value(&json!({
            "log_format": "json",
            "log_level": "debug",
            "channels": {
                "net": { "enabled": false },
                "db": { "prefix": "[db]", "history_limit": 10 }
            }
        }))?;

        assert_eq!(config.log_format.as_deref(), Some("json"));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.channels["net"], ChannelPatch::new().enabled(false));
        assert_eq!(
            config.channels["db"],
            ChannelPatch::new().prefix("[db]").history_limit(10)
        );
        Ok(())
    }

    #[test]
    fn errors_name_the_offending_channel() {
        let err = RegistryConfig::from_value(&json!({ "channels": { "net": false } })).unwrap_err();
        assert!(matches!(
            err,
            ClearcutError::InvalidConfiguration {
                channel: Some(ref name),
                reason: "expected_object",
                ..
            } if name == "net"
        ));
    }

    #[test]
    fn rejects_malformed_documents() {
        for document in [
            json!([]),
            json!({ "channels": [] }),
            json!({ "log_format": 3 }),
        ] {
            assert!(RegistryConfig::from_value(&document).is_err(), "{document}");
        }
        assert!(RegistryConfig::from_json_str("{").is_err());
    }

    #[test]
    fn apply_creates_and_updates_channels() -> ClearcutResult<()> {
        let config = RegistryConfig::from_json_str(
            r#"{ "channels": { "default": { "enabled": false }, "net": { "history": false } } }"#,
        )?;
        let mut registry = Registry::with_color_support(Arc::new(MemorySink::new()), true);
        config.apply(&mut registry);

        assert!(registry.get(DEFAULT_CHANNEL).is_some_and(|channel| !channel.is_enabled()));
        assert!(registry.get("net").is_some_and(|channel| !channel.options().history));
        Ok(())
    }
}
