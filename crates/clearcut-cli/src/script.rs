//! JSON-lines call scripts.
//!
//! # Design
//! - One JSON object per line, discriminated by `kind`; blank lines and `#` comments are skipped.
//! - Steps that omit `channel` target the `default` channel.
//! - Parsing is all-or-nothing so a bad line never leaves a half-replayed registry.

use anyhow::{Context, Result};
use clearcut_core::{ChannelPatch, DEFAULT_CHANNEL, Log, Operation};
use serde::Deserialize;
use serde_json::Value;

/// A single scripted action.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScriptStep {
    /// Dispatch an output call.
    Call {
        /// Target channel.
        #[serde(default)]
        channel: Option<String>,
        /// Output primitive to invoke.
        operation: Operation,
        /// Call arguments.
        #[serde(default)]
        args: Vec<Value>,
    },
    /// Merge a partial configuration into a channel.
    Configure {
        /// Target channel.
        #[serde(default)]
        channel: Option<String>,
        /// Fields to change.
        options: ChannelPatch,
    },
    /// Enable a channel.
    Enable {
        /// Target channel.
        #[serde(default)]
        channel: Option<String>,
    },
    /// Disable a channel.
    Disable {
        /// Target channel.
        #[serde(default)]
        channel: Option<String>,
    },
    /// Replay a disabled channel's last call.
    Force {
        /// Target channel.
        #[serde(default)]
        channel: Option<String>,
    },
    /// Enable every channel.
    EnableAll,
    /// Disable every channel.
    DisableAll,
}

impl ScriptStep {
    /// Channel the step targets, if it targets one.
    #[must_use]
    pub fn channel(&self) -> Option<&str> {
        match self {
            Self::Call { channel, .. }
            | Self::Configure { channel, .. }
            | Self::Enable { channel }
            | Self::Disable { channel }
            | Self::Force { channel } => Some(channel.as_deref().unwrap_or(DEFAULT_CHANNEL)),
            Self::EnableAll | Self::DisableAll => None,
        }
    }

    /// Execute the step against `log`.
    pub fn apply(&self, log: &mut Log) {
        let name = self.channel().unwrap_or(DEFAULT_CHANNEL);
        match self {
            Self::Call {
                operation, args, ..
            } => {
                log.channel(name).dispatch(*operation, args.iter().cloned());
            }
            Self::Configure { options, .. } => {
                log.channel_with(name, options);
            }
            Self::Enable { .. } => {
                log.channel(name).enable();
            }
            Self::Disable { .. } => {
                log.channel(name).disable();
            }
            Self::Force { .. } => {
                log.channel(name).force();
            }
            Self::EnableAll => {
                log.enable_all();
            }
            Self::DisableAll => {
                log.disable_all();
            }
        }
    }
}

/// Parse a whole script.
///
/// # Errors
///
/// Returns an error naming the first line that is not a valid step.
pub fn parse_script(text: &str) -> Result<Vec<ScriptStep>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .map(|(index, line)| {
            serde_json::from_str::<ScriptStep>(line)
                .with_context(|| format!("invalid script step on line {}", index + 1))
        })
        .collect()
}

/// Execute every step in order, returning how many ran.
pub fn run_script(log: &mut Log, steps: &[ScriptStep]) -> usize {
    for step in steps {
        step.apply(log);
    }
    steps.len()
}
