//! Output primitives a channel can forward to.
//!
//! # Design
//! - The set is closed; every channel and the default proxy expose one method per variant.
//! - Wire names follow the camelCase spelling hosts already use (`groupCollapsed`, `timeEnd`).

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ClearcutError;

/// A recognised output primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    /// Conditional error output.
    Assert,
    /// Clear the output target.
    Clear,
    /// Labelled counter.
    Count,
    /// Debug-level message.
    Debug,
    /// Object inspection.
    Dir,
    /// Markup inspection.
    Dirxml,
    /// Error-level message.
    Error,
    /// Alias of error emitted by older targets.
    Exception,
    /// Open an indented group.
    Group,
    /// Open a collapsed group.
    GroupCollapsed,
    /// Close the current group.
    GroupEnd,
    /// Info-level message.
    Info,
    /// Plain message.
    Log,
    /// Start a profile.
    Profile,
    /// Stop a profile.
    ProfileEnd,
    /// Tabular output.
    Table,
    /// Start a timer.
    Time,
    /// Stop a timer.
    TimeEnd,
    /// Timeline marker.
    TimeStamp,
    /// Stack trace.
    Trace,
    /// Warning-level message.
    Warn,
}

impl Operation {
    /// Every operation in declaration order.
    pub const ALL: [Self; 21] = [
        Self::Assert,
        Self::Clear,
        Self::Count,
        Self::Debug,
        Self::Dir,
        Self::Dirxml,
        Self::Error,
        Self::Exception,
        Self::Group,
        Self::GroupCollapsed,
        Self::GroupEnd,
        Self::Info,
        Self::Log,
        Self::Profile,
        Self::ProfileEnd,
        Self::Table,
        Self::Time,
        Self::TimeEnd,
        Self::TimeStamp,
        Self::Trace,
        Self::Warn,
    ];

    /// Canonical wire name of the operation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assert => "assert",
            Self::Clear => "clear",
            Self::Count => "count",
            Self::Debug => "debug",
            Self::Dir => "dir",
            Self::Dirxml => "dirxml",
            Self::Error => "error",
            Self::Exception => "exception",
            Self::Group => "group",
            Self::GroupCollapsed => "groupCollapsed",
            Self::GroupEnd => "groupEnd",
            Self::Info => "info",
            Self::Log => "log",
            Self::Profile => "profile",
            Self::ProfileEnd => "profileEnd",
            Self::Table => "table",
            Self::Time => "time",
            Self::TimeEnd => "timeEnd",
            Self::TimeStamp => "timeStamp",
            Self::Trace => "trace",
            Self::Warn => "warn",
        }
    }

    /// Whether the operation carries a human-readable message as its first argument.
    #[must_use]
    pub const fn is_message(self) -> bool {
        matches!(
            self,
            Self::Debug
                | Self::Error
                | Self::Exception
                | Self::Group
                | Self::GroupCollapsed
                | Self::Info
                | Self::Log
                | Self::Trace
                | Self::Warn
        )
    }
}

impl Display for Operation {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = ClearcutError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|operation| operation.as_str() == value)
            .ok_or_else(|| ClearcutError::UnknownOperation {
                value: value.to_string(),
            })
    }
}
