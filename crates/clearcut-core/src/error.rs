//! Error types for channel configuration and operation parsing.

use thiserror::Error;

/// Primary error type for Clearcut operations.
#[derive(Debug, Error)]
pub enum ClearcutError {
    /// A configuration payload could not be applied.
    #[error("invalid channel configuration")]
    InvalidConfiguration {
        /// Channel the configuration targeted, when known.
        channel: Option<String>,
        /// Machine-readable reason for the failure.
        reason: &'static str,
        /// Parser detail when available.
        detail: Option<String>,
    },
    /// An operation name was not one of the recognised output primitives.
    #[error("unknown output operation")]
    UnknownOperation {
        /// Operation name provided by the caller.
        value: String,
    },
}

impl ClearcutError {
    /// Attach a channel name to a configuration error that lacks one.
    #[must_use]
    pub fn for_channel(self, name: &str) -> Self {
        match self {
            Self::InvalidConfiguration {
                channel: None,
                reason,
                detail,
            } => Self::InvalidConfiguration {
                channel: Some(name.to_string()),
                reason,
                detail,
            },
            other => other,
        }
    }
}

/// Convenience alias for Clearcut results.
pub type ClearcutResult<T> = Result<T, ClearcutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_are_stable() {
        let invalid = ClearcutError::InvalidConfiguration {
            channel: None,
            reason: "expected_object",
            detail: None,
        };
        assert_eq!(invalid.to_string(), "invalid channel configuration");

        let unknown = ClearcutError::UnknownOperation {
            value: "shout".into(),
        };
        assert_eq!(unknown.to_string(), "unknown output operation");
    }

    #[test]
    fn for_channel_fills_missing_name_only() {
        let err = ClearcutError::InvalidConfiguration {
            channel: None,
            reason: "expected_object",
            detail: None,
        }
        .for_channel("net");
        assert!(matches!(
            err,
            ClearcutError::InvalidConfiguration { channel: Some(ref name), .. } if name == "net"
        ));

        let named = ClearcutError::InvalidConfiguration {
            channel: Some("db".into()),
            reason: "expected_object",
            detail: None,
        }
        .for_channel("net");
        assert!(matches!(
            named,
            ClearcutError::InvalidConfiguration { channel: Some(ref name), .. } if name == "db"
        ));
    }
}
