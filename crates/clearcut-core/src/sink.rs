//! Outbound boundary: the collaborator that actually emits output.
//!
//! # Design
//! - Channels depend only on `OutputSink`; concrete targets live with the host.
//! - A sink may lack some primitives; channels treat those calls as no-ops.
//! - `%c` survives only when the target is colour-capable and the sink renders the directive;
//!   sinks that format text themselves keep the default of not rendering it.
//! - `MemorySink` captures calls for inspection and can simulate targets with missing primitives.

use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use serde_json::Value;

use crate::operation::Operation;

/// Target that provides the named output primitives.
pub trait OutputSink: Send + Sync {
    /// Whether the target provides `operation`.
    fn supports(&self, operation: Operation) -> bool {
        let _ = operation;
        true
    }

    /// Whether the target interprets the `%c` colour directive.
    fn renders_color_directive(&self) -> bool {
        false
    }

    /// Emit one call with its prepared arguments.
    fn write(&self, operation: Operation, args: &[Value]);
}

/// One call received by a [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmittedCall {
    /// Primitive the call targeted.
    pub operation: Operation,
    /// Arguments after channel transformation.
    pub arguments: Vec<Value>,
}

/// Sink that keeps every call in memory.
///
/// It stands in for a console, so by default it renders `%c` and leaves stripping to the
/// target's capability.
#[derive(Debug)]
pub struct MemorySink {
    calls: Mutex<Vec<EmittedCall>>,
    provided: Option<BTreeSet<Operation>>,
    renders_color: bool,
}

impl Default for MemorySink {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            provided: None,
            renders_color: true,
        }
    }
}

impl MemorySink {
    /// A sink providing every operation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink providing only the listed operations.
    #[must_use]
    pub fn with_operations(operations: impl IntoIterator<Item = Operation>) -> Self {
        Self {
            provided: Some(operations.into_iter().collect()),
            ..Self::default()
        }
    }

    /// A sink that, like a plain text log, does not interpret `%c`.
    #[must_use]
    pub fn plain_text() -> Self {
        Self {
            renders_color: false,
            ..Self::default()
        }
    }

    /// Snapshot of received calls, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<EmittedCall> {
        self.lock().clone()
    }

    /// Total number of received calls.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no call has been received.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Number of received calls for one operation.
    #[must_use]
    pub fn count(&self, operation: Operation) -> usize {
        self.lock()
            .iter()
            .filter(|call| call.operation == operation)
            .count()
    }

    /// Drop every captured call.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<EmittedCall>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl OutputSink for MemorySink {
    fn supports(&self, operation: Operation) -> bool {
        self.provided
            .as_ref()
            .is_none_or(|provided| provided.contains(&operation))
    }

    fn renders_color_directive(&self) -> bool {
        self.renders_color
    }

    fn write(&self, operation: Operation, args: &[Value]) {
        self.lock().push(EmittedCall {
            operation,
            arguments: args.to_vec(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn captures_calls_in_order() {
        let sink = MemorySink::new();
        sink.write(Operation::Info, &[json!("one")]);
        sink.write(Operation::Warn, &[json!("two"), json!(2)]);

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.count(Operation::Warn), 1);
        assert_eq!(
            sink.calls()[1],
            EmittedCall {
                operation: Operation::Warn,
                arguments: vec![json!("two"), json!(2)],
            }
        );

        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn restricted_sinks_report_missing_operations() {
        let sink = MemorySink::with_operations([Operation::Log, Operation::Error]);
        assert!(sink.supports(Operation::Log));
        assert!(!sink.supports(Operation::Table));
        assert!(MemorySink::new().supports(Operation::Table));
    }

    #[test]
    fn only_console_like_sinks_render_the_directive() {
        assert!(MemorySink::new().renders_color_directive());
        assert!(!MemorySink::plain_text().renders_color_directive());
    }
}
