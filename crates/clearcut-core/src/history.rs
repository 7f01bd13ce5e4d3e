//! Recorded calls kept per channel for inspection and forced replay.
//!
//! # Design
//! - Insertion order is call order; the newest entry is always at the back.
//! - Unbounded unless a capacity is set, in which case the oldest entries are evicted first.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::operation::Operation;

/// One output call captured by a channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedCall {
    /// Arguments exactly as the caller passed them.
    pub arguments: Vec<Value>,
    /// Output primitive the call targeted.
    pub operation: Operation,
}

impl RecordedCall {
    /// Capture a call.
    #[must_use]
    pub const fn new(operation: Operation, arguments: Vec<Value>) -> Self {
        Self {
            arguments,
            operation,
        }
    }
}

/// Ordered buffer of recorded calls.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: VecDeque<RecordedCall>,
    limit: Option<usize>,
}

impl History {
    /// An unbounded, empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty history holding at most `limit` entries when set.
    #[must_use]
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            entries: VecDeque::new(),
            limit,
        }
    }

    /// Append a call, evicting the oldest entries past the capacity.
    pub fn push(&mut self, call: RecordedCall) {
        self.entries.push_back(call);
        self.enforce_limit();
    }

    /// Change the capacity, trimming the oldest entries if it shrank.
    pub fn set_limit(&mut self, limit: Option<usize>) {
        self.limit = limit;
        self.enforce_limit();
    }

    /// Current capacity.
    #[must_use]
    pub const fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Number of recorded calls.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent call.
    #[must_use]
    pub fn last(&self) -> Option<&RecordedCall> {
        self.entries.back()
    }

    /// Calls oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &RecordedCall> {
        self.entries.iter()
    }

    /// Owned copy of every call, oldest first.
    #[must_use]
    pub fn to_vec(&self) -> Vec<RecordedCall> {
        self.entries.iter().cloned().collect()
    }

    fn enforce_limit(&mut self) {
        if let Some(limit) = self.limit {
            while self.entries.len() > limit {
                self.entries.pop_front();
            }
        }
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a RecordedCall;
    type IntoIter = std::collections::vec_deque::Iter<'a, RecordedCall>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for History {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.entries.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn call(message: &str) -> RecordedCall {
        RecordedCall::new(Operation::Log, vec![json!(message)])
    }

    #[test]
    fn keeps_insertion_order() {
        let mut history = History::new();
        history.push(call("one"));
        history.push(call("two"));
        let messages: Vec<_> = history.iter().map(|entry| entry.arguments[0].clone()).collect();
        assert_eq!(messages, vec![json!("one"), json!("two")]);
        assert_eq!(history.last(), Some(&call("two")));
    }

    #[test]
    fn evicts_oldest_past_limit() {
        let mut history = History::with_limit(Some(2));
        for message in ["one", "two", "three"] {
            history.push(call(message));
        }
        assert_eq!(history.to_vec(), vec![call("two"), call("three")]);
    }

    #[test]
    fn shrinking_limit_trims_immediately() {
        let mut history = History::new();
        for message in ["one", "two", "three"] {
            history.push(call(message));
        }
        history.set_limit(Some(1));
        assert_eq!(history.to_vec(), vec![call("three")]);
        assert_eq!(history.limit(), Some(1));
    }

    #[test]
    fn serializes_as_sequence() -> Result<(), serde_json::Error> {
        let mut history = History::new();
        history.push(RecordedCall::new(Operation::Warn, vec![json!("careful")]));
        assert_eq!(
            serde_json::to_value(&history)?,
            json!([{ "arguments": ["careful"], "operation": "warn" }])
        );
        Ok(())
    }
}
