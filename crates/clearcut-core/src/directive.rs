//! Argument transformation applied before forwarding a call to the sink.
//!
//! # Design
//! - Only a string first argument is ever rewritten; other values pass through untouched.
//! - `dir` never benefits from colour styling, so its directives are always stripped.

use serde_json::Value;

use crate::operation::Operation;

/// Colour styling directive understood by capable targets.
pub const COLOR_DIRECTIVE: &str = "%c";

/// Remove every colour directive from `text`.
#[must_use]
pub fn strip_directives(text: &str) -> String {
    text.replace(COLOR_DIRECTIVE, "")
}

/// Produce the argument list a sink receives for `operation`.
///
/// `color_supported` describes the output target; `prefix` is the channel's message label.
#[must_use]
pub fn prepare_arguments(
    operation: Operation,
    args: &[Value],
    color_supported: bool,
    prefix: Option<&str>,
) -> Vec<Value> {
    let mut prepared = args.to_vec();

    if !color_supported || operation == Operation::Dir {
        if let Some(Value::String(text)) = prepared.first_mut() {
            *text = strip_directives(text);
        }
    }

    if let Some(prefix) = prefix.filter(|_| operation.is_message()) {
        match prepared.first_mut() {
            Some(Value::String(text)) => *text = format!("{prefix} {text}"),
            _ => prepared.insert(0, Value::String(prefix.to_string())),
        }
    }

    prepared
}
