//! Output sink that forwards channel calls into `tracing`.
//!
//! # Design
//! - One event per call; the operation picks the level.
//! - String arguments render verbatim, everything else as compact JSON, joined by spaces.
//! - Log lines cannot style text with `%c`, so the sink declines the directive and channels
//!   strip it.

use clearcut_core::{Operation, OutputSink};
use serde_json::Value;
use tracing::{debug, error, info, trace, warn};

/// Sink that emits every call as a `tracing` event under the `clearcut` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
    /// Construct the sink.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl OutputSink for TracingSink {
    fn write(&self, operation: Operation, args: &[Value]) {
        let message = render_arguments(args);
        let name = operation.as_str();
        match operation_level(operation) {
            EventLevel::Error => error!(target: "clearcut", operation = name, "{message}"),
            EventLevel::Warn => warn!(target: "clearcut", operation = name, "{message}"),
            EventLevel::Info => info!(target: "clearcut", operation = name, "{message}"),
            EventLevel::Debug => debug!(target: "clearcut", operation = name, "{message}"),
            EventLevel::Trace => trace!(target: "clearcut", operation = name, "{message}"),
        }
    }
}

/// Render call arguments as a single line.
#[must_use]
pub fn render_arguments(args: &[Value]) -> String {
    args.iter()
        .map(|value| match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EventLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

const fn operation_level(operation: Operation) -> EventLevel {
    match operation {
        Operation::Assert | Operation::Error | Operation::Exception => EventLevel::Error,
        Operation::Warn => EventLevel::Warn,
        Operation::Debug => EventLevel::Debug,
        Operation::Trace
        | Operation::Profile
        | Operation::ProfileEnd
        | Operation::Clear
        | Operation::GroupEnd => EventLevel::Trace,
        Operation::Count
        | Operation::Dir
        | Operation::Dirxml
        | Operation::Group
        | Operation::GroupCollapsed
        | Operation::Info
        | Operation::Log
        | Operation::Table
        | Operation::Time
        | Operation::TimeEnd
        | Operation::TimeStamp => EventLevel::Info,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clearcut_core::{Log, supports_color_directive};
    use serde_json::json;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex, PoisonError};
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct CapturedOutput(Arc<Mutex<Vec<u8>>>);

    impl CapturedOutput {
        fn text(&self) -> String {
            let bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner);
            String::from_utf8_lossy(&bytes).into_owned()
        }
    }

    impl Write for CapturedOutput {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedOutput {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn capture(color_supported: bool, emit: impl FnOnce(&mut Log)) -> String {
        let output = CapturedOutput::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(output.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();
        let mut log = Log::with_color_support(Arc::new(TracingSink::new()), color_supported);
        tracing::subscriber::with_default(subscriber, || emit(&mut log));
        output.text()
    }

    #[test]
    fn terminal_targets_log_stripped_directives() {
        let xterm = supports_color_directive("xterm-256color");
        assert!(!xterm);

        let text = capture(xterm, |log| {
            log.log(["%cready", "color: green"]);
        });
        assert!(text.contains("ready color: green"), "{text}");
        assert!(!text.contains("%c"), "{text}");
    }

    #[test]
    fn directives_are_stripped_even_for_colour_targets() {
        assert!(!TracingSink::new().renders_color_directive());

        let text = capture(true, |log| {
            log.warn(["%cslow", "color: orange"]);
        });
        assert!(text.contains("slow color: orange"), "{text}");
        assert!(!text.contains("%c"), "{text}");
    }

    #[test]
    fn renders_strings_verbatim_and_values_as_json() {
        let rendered = render_arguments(&[json!("retrying"), json!(3), json!({ "host": "a" })]);
        assert_eq!(rendered, r#"retrying 3 {"host":"a"}"#);
        assert_eq!(render_arguments(&[]), "");
    }

    #[test]
    fn operations_map_to_levels() {
        assert_eq!(operation_level(Operation::Error), EventLevel::Error);
        assert_eq!(operation_level(Operation::Assert), EventLevel::Error);
        assert_eq!(operation_level(Operation::Warn), EventLevel::Warn);
        assert_eq!(operation_level(Operation::Debug), EventLevel::Debug);
        assert_eq!(operation_level(Operation::GroupEnd), EventLevel::Trace);
        assert_eq!(operation_level(Operation::Table), EventLevel::Info);
        assert_eq!(operation_level(Operation::Log), EventLevel::Info);
    }

    #[test]
    fn supports_every_operation() {
        let sink = TracingSink::new();
        for operation in Operation::ALL {
            assert!(sink.supports(operation));
            sink.write(operation, &[json!("sample")]);
        }
    }
}
