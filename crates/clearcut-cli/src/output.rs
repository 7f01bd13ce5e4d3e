//! Output renderers and formatting helpers for CLI commands.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use anyhow::anyhow;
use clearcut_core::RecordedCall;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};

/// Result of classifying a runtime target.
#[derive(Debug, Serialize)]
pub(crate) struct ProbeReport {
    pub(crate) target: String,
    pub(crate) color_directive: bool,
}

pub(crate) fn render_history(
    history: &BTreeMap<String, Vec<RecordedCall>>,
    format: OutputFormat,
) -> CliResult<()> {
    let text = match format {
        OutputFormat::Json => to_json(history)?,
        OutputFormat::Table => history_table(history)?,
    };
    println!("{text}");
    Ok(())
}

pub(crate) fn render_probe(report: &ProbeReport, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => println!("{}", to_json(report)?),
        OutputFormat::Table => {
            println!("target: {}", report.target);
            println!(
                "color directive: {}",
                if report.color_directive {
                    "supported"
                } else {
                    "stripped"
                }
            );
        }
    }
    Ok(())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))
}

fn history_table(history: &BTreeMap<String, Vec<RecordedCall>>) -> CliResult<String> {
    let mut text = format!("{:<16} {:>5} {:<15} ARGUMENTS", "CHANNEL", "SEQ", "OPERATION");
    for (channel, calls) in history {
        for (index, call) in calls.iter().enumerate() {
            let arguments = serde_json::to_string(&call.arguments)
                .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))?;
            write!(
                text,
                "\n{:<16} {:>5} {:<15} {}",
                channel,
                index + 1,
                call.operation.as_str(),
                arguments
            )
            .map_err(|err| CliError::failure(anyhow!("failed to render table: {err}")))?;
        }
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clearcut_core::Operation;
    use serde_json::json;

    fn sample() -> BTreeMap<String, Vec<RecordedCall>> {
        BTreeMap::from([
            (
                "default".to_string(),
                vec![RecordedCall::new(Operation::Log, vec![json!("ready")])],
            ),
            (
                "net".to_string(),
                vec![
                    RecordedCall::new(Operation::Warn, vec![json!("retrying"), json!(3)]),
                    RecordedCall::new(Operation::Error, vec![json!("gave up")]),
                ],
            ),
        ])
    }

    #[test]
    fn history_table_lists_calls_per_channel() {
        let text = history_table(&sample()).expect("table renders");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("CHANNEL"));
        assert!(lines[1].starts_with("default"));
        assert!(lines[2].contains("warn"));
        assert!(lines[2].ends_with(r#"["retrying",3]"#));
        assert!(lines[3].contains("    2 "));
    }

    #[test]
    fn history_json_is_keyed_by_channel() {
        let text = to_json(&sample()).expect("json renders");
        let value: serde_json::Value = serde_json::from_str(&text).expect("valid json");
        assert_eq!(value["net"][0]["operation"], "warn");
        assert_eq!(value["default"][0]["arguments"], json!(["ready"]));
    }
}
