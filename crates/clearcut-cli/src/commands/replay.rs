use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use clearcut_core::{
    ClearcutError, Log, RegistryConfig, detected_color_support, supports_color_directive,
};
use clearcut_telemetry::{TracingSink, init_logging, logging_config_from};
use tracing::info;

use crate::cli::{OutputFormat, ReplayArgs};
use crate::error::{CliError, CliResult};
use crate::output::render_history;
use crate::script::{ScriptStep, parse_script, run_script};

pub(crate) fn handle_replay(args: &ReplayArgs, format: OutputFormat) -> CliResult<()> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => RegistryConfig::default(),
    };
    init_logging(&logging_config_from(&config)).map_err(CliError::failure)?;

    let steps = load_script(&args.script)?;
    let color_supported = args
        .target
        .as_deref()
        .map_or_else(detected_color_support, supports_color_directive);

    let mut log = Log::with_color_support(Arc::new(TracingSink::new()), color_supported);
    let executed = replay(&mut log, &config, &steps);
    info!(
        steps = executed,
        channels = log.registry().len(),
        color_supported,
        "script replayed"
    );

    if args.dump_history {
        render_history(&log.history_all(), format)?;
    }
    Ok(())
}

fn replay(log: &mut Log, config: &RegistryConfig, steps: &[ScriptStep]) -> usize {
    config.apply(log.registry_mut());
    run_script(log, steps)
}

fn load_config(path: &Path) -> CliResult<RegistryConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))
        .map_err(CliError::failure)?;
    RegistryConfig::from_json_str(&text)
        .map_err(|err| CliError::validation(describe_config_error(path, &err)))
}

fn load_script(path: &Path) -> CliResult<Vec<ScriptStep>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))
        .map_err(CliError::failure)?;
    parse_script(&text).map_err(|err| {
        CliError::validation(format!("{}: {err:#}", path.display()))
    })
}

fn describe_config_error(path: &Path, err: &ClearcutError) -> String {
    let mut message = format!("{}: {err}", path.display());
    if let ClearcutError::InvalidConfiguration {
        channel,
        reason,
        detail,
    } = err
    {
        message.push_str(&format!(" ({reason}"));
        if let Some(channel) = channel {
            message.push_str(&format!(", channel `{channel}`"));
        }
        if let Some(detail) = detail {
            message.push_str(&format!(": {detail}"));
        }
        message.push(')');
    }
    message
}
