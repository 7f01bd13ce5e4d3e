use std::fs;
use std::sync::Arc;

use clearcut_cli::script::{ScriptStep, parse_script, run_script};
use clearcut_core::{Log, MemorySink, Operation, RegistryConfig};
use serde_json::json;

#[test]
fn script_file_replays_through_configured_channels() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let config_path = dir.path().join("clearcut.json");
    let script_path = dir.path().join("calls.jsonl");
    fs::write(
        &config_path,
        r#"{"log_level":"debug","channels":{"net":{"enabled":false,"history_limit":2}}}"#,
    )?;
    fs::write(
        &script_path,
        r#"# warm up the default channel
{"kind":"call","operation":"log","args":["%cready","color: green"]}

{"kind":"call","channel":"net","operation":"warn","args":["retry 1"]}
{"kind":"call","channel":"net","operation":"warn","args":["retry 2"]}
{"kind":"call","channel":"net","operation":"error","args":["gave up"]}
{"kind":"force","channel":"net"}
{"kind":"disable_all"}
{"kind":"call","operation":"info","args":["muted"]}
"#,
    )?;

    let config = RegistryConfig::from_json_str(&fs::read_to_string(&config_path)?)?;
    assert_eq!(config.log_level.as_deref(), Some("debug"));
    let steps = parse_script(&fs::read_to_string(&script_path)?)?;
    assert_eq!(steps.len(), 7);

    let sink = Arc::new(MemorySink::new());
    let mut log = Log::with_color_support(sink.clone(), false);
    config.apply(log.registry_mut());
    assert_eq!(run_script(&mut log, &steps), 7);

    let emitted = sink.calls();
    assert_eq!(emitted.len(), 2);
    assert_eq!(emitted[0].operation, Operation::Log);
    assert_eq!(emitted[0].arguments, vec![json!("ready"), json!("color: green")]);
    assert_eq!(emitted[1].operation, Operation::Error);
    assert_eq!(emitted[1].arguments, vec![json!("gave up")]);

    let history = log.history_all();
    let net: Vec<_> = history["net"].iter().map(|call| call.operation).collect();
    assert_eq!(net, vec![Operation::Warn, Operation::Error]);
    assert_eq!(history["default"].len(), 2);
    assert!(!log.is_enabled());
    Ok(())
}

#[test]
fn configure_steps_create_missing_channels() -> anyhow::Result<()> {
    let steps = parse_script(
        r#"{"kind":"configure","channel":"audit","options":{"history":false,"prefix":"[audit]"}}
{"kind":"call","channel":"audit","operation":"info","args":["login"]}"#,
    )?;
    assert!(matches!(steps[0], ScriptStep::Configure { .. }));

    let sink = Arc::new(MemorySink::new());
    let mut log = Log::with_color_support(sink.clone(), true);
    run_script(&mut log, &steps);

    assert_eq!(sink.calls()[0].arguments, vec![json!("[audit] login")]);
    assert!(log.history_all()["audit"].is_empty());
    Ok(())
}

#[test]
fn unknown_configure_fields_are_rejected() {
    let err = parse_script(r#"{"kind":"configure","options":{"colour":true}}"#)
        .expect_err("unknown option should be rejected");
    assert!(format!("{err:#}").contains("line 1"));
}
