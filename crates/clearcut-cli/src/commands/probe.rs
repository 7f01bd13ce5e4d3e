use clearcut_core::{supports_color_directive, target_identity};

use crate::cli::{OutputFormat, ProbeArgs};
use crate::error::CliResult;
use crate::output::{ProbeReport, render_probe};

pub(crate) fn handle_probe(args: &ProbeArgs, format: OutputFormat) -> CliResult<()> {
    let report = probe_report(args.target.clone());
    render_probe(&report, format)
}

fn probe_report(target: Option<String>) -> ProbeReport {
    let identity = target.unwrap_or_else(target_identity);
    ProbeReport {
        color_directive: supports_color_directive(&identity),
        target: identity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_target_is_classified() {
        let report = probe_report(Some("Firefox/128.0".into()));
        assert_eq!(report.target, "Firefox/128.0");
        assert!(report.color_directive);

        for terminal in ["dumb", "xterm-256color", "tmux-256color"] {
            let report = probe_report(Some(terminal.into()));
            assert!(!report.color_directive, "{terminal}");
        }
    }
}
