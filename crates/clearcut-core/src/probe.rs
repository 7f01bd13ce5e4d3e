//! Colour directive capability detection.
//!
//! # Design
//! - The capability check is a pure function of a target identity string so callers and tests
//!   can ask about any target without touching the environment.
//! - Only browser consoles render `%c`; terminals and unrecognised targets do not.
//! - The detected answer for the running process is computed once; the output target does not
//!   change at runtime.

use std::env;

use once_cell::sync::{Lazy, OnceCell};
use regex::Regex;

/// Environment variable that overrides the detected target identity.
pub const TARGET_OVERRIDE_ENV: &str = "CLEARCUT_TARGET";

/// Identity reported when nothing in the environment describes the target.
pub const UNKNOWN_TARGET: &str = "unknown";

static COLOR_CAPABLE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"(?i)(firefox|chrome|safari)").ok());

static DETECTED: OnceCell<bool> = OnceCell::new();

/// Whether a target identified by `identity` renders the `%c` colour directive.
#[must_use]
pub fn supports_color_directive(identity: &str) -> bool {
    COLOR_CAPABLE
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(identity))
}

/// Describe the current output target from the environment.
///
/// Resolution order: `CLEARCUT_TARGET`, `NO_COLOR` (reported as `no-color`), `TERM=dumb`,
/// `TERM_PROGRAM`, `TERM`, then [`UNKNOWN_TARGET`].
#[must_use]
pub fn target_identity() -> String {
    resolve_identity(|key| env::var(key).ok())
}

/// Colour support for the running process, cached after the first call.
#[must_use]
pub fn detected_color_support() -> bool {
    *DETECTED.get_or_init(|| supports_color_directive(&target_identity()))
}

fn resolve_identity(lookup: impl Fn(&str) -> Option<String>) -> String {
    if let Some(target) = lookup(TARGET_OVERRIDE_ENV).filter(|value| !value.is_empty()) {
        return target;
    }
    if lookup("NO_COLOR").is_some_and(|value| !value.is_empty()) {
        return "no-color".to_string();
    }
    let term = lookup("TERM").filter(|value| !value.is_empty());
    if term.as_deref() == Some("dumb") {
        return "dumb".to_string();
    }
    lookup("TERM_PROGRAM")
        .filter(|value| !value.is_empty())
        .or(term)
        .unwrap_or_else(|| UNKNOWN_TARGET.to_string())
}
