//! Debug logging helpers for matched and captured text.
//!
//! Log files regularly contain user names, addresses and tokens, so captured values
//! are masked in debug output unless `LOGSCRUB_ALLOW_DEBUG_VALUES=true` is set.

use lazy_static::lazy_static;
use log::debug;

lazy_static! {
    /// Read once; whether raw captured values may appear in debug logs.
    static ref DEBUG_VALUES_ALLOWED: bool = {
        std::env::var("LOGSCRUB_ALLOW_DEBUG_VALUES")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// Masks a value for logging, keeping only its length for longer inputs.
pub fn mask_value(s: &str) -> String {
    const MAX_LEN: usize = 8;
    if s.len() <= MAX_LEN {
        "[MASKED]".to_string()
    } else {
        format!("[MASKED: {} chars]", s.len())
    }
}

fn loggable(value: &str) -> String {
    if *DEBUG_VALUES_ALLOWED {
        value.to_string()
    } else {
        mask_value(value)
    }
}

pub fn log_group_value_debug(expression: &str, label: &str, value: &str) {
    debug!(
        "Expression '{}' captured group '{}': '{}'",
        expression,
        label,
        loggable(value)
    );
}

pub fn log_match_debug(expression: &str, start: usize, end: usize, matched: &str) {
    debug!(
        "Expression '{}' matched bytes {}..{}: '{}'",
        expression,
        start,
        end,
        loggable(matched)
    );
}
