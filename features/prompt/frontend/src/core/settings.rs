use thiserror::Error;
use tracing::warn;

/// Canonical values of `$COMPLETION_MODE`.
pub const CANONIC_COMPLETION_MODES: [&str; 2] = ["default", "menu-complete"];

/// Canonical values of `$OXSH_COLOR_DEPTH` (plus `""` meaning unset).
pub const CANONIC_COLOR_DEPTHS: [&str; 7] = [
    "MONOCHROME",
    "DEPTH_1_BIT",
    "DEPTH_4_BIT",
    "DEPTH_8_BIT",
    "DEPTH_24_BIT",
    "TRUE_COLOR",
    "DEFAULT",
];

/// Registry key mirroring the color depth for child processes.
pub const COLOR_DEPTH_ENV: &str = "OXSH_COLOR_DEPTH";

/// Default for `$ASYNC_INVALIDATE_INTERVAL`, in seconds.
pub const DEFAULT_INVALIDATE_INTERVAL: &str = "0.05";

/// A setting value that did not normalize to anything recognized.
/// Never fatal: the `to_*` wrappers log it and substitute `fallback`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{value:?} is not a valid value for ${key}; using {fallback:?}")]
pub struct InvalidSetting {
    pub key: &'static str,
    pub value: String,
    pub fallback: &'static str,
}

impl InvalidSetting {
    fn new(key: &'static str, value: &str, fallback: &'static str) -> Self {
        Self {
            key,
            value: value.to_string(),
            fallback,
        }
    }
}

fn warn_and_fall_back(err: &InvalidSetting) -> String {
    warn!("{err}");
    err.fallback.to_string()
}

/// Enumerated values of `$COMPLETION_MODE`.
pub fn is_completion_mode(x: &str) -> bool {
    CANONIC_COMPLETION_MODES.contains(&x)
}

/// Fallible half of [`to_completion_mode`].
pub fn try_completion_mode(x: &str) -> Result<String, InvalidSetting> {
    let y = x.to_lowercase().replace('_', "-");
    let y = match y.as_str() {
        "" | "d" | "xonsh" | "none" | "def" => "default".to_string(),
        "m" | "menu" | "menu-completion" => "menu-complete".to_string(),
        _ => y,
    };
    if is_completion_mode(&y) {
        Ok(y)
    } else {
        Err(InvalidSetting::new("COMPLETION_MODE", x, "default"))
    }
}

/// Convert user input to a value of `$COMPLETION_MODE`.
pub fn to_completion_mode(x: &str) -> String {
    try_completion_mode(x).unwrap_or_else(|err| warn_and_fall_back(&err))
}

/// Enumerated values of `$COMPLETIONS_DISPLAY`.
pub fn is_completions_display_value(x: &str) -> bool {
    matches!(x, "none" | "single" | "multi")
}

/// Fallible half of [`to_completions_display_value`].
pub fn try_completions_display_value(x: &str) -> Result<String, InvalidSetting> {
    match x.to_lowercase().as_str() {
        "none" | "false" => Ok("none".to_string()),
        "multi" | "true" => Ok("multi".to_string()),
        "single" | "readline" => Ok("single".to_string()),
        _ => Err(InvalidSetting::new("COMPLETIONS_DISPLAY", x, "multi")),
    }
}

/// Convert user input to a value of `$COMPLETIONS_DISPLAY`.
///
/// `readline` is a legacy synonym for the one-column display and is
/// canonicalized to `single` rather than passed through, so the
/// registry only ever holds the three canonical values.
pub fn to_completions_display_value(x: &str) -> String {
    try_completions_display_value(x).unwrap_or_else(|err| warn_and_fall_back(&err))
}

/// Enumerated values of `$OXSH_COLOR_DEPTH`; `""` means unset.
pub fn is_color_depth(x: &str) -> bool {
    x.is_empty() || CANONIC_COLOR_DEPTHS.contains(&x)
}

/// Fallible half of [`to_color_depth`].
pub fn try_color_depth(x: &str) -> Result<String, InvalidSetting> {
    let y = x.trim().to_uppercase().replace([' ', '-'], "_");
    let y = match y.as_str() {
        "TRUECOLOR" | "24_BIT" | "24BIT" => "TRUE_COLOR".to_string(),
        _ => y,
    };
    if is_color_depth(&y) {
        Ok(y)
    } else {
        Err(InvalidSetting::new("OXSH_COLOR_DEPTH", x, ""))
    }
}

/// Convert user input to a value of `$OXSH_COLOR_DEPTH`. Invalid
/// input resets to unset; the lifecycle keeps the mirrored
/// [`COLOR_DEPTH_ENV`] entry in the host registry in step with the
/// result, clearing it when the depth is unset so child processes
/// don't inherit a stale value.
pub fn to_color_depth(x: &str) -> String {
    try_color_depth(x).unwrap_or_else(|err| warn_and_fall_back(&err))
}

/// Coerce user input to `"true"` / `"false"`. Total; the falsy set
/// mirrors what users write in env files, everything else is truthy.
pub fn to_bool_string(x: &str) -> String {
    let falsy = matches!(
        x.trim().to_lowercase().as_str(),
        "" | "0" | "n" | "f" | "no" | "none" | "false" | "off"
    );
    if falsy { "false" } else { "true" }.to_string()
}

pub fn is_bool_string(x: &str) -> bool {
    matches!(x, "true" | "false")
}

/// Non-negative integer or `""` (meaning "let the pool decide"), for
/// `$ASYNC_PROMPT_THREAD_WORKERS`.
pub fn is_workers_string(x: &str) -> bool {
    x.is_empty() || x.parse::<u32>().is_ok()
}

pub fn to_workers_string(x: &str) -> String {
    let y = x.trim();
    if is_workers_string(y) {
        y.to_string()
    } else {
        warn_and_fall_back(&InvalidSetting::new("ASYNC_PROMPT_THREAD_WORKERS", x, ""))
    }
}

/// Non-negative integer, for `$COMPLETIONS_MENU_ROWS`.
pub fn is_rows_string(x: &str) -> bool {
    x.parse::<u16>().is_ok()
}

pub fn to_rows_string(x: &str) -> String {
    let y = x.trim();
    if is_rows_string(y) {
        y.to_string()
    } else {
        warn_and_fall_back(&InvalidSetting::new("COMPLETIONS_MENU_ROWS", x, "5"))
    }
}

/// Seconds as a float, for `$ASYNC_INVALIDATE_INTERVAL`.
pub fn is_seconds_string(x: &str) -> bool {
    x.parse::<f64>().map_or(false, |v| v >= 0.0)
}

pub fn to_seconds_string(x: &str) -> String {
    let y = x.trim();
    if is_seconds_string(y) {
        y.to_string()
    } else {
        warn_and_fall_back(&InvalidSetting::new(
            "ASYNC_INVALIDATE_INTERVAL",
            x,
            DEFAULT_INVALIDATE_INTERVAL,
        ))
    }
}
