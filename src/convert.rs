//! String coercion shared by the environment and command-line loaders.
//!
//! Every source that hands over raw text (environment variables, `-D`
//! properties, quoted YAML scalars) goes through these functions, so `"yes"`
//! means `true` no matter where it was written.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("Cannot convert '{value}' to boolean. Expected: true/false, yes/no, or 1/0")]
    InvalidBoolean { value: String },

    #[error("Cannot convert '{value}' to integer: {reason}")]
    InvalidInteger { value: String, reason: String },

    #[error("Invalid profile '{value}'. Allowed values: {allowed}")]
    InvalidProfile { value: String, allowed: String },

    #[error("Expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: String,
    },
}

/// Parse a boolean. Accepts `true/yes/1` and `false/no/0`, case-insensitively.
pub fn to_bool(value: &str) -> Result<bool, ConversionError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(ConversionError::InvalidBoolean {
            value: value.to_string(),
        }),
    }
}

/// Parse a base-10 integer after trimming whitespace.
pub fn to_int(value: &str) -> Result<i32, ConversionError> {
    value
        .trim()
        .parse::<i32>()
        .map_err(|e| ConversionError::InvalidInteger {
            value: value.to_string(),
            reason: e.to_string(),
        })
}

pub fn to_trimmed(value: &str) -> String {
    value.trim().to_string()
}

/// Split a comma-separated list, trimming items and dropping empty ones.
///
/// `"json,html, yaml "` becomes `["json", "html", "yaml"]`; `""` becomes `[]`.
pub fn to_string_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Turn a raw env/property key into a dotted path.
///
/// The prefix is stripped when present. If what remains contains `_`, it is
/// lowercased and every `_` becomes `.`; otherwise it is returned as-is.
pub fn normalize_key(raw: &str, prefix: &str) -> String {
    let rest = raw.strip_prefix(prefix).unwrap_or(raw);
    if rest.contains('_') {
        rest.to_lowercase().replace('_', ".")
    } else {
        rest.to_string()
    }
}

/// `MANIFEST_OUTPUT_FORMATS` with prefix `MANIFEST` → `output.formats`.
///
/// `None` unless the key starts with `{prefix}_` and something follows it.
pub fn env_key_to_path(key: &str, prefix: &str) -> Option<String> {
    strip_separated(key, prefix, '_').map(|rest| normalize_key(rest, ""))
}

/// `manifest.output.formats` with prefix `manifest` → `output.formats`.
///
/// `None` unless the key starts with `{prefix}.` and something follows it.
pub fn property_to_path(key: &str, prefix: &str) -> Option<String> {
    strip_separated(key, prefix, '.').map(|rest| normalize_key(rest, ""))
}

fn strip_separated<'a>(key: &'a str, prefix: &str, separator: char) -> Option<&'a str> {
    let rest = key.strip_prefix(prefix)?.strip_prefix(separator)?;
    (!rest.is_empty()).then_some(rest)
}
