//! Reading and parsing the project's `.deploy-manifest.yml`.
//!
//! Reading and parsing are split so that [`resolve`](crate::resolve) stays free
//! of I/O: the builder calls [`read_config_file`], the pure pipeline calls
//! [`parse_config`] on whatever content it was handed.
//!
//! # Reading
//!
//! A missing file is not an error, it just means the FILE layer is absent.
//! A path that exists but is not a regular file (a directory, usually) is
//! fatal, and so is any other I/O failure.
//!
//! # Parsing
//!
//! The document is parsed into a [`serde_yaml::Value`] and walked against the
//! field registry. Known leaves are converted and applied, known sections are
//! descended into, and anything else is logged as an unknown key. YAML is
//! forgiving about scalars, so the conversions are too: `"true"` works where a
//! boolean is expected, `"5"` where an integer is, and a single string where a
//! list is.

use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};
use tracing::{debug, warn};

use crate::convert::{self, ConversionError};
use crate::error::ManifestConfigError;
use crate::fields::{self, Slot};
use crate::model::PartialConfig;

/// Name of the config file looked up in the project directory.
pub const DEFAULT_FILE_NAME: &str = ".deploy-manifest.yml";

/// Read `{dir}/{file_name}`.
///
/// Returns `Ok(None)` when nothing exists at that path.
pub fn read_config_file(
    dir: &Path,
    file_name: &str,
) -> Result<Option<(PathBuf, String)>, ManifestConfigError> {
    let file_path = dir.join(file_name);
    match std::fs::metadata(&file_path) {
        Ok(meta) if !meta.is_file() => {
            return Err(ManifestConfigError::NotAFile { path: file_path });
        }
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %file_path.display(), "No configuration file found");
            return Ok(None);
        }
        Err(e) => {
            return Err(ManifestConfigError::IoError {
                path: file_path,
                source: e,
            });
        }
    }

    match std::fs::read_to_string(&file_path) {
        Ok(content) => Ok(Some((file_path, content))),
        Err(e) => Err(ManifestConfigError::IoError {
            path: file_path,
            source: e,
        }),
    }
}

/// Parse config file content into a partial layer.
///
/// An empty, `null` or comment-only document yields an empty partial.
pub fn parse_config(content: &str, path: &Path) -> Result<PartialConfig, ManifestConfigError> {
    let mut config = PartialConfig::default();
    if is_blank_document(content) {
        debug!(path = %path.display(), "Configuration file is empty, using defaults");
        return Ok(config);
    }

    let document: Value =
        serde_yaml::from_str(content).map_err(|e| ManifestConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

    let root = match document {
        Value::Null => return Ok(config),
        Value::Mapping(map) => map,
        other => {
            return Err(ManifestConfigError::NotAMapping {
                path: path.to_path_buf(),
                found: describe(&other),
            });
        }
    };

    let mut unknown = Vec::new();
    apply_mapping(&root, "", &mut config, &mut unknown, path)?;

    for key in unknown {
        let line = find_key_line(content, &key);
        warn!(key = %key, path = %path.display(), line, "Unknown configuration key");
    }

    debug!(
        path = %path.display(),
        fields = config.explicit_paths().len(),
        "Loaded configuration file"
    );
    Ok(config)
}

fn is_blank_document(content: &str) -> bool {
    content.lines().all(|line| {
        let trimmed = line.trim();
        trimmed.is_empty() || trimmed.starts_with('#') || trimmed == "---"
    })
}

fn apply_mapping(
    map: &Mapping,
    prefix: &str,
    config: &mut PartialConfig,
    unknown: &mut Vec<String>,
    file: &Path,
) -> Result<(), ManifestConfigError> {
    for (key, value) in map {
        let Some(key) = key.as_str() else {
            unknown.push(format!("{prefix}{}", describe(key)));
            continue;
        };
        let dotted = format!("{prefix}{key}");

        // Nesting is spelled with mappings only; `output.directory: x` is not a leaf.
        if key.contains('.') {
            unknown.push(dotted);
            continue;
        }

        if let Some(field) = fields::find(&dotted) {
            assign_yaml(field.slot(config), value).map_err(|e| ManifestConfigError::InvalidValue {
                path: file.to_path_buf(),
                key: dotted.clone(),
                value: describe(value),
                reason: e.to_string(),
            })?;
        } else if fields::is_section(&dotted) {
            match value {
                Value::Mapping(section) => {
                    apply_mapping(section, &format!("{dotted}."), config, unknown, file)?;
                }
                Value::Null => {}
                other => {
                    return Err(ManifestConfigError::InvalidValue {
                        path: file.to_path_buf(),
                        key: dotted,
                        value: describe(other),
                        reason: format!("Expected a section, found {}", describe(other)),
                    });
                }
            }
        } else {
            unknown.push(dotted);
        }
    }
    Ok(())
}

/// Store a YAML value into a registry slot. `null` leaves the slot unset.
fn assign_yaml(slot: Slot<'_>, value: &Value) -> Result<(), ConversionError> {
    if value.is_null() {
        return Ok(());
    }
    match slot {
        Slot::Bool(slot) => {
            *slot = Some(match value {
                Value::Bool(b) => *b,
                Value::String(s) => convert::to_bool(s)?,
                other => return Err(mismatch("a boolean", other)),
            });
        }
        Slot::Int(slot) => {
            *slot = Some(match value {
                Value::Number(n) => n
                    .as_i64()
                    .and_then(|i| i32::try_from(i).ok())
                    .ok_or_else(|| ConversionError::InvalidInteger {
                        value: n.to_string(),
                        reason: "not a 32-bit integer".into(),
                    })?,
                Value::String(s) => convert::to_int(s)?,
                other => return Err(mismatch("an integer", other)),
            });
        }
        Slot::Text(slot) => *slot = Some(scalar_text(value).ok_or_else(|| mismatch("a string", value))?),
        Slot::List(slot) => {
            let items = match value {
                Value::Sequence(items) => items
                    .iter()
                    .map(|item| scalar_text(item).ok_or_else(|| mismatch("a list of strings", value)))
                    .collect::<Result<Vec<_>, _>>()?,
                other => vec![scalar_text(other).ok_or_else(|| mismatch("a list of strings", other))?],
            };
            *slot = Some(items);
        }
        Slot::Profile(slot) => {
            let name = scalar_text(value).ok_or_else(|| mismatch("a profile name", value))?;
            *slot = Some(name.parse()?);
        }
    }
    Ok(())
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(convert::to_trimmed(s)),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn mismatch(expected: &'static str, found: &Value) -> ConversionError {
    ConversionError::TypeMismatch {
        expected,
        found: describe(found),
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".into(),
        Value::Bool(b) => format!("'{b}'"),
        Value::Number(n) => format!("'{n}'"),
        Value::String(s) => format!("'{s}'"),
        Value::Sequence(_) => "a list".into(),
        Value::Mapping(_) => "a mapping".into(),
        Value::Tagged(tagged) => format!("a value tagged {}", tagged.tag),
    }
}

/// Find the 1-indexed line number for a dotted key in YAML content.
///
/// Tracks the chain of parent keys by indentation while scanning, and matches
/// when the chain equals the dotted key. Handles block mappings only; flow
/// mappings and multi-line scalars may confuse it. Returns 0 if the key cannot
/// be located.
fn find_key_line(content: &str, dotted_key: &str) -> usize {
    let wanted: Vec<&str> = dotted_key.split('.').collect();
    let mut chain: Vec<(usize, &str)> = Vec::new();

    for (i, line) in content.lines().enumerate() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('-') {
            continue;
        }
        let Some((key, _)) = trimmed.split_once(':') else {
            continue;
        };
        let key = key.trim().trim_matches(|c: char| c == '"' || c == '\'');
        let indent = line.len() - trimmed.len();

        while chain.last().is_some_and(|(depth, _)| *depth >= indent) {
            chain.pop();
        }
        chain.push((indent, key));

        if chain.len() == wanted.len() && chain.iter().zip(&wanted).all(|((_, a), b)| a == b) {
            return i + 1;
        }
    }
    0
}
