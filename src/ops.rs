//! Config operations: validation summary, listing, key lookup, template
//! generation, and the result types callers display.

use std::fmt;
use std::path::PathBuf;

use serde_json::Value;

use crate::error::ManifestConfigError;
use crate::fields;
use crate::merge::ResolvedConfig;
use crate::model::ManifestConfig;
use crate::suggest;
use crate::types::ConfigSource;

/// One resolved field with its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub key: String,
    pub value: String,
    pub source: ConfigSource,
}

/// Result of a config operation. Returned to the caller for display.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigResult {
    /// The configuration validated. Lists the fields some source set explicitly.
    Valid { entries: Vec<Entry> },
    /// Every field with its resolved value and source.
    Listing { entries: Vec<Entry> },
    /// A key's resolved value, its source and its doc line.
    KeyValue { entry: Entry, doc: String },
    /// A generated YAML template string.
    Template(String),
    /// Confirmation that a template was written to a file.
    TemplateWritten { path: PathBuf },
}

fn write_entries(f: &mut fmt::Formatter<'_>, entries: &[Entry]) -> fmt::Result {
    let width = entries.iter().map(|e| e.key.len()).max().unwrap_or(0);
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            writeln!(f)?;
        }
        write!(
            f,
            "{:<width$} = {} [{}]",
            entry.key, entry.value, entry.source
        )?;
    }
    Ok(())
}

impl fmt::Display for ConfigResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigResult::Valid { entries } => {
                writeln!(f, "Configuration is valid")?;
                writeln!(
                    f,
                    "Priority: {}",
                    ConfigSource::ALL.map(ConfigSource::label).join(" > ")
                )?;
                if entries.is_empty() {
                    writeln!(f, "All settings use plugin defaults")
                } else {
                    writeln!(f)?;
                    write_entries(f, entries)?;
                    writeln!(f)
                }
            }
            ConfigResult::Listing { entries } => {
                write_entries(f, entries)?;
                writeln!(f)
            }
            ConfigResult::KeyValue { entry, doc } => {
                writeln!(f, "# {doc}")?;
                writeln!(f, "{} = {} [{}]", entry.key, entry.value, entry.source)
            }
            ConfigResult::Template(t) => write!(f, "{t}"),
            ConfigResult::TemplateWritten { path } => {
                writeln!(f, "Config template written to {}", path.display())
            }
        }
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn entry(resolved: &ResolvedConfig, field: &fields::FieldSpec) -> Entry {
    Entry {
        key: field.path().to_string(),
        value: format_value(&field.read(resolved.config())),
        source: resolved.source(field.path()),
    }
}

/// Summary for a configuration that passed validation.
pub fn validated(resolved: &ResolvedConfig) -> ConfigResult {
    let entries = fields::all()
        .iter()
        .filter(|field| resolved.is_explicitly_set(field.path()))
        .map(|field| entry(resolved, field))
        .collect();
    ConfigResult::Valid { entries }
}

/// Every field, in declaration order.
pub fn list_values(resolved: &ResolvedConfig) -> ConfigResult {
    let entries = fields::all()
        .iter()
        .map(|field| entry(resolved, field))
        .collect();
    ConfigResult::Listing { entries }
}

/// Look up one field by dotted path.
pub fn get_value(resolved: &ResolvedConfig, key: &str) -> Result<ConfigResult, ManifestConfigError> {
    let field = fields::find(key).ok_or_else(|| ManifestConfigError::KeyNotFound {
        key: key.to_string(),
        suggestion: suggest::suggest(key, &fields::paths()).map(str::to_string),
    })?;
    Ok(ConfigResult::KeyValue {
        entry: entry(resolved, field),
        doc: field.doc().to_string(),
    })
}

/// A commented YAML document listing every field at its default value.
pub fn generate_template() -> String {
    let defaults = ManifestConfig::default();
    let mut out = String::new();
    out.push_str("# Deploy manifest configuration (.deploy-manifest.yml)\n");
    out.push_str("#\n");
    out.push_str("# Precedence, highest first: command line (-Dmanifest.*), environment\n");
    out.push_str("# (MANIFEST_*), this file, profile, host build config, defaults.\n");

    // Sections currently open, outermost first.
    let mut open: Vec<&str> = Vec::new();
    for field in fields::all() {
        let segments: Vec<&'static str> = field.path().split('.').collect();
        let Some((leaf, parents)) = segments.split_last() else {
            continue;
        };

        let shared = open
            .iter()
            .zip(parents)
            .take_while(|(a, b)| a == b)
            .count();
        open.truncate(shared);

        if shared == 0 {
            out.push('\n');
        }
        for (depth, section) in parents.iter().enumerate().skip(shared) {
            out.push_str(&format!("{}{section}:\n", "  ".repeat(depth)));
            open.push(*section);
        }

        let indent = "  ".repeat(parents.len());
        out.push_str(&format!("{indent}# {}\n", field.doc()));
        out.push_str(&format!("{indent}{leaf}: {}\n", field.read(&defaults)));
    }
    out
}
