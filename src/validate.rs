//! Validation of a resolved configuration.
//!
//! Every check runs; errors are collected into a [`ValidationReport`] instead
//! of stopping at the first one, so a user fixing a config file sees all of its
//! problems at once.
//!
//! Two kinds of checks run:
//!
//! - **Structural**: required strings are non-empty, numbers are in range, the
//!   report filename is safe to use as a file name.
//! - **Vocabulary**: enumerated settings (`output.formats`, `git.fetch`, ...)
//!   belong to a fixed set. A miss lists every allowed value and, when one is
//!   close enough, suggests it.

use std::fmt;

use serde_json::Value;
use tracing::debug;

use crate::model::{GitFetchMode, ManifestConfig};
use crate::suggest;

pub const OUTPUT_FORMATS: &[&str] = &["json", "yaml", "html", "xml"];
pub const ARCHIVE_FORMATS: &[&str] = &["zip", "tar.gz", "tar.bz2", "jar"];
pub const TREE_FORMATS: &[&str] = &["flat", "tree", "both"];
pub const DEPENDENCY_SCOPES: &[&str] = &["compile", "runtime", "test", "provided", "system"];

/// One problem with one field.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    /// The rejected value (for list checks, the rejected element).
    pub value: Value,
    pub message: String,
    /// Closest valid value, for vocabulary misses within edit distance.
    pub suggestion: Option<String>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{suggestion}'?)")?;
        }
        Ok(())
    }
}

/// All problems found in one validation pass. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Errors recorded against one field.
    pub fn errors_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a ValidationError> {
        self.errors.iter().filter(move |e| e.field == field)
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            return writeln!(f, "Configuration is valid");
        }
        writeln!(f, "Configuration validation failed ({} error(s))", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            writeln!(f)?;
            writeln!(f, "Error {}: {}", i + 1, error.field)?;
            writeln!(f, "  Value: '{}'", display_value(&error.value))?;
            writeln!(f, "  {}", error.message)?;
            if let Some(suggestion) = &error.suggestion {
                writeln!(f, "  Did you mean '{suggestion}'?")?;
            }
        }
        writeln!(f)?;
        write!(f, "Fix these errors and try again.")
    }
}

/// Check a resolved configuration. Never fails; problems go into the report.
pub fn validate(config: &ManifestConfig) -> ValidationReport {
    let mut errors = Vec::new();
    check_structure(config, &mut errors);
    check_vocabularies(config, &mut errors);
    debug!(errors = errors.len(), "Validated configuration");
    ValidationReport::new(errors)
}

fn error(field: &str, value: impl Into<Value>, message: impl Into<String>) -> ValidationError {
    ValidationError {
        field: field.to_string(),
        value: value.into(),
        message: message.into(),
        suggestion: None,
    }
}

fn check_structure(config: &ManifestConfig, errors: &mut Vec<ValidationError>) {
    let output = &config.output;

    if output.directory.trim().is_empty() {
        errors.push(error("output.directory", output.directory.as_str(), "Output directory cannot be empty"));
    }

    if output.filename.trim().is_empty() {
        errors.push(error("output.filename", output.filename.as_str(), "Output filename cannot be empty"));
    } else if !is_safe_filename(&output.filename) {
        errors.push(error(
            "output.filename",
            output.filename.as_str(),
            "Output filename may only contain letters, digits, '-' and '_'",
        ));
    }

    if output.formats.is_empty() {
        errors.push(error(
            "output.formats",
            output.formats.clone(),
            format!("At least one output format is required. Allowed values: {}", OUTPUT_FORMATS.join(", ")),
        ));
    }

    if output.classifier.trim().is_empty() {
        errors.push(error("output.classifier", output.classifier.as_str(), "Artifact classifier cannot be empty"));
    }

    check_range(
        errors,
        "dependencies.tree.depth",
        config.dependencies.tree.depth,
        1..=10,
        "Dependency tree depth must be between 1 and 10 (deep trees can cause performance issues)",
    );
    check_range(
        errors,
        "dependencies.analysis.healthThreshold",
        config.dependencies.analysis.health_threshold,
        0..=100,
        "Health threshold must be between 0 and 100",
    );
    check_range(
        errors,
        "git.depth",
        config.git.depth,
        1..=1000,
        "Git history depth must be between 1 and 1000",
    );
}

fn check_range(
    errors: &mut Vec<ValidationError>,
    field: &str,
    value: i32,
    range: std::ops::RangeInclusive<i32>,
    message: &str,
) {
    if !range.contains(&value) {
        errors.push(error(field, value, message));
    }
}

/// `^[a-zA-Z0-9_-]+$`
fn is_safe_filename(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn check_vocabularies(config: &ManifestConfig, errors: &mut Vec<ValidationError>) {
    for format in &config.output.formats {
        check_member(errors, "output.formats", format, OUTPUT_FORMATS, "Invalid output format");
    }
    check_member(
        errors,
        "output.archiveFormat",
        &config.output.archive_format,
        ARCHIVE_FORMATS,
        "Invalid archive format",
    );
    check_member(
        errors,
        "dependencies.tree.format",
        &config.dependencies.tree.format,
        TREE_FORMATS,
        "Invalid dependency tree format",
    );
    for scope in &config.dependencies.tree.scopes {
        check_member(errors, "dependencies.tree.scopes", scope, DEPENDENCY_SCOPES, "Invalid dependency scope");
    }
    let fetch_modes = GitFetchMode::ALL.map(GitFetchMode::as_str);
    check_member(errors, "git.fetch", &config.git.fetch, &fetch_modes, "Invalid git fetch mode");
}

fn check_member(
    errors: &mut Vec<ValidationError>,
    field: &str,
    value: &str,
    allowed: &[&str],
    message: &str,
) {
    if allowed.iter().any(|a| a.eq_ignore_ascii_case(value.trim())) {
        return;
    }
    errors.push(ValidationError {
        suggestion: suggest::suggest(value, allowed).map(str::to_string),
        ..error(field, value, format!("{message}. Allowed values: {}", allowed.join(", ")))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_are_valid() {
        let report = validate(&ManifestConfig::default());
        assert!(report.is_valid(), "{report}");
        assert_eq!(report.error_count(), 0);
    }

    #[test]
    fn depth_out_of_range_without_suggestion() {
        let mut config = ManifestConfig::default();
        config.dependencies.tree.depth = 50;
        let report = validate(&config);
        assert_eq!(report.error_count(), 1);
        let err = &report.errors()[0];
        assert_eq!(err.field, "dependencies.tree.depth");
        assert_eq!(err.value, Value::from(50));
        assert!(err.message.contains("between 1 and 10"));
        assert_eq!(err.suggestion, None);
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let mut config = ManifestConfig::default();
        config.dependencies.tree.depth = 10;
        config.dependencies.analysis.health_threshold = 0;
        config.git.depth = 1000;
        assert!(validate(&config).is_valid());

        config.dependencies.tree.depth = 0;
        config.dependencies.analysis.health_threshold = 101;
        config.git.depth = 0;
        assert_eq!(validate(&config).error_count(), 3);
    }

    #[test]
    fn bad_format_suggests_closest() {
        let mut config = ManifestConfig::default();
        config.output.formats = strings(&["jsn"]);
        let report = validate(&config);
        assert_eq!(report.error_count(), 1);
        let err = &report.errors()[0];
        assert_eq!(err.field, "output.formats");
        assert_eq!(err.value, Value::from("jsn"));
        assert_eq!(err.suggestion.as_deref(), Some("json"));
        assert_eq!(err.message, "Invalid output format. Allowed values: json, yaml, html, xml");
    }

    #[test]
    fn one_error_per_bad_list_element() {
        let mut config = ManifestConfig::default();
        config.output.formats = strings(&["json", "pdf", "yml"]);
        let report = validate(&config);
        let values: Vec<&Value> = report.errors_for("output.formats").map(|e| &e.value).collect();
        assert_eq!(values, vec![&Value::from("pdf"), &Value::from("yml")]);
        assert_eq!(report.errors()[1].suggestion.as_deref(), Some("yaml"));
    }

    #[test]
    fn vocabulary_is_case_insensitive() {
        let mut config = ManifestConfig::default();
        config.output.formats = strings(&["JSON", "Html"]);
        config.output.archive_format = "TAR.GZ".into();
        config.git.fetch = "Never".into();
        assert!(validate(&config).is_valid());
    }

    #[test]
    fn far_miss_has_no_suggestion() {
        let mut config = ManifestConfig::default();
        config.output.archive_format = "rar5archive".into();
        let report = validate(&config);
        let err = &report.errors()[0];
        assert_eq!(err.field, "output.archiveFormat");
        assert!(err.message.contains("zip, tar.gz, tar.bz2, jar"));
        assert_eq!(err.suggestion, None);
    }

    #[test]
    fn git_fetch_and_tree_format_checked() {
        let mut config = ManifestConfig::default();
        config.git.fetch = "alwyas".into();
        config.dependencies.tree.format = "tre".into();
        let report = validate(&config);
        assert_eq!(report.error_count(), 2);
        assert_eq!(report.errors_for("git.fetch").next().unwrap().suggestion.as_deref(), Some("always"));
        assert_eq!(
            report.errors_for("dependencies.tree.format").next().unwrap().suggestion.as_deref(),
            Some("tree")
        );
    }

    #[test]
    fn scopes_checked() {
        let mut config = ManifestConfig::default();
        config.dependencies.tree.scopes = strings(&["compile", "runtme"]);
        let report = validate(&config);
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.errors()[0].suggestion.as_deref(), Some("runtime"));
    }

    #[test]
    fn empty_formats_rejected() {
        let mut config = ManifestConfig::default();
        config.output.formats = vec![];
        let report = validate(&config);
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.errors()[0].field, "output.formats");
    }

    #[test]
    fn filename_pattern() {
        let mut config = ManifestConfig::default();
        config.output.filename = "release_manifest-2".into();
        assert!(validate(&config).is_valid());

        config.output.filename = "../escape".into();
        let report = validate(&config);
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.errors()[0].field, "output.filename");
    }

    #[test]
    fn empty_strings_rejected() {
        let mut config = ManifestConfig::default();
        config.output.directory = " ".into();
        config.output.filename = String::new();
        config.output.classifier = String::new();
        let report = validate(&config);
        let fields: Vec<&str> = report.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["output.directory", "output.filename", "output.classifier"]);
    }

    #[test]
    fn three_independent_violations() {
        let mut config = ManifestConfig::default();
        config.output.formats = strings(&["jsn"]);
        config.git.depth = 0;
        config.output.archive_format = "rar".into();
        assert_eq!(validate(&config).error_count(), 3);
    }

    #[test]
    fn report_display_lists_every_error() {
        let mut config = ManifestConfig::default();
        config.output.formats = strings(&["jsn"]);
        config.git.depth = 0;
        let text = validate(&config).to_string();
        assert!(text.contains("Configuration validation failed (2 error(s))"));
        // Range checks come before vocabulary checks.
        assert!(text.contains("Error 1: git.depth"));
        assert!(text.contains("Value: '0'"));
        assert!(text.contains("Error 2: output.formats"));
        assert!(text.contains("Value: 'jsn'"));
        assert!(text.contains("Did you mean 'json'?"));
    }

    #[test]
    fn valid_report_display() {
        assert_eq!(ValidationReport::default().to_string(), "Configuration is valid\n");
    }

    #[test]
    fn error_display_includes_suggestion() {
        let err = ValidationError {
            field: "git.fetch".into(),
            value: "sometimes".into(),
            message: "Invalid git fetch mode".into(),
            suggestion: Some("auto".into()),
        };
        assert_eq!(err.to_string(), "git.fetch: Invalid git fetch mode (did you mean 'auto'?)");
    }
}
