use std::path::PathBuf;
use thiserror::Error;

use crate::validate::ValidationReport;

#[derive(Debug, Error)]
#[cfg_attr(feature = "rich-errors", derive(miette::Diagnostic))]
pub enum ManifestConfigError {
    #[error("Configuration path exists but is not a file: {path}")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(
            code(manifest_config::not_a_file),
            help("remove or rename the directory so the config file can be created")
        )
    )]
    NotAFile { path: PathBuf },

    #[error("Failed to read {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(manifest_config::parse)))]
    ParseError {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Failed to parse {path}: the document root must be a mapping, found {found}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(manifest_config::parse)))]
    NotAMapping { path: PathBuf, found: String },

    #[error("Invalid value for '{key}' in {path}: {reason}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(manifest_config::invalid_value)))]
    InvalidValue {
        path: PathBuf,
        key: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed with {count} error(s)\n\n{0}", count = ValidationReport::error_count(.0))]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(
            code(manifest_config::invalid),
            help("fix the listed fields in .deploy-manifest.yml, MANIFEST_* variables or -Dmanifest.* properties")
        )
    )]
    Invalid(ValidationReport),

    #[error("Key not found: {key}{}", did_you_mean(.suggestion))]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(manifest_config::key_not_found)))]
    KeyNotFound {
        key: String,
        suggestion: Option<String>,
    },

    #[error("Project directory is required: call .project_dir() on the builder")]
    ProjectDirRequired,
}

fn did_you_mean(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(" (did you mean '{s}'?)"),
        None => String::new(),
    }
}

impl ManifestConfigError {
    /// The validation report, if this error came from validation.
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            ManifestConfigError::Invalid(report) => Some(report),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::ValidationError;

    #[test]
    fn not_a_file_formats() {
        let err = ManifestConfigError::NotAFile {
            path: "/project/.deploy-manifest.yml".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("exists but is not a file"));
        assert!(msg.contains(".deploy-manifest.yml"));
    }

    #[test]
    fn invalid_value_names_key_and_file() {
        let err = ManifestConfigError::InvalidValue {
            path: "/project/.deploy-manifest.yml".into(),
            key: "output.archive".into(),
            value: "maybe".into(),
            reason: "Cannot convert 'maybe' to boolean".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("output.archive"));
        assert!(msg.contains("maybe"));
        assert!(msg.contains(".deploy-manifest.yml"));
    }

    #[test]
    fn invalid_states_error_count_and_report() {
        let report = ValidationReport::new(vec![ValidationError {
            field: "git.depth".into(),
            value: 0.into(),
            message: "Git history depth must be between 1 and 1000".into(),
            suggestion: None,
        }]);
        let err = ManifestConfigError::Invalid(report);
        let msg = err.to_string();
        assert!(msg.starts_with("Configuration validation failed with 1 error(s)"));
        assert!(msg.contains("git.depth"));
        assert_eq!(err.report().unwrap().error_count(), 1);
    }

    #[test]
    fn key_not_found_with_suggestion() {
        let err = ManifestConfigError::KeyNotFound {
            key: "output.formts".into(),
            suggestion: Some("output.formats".into()),
        };
        assert_eq!(
            err.to_string(),
            "Key not found: output.formts (did you mean 'output.formats'?)"
        );
    }

    #[test]
    fn key_not_found_without_suggestion() {
        let err = ManifestConfigError::KeyNotFound {
            key: "zzz".into(),
            suggestion: None,
        };
        assert_eq!(err.to_string(), "Key not found: zzz");
    }

    #[test]
    fn project_dir_required_formats() {
        let err = ManifestConfigError::ProjectDirRequired;
        assert!(err.to_string().contains("project_dir"));
    }
}
