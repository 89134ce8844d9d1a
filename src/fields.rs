//! Static table of every configuration leaf.
//!
//! Each entry ties a canonical dotted path (`output.archiveFormat`) to typed
//! accessors on both the partial and the resolved tree. Loaders use it to
//! apply values, the merger to fold layers, and the operations to list and
//! document keys, so a path is spelled exactly once.

use serde_json::Value;

use crate::convert::{self, ConversionError};
use crate::model::{ManifestConfig, PartialConfig};
use crate::profile::Profile;

/// Mutable handle to one leaf of a [`PartialConfig`], tagged by value kind.
pub enum Slot<'a> {
    Bool(&'a mut Option<bool>),
    Int(&'a mut Option<i32>),
    Text(&'a mut Option<String>),
    List(&'a mut Option<Vec<String>>),
    Profile(&'a mut Option<Profile>),
}

impl Slot<'_> {
    /// Convert raw text (env var, `-D` property) and store it.
    pub fn assign_str(self, raw: &str) -> Result<(), ConversionError> {
        match self {
            Slot::Bool(slot) => *slot = Some(convert::to_bool(raw)?),
            Slot::Int(slot) => *slot = Some(convert::to_int(raw)?),
            Slot::Text(slot) => *slot = Some(convert::to_trimmed(raw)),
            Slot::List(slot) => *slot = Some(convert::to_string_list(raw)),
            Slot::Profile(slot) => *slot = Some(raw.parse()?),
        }
        Ok(())
    }
}

/// One configuration leaf.
pub struct FieldSpec {
    path: &'static str,
    doc: &'static str,
    slot: for<'a> fn(&'a mut PartialConfig) -> Slot<'a>,
    is_set: fn(&PartialConfig) -> bool,
    merge: fn(&mut ManifestConfig, &PartialConfig) -> bool,
    capture: fn(&mut PartialConfig, &ManifestConfig),
    read: fn(&ManifestConfig) -> Value,
}

impl FieldSpec {
    pub fn path(&self) -> &'static str {
        self.path
    }

    pub fn doc(&self) -> &'static str {
        self.doc
    }

    pub fn slot<'a>(&self, config: &'a mut PartialConfig) -> Slot<'a> {
        (self.slot)(config)
    }

    pub fn is_set(&self, config: &PartialConfig) -> bool {
        (self.is_set)(config)
    }

    /// Copy the layer's value into `target` if the layer sets it and it differs.
    /// Returns whether `target` changed.
    pub fn merge(&self, target: &mut ManifestConfig, layer: &PartialConfig) -> bool {
        (self.merge)(target, layer)
    }

    /// Set this leaf of `partial` to the resolved value.
    pub fn capture(&self, partial: &mut PartialConfig, config: &ManifestConfig) {
        (self.capture)(partial, config)
    }

    pub fn read(&self, config: &ManifestConfig) -> Value {
        (self.read)(config)
    }
}

fn merge_leaf<T: PartialEq + Clone>(target: &mut T, incoming: &Option<T>) -> bool {
    match incoming {
        Some(value) if value != target => {
            *target = value.clone();
            true
        }
        _ => false,
    }
}

macro_rules! field {
    ($path:literal, $kind:ident, $doc:literal, $($seg:ident).+) => {
        FieldSpec {
            path: $path,
            doc: $doc,
            slot: |c| Slot::$kind(&mut c.$($seg).+),
            is_set: |c| c.$($seg).+.is_some(),
            merge: |target, layer| merge_leaf(&mut target.$($seg).+, &layer.$($seg).+),
            capture: |partial, config| partial.$($seg).+ = Some(config.$($seg).+.clone()),
            read: |config| Value::from(config.$($seg).+.clone()),
        }
    };
}

static FIELDS: &[FieldSpec] = &[
    field!("profile", Profile, "Named preset: basic, standard, full or ci.", profile),
    field!("verbose", Bool, "Log every collection step.", verbose),
    field!("dryRun", Bool, "Resolve and validate without writing any report.", dry_run),
    field!("skip", Bool, "Skip manifest generation entirely.", skip),
    field!("output.directory", Text, "Directory reports are written to.", output.directory),
    field!("output.filename", Text, "Report base name (letters, digits, '-' and '_').", output.filename),
    field!("output.formats", List, "Report formats: json, yaml, html, xml.", output.formats),
    field!("output.archive", Bool, "Bundle the reports into an archive.", output.archive),
    field!("output.archiveFormat", Text, "Archive format: zip, tar.gz, tar.bz2 or jar.", output.archive_format),
    field!("output.attach", Bool, "Attach the archive to the build as an artifact.", output.attach),
    field!("output.classifier", Text, "Classifier of the attached artifact.", output.classifier),
    field!("dependencies.tree.enabled", Bool, "Collect the dependency tree.", dependencies.tree.enabled),
    field!("dependencies.tree.depth", Int, "Maximum tree depth (1-10).", dependencies.tree.depth),
    field!("dependencies.tree.format", Text, "Tree layout: flat, tree or both.", dependencies.tree.format),
    field!("dependencies.tree.includeTransitive", Bool, "Include transitive dependencies.", dependencies.tree.include_transitive),
    field!("dependencies.tree.scopes", List, "Scopes to include: compile, runtime, test, provided, system.", dependencies.tree.scopes),
    field!("dependencies.tree.includeOptional", Bool, "Include optional dependencies.", dependencies.tree.include_optional),
    field!("dependencies.analysis.enabled", Bool, "Run dependency health analysis.", dependencies.analysis.enabled),
    field!("dependencies.analysis.healthThreshold", Int, "Minimum health score (0-100).", dependencies.analysis.health_threshold),
    field!("dependencies.analysis.filterSpringStarters", Bool, "Hide framework starter aggregates from the analysis.", dependencies.analysis.filter_spring_starters),
    field!("dependencies.analysis.filterLombok", Bool, "Hide Lombok from the analysis.", dependencies.analysis.filter_lombok),
    field!("dependencies.analysis.filterAnnotationProcessors", Bool, "Hide annotation processors from the analysis.", dependencies.analysis.filter_annotation_processors),
    field!("dependencies.analysis.generateRecommendations", Bool, "Emit upgrade recommendations.", dependencies.analysis.generate_recommendations),
    field!("metadata.licenses", Bool, "Collect license information.", metadata.licenses),
    field!("metadata.properties", Bool, "Collect build properties.", metadata.properties),
    field!("metadata.plugins", Bool, "Collect build plugin information.", metadata.plugins),
    field!("metadata.checksums", Bool, "Compute artifact checksums.", metadata.checksums),
    field!("metadata.includeSystemProperties", Bool, "Include system properties.", metadata.include_system_properties),
    field!("metadata.includeEnvironmentVariables", Bool, "Include environment variables.", metadata.include_environment_variables),
    field!("metadata.filterSensitive", Bool, "Mask values that look like secrets.", metadata.filter_sensitive),
    field!("git.fetch", Text, "Fetch missing history: auto, always or never.", git.fetch),
    field!("git.includeUncommitted", Bool, "Report uncommitted changes.", git.include_uncommitted),
    field!("git.depth", Int, "Commits of history to inspect (1-1000).", git.depth),
    field!("git.includeBranch", Bool, "Include the current branch.", git.include_branch),
    field!("git.includeTags", Bool, "Include tags pointing at HEAD.", git.include_tags),
    field!("git.includeRemote", Bool, "Include the remote URL.", git.include_remote),
    field!("docker.autoDetect", Bool, "Detect container images automatically.", docker.auto_detect),
    field!("docker.registries", List, "Registries to look images up in.", docker.registries),
    field!("docker.includeImageDigest", Bool, "Include image digests.", docker.include_image_digest),
    field!("ci.autoDetect", Bool, "Detect the CI provider automatically.", ci.auto_detect),
    field!("ci.includeEnvironment", Bool, "Include CI environment details.", ci.include_environment),
    field!("frameworks.autoDetect", Bool, "Detect application frameworks automatically.", frameworks.auto_detect),
    field!("frameworks.includeProfiles", Bool, "Include active framework profiles.", frameworks.include_profiles),
    field!("frameworks.includeConfiguration", Bool, "Include framework configuration files.", frameworks.include_configuration),
    field!("validation.enabled", Bool, "Validate the configuration before running.", validation.enabled),
    field!("validation.failOnError", Bool, "Fail the build on validation errors.", validation.fail_on_error),
    field!("validation.warnOnDeprecated", Bool, "Warn about deprecated settings.", validation.warn_on_deprecated),
];

/// Intermediate nodes of the tree. Anything that is neither a section nor a
/// leaf is an unknown key.
pub const SECTIONS: &[&str] = &[
    "output",
    "dependencies",
    "dependencies.tree",
    "dependencies.analysis",
    "metadata",
    "git",
    "docker",
    "ci",
    "frameworks",
    "validation",
];

pub fn all() -> &'static [FieldSpec] {
    FIELDS
}

pub fn paths() -> Vec<&'static str> {
    FIELDS.iter().map(|f| f.path).collect()
}

/// Exact lookup by canonical path.
pub fn find(path: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|f| f.path == path)
}

/// Lenient lookup used for env and property keys.
///
/// Matches case-insensitively and ignores `.` boundaries, so
/// `output.archive.format`, `output.archiveformat` and `OUTPUT.ARCHIVEFORMAT`
/// all reach `output.archiveFormat`.
pub fn lookup(path: &str) -> Option<&'static FieldSpec> {
    find(path).or_else(|| {
        let wanted = squash(path);
        FIELDS.iter().find(|f| squash(f.path) == wanted)
    })
}

pub fn is_section(path: &str) -> bool {
    SECTIONS.contains(&path)
}

/// Whether the first segment of a (normalized) key names a known section or
/// top-level leaf.
pub fn has_known_root(path: &str) -> bool {
    let root = path.split('.').next().unwrap_or(path);
    SECTIONS
        .iter()
        .chain(FIELDS.iter().map(|f| &f.path))
        .any(|known| !known.contains('.') && known.eq_ignore_ascii_case(root))
}

fn squash(path: &str) -> String {
    path.chars()
        .filter(|c| *c != '.')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn leaf_paths(value: &Value, prefix: &str, out: &mut BTreeSet<String>) {
        match value {
            Value::Object(map) => {
                for (key, child) in map {
                    let path = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{prefix}.{key}")
                    };
                    leaf_paths(child, &path, out);
                }
            }
            _ => {
                out.insert(prefix.to_string());
            }
        }
    }

    #[test]
    fn registry_covers_every_leaf_of_the_model() {
        let value = serde_json::to_value(ManifestConfig::default()).unwrap();
        let mut expected = BTreeSet::new();
        leaf_paths(&value, "", &mut expected);
        let registered: BTreeSet<String> = paths().into_iter().map(String::from).collect();
        assert_eq!(registered, expected);
    }

    #[test]
    fn paths_are_unique() {
        let unique: BTreeSet<_> = paths().into_iter().collect();
        assert_eq!(unique.len(), FIELDS.len());
    }

    #[test]
    fn sections_are_prefixes_of_leaves() {
        for section in SECTIONS {
            let prefix = format!("{section}.");
            assert!(FIELDS.iter().any(|f| f.path.starts_with(&prefix)), "{section}");
        }
    }

    #[test]
    fn lookup_exact() {
        assert_eq!(lookup("output.formats").unwrap().path(), "output.formats");
    }

    #[test]
    fn lookup_split_camel_case() {
        assert_eq!(lookup("output.archive.format").unwrap().path(), "output.archiveFormat");
        assert_eq!(
            lookup("dependencies.analysis.health.threshold").unwrap().path(),
            "dependencies.analysis.healthThreshold"
        );
    }

    #[test]
    fn lookup_joined_and_uppercase() {
        assert_eq!(lookup("output.archiveformat").unwrap().path(), "output.archiveFormat");
        assert_eq!(lookup("DRYRUN").unwrap().path(), "dryRun");
        assert_eq!(lookup("PROFILE").unwrap().path(), "profile");
    }

    #[test]
    fn lookup_unknown() {
        assert!(lookup("output.colour").is_none());
        assert!(lookup("output").is_none());
    }

    #[test]
    fn find_is_exact() {
        assert!(find("output.archiveformat").is_none());
        assert!(find("output.archiveFormat").is_some());
    }

    #[test]
    fn known_roots() {
        assert!(has_known_root("output.bogus"));
        assert!(has_known_root("verbose"));
        assert!(has_known_root("GIT.x"));
        assert!(!has_known_root("reporting.enabled"));
    }

    #[test]
    fn assign_str_converts_by_kind() {
        let mut config = PartialConfig::default();
        find("dependencies.tree.depth").unwrap().slot(&mut config).assign_str("7").unwrap();
        find("output.formats").unwrap().slot(&mut config).assign_str("json, html").unwrap();
        find("profile").unwrap().slot(&mut config).assign_str("Full").unwrap();
        find("verbose").unwrap().slot(&mut config).assign_str("yes").unwrap();
        assert_eq!(config.dependencies.tree.depth, Some(7));
        assert_eq!(config.output.formats, Some(vec!["json".to_string(), "html".to_string()]));
        assert_eq!(config.profile, Some(Profile::Full));
        assert_eq!(config.verbose, Some(true));
    }

    #[test]
    fn assign_str_leaves_slot_untouched_on_error() {
        let mut config = PartialConfig::default();
        let err = find("git.depth").unwrap().slot(&mut config).assign_str("deep");
        assert!(err.is_err());
        assert_eq!(config.git.depth, None);
    }

    #[test]
    fn merge_reports_change_only_when_value_differs() {
        let field = find("git.depth").unwrap();
        let mut target = ManifestConfig::default();
        let mut layer = PartialConfig::default();
        assert!(!field.merge(&mut target, &layer));
        layer.git.depth = Some(50);
        assert!(!field.merge(&mut target, &layer));
        layer.git.depth = Some(10);
        assert!(field.merge(&mut target, &layer));
        assert_eq!(target.git.depth, 10);
    }

    #[test]
    fn read_returns_json_values() {
        let config = ManifestConfig::default();
        assert_eq!(find("git.depth").unwrap().read(&config), Value::from(50));
        assert_eq!(find("profile").unwrap().read(&config), Value::from("basic"));
        assert_eq!(
            find("output.formats").unwrap().read(&config),
            serde_json::json!(["json"])
        );
    }
}
