//! The configuration tree in its two shapes.
//!
//! [`ManifestConfig`] is the resolved model: every field populated, defaults
//! included. [`PartialConfig`] mirrors it with every leaf wrapped in `Option`,
//! and is what each source loader produces. `None` means "this source did not
//! mention the field", which is different from an explicit `false`, `0` or
//! empty list.
//!
//! Both trees share field names, so the field registry can address the same
//! leaf in either shape.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::fields;
use crate::profile::Profile;

/// The resolved, fully populated configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestConfig {
    pub profile: Profile,
    pub output: OutputConfig,
    pub dependencies: DependenciesConfig,
    pub metadata: MetadataConfig,
    pub git: GitConfig,
    pub docker: DockerConfig,
    pub ci: CiConfig,
    pub frameworks: FrameworksConfig,
    pub validation: ValidationConfig,
    pub verbose: bool,
    pub dry_run: bool,
    pub skip: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputConfig {
    pub directory: String,
    pub filename: String,
    pub formats: Vec<String>,
    pub archive: bool,
    pub archive_format: String,
    pub attach: bool,
    pub classifier: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependenciesConfig {
    pub tree: TreeConfig,
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeConfig {
    pub enabled: bool,
    pub depth: i32,
    pub format: String,
    pub include_transitive: bool,
    pub scopes: Vec<String>,
    pub include_optional: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisConfig {
    pub enabled: bool,
    pub health_threshold: i32,
    pub filter_spring_starters: bool,
    pub filter_lombok: bool,
    pub filter_annotation_processors: bool,
    pub generate_recommendations: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataConfig {
    pub licenses: bool,
    pub properties: bool,
    pub plugins: bool,
    pub checksums: bool,
    pub include_system_properties: bool,
    pub include_environment_variables: bool,
    pub filter_sensitive: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GitConfig {
    /// One of `auto`, `always`, `never`. Kept as text so a typo can be
    /// reported with a suggestion instead of failing the load.
    pub fetch: String,
    pub include_uncommitted: bool,
    pub depth: i32,
    pub include_branch: bool,
    pub include_tags: bool,
    pub include_remote: bool,
}

impl GitConfig {
    /// The fetch setting as a typed mode, or `None` if it is not a known value.
    pub fn fetch_mode(&self) -> Option<GitFetchMode> {
        self.fetch.parse().ok()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DockerConfig {
    pub auto_detect: bool,
    pub registries: Vec<String>,
    pub include_image_digest: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CiConfig {
    pub auto_detect: bool,
    pub include_environment: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameworksConfig {
    pub auto_detect: bool,
    pub include_profiles: bool,
    pub include_configuration: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationConfig {
    pub enabled: bool,
    pub fail_on_error: bool,
    pub warn_on_deprecated: bool,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            profile: Profile::BASELINE,
            output: OutputConfig::default(),
            dependencies: DependenciesConfig::default(),
            metadata: MetadataConfig::default(),
            git: GitConfig::default(),
            docker: DockerConfig::default(),
            ci: CiConfig::default(),
            frameworks: FrameworksConfig::default(),
            validation: ValidationConfig::default(),
            verbose: false,
            dry_run: false,
            skip: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: "target".into(),
            filename: "deployment-manifest-report".into(),
            formats: strings(&["json"]),
            archive: false,
            archive_format: "zip".into(),
            attach: false,
            classifier: "manifest".into(),
        }
    }
}

impl Default for DependenciesConfig {
    fn default() -> Self {
        Self {
            tree: TreeConfig::default(),
            analysis: AnalysisConfig::default(),
        }
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            depth: 3,
            format: "flat".into(),
            include_transitive: true,
            scopes: strings(&["compile", "runtime"]),
            include_optional: false,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            health_threshold: 80,
            filter_spring_starters: true,
            filter_lombok: true,
            filter_annotation_processors: true,
            generate_recommendations: true,
        }
    }
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            licenses: false,
            properties: false,
            plugins: false,
            checksums: false,
            include_system_properties: true,
            include_environment_variables: false,
            filter_sensitive: true,
        }
    }
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            fetch: GitFetchMode::Auto.as_str().into(),
            include_uncommitted: false,
            depth: 50,
            include_branch: true,
            include_tags: true,
            include_remote: true,
        }
    }
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            auto_detect: true,
            registries: strings(&["docker.io", "ghcr.io"]),
            include_image_digest: false,
        }
    }
}

impl Default for CiConfig {
    fn default() -> Self {
        Self {
            auto_detect: true,
            include_environment: true,
        }
    }
}

impl Default for FrameworksConfig {
    fn default() -> Self {
        Self {
            auto_detect: true,
            include_profiles: true,
            include_configuration: false,
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            fail_on_error: true,
            warn_on_deprecated: true,
        }
    }
}

/// How the git collector should treat a shallow clone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitFetchMode {
    /// Fetch only when the history is too shallow.
    Auto,
    Always,
    Never,
}

impl GitFetchMode {
    pub const ALL: [GitFetchMode; 3] = [GitFetchMode::Auto, GitFetchMode::Always, GitFetchMode::Never];

    pub fn as_str(self) -> &'static str {
        match self {
            GitFetchMode::Auto => "auto",
            GitFetchMode::Always => "always",
            GitFetchMode::Never => "never",
        }
    }
}

impl fmt::Display for GitFetchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GitFetchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GitFetchMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown git fetch mode '{s}'"))
    }
}

/// One source's view of the configuration. Every leaf is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialConfig {
    pub profile: Option<Profile>,
    pub output: PartialOutput,
    pub dependencies: PartialDependencies,
    pub metadata: PartialMetadata,
    pub git: PartialGit,
    pub docker: PartialDocker,
    pub ci: PartialCi,
    pub frameworks: PartialFrameworks,
    pub validation: PartialValidation,
    pub verbose: Option<bool>,
    pub dry_run: Option<bool>,
    pub skip: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialOutput {
    pub directory: Option<String>,
    pub filename: Option<String>,
    pub formats: Option<Vec<String>>,
    pub archive: Option<bool>,
    pub archive_format: Option<String>,
    pub attach: Option<bool>,
    pub classifier: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialDependencies {
    pub tree: PartialTree,
    pub analysis: PartialAnalysis,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialTree {
    pub enabled: Option<bool>,
    pub depth: Option<i32>,
    pub format: Option<String>,
    pub include_transitive: Option<bool>,
    pub scopes: Option<Vec<String>>,
    pub include_optional: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialAnalysis {
    pub enabled: Option<bool>,
    pub health_threshold: Option<i32>,
    pub filter_spring_starters: Option<bool>,
    pub filter_lombok: Option<bool>,
    pub filter_annotation_processors: Option<bool>,
    pub generate_recommendations: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialMetadata {
    pub licenses: Option<bool>,
    pub properties: Option<bool>,
    pub plugins: Option<bool>,
    pub checksums: Option<bool>,
    pub include_system_properties: Option<bool>,
    pub include_environment_variables: Option<bool>,
    pub filter_sensitive: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialGit {
    pub fetch: Option<String>,
    pub include_uncommitted: Option<bool>,
    pub depth: Option<i32>,
    pub include_branch: Option<bool>,
    pub include_tags: Option<bool>,
    pub include_remote: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialDocker {
    pub auto_detect: Option<bool>,
    pub registries: Option<Vec<String>>,
    pub include_image_digest: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialCi {
    pub auto_detect: Option<bool>,
    pub include_environment: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialFrameworks {
    pub auto_detect: Option<bool>,
    pub include_profiles: Option<bool>,
    pub include_configuration: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialValidation {
    pub enabled: Option<bool>,
    pub fail_on_error: Option<bool>,
    pub warn_on_deprecated: Option<bool>,
}

impl PartialConfig {
    /// Dotted paths of every leaf this partial sets, in registry order.
    pub fn explicit_paths(&self) -> Vec<&'static str> {
        fields::all()
            .iter()
            .filter(|field| field.is_set(self))
            .map(|field| field.path())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        *self == PartialConfig::default()
    }
}

/// A partial that sets every leaf to the resolved value.
impl From<&ManifestConfig> for PartialConfig {
    fn from(config: &ManifestConfig) -> Self {
        let mut partial = PartialConfig::default();
        for field in fields::all() {
            field.capture(&mut partial, config);
        }
        partial
    }
}
