//! Named presets that expand into a PROFILE-priority layer.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::convert::ConversionError;
use crate::model::{PartialConfig, PartialDependencies, PartialMetadata, PartialOutput, PartialTree};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// JSON only, no dependency tree. The baseline every other profile builds on.
    Basic,
    /// JSON and HTML with a shallow dependency tree.
    Standard,
    /// Every format, deep tree, dependency analysis and full metadata.
    Full,
    /// Archived and attached output tuned for pipelines.
    Ci,
}

impl Profile {
    /// The profile whose settings are already the plugin defaults.
    pub const BASELINE: Profile = Profile::Basic;

    pub const ALL: [Profile; 4] = [Profile::Basic, Profile::Standard, Profile::Full, Profile::Ci];

    pub fn as_str(self) -> &'static str {
        match self {
            Profile::Basic => "basic",
            Profile::Standard => "standard",
            Profile::Full => "full",
            Profile::Ci => "ci",
        }
    }

    /// The preset as a partial layer.
    ///
    /// The `profile` field itself is left unset: whichever source declared the
    /// profile owns that value.
    pub fn defaults(self) -> PartialConfig {
        match self {
            Profile::Basic => PartialConfig {
                output: formats(&["json"]),
                dependencies: tree(false, None),
                metadata: metadata(false, None),
                ..Default::default()
            },
            Profile::Standard => PartialConfig {
                output: formats(&["json", "html"]),
                dependencies: tree(true, Some(3)),
                metadata: metadata(false, None),
                ..Default::default()
            },
            Profile::Full => {
                let mut dependencies = tree(true, Some(5));
                dependencies.analysis.enabled = Some(true);
                dependencies.analysis.health_threshold = Some(80);
                PartialConfig {
                    output: formats(&["json", "yaml", "html"]),
                    dependencies,
                    metadata: metadata(true, Some(true)),
                    ..Default::default()
                }
            }
            Profile::Ci => {
                let mut config = PartialConfig {
                    output: PartialOutput {
                        archive: Some(true),
                        attach: Some(true),
                        ..formats(&["json"])
                    },
                    dependencies: tree(true, Some(2)),
                    metadata: metadata(false, None),
                    ..Default::default()
                };
                config.git.fetch = Some("always".into());
                config
            }
        }
    }
}

fn formats(items: &[&str]) -> PartialOutput {
    PartialOutput {
        formats: Some(items.iter().map(|s| s.to_string()).collect()),
        ..Default::default()
    }
}

fn tree(enabled: bool, depth: Option<i32>) -> PartialDependencies {
    PartialDependencies {
        tree: PartialTree {
            enabled: Some(enabled),
            depth,
            ..Default::default()
        },
        ..Default::default()
    }
}

fn metadata(collect: bool, checksums: Option<bool>) -> PartialMetadata {
    PartialMetadata {
        licenses: Some(collect),
        properties: Some(collect),
        plugins: Some(collect),
        checksums,
        ..Default::default()
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Profile {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Profile::ALL
            .into_iter()
            .find(|profile| profile.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConversionError::InvalidProfile {
                value: s.to_string(),
                allowed: Profile::ALL.map(Profile::as_str).join(", "),
            })
    }
}

impl From<Profile> for serde_json::Value {
    fn from(profile: Profile) -> Self {
        serde_json::Value::String(profile.as_str().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("FULL".parse::<Profile>().unwrap(), Profile::Full);
        assert_eq!(" ci ".parse::<Profile>().unwrap(), Profile::Ci);
    }

    #[test]
    fn unknown_profile_lists_allowed_values() {
        let err = "fulll".parse::<Profile>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("'fulll'"));
        assert!(msg.contains("basic, standard, full, ci"));
    }

    #[test]
    fn no_profile_sets_its_own_name() {
        for profile in Profile::ALL {
            assert_eq!(profile.defaults().profile, None, "{profile}");
        }
    }

    #[test]
    fn basic_matches_defaults_layer() {
        let config = Profile::Basic.defaults();
        assert_eq!(config.output.formats, Some(vec!["json".to_string()]));
        assert_eq!(config.dependencies.tree.enabled, Some(false));
        assert_eq!(config.metadata.licenses, Some(false));
        assert_eq!(config.metadata.checksums, None);
    }

    #[test]
    fn standard_enables_shallow_tree() {
        let config = Profile::Standard.defaults();
        assert_eq!(config.output.formats, Some(vec!["json".to_string(), "html".to_string()]));
        assert_eq!(config.dependencies.tree.enabled, Some(true));
        assert_eq!(config.dependencies.tree.depth, Some(3));
    }

    #[test]
    fn full_turns_everything_on() {
        let config = Profile::Full.defaults();
        assert_eq!(
            config.output.formats,
            Some(vec!["json".to_string(), "yaml".to_string(), "html".to_string()])
        );
        assert_eq!(config.dependencies.tree.depth, Some(5));
        assert_eq!(config.dependencies.analysis.enabled, Some(true));
        assert_eq!(config.dependencies.analysis.health_threshold, Some(80));
        assert_eq!(config.metadata.licenses, Some(true));
        assert_eq!(config.metadata.checksums, Some(true));
    }

    #[test]
    fn ci_archives_and_always_fetches() {
        let config = Profile::Ci.defaults();
        assert_eq!(config.output.archive, Some(true));
        assert_eq!(config.output.attach, Some(true));
        assert_eq!(config.output.formats, Some(vec!["json".to_string()]));
        assert_eq!(config.dependencies.tree.depth, Some(2));
        assert_eq!(config.git.fetch.as_deref(), Some("always"));
    }

    #[test]
    fn defaults_are_deterministic() {
        assert_eq!(Profile::Full.defaults(), Profile::Full.defaults());
    }
}
