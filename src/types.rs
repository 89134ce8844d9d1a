use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Where a resolved value came from.
///
/// Sources are strictly ordered: a lower [`priority`](ConfigSource::priority)
/// number wins. Every comparison between sources goes through this type so the
/// ordering lives in exactly one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigSource {
    /// `-Dmanifest.*` style properties given on the command line.
    CommandLine,
    /// `MANIFEST_*` environment variables.
    Environment,
    /// The `.deploy-manifest.yml` file in the project root.
    File,
    /// A named profile declared by the file.
    Profile,
    /// Overlay handed over by the host build tool.
    HostBuildConfig,
    /// Plugin defaults.
    Default,
}

impl ConfigSource {
    /// All sources, highest priority first.
    pub const ALL: [ConfigSource; 6] = [
        ConfigSource::CommandLine,
        ConfigSource::Environment,
        ConfigSource::File,
        ConfigSource::Profile,
        ConfigSource::HostBuildConfig,
        ConfigSource::Default,
    ];

    /// Priority number. 1 is the highest.
    pub fn priority(self) -> u8 {
        match self {
            ConfigSource::CommandLine => 1,
            ConfigSource::Environment => 2,
            ConfigSource::File => 3,
            ConfigSource::Profile => 4,
            ConfigSource::HostBuildConfig => 5,
            ConfigSource::Default => 6,
        }
    }

    pub fn has_higher_priority_than(self, other: ConfigSource) -> bool {
        self.priority() < other.priority()
    }

    /// Short label used in listings.
    pub fn label(self) -> &'static str {
        match self {
            ConfigSource::CommandLine => "CLI",
            ConfigSource::Environment => "ENV",
            ConfigSource::File => "YAML",
            ConfigSource::Profile => "Profile",
            ConfigSource::HostBuildConfig => "Host",
            ConfigSource::Default => "Default",
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A config operation, independent of any CLI framework.
/// The CLI layer converts parsed clap args into this.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigAction {
    Validate,
    List,
    Get { key: String },
    Gen { output: Option<PathBuf> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_beats_everything() {
        for other in &ConfigSource::ALL[1..] {
            assert!(ConfigSource::CommandLine.has_higher_priority_than(*other));
        }
    }

    #[test]
    fn priorities_are_strictly_increasing() {
        let numbers: Vec<u8> = ConfigSource::ALL.iter().map(|s| s.priority()).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn host_config_sits_below_profile_and_file() {
        assert!(ConfigSource::Profile.has_higher_priority_than(ConfigSource::HostBuildConfig));
        assert!(ConfigSource::File.has_higher_priority_than(ConfigSource::HostBuildConfig));
        assert!(ConfigSource::HostBuildConfig.has_higher_priority_than(ConfigSource::Default));
    }

    #[test]
    fn source_is_not_higher_than_itself() {
        assert!(!ConfigSource::File.has_higher_priority_than(ConfigSource::File));
    }

    #[test]
    fn labels() {
        assert_eq!(ConfigSource::CommandLine.to_string(), "CLI");
        assert_eq!(ConfigSource::Environment.to_string(), "ENV");
        assert_eq!(ConfigSource::File.to_string(), "YAML");
        assert_eq!(ConfigSource::Default.to_string(), "Default");
    }
}
