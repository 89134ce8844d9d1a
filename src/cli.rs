//! Clap adapter.
//!
//! Compiled only when the `clap` Cargo feature is enabled (on by default).
//! [`ConfigArgs`] can be flattened or nested into an application's clap derive
//! to get `-D key=value` properties plus `validate|list|get|gen` subcommands.
//! [`ConfigArgs::into_parts()`] converts the parsed arguments into properties
//! for [`ResolverBuilder::properties()`](crate::ResolverBuilder::properties)
//! and a [`ConfigAction`](crate::ConfigAction) for
//! [`ResolverBuilder::handle()`](crate::ResolverBuilder::handle).
//!
//! Callers using a different argument parser can skip this module and build
//! [`ConfigAction`](crate::ConfigAction) values directly.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::types::ConfigAction;

/// Clap-derived args for the `config` subcommand group.
///
/// ```ignore
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
///
/// #[derive(Subcommand)]
/// enum Commands {
///     Config(ConfigArgs),
/// }
/// ```
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Set a property, e.g. `-D manifest.output.formats=json,html`. Repeatable;
    /// goes before the subcommand (`config -D key=value list`).
    #[arg(short = 'D', long = "define", value_name = "KEY=VALUE", value_parser = parse_property)]
    pub properties: Vec<(String, String)>,

    #[command(subcommand)]
    pub action: Option<ConfigSubcommand>,
}

/// Available config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Resolve and validate the configuration, showing where each setting came from.
    Validate,
    /// Show every resolved setting with its source.
    List,
    /// Show the resolved value, source and documentation of one setting.
    Get {
        /// Dotted key path (e.g. "output.formats").
        key: String,
    },
    /// Generate a commented configuration file with every default.
    Gen {
        /// Write to a file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn parse_property(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}

impl ConfigArgs {
    /// Convert clap-parsed args into a framework-agnostic `ConfigAction`.
    ///
    /// Bare `config` (no subcommand) and explicit `config validate` both map
    /// to `ConfigAction::Validate`.
    pub fn into_action(self) -> ConfigAction {
        self.into_parts().1
    }

    /// Split into the `-D` properties and the action.
    pub fn into_parts(self) -> (Vec<(String, String)>, ConfigAction) {
        let action = match self.action {
            None | Some(ConfigSubcommand::Validate) => ConfigAction::Validate,
            Some(ConfigSubcommand::List) => ConfigAction::List,
            Some(ConfigSubcommand::Get { key }) => ConfigAction::Get { key },
            Some(ConfigSubcommand::Gen { output }) => ConfigAction::Gen { output },
        };
        (self.properties, action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    /// Wrapper so we can use `try_parse_from` on the subcommand.
    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        config: ConfigArgs,
    }

    fn parse(args: &[&str]) -> ConfigArgs {
        TestCli::try_parse_from(args).unwrap().config
    }

    #[test]
    fn bare_invocation_validates() {
        assert_eq!(parse(&["test"]).into_action(), ConfigAction::Validate);
    }

    #[test]
    fn parse_validate() {
        assert_eq!(parse(&["test", "validate"]).into_action(), ConfigAction::Validate);
    }

    #[test]
    fn parse_list() {
        assert_eq!(parse(&["test", "list"]).into_action(), ConfigAction::List);
    }

    #[test]
    fn parse_get() {
        assert_eq!(
            parse(&["test", "get", "git.depth"]).into_action(),
            ConfigAction::Get {
                key: "git.depth".into()
            }
        );
    }

    #[test]
    fn parse_gen_with_output() {
        assert_eq!(
            parse(&["test", "gen", "-o", "manifest.yml"]).into_action(),
            ConfigAction::Gen {
                output: Some(PathBuf::from("manifest.yml"))
            }
        );
    }

    #[test]
    fn parse_gen_no_output() {
        assert_eq!(
            parse(&["test", "gen"]).into_action(),
            ConfigAction::Gen { output: None }
        );
    }

    #[test]
    fn parse_repeated_properties_before_subcommand() {
        let args = parse(&[
            "test",
            "-D",
            "manifest.git.depth=20",
            "--define",
            "manifest.output.formats=json,html",
            "list",
        ]);
        let (properties, action) = args.into_parts();
        assert_eq!(action, ConfigAction::List);
        assert_eq!(
            properties,
            vec![
                ("manifest.git.depth".to_string(), "20".to_string()),
                ("manifest.output.formats".to_string(), "json,html".to_string()),
            ]
        );
    }

    #[test]
    fn property_after_subcommand_rejected() {
        let args = ["test", "-D", "manifest.skip=true", "list", "-D", "manifest.verbose=true"];
        assert!(TestCli::try_parse_from(args).is_err());
    }

    #[test]
    fn property_value_may_contain_equals() {
        assert_eq!(
            parse_property("manifest.output.classifier=a=b").unwrap(),
            ("manifest.output.classifier".to_string(), "a=b".to_string())
        );
    }

    #[test]
    fn property_without_equals_rejected() {
        assert!(parse_property("manifest.verbose").is_err());
        assert!(parse_property("=true").is_err());
        assert!(TestCli::try_parse_from(["test", "-D", "nope"]).is_err());
    }

    #[test]
    fn unknown_subcommand_rejected() {
        assert!(TestCli::try_parse_from(["test", "set", "a", "b"]).is_err());
    }
}
