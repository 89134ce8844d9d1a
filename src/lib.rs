//! Layered configuration for the deploy manifest generator: one validated
//! settings tree, resolved from six sources, with a record of which source won
//! for every field.
//!
//! ```ignore
//! let resolved = Resolver::builder()
//!     .project_dir(".")
//!     .resolve()?;
//!
//! let formats = &resolved.config().output.formats;
//! let source = resolved.source("output.formats");
//! ```
//!
//! That call reads `.deploy-manifest.yml` from the project directory, layers
//! `MANIFEST_*` environment variables and `manifest.*` properties on top,
//! fills in defaults, validates, and hands back a [`ResolvedConfig`].
//!
//! # Layer precedence
//!
//! ```text
//! Plugin defaults        ManifestConfig::default()
//!        ↑ overridden by
//! Host build config      .host_config()
//!        ↑ overridden by
//! Profile                `profile:` declared in the file
//!        ↑ overridden by
//! Config file            .deploy-manifest.yml
//!        ↑ overridden by
//! Environment vars       MANIFEST_OUTPUT_FORMATS=json,html
//!        ↑ overridden by
//! Properties             manifest.output.formats=json,html
//! ```
//!
//! Every layer is **sparse**: a source only sets what it mentions, and an unset
//! field falls through to the layer below. "Not mentioned" is different from
//! an explicit `false` or empty list. An explicit empty list wins like any
//! other value.
//!
//! The ordering is defined once, by [`ConfigSource::priority`]. Provenance is
//! recorded only when a layer actually changes a value, so a file repeating a
//! default leaves the field attributed to [`ConfigSource::Default`].
//!
//! # Profiles
//!
//! A `profile:` key in the config file (`basic`, `standard`, `full`, `ci`)
//! expands into a layer of preset values that sits just below the file itself,
//! so anything the file sets explicitly still wins. `basic` is the baseline
//! and adds nothing. A profile set from the environment or command line is
//! recorded but not expanded.
//!
//! # Environment variables and properties
//!
//! | Source | Example | Field |
//! |--------|---------|-------|
//! | env | `MANIFEST_DEPENDENCIES_TREE_DEPTH=5` | `dependencies.tree.depth` |
//! | env | `MANIFEST_OUTPUT_ARCHIVE_FORMAT=jar` | `output.archiveFormat` |
//! | property | `manifest.git.fetch=always` | `git.fetch` |
//!
//! camelCase leaves can be spelled split (`ARCHIVE_FORMAT`) or joined
//! (`ARCHIVEFORMAT`). Values are converted by the field's type: booleans
//! accept `true/yes/1` and `false/no/0`, lists are comma-separated.
//! A variable with an unknown name or an unconvertible value is logged and
//! skipped; it never aborts resolution.
//!
//! Disable the environment with [`.no_env()`](ResolverBuilder::no_env), or
//! inject synthetic pairs with [`.env_vars()`](ResolverBuilder::env_vars).
//!
//! # Validation
//!
//! After merging, the configuration is checked in one pass and **all**
//! problems are reported together. Enumerated settings get a suggestion when
//! the value is a near miss:
//!
//! ```text
//! Error 1: output.formats
//!   Value: 'jsn'
//!   Invalid output format. Allowed values: json, yaml, html, xml
//!   Did you mean 'json'?
//! ```
//!
//! A failed validation is returned as [`ManifestConfigError::Invalid`], whose
//! [`report()`](ManifestConfigError::report) exposes each error.
//!
//! # Core library, no CLI framework required
//!
//! Resolution works through [`ResolverBuilder`] and [`ConfigAction`] alone.
//! For [clap](https://docs.rs/clap) users, the `cli` module (behind the `clap`
//! Cargo feature, on by default) provides `-D key=value` flags and
//! `validate|list|get|gen` subcommands. Build without it using
//! `default-features = false`.
//!
//! With the `rich-errors` feature, [`ManifestConfigError`] implements
//! `miette::Diagnostic` with error codes and help text.
//!
//! # Logging
//!
//! The crate emits [`tracing`](https://docs.rs/tracing) events (unknown keys
//! and skipped variables at `warn`, resolution steps at `info` and `debug`).
//! It never installs a subscriber.

pub mod convert;
pub mod error;
pub mod model;
pub mod suggest;
pub mod types;
pub mod validate;

mod builder;
#[cfg(feature = "clap")]
mod cli;
mod env;
mod fields;
mod file;
mod merge;
mod ops;
mod overrides;
mod profile;
mod resolve;

pub use builder::{Resolver, ResolverBuilder};
#[cfg(feature = "clap")]
pub use cli::{ConfigArgs, ConfigSubcommand};
pub use env::{DEFAULT_ENV_PREFIX, load_env};
pub use error::ManifestConfigError;
pub use file::{DEFAULT_FILE_NAME, parse_config, read_config_file};
pub use merge::{ResolvedConfig, merge};
pub use model::{GitFetchMode, ManifestConfig, PartialConfig};
pub use ops::{ConfigResult, Entry};
pub use overrides::{DEFAULT_PROPERTY_PREFIX, load_properties};
pub use profile::Profile;
pub use resolve::{ResolveInput, resolve};
pub use types::{ConfigAction, ConfigSource};
pub use validate::{ValidationError, ValidationReport};

/// Every known dotted field path, in declaration order.
pub fn field_paths() -> Vec<&'static str> {
    fields::paths()
}
