//! Core resolution pipeline: load every layer, merge, validate.
//!
//! Operates on pre-loaded data (`ResolveInput`) with no I/O, making the full
//! pipeline testable with synthetic inputs. Steps:
//!
//! 1. Parse the config file content, if any
//! 2. Build the environment layer (unless env is disabled)
//! 3. Build the command-line property layer
//! 4. Expand a non-baseline profile declared by the file into a PROFILE layer
//! 5. Merge all layers over the plugin defaults
//! 6. Validate, returning the full report on failure

use std::path::PathBuf;

use tracing::{error, info};

use crate::env::{self, DEFAULT_ENV_PREFIX};
use crate::error::ManifestConfigError;
use crate::file;
use crate::merge::{self, ResolvedConfig};
use crate::model::PartialConfig;
use crate::overrides::{self, DEFAULT_PROPERTY_PREFIX};
use crate::profile::Profile;
use crate::types::ConfigSource;
use crate::validate;

/// All pre-loaded data needed to resolve a config. No I/O happens here.
#[derive(Debug, Clone)]
pub struct ResolveInput {
    /// Path and content of the config file. `None` when there is no file.
    pub file: Option<(PathBuf, String)>,
    /// Raw environment variable pairs (pass `std::env::vars().collect()` or synthetic data).
    pub env_vars: Vec<(String, String)>,
    /// Env var prefix (e.g. `"MANIFEST"`). `None` means env disabled.
    pub env_prefix: Option<String>,
    /// Property prefix (e.g. `"manifest"`).
    pub property_prefix: String,
    /// Command-line properties as `(key, value)` pairs, prefix included.
    pub properties: Vec<(String, String)>,
    /// Overlay supplied by the host build tool.
    pub host_config: Option<PartialConfig>,
}

impl Default for ResolveInput {
    fn default() -> Self {
        Self {
            file: None,
            env_vars: vec![],
            env_prefix: Some(DEFAULT_ENV_PREFIX.to_string()),
            property_prefix: DEFAULT_PROPERTY_PREFIX.to_string(),
            properties: vec![],
            host_config: None,
        }
    }
}

/// Resolve and validate configuration from pre-loaded inputs.
///
/// Load errors (malformed file, bad value in the file) are returned as-is.
/// A configuration that loads but breaks a rule yields
/// [`ManifestConfigError::Invalid`] carrying every problem found.
pub fn resolve(input: ResolveInput) -> Result<ResolvedConfig, ManifestConfigError> {
    let ResolveInput {
        file,
        env_vars,
        env_prefix,
        property_prefix,
        properties,
        host_config,
    } = input;

    info!("Resolving configuration");

    // 1: File
    let file_layer = match &file {
        Some((path, content)) => Some(file::parse_config(content, path)?),
        None => None,
    };

    // 2: Environment
    let env_layer = env_prefix.as_deref().map(|prefix| env::load_env(prefix, env_vars));

    // 3: Command line. Properties go through the env loader, so they need an
    // env-style prefix even when env loading is off.
    let cli_layer = (!properties.is_empty()).then(|| {
        let encoding = env_prefix.as_deref().unwrap_or(DEFAULT_ENV_PREFIX);
        overrides::load_properties(&property_prefix, encoding, properties)
    });

    // 4: Profile, only when the file asks for one
    let profile_layer = file_layer
        .as_ref()
        .and_then(|layer| layer.profile)
        .filter(|profile| *profile != Profile::BASELINE)
        .map(|profile| {
            info!(%profile, "Applying profile");
            profile.defaults()
        });

    // 5: Merge
    let resolved = merge::merge([
        (ConfigSource::HostBuildConfig, host_config),
        (ConfigSource::Profile, profile_layer),
        (ConfigSource::File, file_layer),
        (ConfigSource::Environment, env_layer),
        (ConfigSource::CommandLine, cli_layer),
    ]);

    // 6: Validate
    let report = validate::validate(resolved.config());
    if !report.is_valid() {
        error!(errors = report.error_count(), "Configuration validation failed");
        return Err(ManifestConfigError::Invalid(report));
    }

    info!(overridden = resolved.sources().len(), "Configuration resolved");
    Ok(resolved)
}
