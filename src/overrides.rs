//! Command-line properties (`-Dmanifest.output.formats=json,html`).
//!
//! Properties are re-encoded as environment-style pairs and handed to the env
//! loader, so both sources share one set of conversion rules. Only the syntax
//! and the priority tier differ.

use tracing::debug;

use crate::convert;
use crate::env;
use crate::model::PartialConfig;

/// Prefix of command-line properties read by default.
pub const DEFAULT_PROPERTY_PREFIX: &str = "manifest";

/// Build a partial layer from `{prefix}.<dotted.path>` properties.
///
/// `manifest.output.archiveFormat=jar` becomes `{ENV_PREFIX}_OUTPUT_ARCHIVEFORMAT=jar`
/// and goes through [`load_env`](env::load_env) with `env_prefix`.
/// Properties without the prefix are ignored. If multiple entries target the
/// same key, the last one wins.
pub fn load_properties(
    prefix: &str,
    env_prefix: &str,
    properties: impl IntoIterator<Item = (String, String)>,
) -> PartialConfig {
    let encoded: Vec<(String, String)> = properties
        .into_iter()
        .filter_map(|(key, value)| {
            let path = convert::property_to_path(&key, prefix)?;
            let env_key = format!("{env_prefix}_{}", path.to_uppercase().replace('.', "_"));
            debug!(property = %key, variable = %env_key, "Re-encoded command-line property");
            Some((env_key, value))
        })
        .collect();

    env::load_env(env_prefix, encoded)
}
