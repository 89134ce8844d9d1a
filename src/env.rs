use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::convert;
use crate::fields;
use crate::model::PartialConfig;

/// Prefix of environment variables read by default.
pub const DEFAULT_ENV_PREFIX: &str = "MANIFEST";

/// Build a partial layer from environment variables matching `{PREFIX}_*`.
///
/// The part after the prefix is lowercased and `_` becomes `.`, so
/// `MANIFEST_DEPENDENCIES_TREE_DEPTH` sets `dependencies.tree.depth`.
/// camelCase leaves can be written split or joined: both
/// `MANIFEST_OUTPUT_ARCHIVE_FORMAT` and `MANIFEST_OUTPUT_ARCHIVEFORMAT` reach
/// `output.archiveFormat`.
///
/// Variables are applied in name order, whatever order they arrive in. When
/// several names reach the same field, the last name wins and the loss is
/// logged.
///
/// Unknown names and unconvertible values are logged and skipped; one bad
/// variable never prevents the others from loading.
///
/// Takes an iterator so tests can pass synthetic data instead of `std::env::vars()`.
pub fn load_env(prefix: &str, vars: impl IntoIterator<Item = (String, String)>) -> PartialConfig {
    let mut matched: Vec<(String, String, String)> = vars
        .into_iter()
        .filter_map(|(key, value)| {
            let path = convert::env_key_to_path(&key, prefix)?;
            Some((key, path, value))
        })
        .collect();
    // Stable, so repeats of one name keep their input order.
    matched.sort_by(|a, b| a.0.cmp(&b.0));

    let mut config = PartialConfig::default();
    let mut applied: BTreeMap<&'static str, String> = BTreeMap::new();

    for (key, path, value) in matched {
        let Some(field) = fields::lookup(&path) else {
            if fields::has_known_root(&path) {
                warn!(variable = %key, "Unknown configuration property in environment variable");
            } else {
                warn!(variable = %key, "Unknown configuration section in environment variable");
            }
            continue;
        };

        match field.slot(&mut config).assign_str(&value) {
            Ok(()) => {
                debug!(variable = %key, field = field.path(), "Applied environment variable");
                if let Some(previous) = applied.insert(field.path(), key.clone())
                    && previous != key
                {
                    warn!(
                        variable = %key,
                        overridden = %previous,
                        field = field.path(),
                        "Several environment variables set the same field"
                    );
                }
            }
            Err(e) => warn!(variable = %key, field = field.path(), "Skipping environment variable: {e}"),
        }
    }

    config
}
