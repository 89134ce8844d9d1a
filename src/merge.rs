use std::cmp::Reverse;
use std::collections::BTreeMap;

use serde_json::Value;
use tracing::{debug, info};

use crate::fields;
use crate::model::{ManifestConfig, PartialConfig};
use crate::types::ConfigSource;

/// The final configuration plus where each field came from.
///
/// Built once by [`merge`]; read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    config: ManifestConfig,
    sources: BTreeMap<&'static str, ConfigSource>,
}

impl ResolvedConfig {
    pub fn config(&self) -> &ManifestConfig {
        &self.config
    }

    pub fn into_config(self) -> ManifestConfig {
        self.config
    }

    /// Value of a leaf by dotted path, or `None` for an unknown path.
    pub fn get(&self, path: &str) -> Option<Value> {
        fields::find(path).map(|field| field.read(&self.config))
    }

    /// Which source set the field. Untracked paths report [`ConfigSource::Default`].
    pub fn source(&self, path: &str) -> ConfigSource {
        self.sources.get(path).copied().unwrap_or(ConfigSource::Default)
    }

    /// Whether any source other than the defaults set the field.
    pub fn is_explicitly_set(&self, path: &str) -> bool {
        self.sources.contains_key(path)
    }

    /// Provenance of every field some source changed, keyed by dotted path.
    pub fn sources(&self) -> &BTreeMap<&'static str, ConfigSource> {
        &self.sources
    }
}

/// Fold partial layers onto the plugin defaults.
///
/// Absent layers are skipped. The rest are applied lowest priority first, so a
/// higher-priority layer overwrites what a lower one set. Layers sharing a
/// tier keep their input order. A field's provenance is recorded only when a
/// layer actually changes its value; lists are replaced whole, and an explicit
/// empty list counts as a value.
pub fn merge(layers: impl IntoIterator<Item = (ConfigSource, Option<PartialConfig>)>) -> ResolvedConfig {
    let mut present: Vec<(ConfigSource, PartialConfig)> = layers
        .into_iter()
        .filter_map(|(source, layer)| layer.map(|layer| (source, layer)))
        .collect();
    present.sort_by_key(|(source, _)| Reverse(source.priority()));

    let mut config = ManifestConfig::default();
    let mut sources = BTreeMap::new();

    for (source, layer) in &present {
        for field in fields::all() {
            if field.merge(&mut config, layer) {
                debug!(field = field.path(), %source, "Field overridden");
                sources.insert(field.path(), *source);
            }
        }
    }

    info!(layers = present.len(), overridden = sources.len(), "Merged configuration layers");
    ResolvedConfig { config, sources }
}
