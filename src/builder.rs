use std::path::{Path, PathBuf};

use crate::env::DEFAULT_ENV_PREFIX;
use crate::error::ManifestConfigError;
use crate::file::{self, DEFAULT_FILE_NAME};
use crate::merge::ResolvedConfig;
use crate::model::PartialConfig;
use crate::ops::{self, ConfigResult};
use crate::overrides::DEFAULT_PROPERTY_PREFIX;
use crate::resolve::{self, ResolveInput};
use crate::types::ConfigAction;

/// Entry point for building a configuration resolver.
///
/// ```ignore
/// let resolved = Resolver::builder()
///     .project_dir(".")
///     .property("manifest.output.formats", "json,html")
///     .resolve()?;
/// ```
pub struct Resolver;

impl Resolver {
    pub fn builder() -> ResolverBuilder {
        ResolverBuilder::new()
    }
}

/// Collects the sources for one resolution, performs the I/O, and hands the
/// result to the pure [`resolve`](crate::resolve) pipeline.
pub struct ResolverBuilder {
    project_dir: Option<PathBuf>,
    file_name: Option<String>,
    env_prefix: Option<String>,
    env_enabled: bool,
    env_vars: Option<Vec<(String, String)>>,
    property_prefix: Option<String>,
    properties: Vec<(String, String)>,
    host_config: Option<PartialConfig>,
}

impl ResolverBuilder {
    fn new() -> Self {
        Self {
            project_dir: None,
            file_name: None,
            env_prefix: None,
            env_enabled: true,
            env_vars: None,
            property_prefix: None,
            properties: Vec::new(),
            host_config: None,
        }
    }

    /// Directory holding the config file. Required.
    pub fn project_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.project_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Config file name inside the project directory. Defaults to `.deploy-manifest.yml`.
    pub fn file_name(mut self, name: &str) -> Self {
        self.file_name = Some(name.to_string());
        self
    }

    /// Environment variable prefix, without the trailing `_`. Defaults to `MANIFEST`.
    pub fn env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Ignore environment variables entirely.
    pub fn no_env(mut self) -> Self {
        self.env_enabled = false;
        self
    }

    /// Use these pairs instead of the process environment.
    pub fn env_vars(mut self, vars: impl IntoIterator<Item = (String, String)>) -> Self {
        self.env_vars = Some(vars.into_iter().collect());
        self
    }

    /// Command-line property prefix, without the trailing `.`. Defaults to `manifest`.
    pub fn property_prefix(mut self, prefix: &str) -> Self {
        self.property_prefix = Some(prefix.to_string());
        self
    }

    /// Add one command-line property, prefix included (`manifest.git.depth`).
    /// Later calls win over earlier ones for the same key.
    pub fn property(mut self, key: &str, value: &str) -> Self {
        self.properties.push((key.to_string(), value.to_string()));
        self
    }

    pub fn properties(mut self, properties: impl IntoIterator<Item = (String, String)>) -> Self {
        self.properties.extend(properties);
        self
    }

    /// Overlay handed over by the host build tool. It ranks above the plugin
    /// defaults and below everything else.
    pub fn host_config(mut self, config: PartialConfig) -> Self {
        self.host_config = Some(config);
        self
    }

    fn effective_project_dir(&self) -> Result<&Path, ManifestConfigError> {
        self.project_dir
            .as_deref()
            .ok_or(ManifestConfigError::ProjectDirRequired)
    }

    fn effective_file_name(&self) -> &str {
        self.file_name.as_deref().unwrap_or(DEFAULT_FILE_NAME)
    }

    fn effective_env_prefix(&self) -> Option<String> {
        if !self.env_enabled {
            return None;
        }
        Some(
            self.env_prefix
                .clone()
                .unwrap_or_else(|| DEFAULT_ENV_PREFIX.to_string()),
        )
    }

    fn build_input(&self) -> Result<ResolveInput, ManifestConfigError> {
        let dir = self.effective_project_dir()?;
        let file = file::read_config_file(dir, self.effective_file_name())?;

        let env_prefix = self.effective_env_prefix();
        let env_vars = match (&env_prefix, &self.env_vars) {
            (None, _) => vec![],
            (Some(_), Some(vars)) => vars.clone(),
            (Some(_), None) => std::env::vars().collect(),
        };

        Ok(ResolveInput {
            file,
            env_vars,
            env_prefix,
            property_prefix: self
                .property_prefix
                .clone()
                .unwrap_or_else(|| DEFAULT_PROPERTY_PREFIX.to_string()),
            properties: self.properties.clone(),
            host_config: self.host_config.clone(),
        })
    }

    /// Load every source, merge and validate.
    pub fn resolve(self) -> Result<ResolvedConfig, ManifestConfigError> {
        let input = self.build_input()?;
        resolve::resolve(input)
    }

    pub fn handle_and_print(self, action: &ConfigAction) -> Result<(), ManifestConfigError> {
        let result = self.handle(action)?;
        print!("{result}");
        Ok(())
    }

    pub fn handle(self, action: &ConfigAction) -> Result<ConfigResult, ManifestConfigError> {
        match action {
            ConfigAction::Validate => {
                let resolved = self.resolve()?;
                Ok(ops::validated(&resolved))
            }
            ConfigAction::List => {
                let resolved = self.resolve()?;
                Ok(ops::list_values(&resolved))
            }
            ConfigAction::Get { key } => {
                let resolved = self.resolve()?;
                ops::get_value(&resolved, key)
            }
            ConfigAction::Gen { output } => {
                let template = ops::generate_template();
                match output {
                    Some(path) => {
                        if let Some(parent) = path.parent()
                            && !parent.as_os_str().is_empty()
                        {
                            std::fs::create_dir_all(parent).map_err(|e| {
                                ManifestConfigError::IoError {
                                    path: parent.to_path_buf(),
                                    source: e,
                                }
                            })?;
                        }
                        std::fs::write(path, &template).map_err(|e| ManifestConfigError::IoError {
                            path: path.clone(),
                            source: e,
                        })?;
                        Ok(ConfigResult::TemplateWritten { path: path.clone() })
                    }
                    None => Ok(ConfigResult::Template(template)),
                }
            }
        }
    }
}
