//! Single entry point for loading the layered configuration.

use crate::config::merge::merge_policy;
use crate::config::sources::{environment, global_file, workspace_file};
use crate::config::PatchTreeConfig;
use crate::error::ApiError;
use config::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a working directory.
    ///
    /// Sources, lowest to highest precedence: built-in defaults, the global
    /// file, `<root>/config/config.toml`, `<root>/config/{PATCHTREE_ENV}.toml`,
    /// then `PATCHTREE__*` environment variables.
    pub fn load(root: &Path) -> Result<PatchTreeConfig, ApiError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, root)?;
        let builder = environment::add_to_builder(builder);

        let config: PatchTreeConfig = builder.build()?.try_deserialize()?;
        debug!(root = %root.display(), "Configuration loaded");
        Ok(config)
    }

    /// Load configuration from one explicit file, still honoring defaults and
    /// environment overrides
    pub fn load_from_file(path: &Path) -> Result<PatchTreeConfig, ApiError> {
        if !path.exists() {
            return Err(ApiError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let builder = merge_policy::builder_with_defaults()?
            .add_source(File::from(path.to_path_buf()).required(true));
        let builder = environment::add_to_builder(builder);

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Location of the user-level config file, if HOME is known
    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }

    /// Render an effective configuration as TOML
    pub fn render(config: &PatchTreeConfig) -> Result<String, ApiError> {
        toml::to_string_pretty(config)
            .map_err(|e| ApiError::ConfigError(format!("Failed to render config: {}", e)))
    }
}
