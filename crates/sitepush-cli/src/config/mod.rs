//! Configuration file loading

use serde::Deserialize;
use sitepush_core::{DeployConfig, DeployError};
use std::path::{Path, PathBuf};

/// Default configuration file, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "sitepush.toml";

/// Raw shape of `sitepush.toml` before validation.
#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub environment: String,
    pub site_id: String,
    pub upload_key: String,
    pub public_folder: PathBuf,
}

impl ConfigFile {
    /// Resolve the environment name against the fixed table, producing a
    /// validated config. Fails before any network activity.
    pub fn into_config(self) -> Result<DeployConfig, DeployError> {
        let environment = self.environment.parse()?;
        Ok(DeployConfig {
            environment,
            site_id: self.site_id,
            upload_key: self.upload_key,
            public_folder: self.public_folder,
        })
    }
}

/// Load and validate the configuration file at `path`.
pub fn load(path: &Path) -> Result<DeployConfig, DeployError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| DeployError::Config(format!("could not read {}: {}", path.display(), e)))?;

    let file: ConfigFile = toml::from_str(&raw)
        .map_err(|e| DeployError::Config(format!("could not parse {}: {}", path.display(), e)))?;

    file.into_config()
}
