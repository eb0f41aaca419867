//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod scan;

use std::path::{Path, PathBuf};

use resibo_core::ResiboConfig;

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("resibo")
        .join("config.json")
}

/// Load the configuration from `--config`, the default path, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<ResiboConfig> {
    if let Some(path) = config_path {
        return Ok(ResiboConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        Ok(ResiboConfig::from_file(&default_path)?)
    } else {
        Ok(ResiboConfig::default())
    }
}
