//! Reading `config.toml` into a `ParleyConfig`.
//!
//! Loading only parses; range and identifier checks live in
//! `validation::validate`, which `load_config` runs afterwards.

use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, info};

use crate::error::ConfigError;
use crate::schema::ParleyConfig;

use super::paths::{create_default_config, default_config_path};

/// Parse the TOML file at `path`. Missing sections and keys take their
/// defaults.
pub fn load_from_path(path: &Path) -> Result<ParleyConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ConfigError::FileNotFound(path.to_path_buf()),
        _ => ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
    })?;

    let config = parse_config(&text)?;
    debug!(path = %path.display(), "config parsed");
    Ok(config)
}

pub(crate) fn parse_config(text: &str) -> Result<ParleyConfig, ConfigError> {
    toml::from_str(text).map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Load the config from the platform default path, writing the starter
/// template there first if the file does not exist yet.
pub fn load_default() -> Result<ParleyConfig, ConfigError> {
    let path = default_config_path()?;

    match load_from_path(&path) {
        Err(ConfigError::FileNotFound(_)) => {
            info!(path = %path.display(), "no config file, creating one");
            create_default_config(&path)?;
            Ok(ParleyConfig::default())
        }
        other => other,
    }
}
