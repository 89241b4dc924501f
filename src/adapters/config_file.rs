//! JSON file configuration adapter.
//!
//! Implements [`ConfigPort`] on top of a single JSON document.  A missing
//! file is not an error: the monitor starts from defaults.  Saves go to a
//! sibling temp file first and are renamed into place, so a crash never
//! leaves a half-written config behind.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::info;

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::SystemConfig;

pub struct JsonConfigFile {
    path: PathBuf,
}

impl JsonConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigPort for JsonConfigFile {
    fn load(&self) -> Result<SystemConfig, ConfigError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("no config at {}, using defaults", self.path.display());
                return Ok(SystemConfig::default());
            }
            Err(e) => return Err(ConfigError::IoError(e.to_string())),
        };
        let config: SystemConfig =
            serde_json::from_str(&text).map_err(|e| ConfigError::Corrupted(e.to_string()))?;
        config.validate()?;
        info!(
            "loaded config from {} ({} sensors)",
            self.path.display(),
            config.sensors.len()
        );
        Ok(config)
    }

    fn save(&self, config: &SystemConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)
            .map_err(|e| ConfigError::Corrupted(e.to_string()))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| ConfigError::IoError(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        Ok(())
    }
}
