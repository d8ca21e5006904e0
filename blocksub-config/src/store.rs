//! Config store: reads `<config dir>/blocksub.json`, repairs it against the
//! baked-in defaults, and writes the repaired document back.

use crate::document::SubstitutionConfig;
use crate::error::{ConfigError, ConfigResult};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// File name of the configuration document inside the config directory.
pub const CONFIG_FILE_NAME: &str = "blocksub.json";

/// Disk-backed home of the configuration document.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Targets [`CONFIG_FILE_NAME`] inside `config_dir`.
    pub fn new(config_dir: impl AsRef<Path>) -> Self {
        Self::at(config_dir.as_ref().join(CONFIG_FILE_NAME))
    }

    /// Targets an explicit file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads, repairs, and writes back the document.
    ///
    /// Never fails: a missing file is populated from the defaults, and a read
    /// or parse failure falls back to them. A failed write-back is logged and
    /// the in-memory document is still returned.
    pub fn load(&self) -> SubstitutionConfig {
        let defaults = SubstitutionConfig::defaults();

        let mut config = if !self.path.exists() {
            info!("No config file at {:?}, writing defaults", self.path);
            defaults.clone()
        } else {
            match self.read() {
                Ok(config) => {
                    info!(
                        "Loaded config from {:?} ({} mappings)",
                        self.path,
                        config.block_mappings.len()
                    );
                    config
                }
                Err(e) => {
                    warn!("{}. Falling back to defaults.", e);
                    defaults.clone()
                }
            }
        };

        config.repair(&defaults);

        if let Err(e) = self.save(&config) {
            error!("{}", e);
        }

        config
    }

    /// Reads and parses the document without repairing it.
    pub fn read(&self) -> ConfigResult<SubstitutionConfig> {
        let contents = std::fs::read_to_string(&self.path).map_err(|source| ConfigError::Read {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Writes `config` as pretty JSON, creating parent directories.
    pub fn save(&self, config: &SubstitutionConfig) -> ConfigResult<()> {
        let mut json = serde_json::to_string_pretty(config)?;
        json.push('\n');

        let write = |path: &Path| -> std::io::Result<()> {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(path, json.as_bytes())
        };

        write(&self.path).map_err(|source| ConfigError::Write {
            path: self.path.clone(),
            source,
        })
    }
}
