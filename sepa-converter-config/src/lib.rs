use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

pub use v1::sepa::SEPAConfig;

mod v1 {
    /// SEPA Config
    pub mod sepa;

    pub fn current_version() -> usize {
        super::CURRENT_VERSION
    }
}

pub const CURRENT_VERSION: usize = 1;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO Error on {}: {source}", path.display())]
    IOError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "v1::current_version")]
    version: usize,
    #[serde(default)]
    sepa: v1::sepa::SEPAConfig,
}

impl Config {
    pub fn sepa(&self) -> &v1::sepa::SEPAConfig {
        &self.sepa
    }

    pub fn sepa_mut(&mut self) -> &mut v1::sepa::SEPAConfig {
        &mut self.sepa
    }

    pub fn needs_upgrade(&self) -> bool {
        self.version < CURRENT_VERSION
    }

    pub fn from_toml(toml: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(toml)?)
    }

    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string(self)?)
    }

    /// Loads the config from the default location, a missing file gives the defaults.
    pub fn load_from_file() -> ConfigResult<Self> {
        Self::load_from(&config_location())
    }

    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let config = std::fs::read_to_string(path).map_err(|source| ConfigError::IOError {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("loaded config from {}", path.display());
        Self::from_toml(&config)
    }

    pub fn save_to_file(&self) -> ConfigResult<PathBuf> {
        let path = config_location();
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let io_err = |source| ConfigError::IOError {
            path: path.to_path_buf(),
            source,
        };
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(io_err)?;
        }
        let toml = self.to_toml()?;
        let config_file = std::fs::File::create(path).map_err(io_err)?;
        let mut buf = BufWriter::new(config_file);
        buf.write_all(toml.as_bytes()).map_err(io_err)?;
        buf.flush().map_err(io_err)?;
        Ok(())
    }

    /// get a list of all things potentially wrong with the config
    pub fn config_errors(&self) -> Vec<&str> {
        let mut errors = Vec::new();
        if self.sepa().company_name.trim().is_empty() {
            errors.push("SEPA company name is empty");
        }
        if self.needs_upgrade() {
            errors.push("Config file version is outdated");
        }
        errors
    }
}

pub fn config_location() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("sepa-converter").join("config.toml")
    } else {
        PathBuf::from("sepa-converter.toml")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            sepa: v1::sepa::SEPAConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sepa_converter_types::{MessageType, SequenceType};

    #[test]
    fn reads_sepa_section() {
        let config = Config::from_toml(
            r#"
version = 1

[sepa]
company_name = "Muster GmbH"
message_type = "credit-transfer"
sequence_type = "FRST"
batch_booking = true
"#,
        )
        .unwrap();
        assert_eq!(config.sepa().company_name, "Muster GmbH");
        assert_eq!(config.sepa().message_type, MessageType::CreditTransfer);
        assert_eq!(config.sepa().sequence_type, SequenceType::Frst);
        assert!(config.sepa().batch_booking);
        assert!(config.config_errors().is_empty());
    }

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.sepa().sequence_type, SequenceType::Rcur);
        assert_eq!(config.config_errors(), vec!["SEPA company name is empty"]);
    }

    #[test]
    fn old_versions_need_upgrade() {
        let config = Config::from_toml("version = 0").unwrap();
        assert!(config.needs_upgrade());
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(Config::from_toml("[sepa]\nsequence_type = \"ONCE\"").is_err());
    }

    #[test]
    fn save_and_load() {
        let dir =
            std::env::temp_dir().join(format!("sepa-converter-config-{}", std::process::id()));
        let path = dir.join("config.toml");
        let mut config = Config::default();
        config.sepa_mut().company_name = "Muster GmbH".to_string();
        config.sepa_mut().batch_booking = true;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("sepa-converter-does-not-exist/config.toml");
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }
}
