use crate::error::Error;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub files: FilesConfig,
}

/// Where students are read from and written to.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FilesConfig {
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("students.csv"),
            destination: PathBuf::from("students-out.csv"),
        }
    }
}

impl Config {
    /// Load the configuration from `path`. A missing file yields the default
    /// configuration. Relative file paths are taken from the directory
    /// holding the configuration file.
    pub fn load(path: &Path) -> Result<Config, Error> {
        if !path.exists() {
            debug!(path = %path.display(), "no configuration file, using defaults");
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_owned(),
            source,
        })?;
        let mut config = Self::parse(&content).map_err(|source| Error::ConfigParse {
            path: path.to_owned(),
            source,
        })?;
        if let Some(base) = path.parent() {
            config.files.source = base.join(&config.files.source);
            config.files.destination = base.join(&config.files.destination);
        }
        debug!(?config, "configuration loaded");
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Config, toml::de::Error> {
        toml::from_str(content)
    }
}
