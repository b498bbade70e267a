//! # Configuration
//!
//! Settings come in three layers, later ones winning:
//!
//! 1. a named profile (`dev`, `test`, `prod`), see [`AppConfig::profile`];
//! 2. an optional TOML file holding any subset of the fields;
//! 3. command-line flags and their environment variables.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown configuration profile '{0}' (expected dev, test or prod)")]
    UnknownProfile(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to load data file {path}: {source}")]
    Data {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path segment between the host and the resource type in every link.
    #[serde(default = "default_api_url_prefix")]
    pub api_url_prefix: String,

    /// Channel capacity of the store actor.
    #[serde(default = "default_store_buffer")]
    pub store_buffer: usize,

    /// Relationship hops followed when building `included`.
    #[serde(default = "default_include_depth")]
    pub include_depth: usize,

    /// JSON snapshot the store starts from. Empty store when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
}

fn default_api_url_prefix() -> String {
    "/api/1.0".to_string()
}

fn default_store_buffer() -> usize {
    32
}

fn default_include_depth() -> usize {
    2
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url_prefix: default_api_url_prefix(),
            store_buffer: default_store_buffer(),
            include_depth: default_include_depth(),
            data_file: None,
        }
    }
}

/// Fields a TOML file may override. Everything is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    api_url_prefix: Option<String>,
    store_buffer: Option<usize>,
    include_depth: Option<usize>,
    data_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn profile(name: &str) -> Result<Self, ConfigError> {
        match name {
            "dev" => Ok(Self::default()),
            "test" => Ok(Self {
                store_buffer: 8,
                ..Self::default()
            }),
            "prod" => Ok(Self {
                store_buffer: 256,
                include_depth: 1,
                ..Self::default()
            }),
            other => Err(ConfigError::UnknownProfile(other.to_string())),
        }
    }

    /// Applies the fields present in a TOML document.
    pub fn merge_toml(mut self, contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(prefix) = file.api_url_prefix {
            self.api_url_prefix = prefix;
        }
        if let Some(buffer) = file.store_buffer {
            self.store_buffer = buffer;
        }
        if let Some(depth) = file.include_depth {
            self.include_depth = depth;
        }
        if file.data_file.is_some() {
            self.data_file = file.data_file;
        }
        self.validate()?;
        Ok(self)
    }

    /// Rejects settings the store actor can't start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store_buffer == 0 {
            return Err(ConfigError::Invalid(
                "store_buffer must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn merge_file(self, path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.merge_toml(&contents, path)
    }

    /// Profile, then optional file, then `data_file` from the command line.
    pub fn load(
        profile: &str,
        file: Option<&Path>,
        data_file: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::profile(profile)?;
        if let Some(path) = file {
            config = config.merge_file(path)?;
        }
        if data_file.is_some() {
            config.data_file = data_file;
        }
        config.validate()?;
        Ok(config)
    }
}
