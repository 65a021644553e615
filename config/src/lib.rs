//! Configuration loading for semu.
//!
//! Reads `~/.semu/config.toml`. Every section and key is optional; the raw
//! TOML structs stay private and are resolved into [`EngineSettings`] at the
//! parse boundary.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use toml::de;
use thiserror::Error;

pub const DEFAULT_MAX_ROUNDS: u32 = 64;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] de::Error),
    #[error("expansion.max_rounds must be at least 1")]
    InvalidMaxRounds,
}

#[derive(Debug, Default, Deserialize)]
pub struct SemuConfig {
    pub expansion: Option<ExpansionConfig>,
    pub run: Option<RunConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExpansionConfig {
    pub max_rounds: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RunConfig {
    pub default_degree: Option<u32>,
}

/// Validated settings handed to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    max_rounds: u32,
    default_degree: u32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
            default_degree: 0,
        }
    }
}

impl EngineSettings {
    #[must_use]
    pub const fn max_rounds(&self) -> u32 {
        self.max_rounds
    }

    #[must_use]
    pub const fn default_degree(&self) -> u32 {
        self.default_degree
    }
}

impl SemuConfig {
    /// Load the user config. `Ok(None)` when there is no file to read.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let Some(path) = config_path() else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| {
            tracing::warn!("Failed to read config at {:?}: {}", path, source);
            ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Self::parse(&content).inspect_err(|err| {
            tracing::warn!("Failed to parse config at {:?}: {}", path, err);
        })
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn resolve(&self) -> Result<EngineSettings, ConfigError> {
        let defaults = EngineSettings::default();
        let max_rounds = self
            .expansion
            .as_ref()
            .and_then(|expansion| expansion.max_rounds)
            .unwrap_or(defaults.max_rounds);
        if max_rounds == 0 {
            return Err(ConfigError::InvalidMaxRounds);
        }
        let default_degree = self
            .run
            .as_ref()
            .and_then(|run| run.default_degree)
            .unwrap_or(defaults.default_degree);
        Ok(EngineSettings {
            max_rounds,
            default_degree,
        })
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".semu").join("config.toml"))
}
