//! Configuration loading from davit.toml.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Session settings for the simulated caller.
    pub session: SessionConfig,
}

/// Session settings for the simulated caller.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Whether the caller advertises sampling support.
    pub sampling: bool,

    /// Directory the read_document tool serves from.
    pub documents_dir: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            sampling: true,
            documents_dir: PathBuf::from("documents"),
        }
    }
}

impl Config {
    /// Load from `path` if it exists; fall back to defaults otherwise.
    /// A malformed file is a startup error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| Error::Config(e.to_string()))
    }
}
