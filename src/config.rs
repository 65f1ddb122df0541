//! Configuration file handling
//!
//! This module provides:
//! - Loading of the optional `~/.bomr.toml` file, or a file given explicitly
//! - Conversion of the raw TOML values into policies, repositories and
//!   prohibited version ranges
//!
//! Values given on the command line take precedence; merging happens in the
//! orchestrator.

use crate::error::ConfigError;
use crate::registry::MAVEN_CENTRAL_URL;
use crate::upgrade::{ProhibitedVersions, UpgradePolicy};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the configuration in the home directory
pub const CONFIG_FILE_NAME: &str = ".bomr.toml";

/// Contents of the configuration file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub upgrade: UpgradeConfig,
}

/// The `[upgrade]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpgradeConfig {
    /// Policy name such as `same-major-version`
    pub policy: Option<String>,
    /// Maven repositories to search, Maven Central when empty
    pub repositories: Vec<String>,
    /// Prohibited version ranges keyed by project name
    pub prohibited: BTreeMap<String, Vec<String>>,
}

impl Config {
    /// Load the configuration
    ///
    /// An explicit path must exist. Without one, `~/.bomr.toml` is read when
    /// present and defaults are used otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                debug!("No configuration file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Read and parse the configuration at `path`
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))?;
        let config = Self::parse(&content, path)?;
        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parse TOML `content`; `path` only describes the source in errors
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::toml_parse_error(path, e.to_string()))
    }

    /// The configured policy, if any
    pub fn policy(&self) -> Result<Option<UpgradePolicy>, ConfigError> {
        self.upgrade
            .policy
            .as_deref()
            .map(str::parse)
            .transpose()
    }

    /// The configured repositories, Maven Central when none are listed
    pub fn repositories(&self) -> Vec<String> {
        if self.upgrade.repositories.is_empty() {
            vec![MAVEN_CENTRAL_URL.to_string()]
        } else {
            self.upgrade.repositories.clone()
        }
    }

    /// The configured prohibitions, with every range parsed
    pub fn prohibited_versions(&self) -> Result<ProhibitedVersions, ConfigError> {
        let mut prohibited = ProhibitedVersions::new();
        for (project, ranges) in &self.upgrade.prohibited {
            prohibited.add_all(project, ranges.as_slice())?;
        }
        Ok(prohibited)
    }
}

/// `~/.bomr.toml`, if the home directory is known
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| config_path_with_home(&home))
}

/// Location of the configuration file under `home`
pub fn config_path_with_home(home: &Path) -> PathBuf {
    home.join(CONFIG_FILE_NAME)
}
