//! Upgrade policies
//!
//! A policy decides which newer versions count as acceptable upgrades of the
//! version a project currently uses.

use crate::error::ConfigError;
use crate::version::{DependencyVersion, VersionPredicates};
use std::fmt;
use std::str::FromStr;

/// Rule restricting which newer versions are upgrade candidates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UpgradePolicy {
    /// Any newer version
    #[default]
    Any,
    /// Newer versions with the same major version
    SameMajorVersion,
    /// Newer versions with the same major and minor version
    SameMinorVersion,
}

impl UpgradePolicy {
    /// Returns true if `candidate` is an acceptable upgrade from `current`
    pub fn test(&self, candidate: &DependencyVersion, current: &DependencyVersion) -> bool {
        match self {
            UpgradePolicy::Any => candidate.is_newer_than(current),
            UpgradePolicy::SameMajorVersion => candidate.is_same_major_and_newer_than(current),
            UpgradePolicy::SameMinorVersion => candidate.is_same_minor_and_newer_than(current),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UpgradePolicy::Any => "any",
            UpgradePolicy::SameMajorVersion => "same-major-version",
            UpgradePolicy::SameMinorVersion => "same-minor-version",
        }
    }
}

impl FromStr for UpgradePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "any" => Ok(UpgradePolicy::Any),
            "same-major-version" => Ok(UpgradePolicy::SameMajorVersion),
            "same-minor-version" => Ok(UpgradePolicy::SameMinorVersion),
            _ => Err(ConfigError::InvalidPolicy {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for UpgradePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
