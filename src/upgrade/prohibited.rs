//! Prohibited version ranges, keyed by project display name

use crate::error::ConfigError;
use crate::version::{DependencyVersion, VersionRange};
use std::collections::HashMap;

/// Versions that must never be offered as upgrades
#[derive(Debug, Clone, Default)]
pub struct ProhibitedVersions {
    ranges: HashMap<String, Vec<VersionRange>>,
}

impl ProhibitedVersions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prohibit `range` for the project named `project`
    pub fn add(&mut self, project: impl Into<String>, range: VersionRange) {
        self.ranges.entry(project.into()).or_default().push(range);
    }

    /// Parse and add every range expression for `project`
    pub fn add_all<S: AsRef<str>>(
        &mut self,
        project: &str,
        expressions: &[S],
    ) -> Result<(), ConfigError> {
        for expression in expressions {
            self.add(project, VersionRange::parse(expression.as_ref())?);
        }
        Ok(())
    }

    /// Parse and add a `Project Name=RANGE` pair
    pub fn add_pair(&mut self, pair: &str) -> Result<(), ConfigError> {
        let (project, range) = parse_pair(pair)?;
        self.add(project, range);
        Ok(())
    }

    /// Returns true unless `version` falls inside a range prohibited for `project`
    pub fn is_permitted(&self, project: &str, version: &DependencyVersion) -> bool {
        self.ranges
            .get(project)
            .map_or(true, |ranges| !ranges.iter().any(|r| r.contains(version)))
    }

    /// Ranges configured for `project`
    pub fn ranges_for(&self, project: &str) -> &[VersionRange] {
        self.ranges.get(project).map_or(&[], Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

/// Split a `Project Name=RANGE` pair as given on the command line
pub fn parse_pair(pair: &str) -> Result<(String, VersionRange), ConfigError> {
    let invalid = || ConfigError::InvalidProhibition {
        value: pair.to_string(),
    };
    let (project, range) = pair.split_once('=').ok_or_else(invalid)?;
    let project = project.trim();
    if project.is_empty() {
        return Err(invalid());
    }
    Ok((project.to_string(), VersionRange::parse(range)?))
}
